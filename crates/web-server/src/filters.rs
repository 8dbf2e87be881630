//! Query string → filter selection.
//!
//! At most one filter is honored per request. Parameters are checked in a
//! fixed order and the first one present wins, even when its value is empty.
//! With none present the request lists everything, paged.

use crate::error::AppError;
use database::{CircuitFilter, ConstructorFilter, DriverFilter, Page};
use std::collections::HashMap;

pub type Params = HashMap<String, String>;

pub fn page(params: &Params) -> Page {
    Page::parse(
        params.get("page").map(String::as_str),
        params.get("limit").map(String::as_str),
    )
}

pub fn constructor_filter(params: &Params) -> ConstructorFilter {
    if let Some(name) = params.get("name") {
        ConstructorFilter::Name(name.clone())
    } else if let Some(nationality) = params.get("nationality") {
        ConstructorFilter::Nationality(nationality.clone())
    } else if let Some(reference) = params.get("ref") {
        ConstructorFilter::Ref(reference.clone())
    } else {
        ConstructorFilter::All
    }
}

pub fn driver_filter(params: &Params) -> Result<DriverFilter, AppError> {
    let text = |param: &str| params.get(param).cloned();

    let filter = if let Some(first_name) = text("firstName") {
        DriverFilter::FirstName(first_name)
    } else if let Some(last_name) = text("lastName") {
        DriverFilter::LastName(last_name)
    } else if let Some(team) = text("team") {
        DriverFilter::Team(team)
    } else if let Some(nationality) = text("nationality") {
        DriverFilter::Nationality(nationality)
    } else if let Some(status) = text("status") {
        DriverFilter::Status(status)
    } else if let Some(reference) = text("ref") {
        DriverFilter::Ref(reference)
    } else if let Some(code) = text("code") {
        DriverFilter::Code(code)
    } else if let Some(raw) = text("number") {
        let number = raw
            .parse::<i32>()
            .map_err(|_| AppError::InvalidFilter { param: "number", value: raw.clone() })?;
        DriverFilter::Number(number)
    } else if let Some(url) = text("url") {
        DriverFilter::Url(url)
    } else {
        DriverFilter::All
    };
    Ok(filter)
}

pub fn circuit_filter(params: &Params) -> CircuitFilter {
    if let Some(name) = params.get("name") {
        CircuitFilter::Name(name.clone())
    } else if let Some(location) = params.get("location") {
        CircuitFilter::Location(location.clone())
    } else if let Some(country) = params.get("country") {
        CircuitFilter::Country(country.clone())
    } else if let Some(current) = params.get("current") {
        CircuitFilter::Current(current == "true")
    } else if let Some(reference) = params.get("ref") {
        CircuitFilter::Ref(reference.clone())
    } else if let Some(url) = params.get("url") {
        CircuitFilter::Url(url.clone())
    } else {
        CircuitFilter::All
    }
}
