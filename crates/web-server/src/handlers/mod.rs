//! HTTP handlers, one module per resource.
//!
//! Ids arrive as raw strings and are parsed here so that a malformed id is
//! a 400 with the usual error body rather than axum's plain-text rejection.

use crate::error::AppError;
use axum::{extract::rejection::JsonRejection, response::IntoResponse, Json};
use database::Lookup;
use serde::Serialize;
use uuid::Uuid;

pub mod circuits;
pub mod constructors;
pub mod drivers;
pub mod placeholders;

pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))
}

/// A single-record filter that matched nothing is a 404; an empty list is not.
pub(crate) fn lookup_response<T: Serialize>(
    lookup: Lookup<T>,
    entity: &'static str,
) -> Result<axum::response::Response, AppError> {
    match lookup {
        Lookup::One(Some(record)) => Ok(Json(record).into_response()),
        Lookup::One(None) => Err(AppError::NotFound(entity)),
        Lookup::Many(records) => Ok(Json(records).into_response()),
    }
}
