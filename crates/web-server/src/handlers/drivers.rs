use super::{body, lookup_response, parse_id};
use crate::error::AppError;
use crate::filters::{driver_filter, page, Params};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use core_types::{Driver, DriverInput};
use std::sync::Arc;

const ENTITY: &str = "Driver";

/// # GET /drivers
/// `team` matches the constructor's display name. `number` must be an integer.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
) -> Result<Response, AppError> {
    let filter = driver_filter(&params)?;
    let lookup = state.drivers.find(&filter, page(&params)).await?;
    lookup_response(lookup, ENTITY)
}

/// # POST /drivers
/// The body names its constructor; an unknown name is a 400 and nothing is stored.
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DriverInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    let input = body(payload)?;
    let driver = state.driver_service.create(&input).await?;
    tracing::info!(id = %driver.id, constructor = %driver.constructor, "Driver created.");
    Ok((StatusCode::CREATED, Json(driver)))
}

/// # GET /drivers/:id
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Driver>, AppError> {
    let id = parse_id(&id)?;
    state
        .drivers
        .get(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(ENTITY))
}

/// # PUT /drivers/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<DriverInput>, JsonRejection>,
) -> Result<Json<Driver>, AppError> {
    let id = parse_id(&id)?;
    let input = body(payload)?;
    let driver = state
        .driver_service
        .update(id, &input)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    tracing::info!(%id, "Driver updated.");
    Ok(Json(driver))
}

/// # DELETE /drivers/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    if !state.drivers.delete(id).await? {
        return Err(AppError::NotFound(ENTITY));
    }
    tracing::info!(%id, "Driver deleted.");
    Ok(StatusCode::NO_CONTENT)
}
