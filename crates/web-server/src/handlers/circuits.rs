use super::{body, lookup_response, parse_id};
use crate::error::AppError;
use crate::filters::{circuit_filter, page, Params};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use core_types::{Circuit, CircuitInput};
use std::sync::Arc;

const ENTITY: &str = "Circuit";

/// # GET /circuits
/// `current` returns every matching circuit at once; `page`/`limit` are ignored for it.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
) -> Result<Response, AppError> {
    let filter = circuit_filter(&params);
    let lookup = state.circuits.find(&filter, page(&params)).await?;
    lookup_response(lookup, ENTITY)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CircuitInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Circuit>), AppError> {
    let input = body(payload)?;
    let circuit = state.circuits.create(&input).await?;
    tracing::info!(id = %circuit.id, name = %circuit.name, "Circuit created.");
    Ok((StatusCode::CREATED, Json(circuit)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Circuit>, AppError> {
    let id = parse_id(&id)?;
    state
        .circuits
        .get(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(ENTITY))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CircuitInput>, JsonRejection>,
) -> Result<Json<Circuit>, AppError> {
    let id = parse_id(&id)?;
    let input = body(payload)?;
    let circuit = state
        .circuits
        .update(id, &input)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    tracing::info!(%id, "Circuit updated.");
    Ok(Json(circuit))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    if !state.circuits.delete(id).await? {
        return Err(AppError::NotFound(ENTITY));
    }
    tracing::info!(%id, "Circuit deleted.");
    Ok(StatusCode::NO_CONTENT)
}
