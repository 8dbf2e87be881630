use super::{body, lookup_response, parse_id};
use crate::error::AppError;
use crate::filters::{constructor_filter, page, Params};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use core_types::{Constructor, ConstructorInput};
use std::sync::Arc;

const ENTITY: &str = "Constructor";

/// # GET /constructors
/// Lists constructors, or filters by `name`, `nationality` or `ref`.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
) -> Result<Response, AppError> {
    let filter = constructor_filter(&params);
    let lookup = state.constructors.find(&filter, page(&params)).await?;
    lookup_response(lookup, ENTITY)
}

/// # POST /constructors
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConstructorInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Constructor>), AppError> {
    let input = body(payload)?;
    let constructor = state.constructors.create(&input).await?;
    tracing::info!(id = %constructor.id, name = %constructor.name, "Constructor created.");
    Ok((StatusCode::CREATED, Json(constructor)))
}

/// # GET /constructors/:id
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Constructor>, AppError> {
    let id = parse_id(&id)?;
    state
        .constructors
        .get(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(ENTITY))
}

/// # PUT /constructors/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ConstructorInput>, JsonRejection>,
) -> Result<Json<Constructor>, AppError> {
    let id = parse_id(&id)?;
    let input = body(payload)?;
    let constructor = state
        .constructors
        .update(id, &input)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;
    tracing::info!(%id, "Constructor updated.");
    Ok(Json(constructor))
}

/// # DELETE /constructors/:id
/// Refused with 409 while any driver still belongs to the constructor.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    if !state.constructors.delete(id).await? {
        return Err(AppError::NotFound(ENTITY));
    }
    tracing::info!(%id, "Constructor deleted.");
    Ok(StatusCode::NO_CONTENT)
}
