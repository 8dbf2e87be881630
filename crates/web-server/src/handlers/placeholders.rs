//! Routes for seasons, races, results and standings.
//!
//! Nothing is stored yet. Lists are empty arrays typed by the record they
//! will carry, and every write answers with an empty object.

use super::parse_id;
use crate::error::AppError;
use crate::AppState;
use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use core_types::{ConstructorStanding, DriverStanding, Race, RaceResult, Season};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    let router = Router::new();
    let router = resource::<Season>(router, "/seasons");
    let router = resource::<Race>(router, "/races");
    let router = resource::<RaceResult>(router, "/results");
    let router = resource::<DriverStanding>(router, "/driver-standings");
    resource::<ConstructorStanding>(router, "/constructor-standings")
}

fn resource<T>(router: Router<Arc<AppState>>, path: &str) -> Router<Arc<AppState>>
where
    T: Serialize + Send + 'static,
{
    router
        .route(path, get(list::<T>).post(create))
        .route(
            &format!("{path}/:id"),
            get(acknowledge).put(acknowledge).delete(acknowledge),
        )
}

async fn list<T: Serialize>() -> Json<Vec<T>> {
    Json(Vec::new())
}

async fn create() -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({})))
}

async fn acknowledge(Path(id): Path<String>) -> Result<Json<Value>, AppError> {
    parse_id(&id)?;
    Ok(Json(json!({})))
}
