use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Invalid value '{value}' for filter '{param}'")]
    InvalidFilter { param: &'static str, value: String },
    #[error("Not found: {0}")]
    NotFound(&'static str),
    #[error("Constructor not found: {0}")]
    ConstructorNotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(DbError),
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConstructorNotFound(name) => AppError::ConstructorNotFound(name),
            DbError::ConstructorInUse(id) => {
                AppError::Conflict(format!("constructor {id} is still referenced by drivers"))
            }
            other => AppError::Database(other),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// The full error is logged; the client only gets a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidId(raw) => {
                tracing::warn!(id = %raw, "Invalid ID format.");
                (StatusCode::BAD_REQUEST, "Invalid ID format".to_string())
            }
            AppError::InvalidBody(reason) => {
                tracing::warn!(%reason, "Invalid request body.");
                (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
            }
            AppError::InvalidFilter { param, value } => {
                tracing::warn!(param, %value, "Invalid filter value.");
                (StatusCode::BAD_REQUEST, format!("Invalid {param} format"))
            }
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{entity} not found")),
            AppError::ConstructorNotFound(name) => {
                tracing::warn!(constructor = %name, "Driver write named an unknown constructor.");
                (StatusCode::BAD_REQUEST, "Constructor not found".to_string())
            }
            AppError::Conflict(detail) => {
                tracing::warn!(%detail, "Write refused by a reference.");
                (
                    StatusCode::CONFLICT,
                    "The resource is still referenced by other records".to_string(),
                )
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
