use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[source] sqlx::Error),

    #[error("Database query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A driver write named a constructor that does not exist.
    #[error("Constructor '{0}' was not found.")]
    ConstructorNotFound(String),

    /// A constructor delete was refused because drivers still reference it.
    #[error("Constructor {0} is still referenced by at least one driver.")]
    ConstructorInUse(Uuid),
}
