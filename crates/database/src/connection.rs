use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

/// Builds connect options from the validated settings.
///
/// Options are assembled field by field instead of through a URL, so a
/// password containing `@` or `/` needs no escaping.
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name)
}

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is created once at startup and handed to every repository; it
/// lives as long as the process.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options(settings))
        .await
        .map_err(DbError::ConnectionError)?;

    tracing::info!(
        host = %settings.host,
        port = settings.port,
        database = %settings.name,
        "Connected to PostgreSQL."
    );
    Ok(pool)
}
