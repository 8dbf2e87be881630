use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Json, Router,
};
use configuration::Settings;
use database::{
    CircuitStore, ConstructorStore, DriverService, DriverStore, PgCircuitRepository,
    PgConstructorRepository, PgDriverRepository, PgPool,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod filters;
pub mod handlers;

/// Request bodies are small JSON documents.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub constructors: Arc<dyn ConstructorStore>,
    pub drivers: Arc<dyn DriverStore>,
    pub circuits: Arc<dyn CircuitStore>,
    pub driver_service: DriverService,
}

impl AppState {
    pub fn new(
        constructors: Arc<dyn ConstructorStore>,
        drivers: Arc<dyn DriverStore>,
        circuits: Arc<dyn CircuitStore>,
    ) -> Self {
        let driver_service = DriverService::new(constructors.clone(), drivers.clone());
        Self {
            constructors,
            drivers,
            circuits,
            driver_service,
        }
    }

    /// Wires every store to PostgreSQL through one shared pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgConstructorRepository::new(pool.clone())),
            Arc::new(PgDriverRepository::new(pool.clone())),
            Arc::new(PgCircuitRepository::new(pool)),
        )
    }
}

/// Builds the full route table. Kept separate from [`run_server`] so tests
/// can drive it without a socket.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/health", get(|| async { Json("OK") }))
        .route(
            "/constructors",
            get(handlers::constructors::list).post(handlers::constructors::create),
        )
        .route(
            "/constructors/:id",
            get(handlers::constructors::get)
                .put(handlers::constructors::update)
                .delete(handlers::constructors::delete),
        )
        .route(
            "/drivers",
            get(handlers::drivers::list).post(handlers::drivers::create),
        )
        .route(
            "/drivers/:id",
            get(handlers::drivers::get)
                .put(handlers::drivers::update)
                .delete(handlers::drivers::delete),
        )
        .route(
            "/circuits",
            get(handlers::circuits::list).post(handlers::circuits::create),
        )
        .route(
            "/circuits/:id",
            get(handlers::circuits::get)
                .put(handlers::circuits::update)
                .delete(handlers::circuits::delete),
        )
        .merge(handlers::placeholders::routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Connects to the database, serves until Ctrl-C, then closes the pool.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let pool = database::connect(&settings.database).await?;
    let app = router(Arc::new(AppState::postgres(pool.clone())));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Web server listening.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
