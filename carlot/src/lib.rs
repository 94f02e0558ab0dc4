//! carlot - a small self-hostable inventory and listings API for used cars.
//!
//! The crate is organized into:
//!
//! - **[`api`]**: HTTP handlers and request/response models
//! - **[`db`]**: store traits, row models and their PostgreSQL implementations
//! - **[`auth`]**: password hashing and session tokens
//! - **[`config`]**: figment-based configuration
//! - **[`errors`]**: the API error taxonomy

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod telemetry;

use crate::db::handlers::{CarStore, Cars, UserStore, Users};
use anyhow::Context as _;
use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};

pub use config::Config;

/// Application state shared across all request handlers.
///
/// Stores are held as trait objects so tests can run the full router over
/// in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub cars: Arc<dyn CarStore>,
    pub users: Arc<dyn UserStore>,
    pub config: Config,
}

/// Create CORS layer from configuration.
///
/// Origins come from config (two local dev frontends by default); the
/// method set and header allowlist are fixed.
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.security.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>().context("invalid CORS origin")?);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
        ])
        .allow_credentials(config.security.cors.allow_credentials);

    if let Some(max_age) = config.security.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;

    let router = Router::new()
        .route("/cars", post(api::handlers::cars::create_car).get(api::handlers::cars::list_cars))
        .route(
            "/cars/{id}",
            get(api::handlers::cars::get_car)
                .put(api::handlers::cars::update_car)
                .delete(api::handlers::cars::delete_car),
        )
        .route("/login", post(api::handlers::auth::login))
        .route("/health", get(api::handlers::health::health))
        .with_state(state)
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Container for the HTTP server and its database pool.
///
/// Lifecycle: [`Application::new`] connects the pool (fatal on failure) and
/// assembles the router; [`Application::serve`] binds the listener and runs
/// until the shutdown future resolves, then drains the pool.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let database_url = config.database_url.clone().context("database_url is not configured")?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database_pool_size)
            .connect(&database_url)
            .await
            .context("failed to connect to the database")?;

        info!("Connected to the database");

        let state = AppState {
            cars: Arc::new(Cars::new(pool.clone())),
            users: Arc::new(Users::new(pool.clone())),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("carlot listening on http://{}, available at http://localhost:{}", bind_addr, self.config.port);

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
