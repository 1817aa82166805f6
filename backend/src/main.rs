//! Coffee Roast Simulator - Backend Server
//!
//! Serves roast profile generation and live, in-memory roast sessions
//! over a JSON API.

use axum::{routing::get, Router};
use shared::SystemClock;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;

pub use crate::config::Config;
use crate::config::LogFormat;
use services::RoastingService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub roasting: RoastingService,
}

impl AppState {
    pub fn new(config: Config, clock: Arc<dyn shared::Clock>) -> Self {
        let roasting = RoastingService::new(
            config.sessions.max_sessions,
            config.simulation.default_batch_size_g,
            clock,
        );
        Self {
            config: Arc::new(config),
            roasting,
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roast_sim_server=debug,shared=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    init_tracing(config.log.format);

    tracing::info!("Starting Coffee Roast Simulator Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        max_sessions = config.sessions.max_sessions,
        "Session registry ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config, Arc::new(SystemClock));

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Coffee Roast Simulator API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
