//! Route definitions for the roast simulator

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Stateless profile generation
        .nest("/profiles", profile_routes())
        // Live roast sessions
        .nest("/sessions", session_routes())
}

/// Profile routes
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(handlers::generate))
        .route("/recommendations/:level", get(handlers::get_recommendations))
}

/// Roast session routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_sessions).post(handlers::create_session),
        )
        .route(
            "/:session_id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/:session_id/profile", post(handlers::set_profile))
        .route("/:session_id/start", post(handlers::start_roast))
        .route(
            "/:session_id/events",
            get(handlers::list_events)
                .post(handlers::record_event)
                .delete(handlers::clear_events),
        )
        .route("/:session_id/finish", post(handlers::finish_roast))
        .route("/:session_id/reset", post(handlers::reset_session))
        .route("/:session_id/tick", post(handlers::tick))
        .route("/:session_id/sample", get(handlers::sample))
        .route("/:session_id/statistics", get(handlers::get_statistics))
}
