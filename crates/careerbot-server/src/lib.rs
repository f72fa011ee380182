//! careerbot-server
//!
//! HTTP API for student registration and career-guidance chat.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Students
        .route("/api/students/register", post(routes::students::register))
        .route("/api/students/{id}", get(routes::students::get_student))
        .route(
            "/api/students/{id}/chats",
            get(routes::students::list_chats),
        )
        // Chat
        .route("/api/chat", post(routes::chat::chat))
        .route("/api/chat/save", post(routes::chat::save_chat))
        .layer(axum_mw::from_fn(middleware::access_log::access_log))
        .layer(cors)
        .with_state(state)
}
