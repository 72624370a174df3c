pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::blueprint::handlers as blueprint_handlers;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/blueprint",
            post(blueprint_handlers::handle_generate_blueprint),
        )
        .route(
            "/api/v1/interview",
            post(interview_handlers::handle_interview),
        )
        .with_state(state)
}
