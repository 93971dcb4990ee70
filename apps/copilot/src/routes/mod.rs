pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;
use crate::workflow::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/session", get(handlers::handle_get_session))
        // Fetches (replace the canonical list)
        .route("/api/v1/rankings", post(handlers::handle_rank))
        .route("/api/v1/interns", post(handlers::handle_list_interns))
        // Selection
        .route("/api/v1/selection/toggle", post(handlers::handle_toggle))
        .route(
            "/api/v1/selection/toggle-all",
            post(handlers::handle_toggle_all),
        )
        // Scheduling
        .route(
            "/api/v1/schedule/dialog",
            post(handlers::handle_open_dialog).delete(handlers::handle_cancel_dialog),
        )
        .route(
            "/api/v1/schedule/autonomous",
            post(handlers::handle_schedule_autonomous),
        )
        .route(
            "/api/v1/schedule/confirm",
            post(handlers::handle_schedule_confirm),
        )
        .route("/api/v1/notice", delete(handlers::handle_clear_notice))
        .with_state(state)
}
