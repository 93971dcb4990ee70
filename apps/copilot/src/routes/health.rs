use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;
use crate::workflow::session::Operation;

/// GET /health
/// Liveness plus the configured automation endpoints and which calls are in flight.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let session = &state.session;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": state.endpoints.as_ref(),
        "in_flight": {
            "ranking": session.is_busy(Operation::Ranking),
            "listing": session.is_busy(Operation::Listing),
            "scheduling": session.is_busy(Operation::Scheduling),
        }
    }))
}
