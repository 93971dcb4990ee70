use std::sync::Arc;

use crate::gateway::Endpoints;
use crate::workflow::session::WorkflowSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single review session hosted by this process.
    pub session: Arc<WorkflowSession>,
    /// Where the session's gateway sends each operation.
    pub endpoints: Arc<Endpoints>,
}
