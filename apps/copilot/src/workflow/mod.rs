// Candidate review workflow: rank or list candidates, select a subset,
// submit it for interview scheduling.
// All external calls go through gateway::HiringGateway.

pub mod decode;
pub mod handlers;
pub mod notifier;
pub mod selection;
pub mod session;

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors surfaced by workflow operations.
///
/// The `Display` text of the network-stage variants is the notice shown to
/// the operator; the gateway cause stays in `source()` for logs.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to process resumes.")]
    RankingFailed(#[source] GatewayError),

    #[error("Failed to fetch intern data.")]
    ListingFailed(#[source] GatewayError),

    #[error("Failed to initiate scheduling.")]
    SchedulingFailed(#[source] GatewayError),
}
