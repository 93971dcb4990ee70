//! Workflow Session — one operator's review cycle.
//!
//! Owns the canonical candidate list, the selection, the per-operation busy
//! flags, the scheduling dialog flag and the transient notice. State changes
//! only through the methods below; no lock is held across a gateway call.
//!
//! Overlapping fetches: every rank/list call takes a ticket when it starts and
//! its response is applied only if that ticket is still the latest issued.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::gateway::{HiringGateway, ScheduleRequest};
use crate::models::candidate::{candidate_keys, Candidate, CandidateKey};
use crate::models::meeting::MeetingProposal;
use crate::models::resume::ResumeFile;
use crate::workflow::decode::normalize_payload;
use crate::workflow::notifier::TransientNotifier;
use crate::workflow::selection::{SelectAllState, SelectionSet};
use crate::workflow::WorkflowError;

const AUTONOMOUS_DEFAULT_MESSAGE: &str = "Scheduling process initiated successfully!";
const CONFIRMED_DEFAULT_MESSAGE: &str = "Successfully appointed meeting!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ranking,
    Listing,
    Scheduling,
}

/// Result of a rank or list call that reached the endpoint successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The response became the canonical list.
    Applied(Vec<Candidate>),
    /// A newer fetch was issued while this one was in flight; response dropped.
    Superseded { ticket: u64 },
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResult {
    pub message: String,
    pub submitted: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub key: CandidateKey,
    pub selected: bool,
    pub name: String,
    pub summary: Option<String>,
    /// The record as received.
    pub candidate: Candidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusyFlags {
    pub ranking: bool,
    pub listing: bool,
    pub scheduling: bool,
}

/// Everything the view layer needs to render the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub candidates: Vec<CandidateView>,
    pub selected_count: usize,
    pub total_count: usize,
    pub select_all: SelectAllState,
    pub busy: BusyFlags,
    pub schedule_dialog_open: bool,
    pub notice: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Busy tracking
// ────────────────────────────────────────────────────────────────────────────

/// In-flight call counts. A flag reads busy while its count is non-zero.
#[derive(Debug, Default)]
struct BusyCounters {
    ranking: AtomicUsize,
    listing: AtomicUsize,
    scheduling: AtomicUsize,
}

impl BusyCounters {
    fn counter(&self, operation: Operation) -> &AtomicUsize {
        match operation {
            Operation::Ranking => &self.ranking,
            Operation::Listing => &self.listing,
            Operation::Scheduling => &self.scheduling,
        }
    }

    fn enter(&self, operation: Operation) -> BusyGuard<'_> {
        let counter = self.counter(operation);
        counter.fetch_add(1, Ordering::SeqCst);
        BusyGuard { counter }
    }

    fn is_busy(&self, operation: Operation) -> bool {
        self.counter(operation).load(Ordering::SeqCst) > 0
    }
}

/// Decrements on drop, so the flag resets on success, error, or a dropped future.
struct BusyGuard<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct SessionState {
    candidates: Vec<Candidate>,
    keys: Vec<CandidateKey>,
    selection: SelectionSet,
    latest_ticket: u64,
    schedule_dialog_open: bool,
}

impl SessionState {
    fn issue_ticket(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.latest_ticket
    }

    /// Swaps in a new canonical list. Keys from the old list cannot survive.
    fn replace_candidates(&mut self, candidates: Vec<Candidate>) {
        self.keys = candidate_keys(&candidates);
        self.candidates = candidates;
        self.selection.clear();
    }

    fn selected_candidates(&self) -> Vec<Candidate> {
        self.candidates
            .iter()
            .zip(&self.keys)
            .filter(|(_, key)| self.selection.contains(key))
            .map(|(candidate, _)| candidate.clone())
            .collect()
    }
}

pub struct WorkflowSession {
    gateway: Arc<dyn HiringGateway>,
    state: Mutex<SessionState>,
    busy: BusyCounters,
    notifier: TransientNotifier,
}

impl WorkflowSession {
    pub fn new(gateway: Arc<dyn HiringGateway>, notifier: TransientNotifier) -> Self {
        Self {
            gateway,
            state: Mutex::new(SessionState::default()),
            busy: BusyCounters::default(),
            notifier,
        }
    }

    /// Submits the job description and resumes to the ranking endpoint.
    ///
    /// On failure the current list is left exactly as it was.
    pub async fn rank(
        &self,
        job_description: &str,
        resumes: &[ResumeFile],
    ) -> Result<FetchOutcome, WorkflowError> {
        if job_description.trim().is_empty() || resumes.is_empty() {
            return Err(WorkflowError::Validation(
                "Please provide a job description and upload resumes.".to_string(),
            ));
        }

        let _busy = self.busy.enter(Operation::Ranking);
        let ticket = self.state.lock().await.issue_ticket();
        info!(
            "Ranking {} resume(s) (ticket {ticket})",
            resumes.len()
        );

        let payload = self
            .gateway
            .rank(job_description, resumes)
            .await
            .map_err(|e| {
                error!("Error processing resumes (ticket {ticket}): {e}");
                WorkflowError::RankingFailed(e)
            })?;

        Ok(self.apply_fetch(ticket, normalize_payload(payload)).await)
    }

    /// Asks the listing endpoint for candidates matching the role.
    ///
    /// The current list and selection are cleared before the request goes out,
    /// whatever the outcome.
    pub async fn list_candidates_for_role(
        &self,
        job_description: &str,
    ) -> Result<FetchOutcome, WorkflowError> {
        let _busy = self.busy.enter(Operation::Listing);
        let ticket = {
            let mut state = self.state.lock().await;
            state.replace_candidates(Vec::new());
            state.issue_ticket()
        };
        info!("Listing candidates for role (ticket {ticket})");

        let payload = self
            .gateway
            .list_candidates(job_description)
            .await
            .map_err(|e| {
                error!("Error fetching interns (ticket {ticket}): {e}");
                WorkflowError::ListingFailed(e)
            })?;

        Ok(self.apply_fetch(ticket, normalize_payload(payload)).await)
    }

    async fn apply_fetch(&self, ticket: u64, candidates: Vec<Candidate>) -> FetchOutcome {
        let mut state = self.state.lock().await;
        if ticket != state.latest_ticket {
            warn!(
                "Discarding response for ticket {ticket}; ticket {} is newer",
                state.latest_ticket
            );
            return FetchOutcome::Superseded { ticket };
        }

        info!("Received {} candidate(s) (ticket {ticket})", candidates.len());
        state.replace_candidates(candidates.clone());
        FetchOutcome::Applied(candidates)
    }

    /// Sends the selected candidates to the scheduling endpoint.
    ///
    /// Without a meeting the endpoint picks the timing itself. With one, the
    /// date, time and meridiem travel along and success closes the dialog.
    pub async fn schedule(
        &self,
        job_description: &str,
        meeting: Option<MeetingProposal>,
    ) -> Result<ScheduleResult, WorkflowError> {
        let selected = {
            let state = self.state.lock().await;
            if meeting.is_none() && state.candidates.is_empty() {
                return Err(WorkflowError::Validation(
                    "Please process candidates first.".to_string(),
                ));
            }
            state.selected_candidates()
        };
        if selected.is_empty() {
            return Err(WorkflowError::Validation(
                "Please select at least one candidate.".to_string(),
            ));
        }

        let _busy = self.busy.enter(Operation::Scheduling);
        if meeting.is_some() {
            self.notifier.clear().await;
        }

        let request = ScheduleRequest::new(selected, job_description, meeting.as_ref());
        info!(
            "Scheduling {} candidate(s){}",
            request.candidates.len(),
            match &meeting {
                Some(m) => format!(" on {} {} {}", m.date_input(), m.time_input(), m.meridiem()),
                None => String::new(),
            }
        );

        let reply = self.gateway.schedule(&request).await.map_err(|e| {
            error!("Error initiating scheduling: {e}");
            WorkflowError::SchedulingFailed(e)
        })?;

        let default_message = if meeting.is_some() {
            CONFIRMED_DEFAULT_MESSAGE
        } else {
            AUTONOMOUS_DEFAULT_MESSAGE
        };
        let message = reply
            .message
            .unwrap_or_else(|| default_message.to_string());

        if meeting.is_some() {
            self.state.lock().await.schedule_dialog_open = false;
        }
        self.notifier.show(message.clone()).await;

        Ok(ScheduleResult {
            message,
            submitted: request.candidates.len(),
        })
    }

    pub async fn schedule_autonomously(
        &self,
        job_description: &str,
    ) -> Result<ScheduleResult, WorkflowError> {
        self.schedule(job_description, None).await
    }

    /// Validates the dialog inputs, then schedules with an explicit meeting.
    pub async fn confirm_schedule(
        &self,
        job_description: &str,
        meeting_date: &str,
        meeting_time: &str,
    ) -> Result<ScheduleResult, WorkflowError> {
        let meeting = MeetingProposal::parse(meeting_date, meeting_time)?;
        self.schedule(job_description, Some(meeting)).await
    }

    /// Toggles one candidate. Keys outside the current list are rejected.
    pub async fn toggle(&self, key: &CandidateKey) -> Result<(), WorkflowError> {
        let mut state = self.state.lock().await;
        if !state.keys.contains(key) {
            return Err(WorkflowError::Validation(format!(
                "Unknown candidate key '{key}'"
            )));
        }
        state.selection.toggle(key);
        Ok(())
    }

    /// The "select all" checkbox, over every key in the current list.
    pub async fn toggle_all(&self) {
        let mut state = self.state.lock().await;
        let SessionState {
            keys, selection, ..
        } = &mut *state;
        selection.toggle_all(keys);
    }

    pub async fn open_schedule_dialog(&self) -> Result<(), WorkflowError> {
        let mut state = self.state.lock().await;
        if state.candidates.is_empty() {
            return Err(WorkflowError::Validation(
                "Please process candidates first.".to_string(),
            ));
        }
        state.schedule_dialog_open = true;
        Ok(())
    }

    pub async fn cancel_schedule_dialog(&self) {
        self.state.lock().await.schedule_dialog_open = false;
    }

    pub async fn clear_notice(&self) {
        self.notifier.clear().await;
    }

    pub fn is_busy(&self, operation: Operation) -> bool {
        self.busy.is_busy(operation)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let notice = self.notifier.current().await;
        let state = self.state.lock().await;

        let candidates = state
            .candidates
            .iter()
            .zip(&state.keys)
            .map(|(candidate, key)| CandidateView {
                key: key.clone(),
                selected: state.selection.contains(key),
                name: candidate.name.clone(),
                summary: candidate.summary.clone(),
                candidate: candidate.clone(),
            })
            .collect();

        SessionSnapshot {
            candidates,
            selected_count: state.selection.len(),
            total_count: state.candidates.len(),
            select_all: state.selection.select_all_state(&state.keys),
            busy: BusyFlags {
                ranking: self.is_busy(Operation::Ranking),
                listing: self.is_busy(Operation::Listing),
                scheduling: self.is_busy(Operation::Scheduling),
            },
            schedule_dialog_open: state.schedule_dialog_open,
            notice,
        }
    }
}
