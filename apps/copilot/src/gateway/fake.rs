//! In-memory `HiringGateway` for workflow and route tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{oneshot, Mutex};

use super::{GatewayError, HiringGateway, ScheduleReply, ScheduleRequest};
use crate::models::resume::ResumeFile;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Rank {
        job_description: String,
        files: Vec<String>,
    },
    List {
        job_description: String,
    },
    Schedule(Value),
}

/// Scripted replies, consumed in order. An empty queue answers `[]` for
/// fetches and `{}` for scheduling.
#[derive(Default)]
pub struct FakeGateway {
    rank_replies: Mutex<VecDeque<Result<Value, GatewayError>>>,
    list_replies: Mutex<VecDeque<Result<Value, GatewayError>>>,
    schedule_replies: Mutex<VecDeque<Result<ScheduleReply, GatewayError>>>,
    rank_hold: Mutex<Option<oneshot::Receiver<()>>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_rank(&self, reply: Result<Value, GatewayError>) {
        self.rank_replies.lock().await.push_back(reply);
    }

    pub async fn push_list(&self, reply: Result<Value, GatewayError>) {
        self.list_replies.lock().await.push_back(reply);
    }

    pub async fn push_schedule(&self, reply: Result<ScheduleReply, GatewayError>) {
        self.schedule_replies.lock().await.push_back(reply);
    }

    /// The next `rank` call blocks until the returned sender fires.
    pub async fn hold_next_rank(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.rank_hold.lock().await = Some(rx);
        tx
    }

    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().await.clone()
    }
}

pub fn unavailable() -> GatewayError {
    GatewayError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

#[async_trait]
impl HiringGateway for FakeGateway {
    async fn rank(
        &self,
        job_description: &str,
        resumes: &[ResumeFile],
    ) -> Result<Value, GatewayError> {
        self.calls.lock().await.push(GatewayCall::Rank {
            job_description: job_description.to_string(),
            files: resumes.iter().map(|r| r.file_name.clone()).collect(),
        });
        let reply = self
            .rank_replies
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(Value::Array(vec![])));

        let hold = self.rank_hold.lock().await.take();
        if let Some(hold) = hold {
            let _ = hold.await;
        }
        reply
    }

    async fn list_candidates(&self, job_description: &str) -> Result<Value, GatewayError> {
        self.calls.lock().await.push(GatewayCall::List {
            job_description: job_description.to_string(),
        });
        self.list_replies
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(Value::Array(vec![])))
    }

    async fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleReply, GatewayError> {
        let body = serde_json::to_value(request)?;
        self.calls.lock().await.push(GatewayCall::Schedule(body));
        self.schedule_replies
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(ScheduleReply::default()))
    }
}
