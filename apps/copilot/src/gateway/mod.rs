/// Hiring Gateway — the single point of contact with the automation endpoints.
///
/// ARCHITECTURAL RULE: the workflow never talks HTTP directly. Ranking,
/// listing and scheduling all go through `HiringGateway`, so the session can
/// be exercised against an in-memory fake.
///
/// No retries are performed here: every failure is terminal for the attempt.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::candidate::Candidate;
use crate::models::meeting::{MeetingProposal, Meridiem};
use crate::models::resume::ResumeFile;

#[cfg(test)]
pub mod fake;

/// Multipart field carrying the job description on the ranking endpoint.
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
/// Multipart field name shared by every uploaded resume.
pub const RESUMES_FIELD: &str = "resumes";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Body posted to the scheduling endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub candidates: Vec<Candidate>,
    pub job_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ampm: Option<Meridiem>,
}

impl ScheduleRequest {
    pub fn new(
        candidates: Vec<Candidate>,
        job_description: &str,
        meeting: Option<&MeetingProposal>,
    ) -> Self {
        Self {
            candidates,
            job_description: job_description.to_string(),
            meeting_date: meeting.map(|m| m.date_input().to_string()),
            meeting_time: meeting.map(|m| m.time_input().to_string()),
            ampm: meeting.map(MeetingProposal::meridiem),
        }
    }
}

/// What the scheduling endpoint answered. Only `message` is read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScheduleReply {
    pub message: Option<String>,
}

impl ScheduleReply {
    /// Any JSON body is accepted; a non-string or missing `message` reads as none.
    pub fn from_value(value: &Value) -> Self {
        Self {
            message: value
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
        }
    }
}

/// Transport seam between the workflow and the outside world.
///
/// Ranking and listing hand back the raw JSON payload; shape normalization
/// belongs to `workflow::decode`.
#[async_trait]
pub trait HiringGateway: Send + Sync {
    async fn rank(
        &self,
        job_description: &str,
        resumes: &[ResumeFile],
    ) -> Result<Value, GatewayError>;

    async fn list_candidates(&self, job_description: &str) -> Result<Value, GatewayError>;

    async fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleReply, GatewayError>;
}

/// Endpoint URLs, one per external operation.
#[derive(Debug, Clone, Serialize)]
pub struct Endpoints {
    pub ranking: String,
    pub listing: String,
    pub scheduling: String,
}

#[derive(Debug, Serialize)]
struct ListingRequest<'a> {
    #[serde(rename = "jobDescription")]
    job_description: &'a str,
}

/// `HiringGateway` over HTTP.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    endpoints: Endpoints,
}

impl HttpGateway {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[async_trait]
impl HiringGateway for HttpGateway {
    async fn rank(
        &self,
        job_description: &str,
        resumes: &[ResumeFile],
    ) -> Result<Value, GatewayError> {
        let mut form = Form::new().text(JOB_DESCRIPTION_FIELD, job_description.to_string());
        for resume in resumes {
            let mut part = Part::bytes(resume.bytes.to_vec()).file_name(resume.file_name.clone());
            if let Some(content_type) = &resume.content_type {
                part = part.mime_str(content_type)?;
            }
            form = form.part(RESUMES_FIELD, part);
        }

        debug!(
            "POST {} with {} resume(s)",
            self.endpoints.ranking,
            resumes.len()
        );
        let response = self
            .client
            .post(&self.endpoints.ranking)
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }

    async fn list_candidates(&self, job_description: &str) -> Result<Value, GatewayError> {
        debug!("POST {}", self.endpoints.listing);
        let response = self
            .client
            .post(&self.endpoints.listing)
            .json(&ListingRequest { job_description })
            .send()
            .await?;

        read_json(response).await
    }

    async fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleReply, GatewayError> {
        debug!(
            "POST {} for {} candidate(s)",
            self.endpoints.scheduling,
            request.candidates.len()
        );
        let response = self
            .client
            .post(&self.endpoints.scheduling)
            .json(request)
            .send()
            .await?;

        let body = read_json(response).await?;
        Ok(ScheduleReply::from_value(&body))
    }
}

/// Rejects non-2xx statuses even when a body is present, then parses JSON.
async fn read_json(response: Response) -> Result<Value, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
