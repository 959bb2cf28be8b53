//! Seam over the collaborator REST API.
//!
//! Workflow components depend on [`RecruitmentGateway`] only; the reqwest
//! implementation lives in [`http`]. Test doubles implement the trait
//! in-memory, mirroring how repositories are doubled elsewhere in the
//! codebase.

pub mod http;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::workflows::review::domain::{
    Application, ApplicationId, JobOffer, JobOfferId, UnreadNotification,
};
use crate::workflows::review::status::ApplicationStatus;

/// Optional criteria for the default application listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationQuery {
    pub status: Option<ApplicationStatus>,
    pub job_offer_id: Option<JobOfferId>,
}

impl ApplicationQuery {
    pub fn for_job_offer(id: JobOfferId) -> Self {
        Self {
            status: None,
            job_offer_id: Some(id),
        }
    }
}

/// Payload accepted by the validate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_date: Option<NaiveDateTime>,
}

/// Payload accepted by the reject endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionRequest {
    pub message: String,
}

/// Failure taxonomy for collaborator calls. No call is retried
/// automatically; retries are always user-initiated.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("no bearer credential available")]
    MissingCredential,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request rejected by collaborator ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("resource gone")]
    Gone,
    #[error("collaborator error (status {status})")]
    Upstream { status: u16 },
}

/// Supplies the bearer credential minted by the external auth collaborator.
/// `None` means no authenticated call may be made.
pub trait CredentialStore: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed credential handed over at construction (e.g. from configuration).
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl CredentialStore for StaticCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// The collaborator surface consumed by the review workflow.
#[async_trait]
pub trait RecruitmentGateway: Send + Sync {
    /// `GET /applications?status=&jobOfferId=` — archived rows excluded.
    async fn list_applications(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Vec<Application>, GatewayError>;

    /// `GET /applications/job-offer/{id}/all` — superset including archived.
    async fn list_applications_with_archived(
        &self,
        job_offer: JobOfferId,
    ) -> Result<Vec<Application>, GatewayError>;

    /// `POST /applications/{id}/validate`
    async fn validate_application(
        &self,
        id: ApplicationId,
        request: &ValidationRequest,
    ) -> Result<Application, GatewayError>;

    /// `POST /applications/{id}/reject`
    async fn reject_application(
        &self,
        id: ApplicationId,
        request: &RejectionRequest,
    ) -> Result<Application, GatewayError>;

    /// `GET /job-offers/{id}`
    async fn fetch_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError>;

    /// `PATCH /job-offers/{id}/publish`
    async fn publish_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError>;

    /// `PATCH /job-offers/{id}/close`
    async fn close_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError>;

    /// `GET /applications/notifications/unread`
    async fn unread_notifications(&self) -> Result<Vec<UnreadNotification>, GatewayError>;

    /// `POST /applications/notifications/mark-all-read`
    async fn mark_all_notifications_read(&self) -> Result<(), GatewayError>;

    /// `POST /applications/notifications/mark-job-offer-read/{id}`
    async fn mark_job_offer_notifications_read(
        &self,
        id: JobOfferId,
    ) -> Result<(), GatewayError>;
}
