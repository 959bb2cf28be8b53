use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{
    ApplicationQuery, CredentialStore, GatewayError, RecruitmentGateway, RejectionRequest,
    StaticCredentials, ValidationRequest,
};
use crate::config::ApiConfig;
use crate::workflows::review::domain::{
    Application, ApplicationId, JobOffer, JobOfferId, UnreadNotification,
};

/// reqwest-backed gateway. The bearer credential is checked before every
/// dispatch; a missing credential fails the call without touching the wire.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    credentials: Box<dyn CredentialStore>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, credentials: Box<dyn CredentialStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            credentials,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Box::new(StaticCredentials::new(config.bearer_token.clone())),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self) -> Result<String, GatewayError> {
        self.credentials
            .bearer_token()
            .ok_or(GatewayError::MissingCredential)
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let token = self.bearer()?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        check_status(response).await
    }

    async fn dispatch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = self.dispatch(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::GONE {
        return Err(GatewayError::Gone);
    }
    if status.is_client_error() {
        let detail = response.text().await.unwrap_or_default();
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            detail,
        });
    }
    Err(GatewayError::Upstream {
        status: status.as_u16(),
    })
}

#[async_trait]
impl RecruitmentGateway for HttpGateway {
    async fn list_applications(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Vec<Application>, GatewayError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(status) = &query.status {
            params.push(("status", status.code().to_string()));
        }
        if let Some(job_offer_id) = query.job_offer_id {
            params.push(("jobOfferId", job_offer_id.to_string()));
        }

        let request = self.client.get(self.url("/applications")).query(&params);
        self.dispatch_json(request).await
    }

    async fn list_applications_with_archived(
        &self,
        job_offer: JobOfferId,
    ) -> Result<Vec<Application>, GatewayError> {
        let request = self
            .client
            .get(self.url(&format!("/applications/job-offer/{job_offer}/all")));
        self.dispatch_json(request).await
    }

    async fn validate_application(
        &self,
        id: ApplicationId,
        request: &ValidationRequest,
    ) -> Result<Application, GatewayError> {
        let request = self
            .client
            .post(self.url(&format!("/applications/{id}/validate")))
            .json(request);
        self.dispatch_json(request).await
    }

    async fn reject_application(
        &self,
        id: ApplicationId,
        request: &RejectionRequest,
    ) -> Result<Application, GatewayError> {
        let request = self
            .client
            .post(self.url(&format!("/applications/{id}/reject")))
            .json(request);
        self.dispatch_json(request).await
    }

    async fn fetch_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError> {
        let request = self.client.get(self.url(&format!("/job-offers/{id}")));
        self.dispatch_json(request).await
    }

    async fn publish_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError> {
        let request = self
            .client
            .patch(self.url(&format!("/job-offers/{id}/publish")));
        self.dispatch_json(request).await
    }

    async fn close_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError> {
        let request = self
            .client
            .patch(self.url(&format!("/job-offers/{id}/close")));
        self.dispatch_json(request).await
    }

    async fn unread_notifications(&self) -> Result<Vec<UnreadNotification>, GatewayError> {
        let request = self
            .client
            .get(self.url("/applications/notifications/unread"));
        self.dispatch_json(request).await
    }

    async fn mark_all_notifications_read(&self) -> Result<(), GatewayError> {
        let request = self
            .client
            .post(self.url("/applications/notifications/mark-all-read"));
        self.dispatch(request).await.map(|_| ())
    }

    async fn mark_job_offer_notifications_read(
        &self,
        id: JobOfferId,
    ) -> Result<(), GatewayError> {
        let request = self.client.post(self.url(&format!(
            "/applications/notifications/mark-job-offer-read/{id}"
        )));
        self.dispatch(request).await.map(|_| ())
    }
}
