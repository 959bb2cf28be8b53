use std::sync::Arc;

use tracing::info;

use super::domain::{JobOffer, JobOfferId};
use super::status::OfferStatus;
use crate::api::{GatewayError, RecruitmentGateway};

/// Error raised by offer lifecycle actions.
#[derive(Debug, thiserror::Error)]
pub enum OfferActionError {
    #[error("offer transition {from} -> {to} is not allowed")]
    IllegalTransition { from: String, to: String },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Publish/close flows guarded by the status legality rules.
///
/// The guard runs locally before any request: an illegal transition never
/// reaches the wire. A `Gone` answer (offer closed mid-flow by someone
/// else) is terminal for the flow and surfaced as-is, never retried.
pub struct OfferLifecycle<G> {
    gateway: Arc<G>,
}

impl<G> OfferLifecycle<G>
where
    G: RecruitmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn publish(&self, offer: &JobOffer) -> Result<JobOffer, OfferActionError> {
        self.apply(offer, OfferStatus::Published).await
    }

    pub async fn close(&self, offer: &JobOffer) -> Result<JobOffer, OfferActionError> {
        self.apply(offer, OfferStatus::Closed).await
    }

    /// Fetch the current offer first so the legality guard runs against
    /// fresh state, then publish.
    pub async fn publish_by_id(&self, id: JobOfferId) -> Result<JobOffer, OfferActionError> {
        let offer = self.gateway.fetch_job_offer(id).await?;
        self.publish(&offer).await
    }

    pub async fn close_by_id(&self, id: JobOfferId) -> Result<JobOffer, OfferActionError> {
        let offer = self.gateway.fetch_job_offer(id).await?;
        self.close(&offer).await
    }

    async fn apply(
        &self,
        offer: &JobOffer,
        target: OfferStatus,
    ) -> Result<JobOffer, OfferActionError> {
        if !offer.status.can_transition(&target) {
            return Err(OfferActionError::IllegalTransition {
                from: offer.status.code().to_string(),
                to: target.code().to_string(),
            });
        }

        let updated = match target {
            OfferStatus::Closed => self.gateway.close_job_offer(offer.id).await?,
            _ => self.gateway.publish_job_offer(offer.id).await?,
        };

        info!(offer = %offer.id, status = updated.status.code(), "offer transition applied");
        Ok(updated)
    }
}
