use std::sync::Arc;

use tracing::{info, warn};

use super::bulk::{BulkAction, BulkActionCoordinator, BulkReport};
use super::domain::{Application, ApplicationId, JobOfferId};
use super::filter::{ApplicationFilter, FetchMode};
use super::selection::{SelectAllState, Selection};
use crate::api::{
    ApplicationQuery, GatewayError, RecruitmentGateway, RejectionRequest, ValidationRequest,
};

/// Review state for one job offer: the fetched applications, the active
/// filter, and the bulk selection. Owned explicitly by whoever drives the
/// review screen; nothing here is ambient.
///
/// Reset rules: the selection is cleared on refresh, on any filter change,
/// and after every bulk settlement, so it can never reference a row the
/// recruiter no longer sees.
pub struct ReviewSession<G> {
    gateway: Arc<G>,
    job_offer: JobOfferId,
    filter: ApplicationFilter,
    applications: Vec<Application>,
    selection: Selection,
}

impl<G> ReviewSession<G>
where
    G: RecruitmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>, job_offer: JobOfferId) -> Self {
        Self {
            gateway,
            job_offer,
            filter: ApplicationFilter::default(),
            applications: Vec::new(),
            selection: Selection::new(),
        }
    }

    pub fn job_offer(&self) -> JobOfferId {
        self.job_offer
    }

    pub fn filter(&self) -> &ApplicationFilter {
        &self.filter
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Re-fetch from the collaborator per the filter's fetch mode and drop
    /// the selection. Displayed state always reflects server truth; rows
    /// are never patched optimistically in place.
    pub async fn refresh(&mut self) -> Result<(), GatewayError> {
        self.applications = match self.filter.fetch_mode() {
            FetchMode::Active => {
                self.gateway
                    .list_applications(&ApplicationQuery::for_job_offer(self.job_offer))
                    .await?
            }
            FetchMode::IncludeArchived => {
                self.gateway
                    .list_applications_with_archived(self.job_offer)
                    .await?
            }
        };
        self.selection.clear();
        Ok(())
    }

    /// Swap the filter, clearing the selection. Toggling archived
    /// visibility changes the fetch mode and therefore re-fetches the
    /// matching superset/subset from the collaborator.
    pub async fn set_filter(&mut self, filter: ApplicationFilter) -> Result<(), GatewayError> {
        let refetch = filter.fetch_mode() != self.filter.fetch_mode();
        self.filter = filter;
        self.selection.clear();
        if refetch {
            self.refresh().await?;
        }
        Ok(())
    }

    pub async fn set_include_archived(&mut self, include: bool) -> Result<(), GatewayError> {
        let mut filter = self.filter.clone();
        filter.include_archived = include;
        self.set_filter(filter).await
    }

    /// Visible subset in source order.
    pub fn visible(&self) -> Vec<&Application> {
        self.filter.apply(&self.applications)
    }

    pub fn visible_ids(&self) -> Vec<ApplicationId> {
        self.visible().iter().map(|application| application.id).collect()
    }

    /// Restore the selection ⊆ visible invariant after any recompute.
    pub fn prune_selection(&mut self) {
        let visible = self.visible_ids();
        self.selection.retain_visible(&visible);
    }

    /// Toggle one row. Ids outside the visible set are refused.
    pub fn toggle(&mut self, id: ApplicationId) -> bool {
        if !self.visible_ids().contains(&id) {
            return false;
        }
        self.selection.toggle(id);
        true
    }

    pub fn toggle_all(&mut self) {
        let visible = self.visible_ids();
        self.selection.toggle_all(&visible);
    }

    pub fn select_all_state(&self) -> SelectAllState {
        let visible = self.visible_ids();
        self.selection.select_all_state(&visible)
    }

    /// Run one bulk action over the current selection, then clear the
    /// selection and re-fetch. The report is returned regardless of
    /// outcome; on partial failure the refresh is what reveals per-item
    /// truth.
    pub async fn execute_bulk(
        &mut self,
        action: &BulkAction,
        message: &str,
    ) -> Result<BulkReport, GatewayError> {
        let coordinator = BulkActionCoordinator::new(Arc::clone(&self.gateway));
        let report = coordinator.execute(action, message, &self.selection).await;

        if report.is_success() {
            info!(
                job_offer = %self.job_offer,
                action = action.label(),
                count = report.attempted(),
                "bulk action settled"
            );
        } else {
            warn!(
                job_offer = %self.job_offer,
                action = action.label(),
                failed = report.failed(),
                attempted = report.attempted(),
                "bulk action settled with failures"
            );
        }

        self.selection.clear();
        self.refresh().await?;
        Ok(report)
    }

    /// Validate a single application, then re-fetch.
    pub async fn validate_one(
        &mut self,
        id: ApplicationId,
        request: &ValidationRequest,
    ) -> Result<Application, GatewayError> {
        let updated = self.gateway.validate_application(id, request).await?;
        self.refresh().await?;
        Ok(updated)
    }

    /// Reject a single application, then re-fetch.
    pub async fn reject_one(
        &mut self,
        id: ApplicationId,
        request: &RejectionRequest,
    ) -> Result<Application, GatewayError> {
        let updated = self.gateway.reject_application(id, request).await?;
        self.refresh().await?;
        Ok(updated)
    }
}
