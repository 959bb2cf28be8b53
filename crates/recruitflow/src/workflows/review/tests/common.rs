use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::api::{
    ApplicationQuery, GatewayError, RecruitmentGateway, RejectionRequest, ValidationRequest,
};
use crate::workflows::review::domain::{
    Application, ApplicationId, Candidate, CandidateId, JobOffer, JobOfferId, JobOfferSummary,
    UnreadNotification,
};
use crate::workflows::review::status::{ApplicationStatus, OfferStatus};

pub(super) fn candidate(id: i64, first_name: &str, last_name: &str) -> Candidate {
    Candidate {
        id: CandidateId(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@example.test",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        phone: None,
        current_position: None,
    }
}

pub(super) fn offer_summary(id: i64) -> JobOfferSummary {
    JobOfferSummary {
        id: JobOfferId(id),
        title: "Backend Engineer".to_string(),
        company: "Acme".to_string(),
    }
}

pub(super) fn offer(id: i64, status: OfferStatus) -> JobOffer {
    JobOffer {
        id: JobOfferId(id),
        title: "Backend Engineer".to_string(),
        company: "Acme".to_string(),
        status,
        application_url: None,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
        application_deadline: None,
    }
}

pub(super) fn application(id: i64, job_offer: i64, status: ApplicationStatus) -> Application {
    Application {
        id: ApplicationId(id),
        candidate: candidate(id * 100, "Alice", "Martin"),
        job_offer: offer_summary(job_offer),
        status,
        ai_score: None,
        ai_analysis: None,
        archived: false,
        viewed_by_recruiter: false,
        viewed_at: None,
        recruiter_notes: None,
        received_at: Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap(),
    }
}

pub(super) fn notification(job_offer: i64, application: i64) -> UnreadNotification {
    UnreadNotification {
        job_offer_id: JobOfferId(job_offer),
        job_offer_title: format!("Offer {job_offer}"),
        application_id: ApplicationId(application),
        archived: false,
        received_at: None,
    }
}

/// In-memory collaborator double. Decisions mutate the stored rows so a
/// follow-up fetch observes them; ids listed in `fail_decisions` answer
/// with a 500 instead, leaving the row untouched.
#[derive(Default)]
pub(super) struct MemoryGateway {
    pub(super) applications: Mutex<Vec<Application>>,
    pub(super) offers: Mutex<Vec<JobOffer>>,
    pub(super) notifications: Mutex<Vec<UnreadNotification>>,
    pub(super) fail_decisions: Mutex<Vec<ApplicationId>>,
    pub(super) gone_offers: Mutex<Vec<JobOfferId>>,
    pub(super) decision_messages: Mutex<Vec<(ApplicationId, String)>>,
    pub(super) mark_calls: Mutex<Vec<(JobOfferId, Instant)>>,
    pub(super) feed_reads: Mutex<Vec<Instant>>,
}

impl MemoryGateway {
    pub(super) fn with_applications(applications: Vec<Application>) -> Self {
        Self {
            applications: Mutex::new(applications),
            ..Self::default()
        }
    }

    pub(super) fn with_notifications(notifications: Vec<UnreadNotification>) -> Self {
        Self {
            notifications: Mutex::new(notifications),
            ..Self::default()
        }
    }

    pub(super) fn fail_decision_for(&self, id: ApplicationId) {
        self.fail_decisions
            .lock()
            .expect("gateway mutex poisoned")
            .push(id);
    }

    fn decide(
        &self,
        id: ApplicationId,
        target: ApplicationStatus,
        message: &str,
    ) -> Result<Application, GatewayError> {
        if self
            .fail_decisions
            .lock()
            .expect("gateway mutex poisoned")
            .contains(&id)
        {
            return Err(GatewayError::Upstream { status: 500 });
        }

        let mut applications = self.applications.lock().expect("gateway mutex poisoned");
        let row = applications
            .iter_mut()
            .find(|application| application.id == id)
            .ok_or(GatewayError::Rejected {
                status: 404,
                detail: "unknown application".to_string(),
            })?;
        row.status = target;
        self.decision_messages
            .lock()
            .expect("gateway mutex poisoned")
            .push((id, message.to_string()));
        Ok(row.clone())
    }
}

#[async_trait]
impl RecruitmentGateway for MemoryGateway {
    async fn list_applications(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Vec<Application>, GatewayError> {
        let applications = self.applications.lock().expect("gateway mutex poisoned");
        Ok(applications
            .iter()
            .filter(|application| !application.archived)
            .filter(|application| {
                query
                    .status
                    .as_ref()
                    .map_or(true, |status| application.status == *status)
            })
            .filter(|application| {
                query
                    .job_offer_id
                    .map_or(true, |id| application.job_offer.id == id)
            })
            .cloned()
            .collect())
    }

    async fn list_applications_with_archived(
        &self,
        job_offer: JobOfferId,
    ) -> Result<Vec<Application>, GatewayError> {
        let applications = self.applications.lock().expect("gateway mutex poisoned");
        Ok(applications
            .iter()
            .filter(|application| application.job_offer.id == job_offer)
            .cloned()
            .collect())
    }

    async fn validate_application(
        &self,
        id: ApplicationId,
        request: &ValidationRequest,
    ) -> Result<Application, GatewayError> {
        self.decide(id, ApplicationStatus::Validated, &request.message)
    }

    async fn reject_application(
        &self,
        id: ApplicationId,
        request: &RejectionRequest,
    ) -> Result<Application, GatewayError> {
        self.decide(id, ApplicationStatus::Rejected, &request.message)
    }

    async fn fetch_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError> {
        let offers = self.offers.lock().expect("gateway mutex poisoned");
        offers
            .iter()
            .find(|offer| offer.id == id)
            .cloned()
            .ok_or(GatewayError::Rejected {
                status: 404,
                detail: "unknown offer".to_string(),
            })
    }

    async fn publish_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError> {
        if self
            .gone_offers
            .lock()
            .expect("gateway mutex poisoned")
            .contains(&id)
        {
            return Err(GatewayError::Gone);
        }
        let mut offers = self.offers.lock().expect("gateway mutex poisoned");
        let row = offers
            .iter_mut()
            .find(|offer| offer.id == id)
            .ok_or(GatewayError::Rejected {
                status: 404,
                detail: "unknown offer".to_string(),
            })?;
        row.status = OfferStatus::Published;
        Ok(row.clone())
    }

    async fn close_job_offer(&self, id: JobOfferId) -> Result<JobOffer, GatewayError> {
        if self
            .gone_offers
            .lock()
            .expect("gateway mutex poisoned")
            .contains(&id)
        {
            return Err(GatewayError::Gone);
        }
        let mut offers = self.offers.lock().expect("gateway mutex poisoned");
        let row = offers
            .iter_mut()
            .find(|offer| offer.id == id)
            .ok_or(GatewayError::Rejected {
                status: 404,
                detail: "unknown offer".to_string(),
            })?;
        row.status = OfferStatus::Closed;
        Ok(row.clone())
    }

    async fn unread_notifications(&self) -> Result<Vec<UnreadNotification>, GatewayError> {
        self.feed_reads
            .lock()
            .expect("gateway mutex poisoned")
            .push(Instant::now());
        Ok(self
            .notifications
            .lock()
            .expect("gateway mutex poisoned")
            .clone())
    }

    async fn mark_all_notifications_read(&self) -> Result<(), GatewayError> {
        self.notifications
            .lock()
            .expect("gateway mutex poisoned")
            .clear();
        Ok(())
    }

    async fn mark_job_offer_notifications_read(
        &self,
        id: JobOfferId,
    ) -> Result<(), GatewayError> {
        self.mark_calls
            .lock()
            .expect("gateway mutex poisoned")
            .push((id, Instant::now()));
        self.notifications
            .lock()
            .expect("gateway mutex poisoned")
            .retain(|event| event.job_offer_id != id);
        Ok(())
    }
}
