//! Integration specifications for the unread-notification feed.

mod common {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use recruitflow::api::{
        ApplicationQuery, GatewayError, RecruitmentGateway, RejectionRequest, ValidationRequest,
    };
    use recruitflow::config::NotificationConfig;
    use recruitflow::workflows::review::{
        Application, ApplicationId, JobOffer, JobOfferId, UnreadNotification,
    };

    pub(super) fn config() -> NotificationConfig {
        NotificationConfig {
            poll_interval_secs: 30,
            mark_read_delay_ms: 0,
            include_archived: false,
        }
    }

    pub(super) fn event(job_offer: i64, application: i64) -> UnreadNotification {
        UnreadNotification {
            job_offer_id: JobOfferId(job_offer),
            job_offer_title: format!("Offer {job_offer}"),
            application_id: ApplicationId(application),
            archived: false,
            received_at: None,
        }
    }

    #[derive(Default)]
    pub(super) struct FeedGateway {
        pub(super) events: Mutex<Vec<UnreadNotification>>,
    }

    impl FeedGateway {
        pub(super) fn seeded(events: Vec<UnreadNotification>) -> Self {
            Self {
                events: Mutex::new(events),
            }
        }
    }

    #[async_trait]
    impl RecruitmentGateway for FeedGateway {
        async fn list_applications(
            &self,
            _query: &ApplicationQuery,
        ) -> Result<Vec<Application>, GatewayError> {
            Ok(Vec::new())
        }

        async fn list_applications_with_archived(
            &self,
            _job_offer: JobOfferId,
        ) -> Result<Vec<Application>, GatewayError> {
            Ok(Vec::new())
        }

        async fn validate_application(
            &self,
            _id: ApplicationId,
            _request: &ValidationRequest,
        ) -> Result<Application, GatewayError> {
            Err(GatewayError::Upstream { status: 501 })
        }

        async fn reject_application(
            &self,
            _id: ApplicationId,
            _request: &RejectionRequest,
        ) -> Result<Application, GatewayError> {
            Err(GatewayError::Upstream { status: 501 })
        }

        async fn fetch_job_offer(&self, _id: JobOfferId) -> Result<JobOffer, GatewayError> {
            Err(GatewayError::Upstream { status: 501 })
        }

        async fn publish_job_offer(&self, _id: JobOfferId) -> Result<JobOffer, GatewayError> {
            Err(GatewayError::Upstream { status: 501 })
        }

        async fn close_job_offer(&self, _id: JobOfferId) -> Result<JobOffer, GatewayError> {
            Err(GatewayError::Upstream { status: 501 })
        }

        async fn unread_notifications(
            &self,
        ) -> Result<Vec<UnreadNotification>, GatewayError> {
            Ok(self.events.lock().expect("lock").clone())
        }

        async fn mark_all_notifications_read(&self) -> Result<(), GatewayError> {
            self.events.lock().expect("lock").clear();
            Ok(())
        }

        async fn mark_job_offer_notifications_read(
            &self,
            id: JobOfferId,
        ) -> Result<(), GatewayError> {
            self.events
                .lock()
                .expect("lock")
                .retain(|event| event.job_offer_id != id);
            Ok(())
        }
    }
}

mod feed {
    use std::sync::Arc;

    use super::common::{config, event, FeedGateway};
    use recruitflow::workflows::review::{
        ApplicationId, JobOfferId, NotificationCenter, NotificationTarget,
    };

    #[tokio::test]
    async fn grouped_totals_match_the_raw_event_count() {
        let gateway = Arc::new(FeedGateway::seeded(vec![
            event(1, 11),
            event(1, 12),
            event(2, 21),
        ]));
        let center = NotificationCenter::new(gateway, config());

        let summary = center.load().await.expect("load");
        assert_eq!(summary.aggregates.len(), 2);
        assert_eq!(summary.total(), 3);
    }

    #[tokio::test]
    async fn links_depend_on_the_group_size() {
        let gateway = Arc::new(FeedGateway::seeded(vec![
            event(1, 42),
            event(2, 21),
            event(2, 22),
            event(2, 23),
        ]));
        let center = NotificationCenter::new(gateway, config());
        let summary = center.load().await.expect("load");

        assert_eq!(
            summary.aggregates[0].resolve_link(),
            NotificationTarget::Application(ApplicationId(42))
        );
        assert_eq!(
            summary.aggregates[1].resolve_link(),
            NotificationTarget::JobOfferApplications(JobOfferId(2))
        );
    }

    #[tokio::test]
    async fn settling_one_offer_keeps_the_rest_unread() {
        let gateway = Arc::new(FeedGateway::seeded(vec![
            event(1, 11),
            event(1, 12),
            event(2, 21),
        ]));
        let center = NotificationCenter::new(Arc::clone(&gateway), config());

        let summary = center
            .mark_job_offer_read(JobOfferId(1))
            .await
            .expect("settle offer 1");
        assert_eq!(summary.total(), 1);
        assert_eq!(summary.aggregates[0].job_offer_id, JobOfferId(2));

        let summary = center.mark_all_read().await.expect("settle all");
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn polling_handle_tears_down_cleanly() {
        let gateway = Arc::new(FeedGateway::seeded(vec![event(1, 11)]));
        let center = Arc::new(NotificationCenter::new(gateway, config()));

        let handle = center.start_polling(tokio::time::Duration::from_millis(10));
        let mut updates = handle.subscribe();
        tokio::time::timeout(tokio::time::Duration::from_secs(1), updates.changed())
            .await
            .expect("first snapshot in time")
            .expect("poll loop alive");
        assert_eq!(updates.borrow().total(), 1);

        handle.stop();
        tokio::time::timeout(tokio::time::Duration::from_secs(1), async {
            while updates.changed().await.is_ok() {}
        })
        .await
        .expect("channel closes after stop");
    }
}
