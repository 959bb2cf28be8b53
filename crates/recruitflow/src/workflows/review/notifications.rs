use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

use super::domain::{ApplicationId, JobOfferId, UnreadNotification};
use crate::api::{GatewayError, RecruitmentGateway};
use crate::config::NotificationConfig;

/// Unread activity for one job offer, rolled up from individual events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAggregate {
    pub job_offer_id: JobOfferId,
    pub job_offer_title: String,
    pub count: usize,
    /// Set only when the group holds exactly one event; a multi-event
    /// group has no single application to point at.
    pub single_application_id: Option<ApplicationId>,
}

/// Where a notification group should lead the recruiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTarget {
    Application(ApplicationId),
    JobOfferApplications(JobOfferId),
}

impl NotificationAggregate {
    /// A lone event links straight to its application; anything more
    /// links to the offer's application list.
    pub fn resolve_link(&self) -> NotificationTarget {
        match self.single_application_id {
            Some(id) if self.count == 1 => NotificationTarget::Application(id),
            _ => NotificationTarget::JobOfferApplications(self.job_offer_id),
        }
    }
}

/// One snapshot of the unread feed, grouped per job offer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSummary {
    pub aggregates: Vec<NotificationAggregate>,
}

impl NotificationSummary {
    pub fn total(&self) -> usize {
        self.aggregates.iter().map(|aggregate| aggregate.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }
}

/// Group raw events by job offer, in ascending offer id order. Archived
/// events are dropped unless the policy includes them.
pub fn aggregate_events(
    events: &[UnreadNotification],
    include_archived: bool,
) -> NotificationSummary {
    let mut groups: BTreeMap<JobOfferId, (String, Vec<ApplicationId>)> = BTreeMap::new();
    for event in events {
        if event.archived && !include_archived {
            continue;
        }
        let entry = groups
            .entry(event.job_offer_id)
            .or_insert_with(|| (event.job_offer_title.clone(), Vec::new()));
        entry.1.push(event.application_id);
    }

    let aggregates = groups
        .into_iter()
        .map(|(job_offer_id, (job_offer_title, applications))| {
            let single_application_id = match applications.as_slice() {
                [only] => Some(*only),
                _ => None,
            };
            NotificationAggregate {
                job_offer_id,
                job_offer_title,
                count: applications.len(),
                single_application_id,
            }
        })
        .collect();

    NotificationSummary { aggregates }
}

/// Reads and settles the unread feed against the collaborator.
pub struct NotificationCenter<G> {
    gateway: Arc<G>,
    config: NotificationConfig,
}

impl<G> NotificationCenter<G>
where
    G: RecruitmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>, config: NotificationConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Fetch the unread feed and roll it up per the archived policy.
    pub async fn load(&self) -> Result<NotificationSummary, GatewayError> {
        let events = self.gateway.unread_notifications().await?;
        Ok(aggregate_events(&events, self.config.include_archived))
    }

    /// Settle every unread event, then reload.
    pub async fn mark_all_read(&self) -> Result<NotificationSummary, GatewayError> {
        self.gateway.mark_all_notifications_read().await?;
        self.load().await
    }

    /// Settle one offer's events, wait out the configured grace delay so
    /// the collaborator has settled the write, then reload.
    pub async fn mark_job_offer_read(
        &self,
        id: JobOfferId,
    ) -> Result<NotificationSummary, GatewayError> {
        self.gateway.mark_job_offer_notifications_read(id).await?;
        let delay = self.config.mark_read_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.load().await
    }

    /// Spawn the periodic refresh loop. Each tick reloads the feed and
    /// publishes the snapshot; a failed tick is logged and skipped, the
    /// loop keeps going. Teardown is owned by the returned handle.
    pub fn start_polling(self: &Arc<Self>, period: Duration) -> PollHandle {
        let (tx, rx) = watch::channel(NotificationSummary::default());
        let center = Arc::clone(self);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match center.load().await {
                    Ok(summary) => {
                        debug!(total = summary.total(), "notification feed refreshed");
                        if tx.send(summary).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "notification refresh failed");
                    }
                }
            }
        });

        PollHandle { task, updates: rx }
    }
}

/// Owns the polling task. Exactly one loop per handle; dropping the handle
/// tears the loop down, so a stopped feed can never tick again.
pub struct PollHandle {
    task: JoinHandle<()>,
    updates: watch::Receiver<NotificationSummary>,
}

impl PollHandle {
    /// Watch the latest published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<NotificationSummary> {
        self.updates.clone()
    }

    /// Stop the loop immediately.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
