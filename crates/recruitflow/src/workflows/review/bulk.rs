use std::sync::Arc;

use chrono::NaiveDateTime;
use futures::future::join_all;

use super::domain::ApplicationId;
use super::selection::Selection;
use crate::api::{GatewayError, RecruitmentGateway, RejectionRequest, ValidationRequest};

/// The recruiter decision applied to every selected application.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkAction {
    Validate { interview: Option<NaiveDateTime> },
    Reject,
}

impl BulkAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validate { .. } => "validation",
            Self::Reject => "rejet",
        }
    }
}

/// Outcome of one request, tagged with its originating id so completion
/// order never matters.
#[derive(Debug)]
pub struct BulkItemOutcome {
    pub id: ApplicationId,
    pub result: Result<(), GatewayError>,
}

/// Settled view of a whole batch. Any failed item marks the batch as
/// failed even when others succeeded; the already-applied changes are not
/// rolled back and callers must re-fetch server truth.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub outcomes: Vec<BulkItemOutcome>,
}

impl BulkReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (ApplicationId, &GatewayError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|error| (outcome.id, error))
        })
    }
}

/// Fires one independent request per selected id and joins all outcomes.
pub struct BulkActionCoordinator<G> {
    gateway: Arc<G>,
}

impl<G> BulkActionCoordinator<G>
where
    G: RecruitmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Dispatches in selection iteration order without waiting on prior
    /// completions, then settles every request before reporting. A failure
    /// on one id never prevents the others from being attempted.
    pub async fn execute(
        &self,
        action: &BulkAction,
        message: &str,
        selection: &Selection,
    ) -> BulkReport {
        let dispatches = selection.ids().map(|id| {
            let gateway = Arc::clone(&self.gateway);
            let message = message.to_string();
            async move {
                let result = match action {
                    BulkAction::Validate { interview } => gateway
                        .validate_application(
                            id,
                            &ValidationRequest {
                                message,
                                interview_date: *interview,
                            },
                        )
                        .await
                        .map(|_| ()),
                    BulkAction::Reject => gateway
                        .reject_application(id, &RejectionRequest { message })
                        .await
                        .map(|_| ()),
                };
                BulkItemOutcome { id, result }
            }
        });

        BulkReport {
            outcomes: join_all(dispatches).await,
        }
    }
}

/// Confirm-then-dispatch flow, decomposed so the dialog step and the async
/// batch are independently testable. The only cancellation point is before
/// dispatch; in-flight requests cannot be recalled.
#[derive(Debug, Default)]
pub enum BulkFlow {
    #[default]
    Idle,
    ConfirmPending {
        action: BulkAction,
        message: String,
    },
    InFlight,
    Settled(BulkReport),
}

impl BulkFlow {
    /// Ask for confirmation. Refused while a batch is pending or in flight.
    pub fn request(&mut self, action: BulkAction, message: String) -> bool {
        match self {
            Self::Idle | Self::Settled(_) => {
                *self = Self::ConfirmPending { action, message };
                true
            }
            Self::ConfirmPending { .. } | Self::InFlight => false,
        }
    }

    /// The user closed the dialog without confirming.
    pub fn cancel(&mut self) {
        if matches!(self, Self::ConfirmPending { .. }) {
            *self = Self::Idle;
        }
    }

    /// Consume the confirmed payload, moving to `InFlight`.
    pub fn take_confirmed(&mut self) -> Option<(BulkAction, String)> {
        match std::mem::take(self) {
            Self::ConfirmPending { action, message } => {
                *self = Self::InFlight;
                Some((action, message))
            }
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn settle(&mut self, report: BulkReport) {
        if matches!(self, Self::InFlight) {
            *self = Self::Settled(report);
        }
    }

    /// Collect the settled report, returning the flow to `Idle`.
    pub fn acknowledge(&mut self) -> Option<BulkReport> {
        match std::mem::take(self) {
            Self::Settled(report) => Some(report),
            other => {
                *self = other;
                None
            }
        }
    }
}
