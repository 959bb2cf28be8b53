//! Application review workflow for published job offers.
//!
//! Covers the recruiter-facing decision loop: status legality, list
//! filtering, row selection, message templating, bulk settlement, the
//! offer lifecycle, and the unread notification feed. Everything talks to
//! the collaborator through [`crate::api::RecruitmentGateway`].

pub mod bulk;
pub mod domain;
pub mod filter;
pub mod notifications;
pub mod offers;
pub mod selection;
pub mod session;
pub mod status;
pub mod templates;

#[cfg(test)]
mod tests;

pub use bulk::{BulkAction, BulkActionCoordinator, BulkFlow, BulkItemOutcome, BulkReport};
pub use domain::{
    Application, ApplicationId, Candidate, CandidateId, JobOffer, JobOfferId, JobOfferSummary,
    UnreadNotification,
};
pub use filter::{ApplicationFilter, FetchMode};
pub use notifications::{
    aggregate_events, NotificationAggregate, NotificationCenter, NotificationSummary,
    NotificationTarget, PollHandle,
};
pub use offers::{OfferActionError, OfferLifecycle};
pub use selection::{SelectAllState, Selection};
pub use session::ReviewSession;
pub use status::{score_severity, ApplicationStatus, OfferStatus, Severity};
pub use templates::{RejectionContext, ValidationContext};
