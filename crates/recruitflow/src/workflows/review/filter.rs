use super::domain::Application;
use super::status::ApplicationStatus;

/// Which collaborator endpoint feeds the session.
///
/// Archived rows may be absent from the default payload, so showing them is
/// a fetch-mode switch against the superset endpoint, not a client-side
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Active,
    IncludeArchived,
}

/// Criteria deriving the visible subset of a session's applications.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    /// `Some(true)` keeps only viewed rows, `Some(false)` only unviewed,
    /// `None` keeps both.
    pub viewed: Option<bool>,
    pub include_archived: bool,
}

impl ApplicationFilter {
    pub fn fetch_mode(&self) -> FetchMode {
        if self.include_archived {
            FetchMode::IncludeArchived
        } else {
            FetchMode::Active
        }
    }

    pub fn matches(&self, application: &Application) -> bool {
        if application.archived && !self.include_archived {
            return false;
        }
        if let Some(status) = &self.status {
            if application.status != *status {
                return false;
            }
        }
        if let Some(viewed) = self.viewed {
            if application.viewed_by_recruiter != viewed {
                return false;
            }
        }
        true
    }

    /// Stable filter: source order is preserved, never re-sorted.
    pub fn apply<'a>(&self, applications: &'a [Application]) -> Vec<&'a Application> {
        applications
            .iter()
            .filter(|application| self.matches(application))
            .collect()
    }
}
