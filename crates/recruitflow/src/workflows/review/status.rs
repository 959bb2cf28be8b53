use serde::{Deserialize, Serialize};

/// Visual weight attached to a status badge in the review console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
    Neutral,
}

impl Severity {
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "bg-success",
            Self::Info => "bg-info",
            Self::Warning => "bg-warning",
            Self::Danger => "bg-danger",
            Self::Neutral => "bg-secondary",
        }
    }
}

/// Lifecycle of a job offer. One-directional; `Closed` is terminal.
///
/// Codes outside the known enumeration round-trip through `Unknown` so a
/// collaborator rollout introducing a new state never breaks deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OfferStatus {
    Draft,
    Published,
    Closed,
    Unknown(String),
}

impl OfferStatus {
    pub fn code(&self) -> &str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Closed => "CLOSED",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Draft => "Brouillon",
            Self::Published => "Publié",
            Self::Closed => "Fermé",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Draft => Severity::Neutral,
            Self::Published => Severity::Success,
            Self::Closed => Severity::Danger,
            Self::Unknown(_) => Severity::Neutral,
        }
    }

    /// True only for the enumerated edges `Draft -> Published` and
    /// `Published -> Closed`. A closed offer never comes back.
    pub fn can_transition(&self, target: &OfferStatus) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Published) | (Self::Published, Self::Closed)
        )
    }
}

impl From<String> for OfferStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DRAFT" => Self::Draft,
            "PUBLISHED" => Self::Published,
            "CLOSED" => Self::Closed,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<OfferStatus> for String {
    fn from(status: OfferStatus) -> Self {
        status.code().to_string()
    }
}

/// Review state of a single application.
///
/// `Ambiguous` behaves like a pending state the recruiter still has to
/// decide on; `Validated` and `Rejected` are terminal for recruiter actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Pending,
    Validated,
    Ambiguous,
    Rejected,
    Unknown(String),
}

impl ApplicationStatus {
    pub fn code(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Validated => "VALIDATED",
            Self::Ambiguous => "AMBIGUOUS",
            Self::Rejected => "REJECTED",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "En attente",
            Self::Validated => "Validé",
            Self::Ambiguous => "À examiner",
            Self::Rejected => "Rejeté",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Pending => Severity::Warning,
            Self::Validated => Severity::Success,
            Self::Ambiguous => Severity::Info,
            Self::Rejected => Severity::Danger,
            Self::Unknown(_) => Severity::Neutral,
        }
    }

    /// Legal recruiter decisions: a pending-like application can be
    /// validated or rejected; nothing else moves.
    pub fn can_transition(&self, target: &ApplicationStatus) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending | Self::Ambiguous,
                Self::Validated | Self::Rejected
            )
        )
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => Self::Pending,
            "VALIDATED" => Self::Validated,
            "AMBIGUOUS" => Self::Ambiguous,
            "REJECTED" => Self::Rejected,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.code().to_string()
    }
}

/// Badge weight for an AI score out of 20.
pub const fn score_severity(score: u8) -> Severity {
    if score >= 15 {
        Severity::Success
    } else if score >= 10 {
        Severity::Warning
    } else {
        Severity::Danger
    }
}
