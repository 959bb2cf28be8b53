use std::env;
use std::fmt;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the review console.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub notifications: NotificationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("RECRUITFLOW_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());
        let bearer_token = env::var("RECRUITFLOW_API_TOKEN").ok();

        let poll_interval_secs = env::var("RECRUITFLOW_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidPollInterval)?;
        let mark_read_delay_ms = env::var("RECRUITFLOW_MARK_READ_DELAY_MS")
            .unwrap_or_else(|_| "500".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidMarkReadDelay)?;
        let include_archived = parse_flag(
            &env::var("RECRUITFLOW_NOTIFY_ARCHIVED").unwrap_or_else(|_| "false".to_string()),
        )
        .ok_or(ConfigError::InvalidArchivedFlag)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig {
                base_url,
                bearer_token,
            },
            notifications: NotificationConfig {
                poll_interval_secs,
                mark_read_delay_ms,
                include_archived,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Where the collaborator API lives and how we authenticate against it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
}

/// Cadence and policy for the unread-notification feed.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub poll_interval_secs: u64,
    pub mark_read_delay_ms: u64,
    pub include_archived: bool,
}

impl NotificationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn mark_read_delay(&self) -> Duration {
        Duration::from_millis(self.mark_read_delay_ms)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPollInterval,
    InvalidMarkReadDelay,
    InvalidArchivedFlag,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPollInterval => {
                write!(f, "RECRUITFLOW_POLL_INTERVAL_SECS must be a valid u64")
            }
            ConfigError::InvalidMarkReadDelay => {
                write!(f, "RECRUITFLOW_MARK_READ_DELAY_MS must be a valid u64")
            }
            ConfigError::InvalidArchivedFlag => {
                write!(f, "RECRUITFLOW_NOTIFY_ARCHIVED must be a boolean flag")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
