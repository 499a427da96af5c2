//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Default scheduling widget shown after the brief is sent.
pub const DEFAULT_SCHEDULING_URL: &str = "https://cal.com/intake/kickoff?embed=true";

/// Default path of the brief endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/api/brief";

/// Intake wizard configuration.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Where the normalized brief is POSTed.
    pub endpoint: String,
    /// Scheduling widget loaded after a successful submission.
    pub scheduling_url: String,
    /// Pause before reporting a mock-mode success, so preview mode feels
    /// like a real round trip.
    pub mock_delay: Duration,
    /// Request timeout for the brief POST.
    pub request_timeout: Duration,
    /// Statuses that mean "no backend here" rather than "backend failed".
    pub soft_failure_statuses: Vec<u16>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            scheduling_url: DEFAULT_SCHEDULING_URL.to_string(),
            mock_delay: Duration::from_millis(600),
            request_timeout: Duration::from_secs(10),
            soft_failure_statuses: vec![404, 405, 501],
        }
    }
}

impl IntakeConfig {
    /// Load from `INTAKE_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            endpoint: std::env::var("INTAKE_ENDPOINT").unwrap_or(defaults.endpoint),
            scheduling_url: std::env::var("INTAKE_SCHEDULING_URL")
                .unwrap_or(defaults.scheduling_url),
            mock_delay: env_parsed("INTAKE_MOCK_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.mock_delay),
            request_timeout: env_parsed("INTAKE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            soft_failure_statuses: match std::env::var("INTAKE_SOFT_FAILURE_STATUSES") {
                Ok(raw) => parse_statuses(&raw)?,
                Err(_) => defaults.soft_failure_statuses,
            },
        })
    }

    /// Whether `status` should fall back to preview mode.
    pub fn is_soft_failure(&self, status: u16) -> bool {
        self.soft_failure_statuses.contains(&status)
    }
}

/// Settings for the optional brief receiver.
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    pub port: u16,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl ReceiverConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: env_parsed("INTAKE_SERVE_PORT")?.unwrap_or(Self::default().port),
        })
    }
}

fn env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

fn parse_statuses(raw: &str) -> Result<Vec<u16>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let code: u16 = s.parse().map_err(|_| ConfigError::InvalidValue {
                key: "INTAKE_SOFT_FAILURE_STATUSES".into(),
                message: format!("{s:?} is not a status code"),
            })?;
            if !(100..=599).contains(&code) {
                return Err(ConfigError::InvalidValue {
                    key: "INTAKE_SOFT_FAILURE_STATUSES".into(),
                    message: format!("{code} is out of range"),
                });
            }
            Ok(code)
        })
        .collect()
}
