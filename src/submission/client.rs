//! Submission client — delivers a brief and degrades to preview mode when
//! no backend is wired up.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brief::{FormData, normalize};
use crate::config::IntakeConfig;
use crate::error::{ConfigError, SubmitError};

/// How a successful submission was acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    /// A real backend accepted the brief.
    Server,
    /// No backend answered; the brief was acknowledged locally.
    Mock,
}

impl std::fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Delivered { mode: SubmissionMode },
    Failed(SubmitError),
}

impl SubmissionResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    pub fn mode(&self) -> Option<SubmissionMode> {
        match self {
            Self::Delivered { mode } => Some(*mode),
            Self::Failed(_) => None,
        }
    }

    /// `{"ok":true,"mode":"mock"}` or `{"ok":false,"error":"..."}`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Delivered { mode } => serde_json::json!({"ok": true, "mode": mode}),
            Self::Failed(e) => serde_json::json!({"ok": false, "error": e.to_string()}),
        }
    }
}

/// Anything that can take a brief off the wizard's hands.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Deliver a normalized brief. Never panics and never hangs past the
    /// transport timeout; every outcome is a [`SubmissionResult`].
    async fn submit(&self, payload: &FormData) -> SubmissionResult;

    /// Normalize loosely-typed input, then submit it.
    async fn submit_raw(&self, raw: &serde_json::Value) -> SubmissionResult {
        self.submit(&normalize(raw)).await
    }
}

/// Submits briefs to an HTTP endpoint as JSON.
pub struct HttpSubmissionClient {
    config: IntakeConfig,
    client: reqwest::Client,
}

impl HttpSubmissionClient {
    pub fn new(config: IntakeConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Acknowledge locally after the configured delay.
    async fn preview(&self, attempt: Uuid) -> SubmissionResult {
        tokio::time::sleep(self.config.mock_delay).await;
        tracing::info!(%attempt, "Brief acknowledged in preview mode");
        SubmissionResult::Delivered {
            mode: SubmissionMode::Mock,
        }
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, payload: &FormData) -> SubmissionResult {
        let attempt = Uuid::new_v4();
        tracing::info!(%attempt, endpoint = %self.config.endpoint, plan = %payload.plan, "Submitting brief");

        let response = match self
            .client
            .post(&self.config.endpoint)
            .json(payload)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%attempt, error = %e, "Brief endpoint unreachable; falling back to preview");
                return self.preview(attempt).await;
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!(%attempt, status = status.as_u16(), "Brief accepted by server");
            return SubmissionResult::Delivered {
                mode: SubmissionMode::Server,
            };
        }

        if self.config.is_soft_failure(status.as_u16()) {
            tracing::warn!(%attempt, status = status.as_u16(), "Brief endpoint absent; falling back to preview");
            return self.preview(attempt).await;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%attempt, status = status.as_u16(), error = %e, "Failed to read error response body");
                format!("(response body unreadable: {e})")
            }
        };
        tracing::error!(%attempt, status = status.as_u16(), body = %body, "Brief rejected by server");
        SubmissionResult::Failed(SubmitError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn unreachable_config() -> IntakeConfig {
        IntakeConfig {
            // Port 1 is never listening on loopback.
            endpoint: "http://127.0.0.1:1/api/brief".into(),
            mock_delay: Duration::from_millis(50),
            request_timeout: Duration::from_secs(2),
            ..IntakeConfig::default()
        }
    }

    #[test]
    fn result_json_shape() {
        let ok = SubmissionResult::Delivered {
            mode: SubmissionMode::Mock,
        };
        assert_eq!(ok.to_json(), serde_json::json!({"ok": true, "mode": "mock"}));
        assert!(ok.is_ok());
        assert_eq!(ok.mode(), Some(SubmissionMode::Mock));

        let failed = SubmissionResult::Failed(SubmitError::Status {
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(
            failed.to_json(),
            serde_json::json!({"ok": false, "error": "Backend responded 500: boom"})
        );
        assert!(!failed.is_ok());
        assert_eq!(failed.mode(), None);
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back_to_mock_after_delay() {
        let client = HttpSubmissionClient::new(unreachable_config()).unwrap();
        let started = Instant::now();
        let result = client.submit(&FormData::default()).await;
        assert_eq!(
            result,
            SubmissionResult::Delivered {
                mode: SubmissionMode::Mock
            }
        );
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn submit_raw_normalizes_first() {
        let client = HttpSubmissionClient::new(unreachable_config()).unwrap();
        let result = client
            .submit_raw(&serde_json::json!({"name": null, "agreeScope": 1}))
            .await;
        assert!(result.is_ok());
    }
}
