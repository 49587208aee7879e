//! reqwest implementation of [`ScheduleClient`]

use async_trait::async_trait;
use std::time::Duration;

use super::{ScheduleClient, ScheduleEnvelope, ScheduleError, ScheduleRequest};
use crate::config::SchedulerSettings;

/// Posts requests to the configured endpoint
#[derive(Debug, Clone)]
pub struct HttpScheduleClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpScheduleClient {
    /// Client for `endpoint`, giving up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Client built from the `[scheduler]` settings
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn from_settings(settings: &SchedulerSettings) -> Result<Self, reqwest::Error> {
        Self::new(
            settings.endpoint.clone(),
            Duration::from_millis(settings.timeout_ms),
        )
    }

    /// Target URL
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScheduleClient for HttpScheduleClient {
    async fn schedule(&self, request: ScheduleRequest) -> Result<ScheduleEnvelope, ScheduleError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            scheduled_time = %request.scheduled_time,
            "posting schedule request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(ScheduleError::network)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ScheduleError::network)?;

        // Bodies that are not an envelope decode as "no code, no message"
        let envelope: ScheduleEnvelope = serde_json::from_slice(&body).unwrap_or_default();

        if status.is_success() {
            Ok(envelope)
        } else {
            Err(ScheduleError::Network {
                message: envelope.message,
                detail: format!("HTTP {status}"),
            })
        }
    }
}
