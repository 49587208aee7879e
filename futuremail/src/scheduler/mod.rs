//! Client of the external scheduling endpoint
//!
//! The endpoint takes one JSON request per letter and answers with a small
//! envelope:
//!
//! ```text
//! POST /api/scheduledEmails/create
//! { "to": "...", "subject": "...", "content": "<p>...</p>", "scheduledTime": "2026-10-16 08:10:00" }
//!
//! { "code": 0 }                              accepted
//! { "code": 1, "message": "duplicate" }      refused
//! ```
//!
//! [`ScheduleClient`] is the seam between the composer and the network;
//! [`HttpScheduleClient`] is the reqwest implementation.

mod client;
mod error;

pub use client::HttpScheduleClient;
pub use error::ScheduleError;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::forms::ValidatedDraft;

/// Wire format of `scheduledTime`: local time, 24h, zero padded, no zone
pub const SCHEDULED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shown after the endpoint accepted a letter
pub const SUCCESS_MESSAGE: &str =
    "The letter has been scheduled and will be delivered at the chosen time.";

/// Shown when the endpoint refuses without saying why
pub const SYSTEM_ERROR_FALLBACK: &str = "System error, please try again later.";

/// Shown when the endpoint could not be reached and sent no reason
pub const NETWORK_ERROR_FALLBACK: &str = "Network error, please try again later.";

/// Format a send time the way the endpoint expects
///
/// ```rust
/// use chrono::NaiveDate;
/// use futuremail::scheduler::format_scheduled_time;
///
/// let at = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
/// assert_eq!(format_scheduled_time(at), "2026-01-02 03:04:05");
/// ```
#[must_use]
pub fn format_scheduled_time(at: NaiveDateTime) -> String {
    at.format(SCHEDULED_TIME_FORMAT).to_string()
}

/// Request body of the scheduling call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Body HTML
    pub content: String,
    /// Send time, see [`SCHEDULED_TIME_FORMAT`]
    pub scheduled_time: String,
}

impl From<&ValidatedDraft> for ScheduleRequest {
    fn from(draft: &ValidatedDraft) -> Self {
        Self {
            to: draft.recipient.clone(),
            subject: draft.subject.clone(),
            content: draft.body_html.clone(),
            scheduled_time: format_scheduled_time(draft.scheduled_at),
        }
    }
}

/// Response body of the scheduling call
///
/// Both fields are optional on the wire; a missing `code` counts as a
/// refusal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEnvelope {
    /// `0` on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Human readable reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScheduleEnvelope {
    /// Envelope of an accepted request
    #[must_use]
    pub const fn accepted() -> Self {
        Self {
            code: Some(0),
            message: None,
        }
    }

    /// Envelope of a refused request
    #[must_use]
    pub fn refused(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: Some(message.into()),
        }
    }

    /// Interpret the business outcome
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Rejected`] unless `code` is exactly `0`.
    pub fn into_result(self) -> Result<(), ScheduleError> {
        match self.code {
            Some(0) => Ok(()),
            code => Err(ScheduleError::Rejected {
                code,
                message: self.message,
            }),
        }
    }
}

/// Anything able to hand a letter to the scheduling endpoint
///
/// Implementations make exactly one attempt per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleClient: Send + Sync {
    /// Send one request and return the decoded envelope
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Network`] when no usable answer arrived,
    /// including HTTP error statuses.
    async fn schedule(&self, request: ScheduleRequest) -> Result<ScheduleEnvelope, ScheduleError>;
}

/// Send `request` and fold transport and business failures together
///
/// # Errors
///
/// Returns whatever [`ScheduleClient::schedule`] or
/// [`ScheduleEnvelope::into_result`] reports.
pub async fn deliver(
    client: &dyn ScheduleClient,
    request: ScheduleRequest,
) -> Result<(), ScheduleError> {
    client.schedule(request).await?.into_result()
}
