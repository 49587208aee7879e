//! Scheduling failures

use thiserror::Error;

use super::{NETWORK_ERROR_FALLBACK, SYSTEM_ERROR_FALLBACK};

/// Why a letter was not scheduled
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The endpoint answered but did not accept the letter
    #[error("scheduler refused the letter (code {code:?}): {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected {
        /// Code from the envelope, `None` when absent
        code: Option<i64>,
        /// Reason from the envelope
        message: Option<String>,
    },

    /// No usable answer: connection failure, timeout or HTTP error status
    #[error("scheduler unreachable: {detail}")]
    Network {
        /// `message` from an error body, when the endpoint sent one
        message: Option<String>,
        /// Technical description for the logs
        detail: String,
    },
}

impl ScheduleError {
    /// Network failure without a server-provided reason
    pub fn network(detail: impl ToString) -> Self {
        Self::Network {
            message: None,
            detail: detail.to_string(),
        }
    }

    /// Text shown to the user
    ///
    /// The server's own message wins when it is non-empty; otherwise a fixed
    /// fallback for the kind of failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        let (message, fallback) = match self {
            Self::Rejected { message, .. } => (message, SYSTEM_ERROR_FALLBACK),
            Self::Network { message, .. } => (message, NETWORK_ERROR_FALLBACK),
        };
        message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
