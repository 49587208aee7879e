//! Validation failures for the composer form

use thiserror::Error;

/// First rule a draft failed
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Recipient empty after trimming
    #[error("Please enter the recipient's email address.")]
    MissingRecipient,

    /// Recipient is not an email address
    #[error("Please enter a valid email address.")]
    InvalidRecipient,

    /// Subject empty after trimming
    #[error("Please enter a subject.")]
    MissingSubject,

    /// Body shows no text
    #[error("Please write the letter before sending it.")]
    MissingBody,

    /// No delivery time picked
    #[error("Please choose when the letter should be delivered.")]
    MissingSchedule,

    /// Delivery time too close to now
    #[error("The delivery time must be at least {} from now.", lead_phrase(.lead_secs))]
    ScheduleTooSoon {
        /// Required lead time in seconds
        lead_secs: i64,
    },
}

/// "5 minutes", "1 minute" or "90 seconds"
#[allow(clippy::trivially_copy_pass_by_ref)]
fn lead_phrase(secs: &i64) -> String {
    let (count, unit) = if *secs != 0 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (*secs, "second")
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural}")
}

impl ValidationFailure {
    /// Form field the failure refers to
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingRecipient | Self::InvalidRecipient => "recipient",
            Self::MissingSubject => "subject",
            Self::MissingBody => "body",
            Self::MissingSchedule | Self::ScheduleTooSoon { .. } => "scheduled_at",
        }
    }

    /// Stable code for programmatic handling
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingRecipient => "recipient_required",
            Self::InvalidRecipient => "recipient_invalid",
            Self::MissingSubject => "subject_required",
            Self::MissingBody => "body_required",
            Self::MissingSchedule => "schedule_required",
            Self::ScheduleTooSoon { .. } => "schedule_too_soon",
        }
    }
}
