//! Ordered validation of a draft before submission
//!
//! Rules run in a fixed order and stop at the first failure:
//!
//! 1. recipient present (after trimming), then a well-formed address
//! 2. subject present
//! 3. body shows visible text once markup is stripped
//! 4. a delivery time is picked
//! 5. the delivery time is at least the lead time after *now*
//!
//! "Now" is read when the user submits, never cached from the moment the time
//! was picked, so a draft that sat idle can become invalid.

mod error;

pub use error::ValidationFailure;

use chrono::{NaiveDateTime, TimeDelta};
use validator::ValidateEmail;

use crate::draft::DraftEmail;
use crate::richtext::html;

/// A draft that passed every rule, with text fields trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    /// Trimmed recipient address
    pub recipient: String,
    /// Trimmed subject
    pub subject: String,
    /// Trimmed body HTML
    pub body_html: String,
    /// Delivery time
    pub scheduled_at: NaiveDateTime,
}

/// Check `draft` against the rules at submission time `now`
///
/// # Errors
///
/// Returns the first [`ValidationFailure`] in rule order.
///
/// # Example
///
/// ```rust
/// use chrono::{NaiveDate, TimeDelta};
/// use futuremail::draft::DraftEmail;
/// use futuremail::forms::{validate, ValidationFailure};
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let draft = DraftEmail { recipient: "  ".into(), ..DraftEmail::default() };
///
/// assert_eq!(
///     validate(&draft, now, TimeDelta::minutes(5)),
///     Err(ValidationFailure::MissingRecipient)
/// );
/// ```
pub fn validate(
    draft: &DraftEmail,
    now: NaiveDateTime,
    lead: TimeDelta,
) -> Result<ValidatedDraft, ValidationFailure> {
    let recipient = draft.recipient.trim();
    if recipient.is_empty() {
        return Err(ValidationFailure::MissingRecipient);
    }
    if !recipient.validate_email() {
        return Err(ValidationFailure::InvalidRecipient);
    }

    let subject = draft.subject.trim();
    if subject.is_empty() {
        return Err(ValidationFailure::MissingSubject);
    }

    let body_html = draft.body_html.trim();
    if !html::has_visible_text(body_html) {
        return Err(ValidationFailure::MissingBody);
    }

    let scheduled_at = draft
        .scheduled_at
        .ok_or(ValidationFailure::MissingSchedule)?;
    if scheduled_at < now + lead {
        return Err(ValidationFailure::ScheduleTooSoon {
            lead_secs: lead.num_seconds(),
        });
    }

    Ok(ValidatedDraft {
        recipient: recipient.to_string(),
        subject: subject.to_string(),
        body_html: body_html.to_string(),
        scheduled_at,
    })
}
