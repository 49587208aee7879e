//! The letter being composed
//!
//! A [`DraftEmail`] lives only in process memory for the lifetime of one
//! composer. It is mutated field by field and cleared entirely once the
//! scheduling endpoint accepts it.

use chrono::{NaiveDateTime, TimeDelta};

/// Default distance between "now" and the earliest allowed send time, in seconds
pub const DEFAULT_LEAD_TIME_SECS: i64 = 5 * 60;

/// In-memory draft of a scheduled letter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftEmail {
    /// Recipient address as typed
    pub recipient: String,
    /// Subject line as typed
    pub subject: String,
    /// Rendered HTML of the letter body
    pub body_html: String,
    /// Local time the letter should be delivered at
    pub scheduled_at: Option<NaiveDateTime>,
}

impl DraftEmail {
    /// Create an empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no field carries any input
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipient.is_empty()
            && self.subject.is_empty()
            && self.body_html.is_empty()
            && self.scheduled_at.is_none()
    }
}

/// Earliest selectable send time
///
/// Computed once when a composer is mounted (`now + lead`). The date-time
/// picker clamps to it; submission validation re-derives its own bound from
/// the clock at submit time instead of trusting this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeBound(NaiveDateTime);

impl TimeBound {
    /// Bound `lead` after `now`
    #[must_use]
    pub fn after(now: NaiveDateTime, lead: TimeDelta) -> Self {
        Self(now + lead)
    }

    /// Wrap an explicit instant
    #[must_use]
    pub const fn at(instant: NaiveDateTime) -> Self {
        Self(instant)
    }

    /// The bounding instant
    #[must_use]
    pub const fn instant(self) -> NaiveDateTime {
        self.0
    }

    /// Raise `value` to the bound if it falls below it
    #[must_use]
    pub fn clamp(self, value: NaiveDateTime) -> NaiveDateTime {
        value.max(self.0)
    }

    /// Whether `value` satisfies the bound
    #[must_use]
    pub fn admits(self, value: NaiveDateTime) -> bool {
        value >= self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_new_draft_is_empty() {
        let draft = DraftEmail::new();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_clear_resets_all_fields() {
        let mut draft = DraftEmail {
            recipient: "a@b.com".into(),
            subject: "Hi".into(),
            body_html: "<p>hello</p>".into(),
            scheduled_at: Some(at(10, 0, 0)),
        };
        assert!(!draft.is_empty());

        draft.clear();
        assert_eq!(draft, DraftEmail::default());
    }

    #[test]
    fn test_time_bound_after() {
        let bound = TimeBound::after(at(8, 58, 30), TimeDelta::seconds(DEFAULT_LEAD_TIME_SECS));
        assert_eq!(bound.instant(), at(9, 3, 30));
    }

    #[test]
    fn test_time_bound_clamp() {
        let bound = TimeBound::at(at(9, 0, 0));
        assert_eq!(bound.clamp(at(8, 59, 59)), at(9, 0, 0));
        assert_eq!(bound.clamp(at(9, 0, 1)), at(9, 0, 1));
        assert!(bound.admits(at(9, 0, 0)));
        assert!(!bound.admits(at(8, 0, 0)));
    }
}
