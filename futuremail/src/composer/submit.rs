//! Single-flight submission of a composer

use parking_lot::Mutex;
use thiserror::Error;
use uuid::Uuid;

use super::Composer;
use crate::clock::Clock;
use crate::forms::ValidationFailure;
use crate::scheduler::{self, ScheduleClient, ScheduleError};

/// Shown when a second submit arrives while one is running
pub const IN_FLIGHT_MESSAGE: &str = "A submission is already in progress.";

/// Why a submit attempt produced no scheduled letter
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Draft failed a rule; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Another submission of the same composer is running
    #[error("A submission is already in progress.")]
    InFlight,

    /// The scheduling call failed
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl SubmitError {
    /// Text shown to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Schedule(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Green
    Success,
    /// Red
    Error,
}

impl NoticeLevel {
    /// CSS modifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Transient message shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Short heading
    pub title: &'static str,
    /// Body text
    pub message: String,
}

impl Notice {
    /// Success toast
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Scheduled",
            message: message.into(),
        }
    }

    /// Error toast
    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title,
            message: message.into(),
        }
    }
}

impl From<&SubmitError> for Notice {
    fn from(err: &SubmitError) -> Self {
        let title = match err {
            SubmitError::Validation(_) => "Check the letter",
            SubmitError::InFlight => "Please wait",
            SubmitError::Schedule(ScheduleError::Rejected { .. }) => "Not scheduled",
            SubmitError::Schedule(ScheduleError::Network { .. }) => "Network error",
        };
        Self::error(title, err.user_message())
    }
}

/// Validate, send once and apply the outcome
///
/// The composer lock is only held while validating and while applying the
/// outcome, never across the network call. A concurrent submit of the same
/// composer fails fast with [`SubmitError::InFlight`]. Dropping the returned
/// future mid-call clears the busy flag and keeps the draft.
///
/// # Errors
///
/// Returns the validation failure, the in-flight rejection or the scheduling
/// failure.
pub async fn submit(
    composer: &Mutex<Composer>,
    client: &dyn ScheduleClient,
    clock: &dyn Clock,
) -> Result<Notice, SubmitError> {
    let (id, request) = {
        let mut composer = composer.lock();
        composer.touch(clock.now());
        let request = composer.begin_submit(clock.now()).inspect_err(|err| {
            tracing::info!(composer = %composer.id(), reason = %err, "submission rejected");
        })?;
        (composer.id(), request)
    };

    let guard = InFlight::arm(composer, id);
    tracing::info!(
        composer = %id,
        scheduled_time = %request.scheduled_time,
        "submitting letter"
    );
    let outcome = scheduler::deliver(client, request).await;
    guard.disarm();

    match &outcome {
        Ok(()) => tracing::info!(composer = %id, "letter scheduled"),
        Err(err) => tracing::warn!(composer = %id, error = %err, "scheduling failed"),
    }

    composer.lock().finish_submit(outcome, clock.now())
}

/// Clears the busy flag if the submit future is dropped while awaiting
struct InFlight<'a> {
    composer: &'a Mutex<Composer>,
    id: Uuid,
    armed: bool,
}

impl<'a> InFlight<'a> {
    const fn arm(composer: &'a Mutex<Composer>, id: Uuid) -> Self {
        Self {
            composer,
            id,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(composer = %self.id, "submission abandoned before completion");
            self.composer.lock().abandon_submit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ComposerSettings;
    use crate::picker::TimeField;
    use crate::scheduler::{
        MockScheduleClient, ScheduleEnvelope, ScheduleRequest, NETWORK_ERROR_FALLBACK,
    };
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn filled() -> Mutex<Composer> {
        let mut composer = Composer::new(now(), &ComposerSettings::default());
        composer.set_recipient("a@b.com");
        composer.set_subject("Hi");
        composer.edit_body("hello");
        composer.select_day(Some(now().date()), now().date()).unwrap();
        composer
            .select_component(TimeField::Minute, 10, now())
            .unwrap();
        Mutex::new(composer)
    }

    #[tokio::test]
    async fn test_success_resets() {
        let composer = filled();
        let clock = ManualClock::new(now());
        let mut client = MockScheduleClient::new();
        client
            .expect_schedule()
            .withf(|request| {
                request.to == "a@b.com"
                    && request.content == "<p>hello</p>"
                    && request.scheduled_time == "2026-10-16 08:10:00"
            })
            .times(1)
            .returning(|_| Ok(ScheduleEnvelope::accepted()));

        let notice = submit(&composer, &client, &clock).await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert!(composer.lock().draft().is_empty());
    }

    #[tokio::test]
    async fn test_validation_skips_network() {
        let composer = filled();
        composer.lock().set_recipient("");
        let clock = ManualClock::new(now());
        let mut client = MockScheduleClient::new();
        client.expect_schedule().never();

        let err = submit(&composer, &client, &clock).await.unwrap_err();
        assert_eq!(err, SubmitError::Validation(ValidationFailure::MissingRecipient));
    }

    #[tokio::test]
    async fn test_stale_time_rejected_at_submit() {
        let composer = filled();
        let clock = ManualClock::new(now());
        clock.advance(TimeDelta::minutes(6));
        let mut client = MockScheduleClient::new();
        client.expect_schedule().never();

        let err = submit(&composer, &client, &clock).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Validation(ValidationFailure::ScheduleTooSoon { lead_secs: 300 })
        );
        assert!(!composer.lock().draft().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_keeps_draft() {
        let composer = filled();
        let clock = ManualClock::new(now());
        let mut client = MockScheduleClient::new();
        client
            .expect_schedule()
            .times(1)
            .returning(|_| Err(ScheduleError::network("connection refused")));

        let err = submit(&composer, &client, &clock).await.unwrap_err();
        let notice = Notice::from(&err);
        assert_eq!(notice.message, NETWORK_ERROR_FALLBACK);
        assert_eq!(notice.title, "Network error");
        assert_eq!(composer.lock().draft().subject, "Hi");
        assert!(!composer.lock().is_busy());
    }

    /// Never answers; stands in for a scheduling endpoint that hangs
    struct HangingClient;

    #[async_trait::async_trait]
    impl ScheduleClient for HangingClient {
        async fn schedule(
            &self,
            _request: ScheduleRequest,
        ) -> Result<ScheduleEnvelope, ScheduleError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_dropped_submit_releases_composer() {
        let composer = filled();
        let clock = ManualClock::new(now());

        let pending = submit(&composer, &HangingClient, &clock);
        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(50), pending).await;
        assert!(timed_out.is_err());
        assert!(!composer.lock().is_busy());
        assert_eq!(composer.lock().draft().subject, "Hi");

        let mut client = MockScheduleClient::new();
        client
            .expect_schedule()
            .times(1)
            .returning(|_| Ok(ScheduleEnvelope::accepted()));
        let notice = submit(&composer, &client, &clock).await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn test_busy_composer_rejects_second_submit() {
        let composer = filled();
        composer.lock().begin_submit(now()).unwrap();
        let clock = ManualClock::new(now());
        let mut client = MockScheduleClient::new();
        client.expect_schedule().never();

        let err = submit(&composer, &client, &clock).await.unwrap_err();
        assert_eq!(err, SubmitError::InFlight);
        assert_eq!(err.user_message(), IN_FLIGHT_MESSAGE);
    }
}
