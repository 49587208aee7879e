//! Wall-clock source
//!
//! Everything in the composer works on local wall-clock time
//! (`chrono::NaiveDateTime`), because the scheduling endpoint takes a local
//! timestamp without a zone suffix. The [`Clock`] trait lets handlers and
//! tests agree on "now".

use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use std::sync::Arc;

/// Source of the current local time
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the operating system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock
///
/// Useful for integration tests and demos that need deterministic time.
/// Clones share the same underlying instant.
///
/// # Example
///
/// ```rust
/// use chrono::{NaiveDate, TimeDelta};
/// use futuremail::clock::{Clock, ManualClock};
///
/// let start = NaiveDate::from_ymd_opt(2026, 10, 16)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
/// let clock = ManualClock::new(start);
/// clock.advance(TimeDelta::minutes(10));
/// assert_eq!(clock.now(), start + TimeDelta::minutes(10));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Move the clock to an absolute instant
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    /// Move the clock forward
    pub fn advance(&self, by: chrono::TimeDelta) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}
