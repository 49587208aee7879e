//! Date-time composition for the send-time picker
//!
//! The picker exposes a single optional timestamp. User interaction arrives as
//! two kinds of events: a calendar day pick, and an hour/minute/second pick
//! from enumerated candidates. Both are folded onto the one timestamp and
//! raised to the lower bound when they would fall below it.
//!
//! The free functions [`select_day`] and [`select_component`] are the pure
//! composition rules; [`DateTimePicker`] wraps them with the state a composer
//! keeps (value, bound, month on display).

mod calendar;

pub use calendar::{CalendarDay, CalendarMonth, YearMonth};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

use crate::draft::TimeBound;

/// Errors raised by picker events
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// Component value outside its candidate set
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        /// Field being set
        field: TimeField,
        /// Rejected value
        value: u32,
        /// Largest allowed value
        max: u32,
    },

    /// Unknown component name
    #[error("unknown time field: {0}")]
    UnknownField(String),

    /// The day is greyed out in the calendar
    #[error("{0} can no longer be picked")]
    DisabledDay(NaiveDate),

    /// Unparseable day
    #[error("invalid day: {0}")]
    InvalidDay(String),

    /// Unparseable month
    #[error("invalid month: {0}")]
    InvalidMonth(String),
}

/// One time-of-day component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    /// Hour, 0-23
    Hour,
    /// Minute, 0-59
    Minute,
    /// Second, 0-59
    Second,
}

impl TimeField {
    /// All components in display order
    pub const ALL: [Self; 3] = [Self::Hour, Self::Minute, Self::Second];

    /// Largest value the component accepts
    #[must_use]
    pub const fn max(self) -> u32 {
        match self {
            Self::Hour => 23,
            Self::Minute | Self::Second => 59,
        }
    }

    /// Enumerated candidate values offered by the select
    #[must_use]
    pub const fn candidates(self) -> RangeInclusive<u32> {
        0..=self.max()
    }

    /// Form value of the component
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }

    /// Read this component from a timestamp
    #[must_use]
    pub fn read(self, value: NaiveDateTime) -> u32 {
        match self {
            Self::Hour => value.hour(),
            Self::Minute => value.minute(),
            Self::Second => value.second(),
        }
    }

    /// Value shown when no timestamp is set yet
    #[must_use]
    pub const fn placeholder(self) -> u32 {
        match self {
            Self::Hour => 9,
            Self::Minute | Self::Second => 0,
        }
    }

    fn write(self, value: NaiveDateTime, component: u32) -> Option<NaiveDateTime> {
        match self {
            Self::Hour => value.with_hour(component),
            Self::Minute => value.with_minute(component),
            Self::Second => value.with_second(component),
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeField {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            other => Err(PickerError::UnknownField(other.to_string())),
        }
    }
}

/// Time of day used for a first day pick when there is no lower bound
#[must_use]
pub fn default_time_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Apply a calendar day pick
///
/// `None` clears the whole timestamp. Otherwise the date is replaced, keeping
/// the current time of day; a first pick takes the bound's time of day, or
/// 09:00:00 without a bound. The result never falls below `bound`.
#[must_use]
pub fn select_day(
    current: Option<NaiveDateTime>,
    day: Option<NaiveDate>,
    bound: Option<TimeBound>,
) -> Option<NaiveDateTime> {
    let day = day?;
    let time = match (current, bound) {
        (Some(current), _) => current.time(),
        (None, Some(bound)) => bound.instant().time(),
        (None, None) => default_time_of_day(),
    };
    Some(clamp(day.and_time(time), bound))
}

/// Apply an hour, minute or second pick
///
/// The component is written onto the current value, else onto the bound,
/// else onto `now`. The result never falls below `bound`.
///
/// # Errors
///
/// Returns [`PickerError::OutOfRange`] when `component` is not one of the
/// field's candidates.
pub fn select_component(
    current: Option<NaiveDateTime>,
    field: TimeField,
    component: u32,
    bound: Option<TimeBound>,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, PickerError> {
    let out_of_range = || PickerError::OutOfRange {
        field,
        value: component,
        max: field.max(),
    };
    if !field.candidates().contains(&component) {
        return Err(out_of_range());
    }

    let base = current
        .or_else(|| bound.map(TimeBound::instant))
        .unwrap_or(now);
    let updated = field.write(base, component).ok_or_else(out_of_range)?;
    Ok(clamp(updated, bound))
}

/// Whether a calendar day is greyed out
///
/// Only days strictly before `today` are disabled, and only when a bound is
/// set. Same-day times earlier than the bound are handled by the clamp.
#[must_use]
pub fn is_day_disabled(day: NaiveDate, today: NaiveDate, bound: Option<TimeBound>) -> bool {
    bound.is_some() && day < today
}

fn clamp(value: NaiveDateTime, bound: Option<TimeBound>) -> NaiveDateTime {
    bound.map_or(value, |bound| bound.clamp(value))
}

/// Stateful send-time picker
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use futuremail::draft::TimeBound;
/// use futuremail::picker::{DateTimePicker, TimeField};
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let bound = TimeBound::at(now + chrono::TimeDelta::minutes(5));
/// let mut picker = DateTimePicker::new(Some(bound), now.date());
///
/// picker.select_day(Some(now.date()), now.date()).unwrap();
/// assert_eq!(picker.value(), Some(bound.instant()));
///
/// picker.select_component(TimeField::Hour, 7, now).unwrap();
/// assert_eq!(picker.value(), Some(bound.instant()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimePicker {
    value: Option<NaiveDateTime>,
    bound: Option<TimeBound>,
    month: YearMonth,
}

impl DateTimePicker {
    /// Empty picker showing the month of the bound (or of `today`)
    #[must_use]
    pub fn new(bound: Option<TimeBound>, today: NaiveDate) -> Self {
        let anchor = bound.map_or(today, |bound| bound.instant().date());
        Self {
            value: None,
            bound,
            month: YearMonth::of(anchor),
        }
    }

    /// Current timestamp
    #[must_use]
    pub const fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// Lower bound
    #[must_use]
    pub const fn bound(&self) -> Option<TimeBound> {
        self.bound
    }

    /// Month on display
    #[must_use]
    pub const fn month(&self) -> YearMonth {
        self.month
    }

    /// Pick (or clear, with `None`) a day
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::DisabledDay`] for a greyed-out day; the value
    /// is left untouched.
    pub fn select_day(
        &mut self,
        day: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Option<NaiveDateTime>, PickerError> {
        if let Some(day) = day {
            if is_day_disabled(day, today, self.bound) {
                return Err(PickerError::DisabledDay(day));
            }
            self.month = YearMonth::of(day);
        }
        self.value = select_day(self.value, day, self.bound);
        Ok(self.value)
    }

    /// Pick one time-of-day component
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::OutOfRange`] for a value outside the candidates.
    pub fn select_component(
        &mut self,
        field: TimeField,
        component: u32,
        now: NaiveDateTime,
    ) -> Result<NaiveDateTime, PickerError> {
        let value = select_component(self.value, field, component, self.bound, now)?;
        self.value = Some(value);
        self.month = YearMonth::of(value.date());
        Ok(value)
    }

    /// Value shown by a component select
    #[must_use]
    pub fn component(&self, field: TimeField) -> u32 {
        self.value
            .map_or_else(|| field.placeholder(), |value| field.read(value))
    }

    /// Switch the month on display
    pub fn show_month(&mut self, month: YearMonth) {
        self.month = month;
    }

    /// Grid for the month on display
    #[must_use]
    pub fn calendar(&self, today: NaiveDate) -> CalendarMonth {
        let bound = self.bound;
        CalendarMonth::build(
            self.month,
            today,
            self.value.map(|value| value.date()),
            |day| is_day_disabled(day, today, bound),
        )
    }

    /// Human label of the current value
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.value
            .map(|value| value.format("%B %-d, %Y %H:%M:%S").to_string())
    }

    /// Drop the value and return to the bound's month
    pub fn reset(&mut self, bound: Option<TimeBound>, today: NaiveDate) {
        *self = Self::new(bound, today);
    }
}
