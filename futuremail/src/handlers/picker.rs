//! Date-time picker events

use axum::{
    extract::{Path, Query, State},
    response::Html,
    Form,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::FutureMailError;
use crate::picker::{PickerError, TimeField, YearMonth};
use crate::state::AppState;
use crate::template::PickerView;

/// Day cell clicked; empty clears the value
#[derive(Debug, Default, Deserialize)]
pub struct DayForm {
    /// `YYYY-MM-DD` or empty
    #[serde(default)]
    pub day: String,
}

impl DayForm {
    /// Parsed day
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidDay`] for anything but `YYYY-MM-DD`.
    pub fn day(&self) -> Result<Option<NaiveDate>, PickerError> {
        let day = self.day.trim();
        if day.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| PickerError::InvalidDay(day.to_string()))
    }
}

/// Time select changed
///
/// The value arrives either as `value` or under the select's own name
/// (`hour`, `minute`, `second`), since the browser posts the whole form.
#[derive(Debug, Default, Deserialize)]
pub struct TimeForm {
    /// `hour`, `minute` or `second`
    #[serde(default)]
    pub field: String,
    /// New component value
    pub value: Option<String>,
    /// Hour select
    pub hour: Option<String>,
    /// Minute select
    pub minute: Option<String>,
    /// Second select
    pub second: Option<String>,
}

impl TimeForm {
    /// Parsed field and value
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown field or a missing or non-numeric
    /// value. Range checks are left to the picker.
    pub fn component(&self) -> Result<(TimeField, u32), FutureMailError> {
        let field: TimeField = self.field.parse()?;
        let named = match field {
            TimeField::Hour => &self.hour,
            TimeField::Minute => &self.minute,
            TimeField::Second => &self.second,
        };
        let raw = self
            .value
            .as_deref()
            .or(named.as_deref())
            .ok_or_else(|| FutureMailError::BadRequest(format!("missing {field} value")))?;
        let value = raw
            .trim()
            .parse()
            .map_err(|_| FutureMailError::BadRequest(format!("{field} must be a number")))?;
        Ok((field, value))
    }
}

/// Month navigation
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// `YYYY-MM`; absent keeps the current month
    pub month: Option<String>,
}

/// Day picked or cleared
pub async fn select_day(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<DayForm>,
) -> Result<Html<String>, FutureMailError> {
    let day = form.day()?;
    let today = state.now().date();

    let shared = state.composer(id)?;
    let mut composer = super::lock_editable(&shared)?;
    let value = composer.select_day(day, today)?;
    tracing::debug!(composer = %id, ?value, "day selected");
    super::render(&PickerView::new(&composer, today))
}

/// Hour, minute or second picked
pub async fn select_time(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<TimeForm>,
) -> Result<Html<String>, FutureMailError> {
    let (field, component) = form.component()?;
    let now = state.now();

    let shared = state.composer(id)?;
    let mut composer = super::lock_editable(&shared)?;
    let value = composer.select_component(field, component, now)?;
    tracing::debug!(composer = %id, %field, %value, "time selected");
    super::render(&PickerView::new(&composer, now.date()))
}

/// Show another month
pub async fn show_month(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<Html<String>, FutureMailError> {
    let month = query
        .month
        .as_deref()
        .map(str::parse::<YearMonth>)
        .transpose()?;
    let today = state.now().date();

    let shared = state.composer(id)?;
    let mut composer = shared.lock();
    if let Some(month) = month {
        composer.show_month(month);
    }
    super::render(&PickerView::new(&composer, today))
}
