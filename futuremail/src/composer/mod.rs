//! One mail composer per page view
//!
//! A [`Composer`] bundles the draft, the body editor, the date-time picker and
//! the single-flight flag. Every user event maps to one method here; the
//! composer keeps `draft.body_html` and `draft.scheduled_at` in step with the
//! editor and the picker after each of them.

mod registry;
mod submit;

pub use registry::{ComposerRegistry, SharedComposer};
pub use submit::{submit, Notice, NoticeLevel, SubmitError, IN_FLIGHT_MESSAGE};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use uuid::Uuid;

use crate::config::ComposerSettings;
use crate::draft::{DraftEmail, TimeBound};
use crate::forms;
use crate::picker::{DateTimePicker, PickerError, TimeField, YearMonth};
use crate::richtext::{EditorCommand, EditorError, RichTextEditor, Selection};
use crate::scheduler::{ScheduleError, ScheduleRequest, SUCCESS_MESSAGE};

/// State of one composer form
#[derive(Debug, Clone)]
pub struct Composer {
    id: Uuid,
    draft: DraftEmail,
    editor: RichTextEditor,
    picker: DateTimePicker,
    lead: TimeDelta,
    busy: bool,
    last_seen: NaiveDateTime,
}

impl Composer {
    /// Mount a fresh composer at `now`
    ///
    /// The picker bound is fixed here to `now + lead`.
    #[must_use]
    pub fn new(now: NaiveDateTime, settings: &ComposerSettings) -> Self {
        let lead = settings.lead_time();
        let bound = TimeBound::after(now, lead);
        Self {
            id: Uuid::new_v4(),
            draft: DraftEmail::new(),
            editor: RichTextEditor::with_history_limit(settings.history_limit),
            picker: DateTimePicker::new(Some(bound), now.date()),
            lead,
            busy: false,
            last_seen: now,
        }
    }

    /// Identifier used in URLs
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Current draft
    #[must_use]
    pub const fn draft(&self) -> &DraftEmail {
        &self.draft
    }

    /// Body editor
    #[must_use]
    pub const fn editor(&self) -> &RichTextEditor {
        &self.editor
    }

    /// Date-time picker
    #[must_use]
    pub const fn picker(&self) -> &DateTimePicker {
        &self.picker
    }

    /// Earliest selectable send time
    #[must_use]
    pub fn bound(&self) -> Option<TimeBound> {
        self.picker.bound()
    }

    /// Whether a submission is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Record activity at `now`
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.last_seen = self.last_seen.max(now);
    }

    /// Untouched for longer than `ttl` and not submitting
    #[must_use]
    pub fn is_idle(&self, now: NaiveDateTime, ttl: TimeDelta) -> bool {
        !self.busy && now - self.last_seen > ttl
    }

    /// Recipient field changed
    pub fn set_recipient(&mut self, recipient: &str) {
        recipient.clone_into(&mut self.draft.recipient);
    }

    /// Subject field changed
    pub fn set_subject(&mut self, subject: &str) {
        subject.clone_into(&mut self.draft.subject);
    }

    /// Plain text typed into the body
    pub fn edit_body(&mut self, text: &str) -> bool {
        let changed = self.editor.sync_text(text);
        self.sync_body();
        changed
    }

    /// Toolbar command on the body
    pub fn apply(&mut self, command: EditorCommand, selection: Selection) -> bool {
        let changed = self.editor.apply(command, selection);
        self.sync_body();
        changed
    }

    /// Link prompt answered
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnsafeLink`] for disallowed URL schemes.
    pub fn insert_link(
        &mut self,
        selection: Selection,
        prompt: Option<&str>,
    ) -> Result<bool, EditorError> {
        let changed = self.editor.insert_link(selection, prompt)?;
        self.sync_body();
        Ok(changed)
    }

    /// Calendar day picked or cleared
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::DisabledDay`] for a greyed-out day.
    pub fn select_day(
        &mut self,
        day: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Option<NaiveDateTime>, PickerError> {
        let value = self.picker.select_day(day, today)?;
        self.draft.scheduled_at = value;
        Ok(value)
    }

    /// Hour, minute or second picked
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::OutOfRange`] for an impossible value.
    pub fn select_component(
        &mut self,
        field: TimeField,
        value: u32,
        now: NaiveDateTime,
    ) -> Result<NaiveDateTime, PickerError> {
        let value = self.picker.select_component(field, value, now)?;
        self.draft.scheduled_at = Some(value);
        Ok(value)
    }

    /// Calendar navigated to another month
    pub fn show_month(&mut self, month: YearMonth) {
        self.picker.show_month(month);
    }

    /// Validate at `now` and mark busy
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] while another submission runs, or
    /// [`SubmitError::Validation`] for the first failing rule. Neither
    /// changes any state.
    pub fn begin_submit(&mut self, now: NaiveDateTime) -> Result<ScheduleRequest, SubmitError> {
        if self.busy {
            return Err(SubmitError::InFlight);
        }
        let valid = forms::validate(&self.draft, now, self.lead)?;
        self.busy = true;
        Ok(ScheduleRequest::from(&valid))
    }

    /// Submission dropped before the scheduling call returned
    ///
    /// The draft is kept as typed.
    pub(crate) fn abandon_submit(&mut self) {
        self.busy = false;
    }

    /// Apply the outcome of the scheduling call
    ///
    /// Success clears the draft and the body, and re-arms the picker with a
    /// bound of `now + lead`; failure keeps everything as typed.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Schedule`] carrying the failure.
    pub fn finish_submit(
        &mut self,
        outcome: Result<(), ScheduleError>,
        now: NaiveDateTime,
    ) -> Result<Notice, SubmitError> {
        self.busy = false;
        self.touch(now);
        outcome?;
        self.reset(now);
        Ok(Notice::success(SUCCESS_MESSAGE))
    }

    fn reset(&mut self, now: NaiveDateTime) {
        self.draft.clear();
        self.editor.clear();
        self.picker
            .reset(Some(TimeBound::after(now, self.lead)), now.date());
    }

    fn sync_body(&mut self) {
        self.draft.body_html = self.editor.html();
    }
}
