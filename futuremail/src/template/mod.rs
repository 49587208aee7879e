//! Askama views of the composer
//!
//! Each view is a plain struct built from composer state. Nested fragments
//! are rendered first and passed down as HTML strings, so every fragment can
//! also be sent on its own in an htmx response.

use askama::Template;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::composer::{Composer, Notice};
use crate::picker::{CalendarDay, TimeField};
use crate::richtext::{EditorCommand, RichTextEditor};

/// Trigger text while no time is picked
pub const PICKER_PLACEHOLDER: &str = "Pick a date and time";

/// Full page
#[derive(Debug, Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    /// Rendered [`ComposerView`]
    pub composer_html: String,
}

/// The whole form
#[derive(Debug, Template)]
#[template(path = "composer.html")]
pub struct ComposerView {
    /// Composer id
    pub id: Uuid,
    /// Recipient as typed
    pub recipient: String,
    /// Subject as typed
    pub subject: String,
    /// Rendered [`EditorView`]
    pub editor_html: String,
    /// Rendered [`PickerView`]
    pub picker_html: String,
    /// Submission in flight
    pub busy: bool,
}

impl ComposerView {
    /// Render the composer with all of its fragments
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn render_for(composer: &Composer, today: NaiveDate) -> askama::Result<String> {
        let view = Self {
            id: composer.id(),
            recipient: composer.draft().recipient.clone(),
            subject: composer.draft().subject.clone(),
            editor_html: EditorView::new(composer.id(), composer.editor())?.render()?,
            picker_html: PickerView::new(composer, today).render()?,
            busy: composer.is_busy(),
        };
        view.render()
    }
}

/// One toolbar button
#[derive(Debug, Clone)]
pub struct CommandButton {
    /// URL segment
    pub name: &'static str,
    /// Button text
    pub label: &'static str,
    /// Clickable
    pub enabled: bool,
}

/// Body editor: toolbar, textarea and preview
#[derive(Debug, Template)]
#[template(path = "editor.html")]
pub struct EditorView {
    /// Composer id
    pub id: Uuid,
    /// Text in the textarea
    pub text: String,
    /// Toolbar
    pub commands: Vec<CommandButton>,
    /// Rendered [`PreviewView`]
    pub preview_html: String,
}

impl EditorView {
    /// View of `editor`
    ///
    /// # Errors
    ///
    /// Returns an error if the preview fails to render.
    pub fn new(id: Uuid, editor: &RichTextEditor) -> askama::Result<Self> {
        let commands = EditorCommand::ALL
            .into_iter()
            .map(|command| CommandButton {
                name: command.as_str(),
                label: command.label(),
                enabled: match command {
                    EditorCommand::Undo => editor.can_undo(),
                    EditorCommand::Redo => editor.can_redo(),
                    _ => true,
                },
            })
            .collect();
        Ok(Self {
            id,
            text: editor.plain_text(),
            commands,
            preview_html: PreviewView::new(id, editor).render()?,
        })
    }
}

/// Formatted body and character counter
#[derive(Debug, Template)]
#[template(path = "preview.html")]
pub struct PreviewView {
    /// Composer id
    pub id: Uuid,
    /// Body HTML, already escaped by the document renderer
    pub body_html: String,
    /// Visible characters
    pub text_length: usize,
}

impl PreviewView {
    /// View of `editor`
    #[must_use]
    pub fn new(id: Uuid, editor: &RichTextEditor) -> Self {
        Self {
            id,
            body_html: editor.html(),
            text_length: editor.text_length(),
        }
    }
}

/// One calendar cell
#[derive(Debug, Clone, Default)]
pub struct DayCell {
    /// Day of month, `0` for padding cells
    pub day: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Greyed out
    pub disabled: bool,
    /// Current value
    pub selected: bool,
    /// Today
    pub today: bool,
}

impl From<Option<CalendarDay>> for DayCell {
    fn from(cell: Option<CalendarDay>) -> Self {
        cell.map_or_else(Self::default, |day| Self {
            day: chrono::Datelike::day(&day.date),
            date: day.date.to_string(),
            disabled: day.disabled,
            selected: day.selected,
            today: day.today,
        })
    }
}

/// One `<option>` of a time select
#[derive(Debug, Clone)]
pub struct TimeOption {
    /// Option value
    pub value: u32,
    /// Two-digit label
    pub label: String,
    /// Currently shown
    pub selected: bool,
}

/// One time select
#[derive(Debug, Clone)]
pub struct TimeSelect {
    /// `hour`, `minute` or `second`
    pub field: &'static str,
    /// Candidates
    pub options: Vec<TimeOption>,
}

/// Date-time picker: trigger, month grid and time selects
#[derive(Debug, Template)]
#[template(path = "picker.html")]
pub struct PickerView {
    /// Composer id
    pub id: Uuid,
    /// Trigger text
    pub label: String,
    /// A value is set
    pub has_value: bool,
    /// Earliest allowed time, human readable
    pub bound_label: String,
    /// `"October 2026"`
    pub month_label: String,
    /// `YYYY-MM` of the previous month
    pub prev_month: String,
    /// `YYYY-MM` of the next month
    pub next_month: String,
    /// Month grid
    pub weeks: Vec<Vec<DayCell>>,
    /// Hour, minute and second selects
    pub selects: Vec<TimeSelect>,
}

impl PickerView {
    /// View of the composer's picker on `today`
    #[must_use]
    pub fn new(composer: &Composer, today: NaiveDate) -> Self {
        let picker = composer.picker();
        let calendar = picker.calendar(today);
        let weeks = calendar
            .weeks
            .iter()
            .map(|week| week.iter().copied().map(DayCell::from).collect())
            .collect();
        let selects = TimeField::ALL
            .into_iter()
            .map(|field| {
                let current = picker.component(field);
                TimeSelect {
                    field: field.as_str(),
                    options: field
                        .candidates()
                        .map(|value| TimeOption {
                            value,
                            label: format!("{value:02}"),
                            selected: value == current,
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            id: composer.id(),
            label: picker
                .label()
                .unwrap_or_else(|| PICKER_PLACEHOLDER.to_string()),
            has_value: picker.value().is_some(),
            bound_label: picker
                .bound()
                .map(|bound| bound.instant().format("%B %-d, %Y %H:%M:%S").to_string())
                .unwrap_or_default(),
            month_label: picker.month().label(),
            prev_month: picker.month().prev().to_string(),
            next_month: picker.month().next().to_string(),
            weeks,
            selects,
        }
    }
}

/// Toast
#[derive(Debug, Template)]
#[template(path = "toast.html")]
pub struct ToastView<'a> {
    /// `success` or `error`
    pub level: &'static str,
    /// Heading
    pub title: &'a str,
    /// Text
    pub message: &'a str,
}

impl<'a> From<&'a Notice> for ToastView<'a> {
    fn from(notice: &'a Notice) -> Self {
        Self {
            level: notice.level.as_str(),
            title: notice.title,
            message: &notice.message,
        }
    }
}
