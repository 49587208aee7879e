//! Body editor events

use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::composer::Composer;
use crate::error::FutureMailError;
use crate::htmx::HxPrompt;
use crate::richtext::{EditorCommand, Selection};
use crate::state::AppState;
use crate::template::{EditorView, PreviewView};

/// Plain text of the body
#[derive(Debug, Default, Deserialize)]
pub struct TextForm {
    /// Textarea content
    #[serde(default)]
    pub text: String,
}

/// Toolbar request: current text and textarea selection
#[derive(Debug, Default, Deserialize)]
pub struct SelectionForm {
    /// Textarea content, synced before the command runs
    pub text: Option<String>,
    /// `selectionStart`, in UTF-16 code units
    pub start: Option<String>,
    /// `selectionEnd`, in UTF-16 code units
    pub end: Option<String>,
}

impl SelectionForm {
    /// Parsed offsets; missing ones mean the start of the text
    ///
    /// # Errors
    ///
    /// Returns [`FutureMailError::BadRequest`] for non-numeric offsets.
    pub fn offsets(&self) -> Result<(usize, usize), FutureMailError> {
        let start = parse_offset("start", self.start.as_deref())?;
        let end = parse_offset("end", self.end.as_deref())?;
        Ok((start, end))
    }

    /// Sync the posted text, then map the offsets onto it
    fn apply_to(&self, composer: &mut Composer, (start, end): (usize, usize)) -> Selection {
        if let Some(text) = &self.text {
            composer.edit_body(text);
        }
        Selection::from_utf16(&composer.editor().plain_text(), start, end)
    }
}

fn parse_offset(name: &str, raw: Option<&str>) -> Result<usize, FutureMailError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(0),
        Some(raw) => raw
            .parse()
            .map_err(|_| FutureMailError::BadRequest(format!("{name} must be a text offset"))),
    }
}

/// Body typed: refresh preview and counter
pub async fn sync_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<TextForm>,
) -> Result<Html<String>, FutureMailError> {
    let shared = state.composer(id)?;
    let mut composer = super::lock_editable(&shared)?;
    composer.edit_body(&form.text);
    super::render(&PreviewView::new(id, composer.editor()))
}

/// Toolbar button
pub async fn run_command(
    State(state): State<AppState>,
    Path((id, command)): Path<(Uuid, String)>,
    Form(form): Form<SelectionForm>,
) -> Result<Html<String>, FutureMailError> {
    let command: EditorCommand = command.parse()?;
    let offsets = form.offsets()?;

    let shared = state.composer(id)?;
    let mut composer = super::lock_editable(&shared)?;
    let selection = form.apply_to(&mut composer, offsets);
    if composer.apply(command, selection) {
        tracing::debug!(composer = %id, %command, "body edited");
    }
    super::render(&EditorView::new(id, composer.editor())?)
}

/// Link button, URL taken from the `HX-Prompt` header
pub async fn insert_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    HxPrompt(prompt): HxPrompt,
    Form(form): Form<SelectionForm>,
) -> Result<Html<String>, FutureMailError> {
    let offsets = form.offsets()?;

    let shared = state.composer(id)?;
    let mut composer = super::lock_editable(&shared)?;
    let selection = form.apply_to(&mut composer, offsets);
    composer.insert_link(selection, prompt.as_deref())?;
    super::render(&EditorView::new(id, composer.editor())?)
}
