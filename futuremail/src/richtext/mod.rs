//! Rich-text value store for the letter body
//!
//! The body is an explicit [`Document`] edited through discrete operations:
//! mark toggles, list toggles, link insertion, plain-text sync, undo and redo.
//! Each successful operation is recorded in a snapshot [`History`] and the
//! caller re-reads the whole rendered HTML afterwards.
//!
//! # Example
//!
//! ```rust
//! use futuremail::richtext::{EditorCommand, RichTextEditor, Selection};
//!
//! let mut editor = RichTextEditor::default();
//! editor.sync_text("hello");
//! editor.apply(EditorCommand::Bold, Selection::new(0, 5));
//! assert_eq!(editor.html(), "<p><strong>hello</strong></p>");
//!
//! editor.apply(EditorCommand::Undo, Selection::default());
//! assert_eq!(editor.html(), "<p>hello</p>");
//! ```

mod document;
pub mod html;
mod history;

pub use document::{Block, BlockKind, Document, Mark, Marks, Run, Selection, Style};
pub use history::{History, DEFAULT_HISTORY_LIMIT};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rich-text editing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Unknown toolbar command
    #[error("unknown editor command: {0}")]
    UnknownCommand(String),

    /// Link target with a scheme that could run script
    #[error("links must use http, https or mailto: {0}")]
    UnsafeLink(String),
}

/// Toolbar commands that need no extra input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    /// Toggle bold
    Bold,
    /// Toggle italic
    Italic,
    /// Toggle underline
    Underline,
    /// Toggle bulleted list
    UnorderedList,
    /// Toggle numbered list
    OrderedList,
    /// Step back
    Undo,
    /// Step forward
    Redo,
}

impl EditorCommand {
    /// Toolbar order
    pub const ALL: [Self; 7] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::UnorderedList,
        Self::OrderedList,
        Self::Undo,
        Self::Redo,
    ];

    /// Path segment used by the toolbar button
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::UnorderedList => "unordered-list",
            Self::OrderedList => "ordered-list",
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }

    /// Button tooltip
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::UnorderedList => "Bulleted list",
            Self::OrderedList => "Numbered list",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorCommand {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| EditorError::UnknownCommand(s.to_string()))
    }
}

/// Validate a link target typed into the prompt
///
/// Returns `Ok(None)` for an empty or cancelled prompt, which means "do
/// nothing". Targets without a scheme are kept as typed (relative links).
///
/// # Errors
///
/// Returns [`EditorError::UnsafeLink`] for schemes other than `http`,
/// `https` and `mailto`.
pub fn normalize_link(input: Option<&str>) -> Result<Option<String>, EditorError> {
    let Some(url) = input.map(str::trim).filter(|url| !url.is_empty()) else {
        return Ok(None);
    };
    if let Some((scheme, _)) = url.split_once(':') {
        let is_scheme = scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        let allowed = ["http", "https", "mailto"]
            .iter()
            .any(|known| scheme.eq_ignore_ascii_case(known));
        if is_scheme && !allowed {
            return Err(EditorError::UnsafeLink(url.to_string()));
        }
    }
    Ok(Some(url.to_string()))
}

/// The body editor: document plus undo history
#[derive(Debug, Clone, Default)]
pub struct RichTextEditor {
    doc: Document,
    history: History<Document>,
}

impl RichTextEditor {
    /// Empty editor remembering up to `limit` undo steps
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            doc: Document::new(),
            history: History::with_limit(limit),
        }
    }

    /// The document
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    /// Rendered HTML of the whole body
    #[must_use]
    pub fn html(&self) -> String {
        html::render(&self.doc)
    }

    /// Plain text as edited in the browser
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.doc.plain_text()
    }

    /// Character counter value
    #[must_use]
    pub fn text_length(&self) -> usize {
        html::text_length(&self.html())
    }

    /// Whether undo is available
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Run a toolbar command; returns whether the document changed
    pub fn apply(&mut self, command: EditorCommand, selection: Selection) -> bool {
        match command {
            EditorCommand::Bold => self.mutate(|doc| doc.toggle_mark(selection, Mark::Bold)),
            EditorCommand::Italic => self.mutate(|doc| doc.toggle_mark(selection, Mark::Italic)),
            EditorCommand::Underline => {
                self.mutate(|doc| doc.toggle_mark(selection, Mark::Underline))
            }
            EditorCommand::UnorderedList => {
                self.mutate(|doc| doc.toggle_list(selection, BlockKind::BulletItem))
            }
            EditorCommand::OrderedList => {
                self.mutate(|doc| doc.toggle_list(selection, BlockKind::NumberedItem))
            }
            EditorCommand::Undo => self.step(History::undo),
            EditorCommand::Redo => self.step(History::redo),
        }
    }

    /// Link the selection to the prompted URL
    ///
    /// An empty or cancelled prompt leaves the document untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnsafeLink`] for script-capable URLs.
    pub fn insert_link(
        &mut self,
        selection: Selection,
        prompt: Option<&str>,
    ) -> Result<bool, EditorError> {
        let Some(url) = normalize_link(prompt)? else {
            return Ok(false);
        };
        Ok(self.mutate(|doc| doc.set_link(selection, &url)))
    }

    /// Bring the document in line with the plain text edited in the browser
    ///
    /// Only the changed stretch (between the common prefix and suffix) is
    /// replaced, so formatting elsewhere survives typing.
    pub fn sync_text(&mut self, text: &str) -> bool {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let old: Vec<char> = self.doc.plain_text().chars().collect();
        let new: Vec<char> = text.chars().collect();

        let prefix = old
            .iter()
            .zip(&new)
            .take_while(|(a, b)| a == b)
            .count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        let removed = Selection::new(prefix, old.len() - suffix);
        let inserted: String = new[prefix..new.len() - suffix].iter().collect();
        if removed.is_collapsed() && inserted.is_empty() {
            return false;
        }
        self.mutate(|doc| doc.replace(removed, &inserted))
    }

    /// Drop content and history
    pub fn clear(&mut self) {
        self.doc = Document::new();
        self.history.clear();
    }

    fn mutate(&mut self, f: impl FnOnce(&mut Document)) -> bool {
        let before = self.doc.clone();
        f(&mut self.doc);
        if self.doc == before {
            return false;
        }
        self.history.record(before);
        true
    }

    fn step(
        &mut self,
        f: impl FnOnce(&mut History<Document>, Document) -> Result<Document, Document>,
    ) -> bool {
        let current = std::mem::take(&mut self.doc);
        match f(&mut self.history, current) {
            Ok(doc) => {
                self.doc = doc;
                true
            }
            Err(doc) => {
                self.doc = doc;
                false
            }
        }
    }
}
