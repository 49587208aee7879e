//! Rich-text document model
//!
//! A document is a list of blocks (paragraphs and list items), each holding
//! styled runs of text. Positions are char offsets into the document's plain
//! text, where consecutive blocks are separated by a single `\n`.

use std::mem;

/// Inline formatting flags
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Marks {
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

/// A toggleable inline mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// `<strong>`
    Bold,
    /// `<em>`
    Italic,
    /// `<u>`
    Underline,
}

impl Mark {
    /// Whether `marks` carries this mark
    #[must_use]
    pub const fn is_set(self, marks: Marks) -> bool {
        match self {
            Self::Bold => marks.bold,
            Self::Italic => marks.italic,
            Self::Underline => marks.underline,
        }
    }

    fn apply(self, marks: &mut Marks, on: bool) {
        match self {
            Self::Bold => marks.bold = on,
            Self::Italic => marks.italic = on,
            Self::Underline => marks.underline = on,
        }
    }
}

/// Styling shared by every char of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Inline marks
    pub marks: Marks,
    /// Hyperlink target
    pub link: Option<String>,
}

/// Maximal stretch of equally styled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Text, never containing `\n`
    pub text: String,
    /// Styling of the text
    pub style: Style,
}

impl Run {
    /// Unstyled run
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    fn styled(text: &str, style: &Style) -> Self {
        Self {
            text: text.to_string(),
            style: style.clone(),
        }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Block-level structure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `<p>`
    #[default]
    Paragraph,
    /// `<ul><li>`
    BulletItem,
    /// `<ol><li>`
    NumberedItem,
}

/// Paragraph or list item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Block structure
    pub kind: BlockKind,
    /// Styled content
    pub runs: Vec<Run>,
}

impl Block {
    fn new(kind: BlockKind, runs: Vec<Run>) -> Self {
        Self {
            kind,
            runs: normalize(runs),
        }
    }

    /// Length in chars
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    /// Whether the block has no text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    /// Unstyled text of the block
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    fn map_range(&mut self, start: usize, end: usize, f: impl Fn(&mut Style)) {
        let (mut head, rest) = split_runs(mem::take(&mut self.runs), start);
        let (mut middle, tail) = split_runs(rest, end - start);
        for run in &mut middle {
            f(&mut run.style);
        }
        head.append(&mut middle);
        head.extend(tail);
        self.runs = normalize(head);
    }

    fn all_in_range(&self, start: usize, end: usize, pred: impl Fn(&Style) -> bool) -> bool {
        let mut pos = 0;
        for run in &self.runs {
            let len = run.len();
            let overlap = (pos + len).min(end) > pos.max(start);
            if overlap && !pred(&run.style) {
                return false;
            }
            pos += len;
        }
        true
    }
}

/// Caret or range in plain-text char offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Anchor offset
    pub start: usize,
    /// Focus offset
    pub end: usize,
}

impl Selection {
    /// Range selection; reversed ranges are normalised
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Selection from textarea offsets, which count UTF-16 code units
    ///
    /// An offset inside a surrogate pair rounds down to the char holding it.
    #[must_use]
    pub fn from_utf16(text: &str, start: usize, end: usize) -> Self {
        Self::new(char_offset(text, start), char_offset(text, end))
    }

    /// Collapsed selection
    #[must_use]
    pub const fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Whether nothing is selected
    #[must_use]
    pub const fn is_collapsed(self) -> bool {
        self.start == self.end
    }

    fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Char index of the UTF-16 code unit `units` of `text`
fn char_offset(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (index, ch) in text.chars().enumerate() {
        seen += ch.len_utf16();
        if seen > units {
            return index;
        }
    }
    text.chars().count()
}

#[derive(Debug, Clone, Copy)]
struct BlockSpan {
    index: usize,
    start: usize,
    end: usize,
}

/// The letter body
///
/// Always holds at least one block.
///
/// # Example
///
/// ```rust
/// use futuremail::richtext::{Document, Mark, Selection};
///
/// let mut doc = Document::from_plain_text("hello world");
/// doc.toggle_mark(Selection::new(0, 5), Mark::Bold);
/// assert_eq!(doc.plain_text(), "hello world");
/// assert!(doc.blocks()[0].runs[0].style.marks.bold);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Document with one empty paragraph
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::default()],
        }
    }

    /// One paragraph per line of `text`
    #[must_use]
    pub fn from_plain_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.insert(0, text);
        doc
    }

    /// Blocks in order
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Plain text, blocks joined by `\n`
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Length of the plain text in chars
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.iter().map(Block::len).sum::<usize>() + self.blocks.len() - 1
    }

    /// Whether the document is a single empty paragraph
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1
            && self.blocks[0].kind == BlockKind::Paragraph
            && self.blocks[0].is_empty()
    }

    /// Replace the selected text with `text`
    ///
    /// A `\n` in `text` starts a new block of the same kind as the block the
    /// caret is in. Inserted text takes the style of the text before it.
    pub fn replace(&mut self, selection: Selection, text: &str) {
        let selection = selection.clamped(self.len());
        if !selection.is_collapsed() {
            self.delete(selection.start, selection.end);
        }
        if !text.is_empty() {
            self.insert(selection.start, text);
        }
    }

    /// Toggle an inline mark over the selection
    ///
    /// When every selected char already carries the mark it is removed,
    /// otherwise it is added everywhere. A collapsed selection changes nothing.
    pub fn toggle_mark(&mut self, selection: Selection, mark: Mark) {
        let selection = selection.clamped(self.len());
        if selection.is_collapsed() {
            return;
        }
        let spans: Vec<_> = self
            .spans(selection)
            .into_iter()
            .filter(|span| span.start < span.end)
            .collect();
        let all_marked = spans.iter().all(|span| {
            self.blocks[span.index].all_in_range(span.start, span.end, |style| {
                mark.is_set(style.marks)
            })
        });
        for span in spans {
            self.blocks[span.index].map_range(span.start, span.end, |style| {
                mark.apply(&mut style.marks, !all_marked);
            });
        }
    }

    /// Toggle the list kind of every block the selection touches
    ///
    /// If all touched blocks already have `kind` they become paragraphs.
    pub fn toggle_list(&mut self, selection: Selection, kind: BlockKind) {
        let selection = selection.clamped(self.len());
        let spans = self.spans(selection);
        let all_listed = spans
            .iter()
            .all(|span| self.blocks[span.index].kind == kind);
        let target = if all_listed {
            BlockKind::Paragraph
        } else {
            kind
        };
        for span in spans {
            self.blocks[span.index].kind = target;
        }
    }

    /// Link the selection to `url`
    ///
    /// With a collapsed selection the URL itself is inserted at the caret as
    /// linked text.
    pub fn set_link(&mut self, selection: Selection, url: &str) {
        let mut selection = selection.clamped(self.len());
        if selection.is_collapsed() {
            self.insert(selection.start, url);
            selection = Selection::new(selection.start, selection.start + url.chars().count());
        }
        for span in self.spans(selection) {
            if span.start < span.end {
                self.blocks[span.index].map_range(span.start, span.end, |style| {
                    style.link = Some(url.to_string());
                });
            }
        }
    }

    fn spans(&self, selection: Selection) -> Vec<BlockSpan> {
        let mut spans = Vec::new();
        let mut offset = 0;
        for (index, block) in self.blocks.iter().enumerate() {
            let len = block.len();
            let block_end = offset + len;
            if selection.end >= offset && selection.start <= block_end {
                spans.push(BlockSpan {
                    index,
                    start: selection.start.saturating_sub(offset).min(len),
                    end: (selection.end - offset).min(len),
                });
            }
            offset = block_end + 1;
            if offset > selection.end {
                break;
            }
        }
        spans
    }

    fn locate(&self, at: usize) -> (usize, usize) {
        self.spans(Selection::caret(at))
            .first()
            .map_or_else(
                || {
                    let last = self.blocks.len() - 1;
                    (last, self.blocks[last].len())
                },
                |span| (span.index, span.start),
            )
    }

    fn delete(&mut self, start: usize, end: usize) {
        let (first, local_start) = self.locate(start);
        let (last, local_end) = self.locate(end);

        if first == last {
            let block = &mut self.blocks[first];
            let (mut head, rest) = split_runs(mem::take(&mut block.runs), local_start);
            let (_, tail) = split_runs(rest, local_end - local_start);
            head.extend(tail);
            block.runs = normalize(head);
            return;
        }

        let (mut head, _) = split_runs(mem::take(&mut self.blocks[first].runs), local_start);
        let (_, tail) = split_runs(mem::take(&mut self.blocks[last].runs), local_end);
        head.extend(tail);
        self.blocks[first].runs = normalize(head);
        self.blocks.drain(first + 1..=last);
    }

    fn insert(&mut self, at: usize, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let (index, local) = self.locate(at);
        let kind = self.blocks[index].kind;
        let (mut head, tail) = split_runs(mem::take(&mut self.blocks[index].runs), local);
        let style = head
            .last()
            .or_else(|| tail.first())
            .map(|run| run.style.clone())
            .unwrap_or_default();

        let mut lines = text.split('\n');
        head.push(Run::styled(lines.next().unwrap_or_default(), &style));
        let rest: Vec<&str> = lines.collect();

        let Some((last_line, middle)) = rest.split_last() else {
            head.extend(tail);
            self.blocks[index].runs = normalize(head);
            return;
        };

        self.blocks[index].runs = normalize(head);
        let mut new_blocks: Vec<Block> = middle
            .iter()
            .map(|line| Block::new(kind, vec![Run::styled(line, &style)]))
            .collect();
        let mut last_runs = vec![Run::styled(last_line, &style)];
        last_runs.extend(tail);
        new_blocks.push(Block::new(kind, last_runs));
        self.blocks.splice(index + 1..index + 1, new_blocks);
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

fn split_runs(runs: Vec<Run>, at: usize) -> (Vec<Run>, Vec<Run>) {
    let mut head = Vec::new();
    let mut tail = Vec::new();
    let mut pos = 0;
    for run in runs {
        let len = run.len();
        if pos + len <= at {
            head.push(run);
        } else if pos >= at {
            tail.push(run);
        } else {
            let cut = byte_offset(&run.text, at - pos);
            let (left, right) = run.text.split_at(cut);
            head.push(Run::styled(left, &run.style));
            tail.push(Run::styled(right, &run.style));
        }
        pos += len;
    }
    (head, tail)
}

fn normalize(runs: Vec<Run>) -> Vec<Run> {
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs.into_iter().filter(|run| !run.text.is_empty()) {
        match merged.last_mut() {
            Some(prev) if prev.style == run.style => prev.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    merged
}
