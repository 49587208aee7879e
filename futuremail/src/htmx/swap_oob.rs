//! Out-of-band swaps
//!
//! A handler answers with the fragment for its own target (the primary
//! content) and may append extra fragments that htmx swaps into other
//! elements by id, such as a toast into `#toasts`.

use axum::response::{Html, IntoResponse, Response};
use std::fmt::Write;

/// How an out-of-band fragment lands in its target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwapStrategy {
    /// Replace the target's children
    #[default]
    InnerHTML,
    /// Replace the target itself
    OuterHTML,
    /// Append to the target's children
    BeforeEnd,
}

impl SwapStrategy {
    /// Value of the `hx-swap-oob` attribute
    #[must_use]
    pub const fn oob_value(self) -> &'static str {
        match self {
            Self::InnerHTML => "true",
            Self::OuterHTML => "outerHTML",
            Self::BeforeEnd => "beforeend",
        }
    }
}

#[derive(Debug, Clone)]
struct OobTarget {
    id: String,
    content: String,
    strategy: SwapStrategy,
}

/// Primary fragment plus out-of-band fragments
///
/// ```rust
/// use futuremail::htmx::{HxSwapOob, SwapStrategy};
///
/// let html = HxSwapOob::with_primary("<form>..</form>")
///     .with("toasts", "<div class=\"toast\">Saved</div>", SwapStrategy::BeforeEnd)
///     .render();
///
/// assert!(html.starts_with("<form>"));
/// assert!(html.contains(r#"<div id="toasts" hx-swap-oob="beforeend">"#));
/// ```
#[derive(Debug, Default, Clone)]
pub struct HxSwapOob {
    primary: String,
    targets: Vec<OobTarget>,
}

impl HxSwapOob {
    /// Response with `content` as the primary fragment
    #[must_use]
    pub fn with_primary(content: impl Into<String>) -> Self {
        Self {
            primary: content.into(),
            targets: Vec::new(),
        }
    }

    /// Add an out-of-band fragment
    pub fn add(
        &mut self,
        id: impl Into<String>,
        content: impl Into<String>,
        strategy: SwapStrategy,
    ) -> &mut Self {
        self.targets.push(OobTarget {
            id: id.into(),
            content: content.into(),
            strategy,
        });
        self
    }

    /// Add an out-of-band fragment (builder pattern)
    #[must_use]
    pub fn with(
        mut self,
        id: impl Into<String>,
        content: impl Into<String>,
        strategy: SwapStrategy,
    ) -> Self {
        self.add(id, content, strategy);
        self
    }

    /// Number of out-of-band fragments
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when there is neither primary content nor any fragment
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.targets.is_empty()
    }

    /// Render to one HTML string
    #[must_use]
    pub fn render(&self) -> String {
        let mut html = self.primary.clone();
        for target in &self.targets {
            let _ = write!(
                html,
                r#"<div id="{}" hx-swap-oob="{}">{}</div>"#,
                target.id,
                target.strategy.oob_value(),
                target.content
            );
        }
        html
    }
}

impl IntoResponse for HxSwapOob {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}
