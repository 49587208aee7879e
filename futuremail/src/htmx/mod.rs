//! HTMX response types and extractors
//!
//! Builds on `axum-htmx`; adds [`HxSwapOob`] for out-of-band fragments.

mod swap_oob;

pub use swap_oob::{HxSwapOob, SwapStrategy};

pub use axum_htmx::{AutoVaryLayer, HxPrompt, HxRequest};

/// Id of the container toasts are appended to
pub const TOASTS_ID: &str = "toasts";
