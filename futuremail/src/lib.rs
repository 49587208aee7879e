//! futuremail: write a letter today, have it delivered later
//!
//! A server-rendered HTMX application around a single composer form:
//! recipient, subject, a rich-text body and a delivery date-time picker.
//! On submit the draft is validated and handed to a remote scheduling
//! endpoint, which stores it and sends it at the chosen time.
//!
//! All editing state lives on the server. Each page load mounts a
//! [`composer::Composer`] in the [`composer::ComposerRegistry`], and every
//! user event is a small htmx request that mutates it and answers with a
//! re-rendered fragment.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use futuremail::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     futuremail::observability::init()?;
//!
//!     let config = FutureMailConfig::load()?;
//!     let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
//!     let app = futuremail::handlers::router(AppState::new(config)?);
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`draft`] - the letter being composed and its earliest delivery time
//! - [`richtext`] - body editor: document model, commands, undo, HTML
//! - [`picker`] - calendar and time selection clamped to the bound
//! - [`forms`] - ordered validation of a draft
//! - [`scheduler`] - wire format and HTTP client for the scheduling endpoint
//! - [`composer`] - per-page state machine and the submit flow

#![allow(clippy::missing_errors_doc)]

pub mod clock;
pub mod composer;
pub mod config;
pub mod draft;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod htmx;
pub mod observability;
pub mod picker;
pub mod richtext;
pub mod scheduler;
pub mod state;
pub mod template;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use futuremail::prelude::*;
    //! ```

    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::composer::{
        Composer, ComposerRegistry, Notice, NoticeLevel, SharedComposer, SubmitError,
    };
    pub use crate::config::FutureMailConfig;
    pub use crate::draft::{DraftEmail, TimeBound};
    pub use crate::error::FutureMailError;
    pub use crate::forms::{validate, ValidatedDraft, ValidationFailure};
    pub use crate::htmx::{AutoVaryLayer, HxPrompt, HxRequest, HxSwapOob, SwapStrategy};
    pub use crate::picker::{DateTimePicker, PickerError, TimeField, YearMonth};
    pub use crate::richtext::{EditorCommand, EditorError, RichTextEditor, Selection};
    pub use crate::scheduler::{
        HttpScheduleClient, ScheduleClient, ScheduleEnvelope, ScheduleError, ScheduleRequest,
    };
    pub use crate::state::AppState;

    pub use askama;
    pub use axum;
}
