//! HTTP handlers and router
//!
//! Every user event on the page is one small htmx request:
//!
//! | Route | Event | Response |
//! |-------|-------|----------|
//! | `GET /` | page load, mounts a composer | full page |
//! | `POST /composer/{id}/recipient` | recipient typed | 204 |
//! | `POST /composer/{id}/subject` | subject typed | 204 |
//! | `POST /composer/{id}/body/text` | body typed | preview fragment |
//! | `POST /composer/{id}/body/link` | link prompt answered | editor fragment |
//! | `POST /composer/{id}/body/{command}` | toolbar button | editor fragment |
//! | `POST /composer/{id}/schedule/day` | calendar day picked | picker fragment |
//! | `POST /composer/{id}/schedule/time` | hour/minute/second picked | picker fragment |
//! | `GET /composer/{id}/schedule/calendar` | month navigation | picker fragment |
//! | `POST /composer/{id}/submit` | submit | composer fragment + toast |
//! | `GET /health` | liveness | JSON |
//!
//! Edits to a composer whose submission is in flight are refused with 409.

pub mod composer;
pub mod editor;
pub mod health;
pub mod picker;

use askama::Template;
use axum::{
    response::Html,
    routing::{get, post},
    Router,
};
use parking_lot::MutexGuard;
use tower_http::trace::TraceLayer;

use crate::composer::{Composer, SharedComposer, IN_FLIGHT_MESSAGE};
use crate::error::FutureMailError;
use crate::htmx::AutoVaryLayer;
use crate::state::AppState;

/// Build the application router
///
/// # Example
///
/// ```rust,no_run
/// use futuremail::{config::FutureMailConfig, handlers, state::AppState};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = FutureMailConfig::load()?;
/// let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
/// let app = handlers::router(AppState::new(config)?);
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(composer::index))
        .route("/health", get(health::health))
        .route("/composer/{id}/recipient", post(composer::update_recipient))
        .route("/composer/{id}/subject", post(composer::update_subject))
        .route("/composer/{id}/submit", post(composer::submit))
        .route("/composer/{id}/body/text", post(editor::sync_text))
        .route("/composer/{id}/body/link", post(editor::insert_link))
        .route("/composer/{id}/body/{command}", post(editor::run_command))
        .route("/composer/{id}/schedule/day", post(picker::select_day))
        .route("/composer/{id}/schedule/time", post(picker::select_time))
        .route("/composer/{id}/schedule/calendar", get(picker::show_month))
        .layer(AutoVaryLayer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Lock a composer for an edit
fn lock_editable(shared: &SharedComposer) -> Result<MutexGuard<'_, Composer>, FutureMailError> {
    let composer = shared.lock();
    if composer.is_busy() {
        return Err(FutureMailError::Conflict(IN_FLIGHT_MESSAGE.to_string()));
    }
    Ok(composer)
}

/// Render a view into an HTML response
fn render(view: &impl Template) -> Result<Html<String>, FutureMailError> {
    Ok(Html(view.render()?))
}

#[cfg(test)]
mod tests;
