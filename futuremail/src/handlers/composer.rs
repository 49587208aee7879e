//! Page, text fields and submission

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::composer::{self, Notice, SubmitError, IN_FLIGHT_MESSAGE};
use crate::error::FutureMailError;
use crate::htmx::{HxRequest, HxSwapOob, SwapStrategy, TOASTS_ID};
use crate::state::AppState;
use crate::template::{ComposerView, IndexPage, ToastView};

/// Recipient field
#[derive(Debug, Default, Deserialize)]
pub struct RecipientForm {
    /// Address as typed
    #[serde(default)]
    pub recipient: String,
}

/// Subject field
#[derive(Debug, Default, Deserialize)]
pub struct SubjectForm {
    /// Subject as typed
    #[serde(default)]
    pub subject: String,
}

/// Fields sent along with a submit
///
/// The browser posts the whole form, so the latest keystrokes that have not
/// been synced yet still make it into the draft.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    /// Recipient
    pub recipient: Option<String>,
    /// Subject
    pub subject: Option<String>,
    /// Body plain text
    pub text: Option<String>,
}

/// Full page with a freshly mounted composer
///
/// htmx requests (such as a boosted reload) get the composer fragment only.
pub async fn index(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
) -> Result<Html<String>, FutureMailError> {
    let now = state.now();
    let shared = state.registry().mount(now);
    let composer_html = ComposerView::render_for(&shared.lock(), now.date())?;

    if is_htmx {
        return Ok(Html(composer_html));
    }
    super::render(&IndexPage { composer_html })
}

/// Recipient typed
pub async fn update_recipient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<RecipientForm>,
) -> Result<StatusCode, FutureMailError> {
    let shared = state.composer(id)?;
    super::lock_editable(&shared)?.set_recipient(&form.recipient);
    Ok(StatusCode::NO_CONTENT)
}

/// Subject typed
pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<SubjectForm>,
) -> Result<StatusCode, FutureMailError> {
    let shared = state.composer(id)?;
    super::lock_editable(&shared)?.set_subject(&form.subject);
    Ok(StatusCode::NO_CONTENT)
}

/// Validate and schedule the letter
///
/// Answers with the re-rendered composer (cleared on success, unchanged on
/// failure) and an out-of-band toast. A submit while another one is in
/// flight is refused with 409.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<SubmitForm>,
) -> Result<HxSwapOob, FutureMailError> {
    let shared = state.composer(id)?;
    {
        let mut composer = shared.lock();
        if !composer.is_busy() {
            if let Some(recipient) = &form.recipient {
                composer.set_recipient(recipient);
            }
            if let Some(subject) = &form.subject {
                composer.set_subject(subject);
            }
            if let Some(text) = &form.text {
                composer.edit_body(text);
            }
        }
    }

    let outcome = composer::submit(&shared, state.client(), state.clock()).await;
    let notice = match &outcome {
        Ok(notice) => notice.clone(),
        Err(SubmitError::InFlight) => {
            return Err(FutureMailError::Conflict(IN_FLIGHT_MESSAGE.to_string()));
        }
        Err(err) => Notice::from(err),
    };

    let composer_html = ComposerView::render_for(&shared.lock(), state.now().date())?;
    let toast_html = ToastView::from(&notice).render()?;
    Ok(HxSwapOob::with_primary(composer_html).with(
        TOASTS_ID,
        toast_html,
        SwapStrategy::BeforeEnd,
    ))
}
