use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, Request, StatusCode};
use chrono::TimeDelta;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

use super::health::HealthResponse;
use crate::clock::{Clock, ManualClock};
use crate::composer::IN_FLIGHT_MESSAGE;
use crate::config::FutureMailConfig;
use crate::state::AppState;
use crate::scheduler::{
    MockScheduleClient, ScheduleEnvelope, ScheduleError, NETWORK_ERROR_FALLBACK, SUCCESS_MESSAGE,
};
use crate::testing::{assert_toast, assert_varies_on, test_now, GatedScheduleClient, TestServer};

fn idle_client() -> MockScheduleClient {
    let mut client = MockScheduleClient::new();
    client.expect_schedule().never();
    client
}

/// htmx always posts the enclosing form, even when every field is empty
fn no_fields() -> Vec<(&'static str, &'static str)> {
    Vec::new()
}

async fn fill(server: &TestServer, id: Uuid) {
    server
        .post(&format!("/composer/{id}/recipient"))
        .form(&[("recipient", "a@b.com")])
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .post(&format!("/composer/{id}/subject"))
        .form(&[("subject", "Hi")])
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .post(&format!("/composer/{id}/body/text"))
        .form(&[("text", "hello")])
        .await
        .assert_status_ok();
    server
        .post(&format!("/composer/{id}/schedule/day"))
        .form(&[("day", "2026-10-16")])
        .await
        .assert_status_ok();
    server
        .post(&format!("/composer/{id}/schedule/time"))
        .form(&[("field", "minute"), ("value", "10")])
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_index_mounts_composer() {
    let server = TestServer::new(idle_client()).unwrap();
    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Pick a date and time"));
    assert!(html.contains(r#"id="toasts""#));
    assert_varies_on(&response, "hx-request");
    assert_eq!(server.state().registry().len(), 1);
}

#[tokio::test]
async fn test_router_oneshot_varies_on_hx_request() {
    let state = AppState::with_parts(
        FutureMailConfig::default(),
        Arc::new(idle_client()),
        Arc::new(ManualClock::new(test_now())),
    );
    let app = super::router(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let vary = response.headers().get(header::VARY).unwrap();
    assert!(vary.to_str().unwrap().to_ascii_lowercase().contains("hx-request"));
}

#[tokio::test]
async fn test_index_fragment_for_htmx() {
    let server = TestServer::new(idle_client()).unwrap();
    let response = server
        .get("/")
        .add_header(
            HeaderName::from_static("hx-request"),
            HeaderValue::from_static("true"),
        )
        .await;

    let html = response.text();
    assert!(!html.contains("<!DOCTYPE html>"));
    assert!(html.contains("composer-"));
}

#[tokio::test]
async fn test_scheduled_letter_resets_form() {
    let mut client = MockScheduleClient::new();
    client
        .expect_schedule()
        .withf(|request| {
            request.to == "a@b.com"
                && request.subject == "Hi"
                && request.content == "<p>hello</p>"
                && request.scheduled_time == "2026-10-16 08:10:00"
        })
        .times(1)
        .returning(|_| Ok(ScheduleEnvelope::accepted()));
    let server = TestServer::new(client).unwrap();
    let id = server.mount().await;
    fill(&server, id).await;

    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&no_fields())
        .await;

    response.assert_status_ok();
    assert_toast(&response, "success", SUCCESS_MESSAGE);
    assert!(!response.text().contains("a@b.com"));
    let composer = server.state().registry().get(id).unwrap();
    assert!(composer.lock().draft().is_empty());
}

#[tokio::test]
async fn test_submit_applies_posted_fields() {
    let mut client = MockScheduleClient::new();
    client
        .expect_schedule()
        .withf(|request| request.subject == "Changed" && request.content == "<p>hello there</p>")
        .times(1)
        .returning(|_| Ok(ScheduleEnvelope::accepted()));
    let server = TestServer::new(client).unwrap();
    let id = server.mount().await;
    fill(&server, id).await;

    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&[
            ("recipient", "a@b.com"),
            ("subject", "Changed"),
            ("text", "hello there"),
        ])
        .await;

    assert_toast(&response, "success", SUCCESS_MESSAGE);
}

#[tokio::test]
async fn test_validation_failure_reported_in_order() {
    let server = TestServer::new(idle_client()).unwrap();
    let id = server.mount().await;

    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&no_fields())
        .await;
    response.assert_status_ok();
    assert_toast(&response, "error", "Please enter the recipient&#x27;s email address.");

    server
        .post(&format!("/composer/{id}/recipient"))
        .form(&[("recipient", "a@b.com")])
        .await;
    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&no_fields())
        .await;
    assert_toast(&response, "error", "Please enter a subject.");
}

#[tokio::test]
async fn test_refusal_keeps_draft() {
    let mut client = MockScheduleClient::new();
    client
        .expect_schedule()
        .times(1)
        .returning(|_| Ok(ScheduleEnvelope::refused(1, "duplicate")));
    let server = TestServer::new(client).unwrap();
    let id = server.mount().await;
    fill(&server, id).await;

    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&no_fields())
        .await;

    assert_toast(&response, "error", "duplicate");
    assert!(response.text().contains(r#"value="a@b.com""#));
    let composer = server.state().registry().get(id).unwrap();
    assert_eq!(composer.lock().draft().subject, "Hi");
}

#[tokio::test]
async fn test_network_failure_shows_fallback() {
    let mut client = MockScheduleClient::new();
    client
        .expect_schedule()
        .times(1)
        .returning(|_| Err(ScheduleError::network("connection refused")));
    let server = TestServer::new(client).unwrap();
    let id = server.mount().await;
    fill(&server, id).await;

    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&no_fields())
        .await;

    assert_toast(&response, "error", NETWORK_ERROR_FALLBACK);
}

#[tokio::test]
async fn test_stale_time_rejected() {
    let server = TestServer::new(idle_client()).unwrap();
    let id = server.mount().await;
    fill(&server, id).await;
    server.clock().advance(TimeDelta::minutes(6));

    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&no_fields())
        .await;

    assert_toast(
        &response,
        "error",
        "The delivery time must be at least 5 minutes from now.",
    );
}

#[tokio::test]
async fn test_second_submit_conflicts() {
    let server = TestServer::new(idle_client()).unwrap();
    let id = server.mount().await;
    fill(&server, id).await;
    let composer = server.state().registry().get(id).unwrap();
    composer
        .lock()
        .begin_submit(server.clock().now())
        .unwrap();

    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&no_fields())
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.text(), "A submission is already in progress.");

    server
        .post(&format!("/composer/{id}/recipient"))
        .form(&[("recipient", "c@d.com")])
        .await
        .assert_status(StatusCode::CONFLICT);
    server
        .post(&format!("/composer/{id}/body/text"))
        .form(&[("text", "rewritten")])
        .await
        .assert_status(StatusCode::CONFLICT);
    server
        .post(&format!("/composer/{id}/body/bold"))
        .form(&[("start", "0"), ("end", "5")])
        .await
        .assert_status(StatusCode::CONFLICT);
    server
        .post(&format!("/composer/{id}/schedule/day"))
        .form(&[("day", "2026-10-17")])
        .await
        .assert_status(StatusCode::CONFLICT);

    let draft = composer.lock().draft().clone();
    assert_eq!(draft.recipient, "a@b.com");
    assert_eq!(draft.body_html, "<p>hello</p>");
    assert_eq!(
        draft.scheduled_at,
        Some(test_now() + TimeDelta::minutes(10))
    );
}

#[tokio::test]
async fn test_overlapping_submits_send_once() {
    let client = Arc::new(GatedScheduleClient::new());
    let server = TestServer::with_client(client.clone()).unwrap();
    let id = server.mount().await;
    fill(&server, id).await;
    let submit_path = format!("/composer/{id}/submit");

    let first = async { server.post(&submit_path).form(&no_fields()).await };
    let second = async {
        client.wait_started().await;
        let rejected = server.post(&submit_path).form(&no_fields()).await;
        let edit = server
            .post(&format!("/composer/{id}/subject"))
            .form(&[("subject", "Changed")])
            .await;
        client.release();
        (rejected, edit)
    };
    let (first, (rejected, edit)) = tokio::join!(first, second);

    assert_toast(&first, "success", SUCCESS_MESSAGE);
    rejected.assert_status(StatusCode::CONFLICT);
    assert_eq!(rejected.text(), IN_FLIGHT_MESSAGE);
    edit.assert_status(StatusCode::CONFLICT);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_cancelled_submit_releases_composer() {
    let client = Arc::new(GatedScheduleClient::new());
    let server = TestServer::with_client(client.clone()).unwrap();
    let id = server.mount().await;
    fill(&server, id).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/composer/{id}/submit"))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::empty())
        .unwrap();
    let app = super::router(server.state().clone());
    let dropped = tokio::time::timeout(Duration::from_millis(50), app.oneshot(request)).await;
    assert!(dropped.is_err());
    assert_eq!(client.calls(), 1);

    let composer = server.state().registry().get(id).unwrap();
    assert!(!composer.lock().is_busy());
    assert_eq!(composer.lock().draft().subject, "Hi");

    client.release();
    let response = server
        .post(&format!("/composer/{id}/submit"))
        .form(&no_fields())
        .await;
    assert_toast(&response, "success", SUCCESS_MESSAGE);
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn test_unknown_and_malformed_composer_ids() {
    let server = TestServer::new(idle_client()).unwrap();

    server
        .post(&format!("/composer/{}/subject", Uuid::new_v4()))
        .form(&[("subject", "Hi")])
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .post("/composer/not-a-uuid/subject")
        .form(&[("subject", "Hi")])
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toolbar_commands() {
    let server = TestServer::new(idle_client()).unwrap();
    let id = server.mount().await;

    let response = server
        .post(&format!("/composer/{id}/body/bold"))
        .form(&[("text", "hello world"), ("start", "0"), ("end", "5")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("<strong>hello</strong> world"));

    let response = server
        .post(&format!("/composer/{id}/body/undo"))
        .form(&[("start", "0"), ("end", "0")])
        .await;
    assert!(response.text().contains("<p>hello world</p>"));

    server
        .post(&format!("/composer/{id}/body/strike"))
        .form(&no_fields())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toolbar_selection_counts_utf16_units() {
    let server = TestServer::new(idle_client()).unwrap();
    let id = server.mount().await;

    let response = server
        .post(&format!("/composer/{id}/body/bold"))
        .form(&[("text", "😀 hello"), ("start", "3"), ("end", "8")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("😀 <strong>hello</strong>"));

    let response = server
        .post(&format!("/composer/{id}/body/link"))
        .add_header(
            HeaderName::from_static("hx-prompt"),
            HeaderValue::from_static("https://example.com"),
        )
        .form(&[("start", "3"), ("end", "8")])
        .await;
    assert!(response
        .text()
        .contains(r#"😀 <a href="https://example.com"><strong>hello</strong></a>"#));
}

#[tokio::test]
async fn test_link_uses_prompt_header() {
    let server = TestServer::new(idle_client()).unwrap();
    let id = server.mount().await;

    let response = server
        .post(&format!("/composer/{id}/body/link"))
        .add_header(
            HeaderName::from_static("hx-prompt"),
            HeaderValue::from_static("https://example.com"),
        )
        .form(&[("text", "see docs"), ("start", "4"), ("end", "8")])
        .await;
    response.assert_status_ok();
    assert!(response
        .text()
        .contains(r#"see <a href="https://example.com">docs</a>"#));

    server
        .post(&format!("/composer/{id}/body/link"))
        .add_header(
            HeaderName::from_static("hx-prompt"),
            HeaderValue::from_static("javascript:alert(1)"),
        )
        .form(&[("start", "0"), ("end", "3")])
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_picker_clamps_and_rejects() {
    let server = TestServer::new(idle_client()).unwrap();
    let id = server.mount().await;

    server
        .post(&format!("/composer/{id}/schedule/day"))
        .form(&[("day", "2026-10-15")])
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post(&format!("/composer/{id}/schedule/day"))
        .form(&[("day", "2026-10-16")])
        .await;
    assert!(response.text().contains("October 16, 2026 08:05:00"));

    let response = server
        .post(&format!("/composer/{id}/schedule/time"))
        .form(&[("field", "hour"), ("hour", "7")])
        .await;
    assert!(response.text().contains("October 16, 2026 08:05:00"));

    server
        .post(&format!("/composer/{id}/schedule/time"))
        .form(&[("field", "hour"), ("value", "24")])
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post(&format!("/composer/{id}/schedule/day"))
        .form(&[("day", "")])
        .await;
    assert!(response.text().contains("Pick a date and time"));
}

#[tokio::test]
async fn test_calendar_navigation() {
    let server = TestServer::new(idle_client()).unwrap();
    let id = server.mount().await;

    let response = server
        .get(&format!("/composer/{id}/schedule/calendar?month=2026-11"))
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("November 2026"));

    server
        .get(&format!("/composer/{id}/schedule/calendar?month=2026-13"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::new(idle_client()).unwrap();
    server.mount().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.composers, 1);
}
