//! Assertion helpers for htmx responses

use axum_test::TestResponse;

/// Assert that the response appends a toast of `level` containing `message`
///
/// # Panics
///
/// Panics if no out-of-band toast is present or it does not match
pub fn assert_toast(response: &TestResponse, level: &str, message: &str) {
    let html = response.text();
    assert!(
        html.contains(r#"<div id="toasts" hx-swap-oob="beforeend">"#),
        "Expected an out-of-band toast, got: {html}"
    );
    assert!(
        html.contains(&format!("toast-{level}")),
        "Expected a {level} toast, got: {html}"
    );
    assert!(
        html.contains(message),
        "Expected toast message '{message}', got: {html}"
    );
}

/// Assert that a `Vary` header mentions `header`
///
/// # Panics
///
/// Panics if the header is missing or does not list `header`
pub fn assert_varies_on(response: &TestResponse, header: &str) {
    let vary: Vec<String> = response
        .headers()
        .get_all("vary")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase)
        .collect();
    assert!(
        vary.iter().any(|value| value.contains(&header.to_ascii_lowercase())),
        "Expected Vary to contain '{header}', got {vary:?}"
    );
}
