//! Router under test with a manual clock and a mocked scheduling endpoint

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::ManualClock;
use crate::config::FutureMailConfig;
use crate::handlers;
use crate::scheduler::{MockScheduleClient, ScheduleClient};
use crate::state::AppState;

/// Frozen start time of every test app: 2026-10-16 08:00:00
#[must_use]
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .unwrap_or_default()
}

/// Thin wrapper around `axum_test::TestServer` for the futuremail router
pub struct TestServer {
    inner: axum_test::TestServer,
    state: AppState,
    clock: ManualClock,
}

impl TestServer {
    /// Router backed by `client`, clock frozen at [`test_now`]
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started
    pub fn new(client: MockScheduleClient) -> anyhow::Result<Self> {
        Self::with_client(Arc::new(client))
    }

    /// Router backed by a shared client the test keeps a handle to
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started
    pub fn with_client(client: Arc<dyn ScheduleClient>) -> anyhow::Result<Self> {
        let clock = ManualClock::new(test_now());
        let state =
            AppState::with_parts(FutureMailConfig::default(), client, Arc::new(clock.clone()));
        let inner = axum_test::TestServer::new(handlers::router(state.clone()))?;
        Ok(Self {
            inner,
            state,
            clock,
        })
    }

    /// Make a GET request to the server
    pub fn get(&self, path: &str) -> axum_test::TestRequest {
        self.inner.get(path)
    }

    /// Make a POST request to the server
    pub fn post(&self, path: &str) -> axum_test::TestRequest {
        self.inner.post(path)
    }

    /// Shared application state
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The clock handlers read
    #[must_use]
    pub const fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Load the page and return the id of the mounted composer
    ///
    /// # Panics
    ///
    /// Panics if the page carries no composer id
    pub async fn mount(&self) -> Uuid {
        let response = self.get("/").await;
        response.assert_status_ok();
        composer_id(&response.text()).expect("page without composer")
    }
}

/// Extract the composer id from rendered HTML
#[must_use]
pub fn composer_id(html: &str) -> Option<Uuid> {
    let start = html.find("id=\"composer-")? + "id=\"composer-".len();
    html.get(start..start + 36)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composer_id_extraction() {
        let id = Uuid::new_v4();
        let html = format!("<form id=\"composer-{id}\" class=\"composer\">");
        assert_eq!(composer_id(&html), Some(id));
        assert_eq!(composer_id("<p>nothing</p>"), None);
    }
}
