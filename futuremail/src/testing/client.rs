//! Scheduling client that holds each call until the test lets it through

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use crate::scheduler::{ScheduleClient, ScheduleEnvelope, ScheduleError, ScheduleRequest};

/// Accepts every request, but only once [`GatedScheduleClient::release`] is called
#[derive(Debug, Default)]
pub struct GatedScheduleClient {
    calls: AtomicUsize,
    started: Notify,
    release: Notify,
}

impl GatedScheduleClient {
    /// Closed gate, no calls yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests that reached the endpoint
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Resolve once a request is waiting at the gate
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let one waiting (or the next) request through
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ScheduleClient for GatedScheduleClient {
    async fn schedule(&self, _request: ScheduleRequest) -> Result<ScheduleEnvelope, ScheduleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(ScheduleEnvelope::accepted())
    }
}
