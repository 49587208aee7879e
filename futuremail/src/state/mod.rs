//! Application state shared by every handler

use chrono::NaiveDateTime;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::composer::{ComposerRegistry, SharedComposer};
use crate::config::FutureMailConfig;
use crate::error::FutureMailError;
use crate::scheduler::{HttpScheduleClient, ScheduleClient};

/// Application state for futuremail
///
/// Cheap to clone; everything lives behind `Arc`.
///
/// # Example
///
/// ```rust
/// use futuremail::{config::FutureMailConfig, state::AppState};
///
/// # fn example() -> anyhow::Result<()> {
/// let state = AppState::new(FutureMailConfig::default())?;
/// assert!(state.registry().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AppState {
    config: Arc<FutureMailConfig>,
    registry: Arc<ComposerRegistry>,
    client: Arc<dyn ScheduleClient>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// State talking to the configured endpoint on the system clock
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: FutureMailConfig) -> anyhow::Result<Self> {
        let client = HttpScheduleClient::from_settings(&config.scheduler)?;
        Ok(Self::with_parts(config, Arc::new(client), Arc::new(SystemClock)))
    }

    /// State with an explicit client and clock
    #[must_use]
    pub fn with_parts(
        config: FutureMailConfig,
        client: Arc<dyn ScheduleClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registry = ComposerRegistry::new(config.composer.clone());
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            client,
            clock,
        }
    }

    /// Get configuration reference
    #[must_use]
    pub fn config(&self) -> &FutureMailConfig {
        &self.config
    }

    /// Live composers
    #[must_use]
    pub fn registry(&self) -> &ComposerRegistry {
        &self.registry
    }

    /// Scheduling endpoint client
    #[must_use]
    pub fn client(&self) -> &dyn ScheduleClient {
        self.client.as_ref()
    }

    /// Clock
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Current local time
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Look up a composer and record activity on it
    ///
    /// # Errors
    ///
    /// Returns [`FutureMailError::ComposerNotFound`] for unknown ids.
    pub fn composer(&self, id: Uuid) -> Result<SharedComposer, FutureMailError> {
        let composer = self
            .registry
            .get(id)
            .ok_or(FutureMailError::ComposerNotFound(id))?;
        composer.lock().touch(self.now());
        Ok(composer)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("composers", &self.registry.len())
            .finish_non_exhaustive()
    }
}
