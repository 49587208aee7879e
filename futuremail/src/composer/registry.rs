//! Live composers keyed by id

use chrono::NaiveDateTime;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::Composer;
use crate::config::ComposerSettings;

/// Shared handle to one composer
pub type SharedComposer = Arc<Mutex<Composer>>;

/// In-memory store of every mounted composer
///
/// There are no background timers: idle composers are swept whenever a new
/// one is mounted.
#[derive(Debug, Default)]
pub struct ComposerRegistry {
    composers: RwLock<HashMap<Uuid, SharedComposer>>,
    settings: ComposerSettings,
}

impl ComposerRegistry {
    /// Empty registry
    #[must_use]
    pub fn new(settings: ComposerSettings) -> Self {
        Self {
            composers: RwLock::new(HashMap::new()),
            settings,
        }
    }

    /// Composer settings in effect
    #[must_use]
    pub const fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    /// Mount a new composer at `now`, dropping idle ones first
    pub fn mount(&self, now: NaiveDateTime) -> SharedComposer {
        let swept = self.sweep(now);
        if swept > 0 {
            tracing::debug!(swept, "dropped idle composers");
        }

        let composer = Composer::new(now, &self.settings);
        let id = composer.id();
        let shared = Arc::new(Mutex::new(composer));
        self.composers.write().insert(id, Arc::clone(&shared));
        tracing::info!(composer = %id, "composer mounted");
        shared
    }

    /// Look up a composer
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<SharedComposer> {
        self.composers.read().get(&id).cloned()
    }

    /// Remove idle, non-busy composers; returns how many were dropped
    pub fn sweep(&self, now: NaiveDateTime) -> usize {
        let ttl = self.settings.idle_ttl();
        let mut composers = self.composers.write();
        let before = composers.len();
        composers.retain(|_, composer| !composer.lock().is_idle(now, ttl));
        before - composers.len()
    }

    /// Number of live composers
    #[must_use]
    pub fn len(&self) -> usize {
        self.composers.read().len()
    }

    /// True when nothing is mounted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.composers.read().is_empty()
    }
}
