//! Configuration management for futuremail
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `FUTUREMAIL_` prefix, `__` for nesting)
//! 2. `./config.toml` (development)
//! 3. `~/.config/futuremail/config.toml` (user config, XDG)
//! 4. `/etc/futuremail/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [scheduler]
//! endpoint = "http://127.0.0.1:8080/api/scheduledEmails/create"
//! timeout_ms = 10000
//!
//! [composer]
//! lead_time_secs = 300
//! idle_ttl_secs = 7200
//! history_limit = 100
//! ```
//!
//! `FUTUREMAIL_SCHEDULER__ENDPOINT=http://mail.internal/api/scheduledEmails/create`
//! overrides the endpoint.

use chrono::TimeDelta;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::draft::DEFAULT_LEAD_TIME_SECS;
use crate::richtext::DEFAULT_HISTORY_LIMIT;

/// Application name, used for config directories
pub const APP_NAME: &str = "futuremail";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "FUTUREMAIL_";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerSettings {
    /// `host:port` for the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Scheduling endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// URL receiving `POST` schedule requests
    pub endpoint: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/api/scheduledEmails/create".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Composer behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerSettings {
    /// Minimum distance between now and the send time, in seconds
    pub lead_time_secs: i64,

    /// Composers untouched for this long are dropped, in seconds
    pub idle_ttl_secs: i64,

    /// Undo steps kept by the body editor
    pub history_limit: usize,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            lead_time_secs: DEFAULT_LEAD_TIME_SECS,
            idle_ttl_secs: 2 * 60 * 60,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ComposerSettings {
    /// Lead time as a duration
    #[must_use]
    pub fn lead_time(&self) -> TimeDelta {
        TimeDelta::seconds(self.lead_time_secs)
    }

    /// Idle lifetime as a duration
    #[must_use]
    pub fn idle_ttl(&self) -> TimeDelta {
        TimeDelta::seconds(self.idle_ttl_secs)
    }
}

/// Complete futuremail configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FutureMailConfig {
    /// Listener
    pub server: ServerSettings,

    /// Outbound scheduling endpoint
    pub scheduler: SchedulerSettings,

    /// Composer behaviour
    pub composer: ComposerSettings,
}

impl FutureMailConfig {
    /// Load configuration from every standard location
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Values fail type conversion
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use futuremail::config::FutureMailConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = FutureMailConfig::load()?;
    /// println!("listening on {}", config.server.bind_address());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Self::defaults()?;

        let system_config = PathBuf::from("/etc").join(APP_NAME).join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        Ok(figment.merge(Self::env()).extract()?)
    }

    /// Load configuration from a specific file, then environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or
    /// values fail type conversion.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        anyhow::ensure!(path.exists(), "config file {} not found", path.display());

        Ok(Self::defaults()?
            .merge(Toml::file(path))
            .merge(Self::env())
            .extract()?)
    }

    /// Serialize as TOML, as accepted by [`Self::load_from`]
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// XDG location of the user config file
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| config_dir.join(APP_NAME).join("config.toml"),
        )
    }

    fn defaults() -> anyhow::Result<Figment> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__").lowercase(true)
    }
}
