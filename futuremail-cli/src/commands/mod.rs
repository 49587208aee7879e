//! CLI command implementations

pub mod config;
pub mod send;
pub mod serve;

pub use config::ConfigCommand;
pub use send::SendCommand;
pub use serve::ServeCommand;

use futuremail::config::FutureMailConfig;
use std::path::Path;

/// Explicit file when given, the usual search path otherwise
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<FutureMailConfig> {
    match path {
        Some(path) => FutureMailConfig::load_from(path),
        None => FutureMailConfig::load(),
    }
}
