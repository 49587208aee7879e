//! Print the resolved configuration

use anyhow::Result;
use console::style;
use std::path::PathBuf;

use super::load_config;

/// `futuremail config`
pub struct ConfigCommand {
    path: Option<PathBuf>,
}

impl ConfigCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let config = load_config(self.path.as_deref())?;

        eprintln!(
            "{} {}",
            style("# user config file:").dim(),
            style(futuremail::config::FutureMailConfig::recommended_path().display()).dim()
        );
        print!("{}", config.to_toml()?);
        Ok(())
    }
}
