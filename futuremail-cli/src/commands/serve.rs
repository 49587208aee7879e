//! Run the web application

use anyhow::{Context, Result};
use console::style;
use futuremail::{handlers, observability, state::AppState};
use std::path::PathBuf;

use super::load_config;

/// `futuremail serve`
pub struct ServeCommand {
    config: Option<PathBuf>,
}

impl ServeCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(config: Option<PathBuf>) -> Self {
        Self { config }
    }

    /// Execute the command, serving until interrupted
    pub async fn execute(&self) -> Result<()> {
        observability::init()?;

        let config = load_config(self.config.as_deref())?;
        let address = config.server.bind_address();
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        tracing::info!(
            %address,
            endpoint = %config.scheduler.endpoint,
            "futuremail listening"
        );
        println!(
            "{} {}",
            style("Composer ready at").green().bold(),
            style(format!("http://{address}")).cyan().bold()
        );

        let app = handlers::router(AppState::new(config)?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        tracing::info!("futuremail stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
