//! Schedule a letter from the terminal

use anyhow::{Context, Result};
use chrono::TimeDelta;
use console::style;
use dialoguer::Input;
use futuremail::clock::{Clock, SystemClock};
use futuremail::forms;
use futuremail::scheduler::{
    self, HttpScheduleClient, ScheduleError, ScheduleRequest, SUCCESS_MESSAGE,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

use super::load_config;
use crate::letter::{parse_send_time, Letter};

/// `futuremail send`
///
/// Values not given as flags are prompted for.
#[derive(Debug, Default)]
pub struct SendCommand {
    /// Recipient
    pub to: Option<String>,
    /// Subject
    pub subject: Option<String>,
    /// File holding the plain-text body
    pub body_file: Option<PathBuf>,
    /// Delivery time
    pub at: Option<String>,
    /// Configuration file
    pub config: Option<PathBuf>,
}

impl SendCommand {
    /// Execute the command
    pub async fn execute(self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        let lead = config.composer.lead_time();

        let letter = self.collect(lead)?;
        let validated = forms::validate(&letter.draft(), SystemClock.now(), lead)?;
        let request = ScheduleRequest::from(&validated);
        let client = HttpScheduleClient::from_settings(&config.scheduler)
            .context("Failed to build HTTP client")?;

        println!(
            "{} {} {} {}",
            style("Scheduling").green().bold(),
            style(&request.to).cyan().bold(),
            style("for").bold(),
            style(&request.scheduled_time).cyan()
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message(format!("Contacting {}...", client.endpoint()));

        let outcome = scheduler::deliver(&client, request).await;
        spinner.finish_and_clear();

        report(outcome)?;
        println!("{} {}", style("✓").green().bold(), SUCCESS_MESSAGE);
        Ok(())
    }

    fn collect(self, lead: TimeDelta) -> Result<Letter> {
        let to = prompt_for("To", self.to)?;
        let subject = prompt_for("Subject", self.subject)?;
        let body = match self.body_file {
            Some(path) => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => prompt_for("Body", None)?,
        };
        let at = match self.at {
            Some(at) => at,
            None => {
                let earliest = SystemClock.now() + lead + TimeDelta::minutes(1);
                Input::<String>::new()
                    .with_prompt("Deliver at")
                    .default(earliest.format("%Y-%m-%d %H:%M").to_string())
                    .interact_text()?
            }
        };

        Ok(Letter {
            to,
            subject,
            body,
            at: parse_send_time(&at)?,
        })
    }
}

/// Failure shown as the user-facing message, with the underlying error as its cause
fn report(outcome: Result<(), ScheduleError>) -> Result<()> {
    outcome.map_err(|err| {
        let message = err.user_message();
        anyhow::Error::new(err).context(message)
    })
}

fn prompt_for(label: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new().with_prompt(label).interact_text()?),
    }
}
