//! futuremail CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use futuremail_cli::commands::{ConfigCommand, SendCommand, ServeCommand};
use futuremail_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            ServeCommand::new(config).execute().await?;
        }
        Commands::Send {
            to,
            subject,
            body_file,
            at,
            config,
        } => {
            let cmd = SendCommand {
                to,
                subject,
                body_file,
                at,
                config,
            };
            cmd.execute().await?;
        }
        Commands::Config { config } => {
            ConfigCommand::new(config).execute()?;
        }
    }

    Ok(())
}
