//! Command line definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level arguments
#[derive(Debug, Parser)]
#[command(name = "futuremail")]
#[command(version)]
#[command(about = "Write a letter today, have it delivered later", long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the composer web application
    Serve {
        /// Configuration file layered over the defaults
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Schedule a letter from the terminal
    ///
    /// Missing values are prompted for.
    Send {
        /// Recipient email address
        #[arg(long)]
        to: Option<String>,
        /// Subject line
        #[arg(long)]
        subject: Option<String>,
        /// Plain-text file with the letter body
        #[arg(long)]
        body_file: Option<PathBuf>,
        /// Delivery time, `YYYY-MM-DD HH:MM[:SS]` local time
        #[arg(long)]
        at: Option<String>,
        /// Configuration file layered over the defaults
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
    /// Print the resolved configuration as TOML
    Config {
        /// Configuration file layered over the defaults
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}
