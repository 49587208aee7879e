//! futuremail CLI library

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod commands;
pub mod letter;

pub use cli::{Cli, Commands};
pub use letter::{parse_send_time, Letter};
