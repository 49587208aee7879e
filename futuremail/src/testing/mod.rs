//! Testing utilities
//!
//! - [`TestServer`] - the real router over `axum-test`, with a manual clock
//!   and a mocked scheduling endpoint
//! - [`GatedScheduleClient`] - a scheduling endpoint that answers on demand
//! - assertion helpers for toasts and htmx headers

pub mod assertions;
pub mod client;
pub mod server;

pub use assertions::*;
pub use client::GatedScheduleClient;
pub use server::{composer_id, test_now, TestServer};
