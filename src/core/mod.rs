//! Core course-selection logic shared by the library and the CLI

pub mod catalog;
pub mod config;
pub mod conflict;
pub mod detective;
pub mod export;
pub mod filter;
pub mod models;
pub mod report;
pub mod schedule;
pub mod session;
pub mod store;

/// Returns the current version of the `SelectorHelper` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
