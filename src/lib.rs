//! Course-selection planner library
//!
//! Loads a semester catalog, filters it, builds a weekly schedule with
//! conflict detection and exchanges selections with the registration site
//! through a generated console script.

pub mod core;
pub mod logger;

pub use core::config;
pub use core::models;
