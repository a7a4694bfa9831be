//! Batch simulator for loop balance.
//!
//! Drives one catalog action against a seeded veteran character for a
//! fixed tick budget and reports loops, segments, soulstone flow and the
//! buff levels reached. Every run goes through [`crate::action::step`], so
//! results match what a front end would see.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
