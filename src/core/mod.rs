//! Shared constants, numeric helpers and engine configuration.

pub mod config;
pub mod constants;
pub mod math;

pub use config::*;
pub use constants::*;
pub use math::*;
