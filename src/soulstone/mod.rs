//! Soulstone banks and the sacrifice-for-buff economy.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
