//! Dungeon floors and soulstone reward draws.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
