//! Rank curves: segment counters resolved into tier names and bonus
//! multipliers, with non-mutating lookahead.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
