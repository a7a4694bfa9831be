//! Action archetypes, per-action state and the eligibility pipeline.

pub mod pipeline;
pub mod state;
pub mod types;

pub use pipeline::{eligibility, step};
pub use state::{ActionState, LimitedState, Phase};
pub use types::*;
