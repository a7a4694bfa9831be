//! The segmented loop engine driving multipart actions.

pub mod logic;
pub mod naming;

pub use logic::*;
pub use naming::{part_name, segment_name};
