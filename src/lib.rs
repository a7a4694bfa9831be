//! Idleloop - multipart action engine for a looping idle game.
//!
//! Actions are authored as static definitions in [`catalog`] and advanced
//! tick by tick through [`action::step`]. Everything the engine mutates
//! lives in [`world::WorldState`]; everything it only reads or rewards goes
//! through the [`host::Host`] trait.

pub mod action;
pub mod buffs;
pub mod catalog;
pub mod core;
pub mod dungeon;
pub mod engine;
pub mod error;
pub mod host;
pub mod rank;
pub mod simulator;
pub mod soulstone;
pub mod stats;
pub mod world;
