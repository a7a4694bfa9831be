//! The narrow interface to everything the engine does not own: skill and
//! stat math, combat aggregation, consumable resources, story flags and
//! view refresh.

mod sandbox;

pub use sandbox::SandboxHost;

use crate::buffs::Buff;
use crate::stats::Stat;

/// Fire-and-forget notifications for a view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    SegmentCompleted { action: &'static str, loop_counter: u64 },
    LoopCompleted { action: &'static str, completions: u64 },
    PartRenamed { action: &'static str, label: String },
    SoulstonesChanged,
    BuffChanged(Buff),
}

/// Collaborators consumed by action hooks.
///
/// Story flags are opaque strings; resources are named reals (gold,
/// reputation, mana, team members, and boolean items stored as 0/1).
pub trait Host {
    fn skill_level(&self, skill: &str) -> f64;
    fn stat_level(&self, stat: Stat) -> f64;
    fn talent(&self, stat: Stat) -> f64;
    fn set_talent(&mut self, stat: Stat, level: f64);
    fn self_combat(&self) -> f64;
    fn team_combat(&self) -> f64;

    fn resource(&self, name: &str) -> f64;
    fn add_resource(&mut self, name: &str, amount: f64);
    fn reset_resource(&mut self, name: &str);

    fn grant_skill_exp(&mut self, skill: &str, amount: f64);
    fn grant_stat_exp(&mut self, stat: Stat, amount: f64);

    fn unlock_story(&mut self, flag: &str);
    fn has_story(&self, flag: &str) -> bool;
    fn unlock_town(&mut self, town: usize);
    fn unlock_global_story(&mut self, story: u32);
    /// Highest global story chapter unlocked so far.
    fn global_story(&self) -> u32;

    fn notify(&mut self, _event: ViewEvent) {}

    fn has_item(&self, name: &str) -> bool {
        self.resource(name) > 0.0
    }
}
