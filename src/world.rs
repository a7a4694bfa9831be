//! The aggregate of all engine-owned state.

use crate::action::state::{exp_for_level, ActionState};
use crate::buffs::BuffLevels;
use crate::core::constants::TOWN_COUNT;
use crate::dungeon::DungeonRegistry;
use crate::rank::RankCounters;
use crate::soulstone::SoulstonePool;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Guild membership; joining one guild bars the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guild {
    Adventure,
    Crafting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TownState {
    actions: BTreeMap<String, ActionState>,
}

/// Everything the engine mutates. Owned by the scheduler and passed by
/// `&mut` into every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub towns: Vec<TownState>,
    pub soulstones: SoulstonePool,
    pub buffs: BuffLevels,
    pub dungeons: DungeonRegistry,
    pub ranks: RankCounters,
    pub guild: Option<Guild>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            towns: vec![TownState::default(); TOWN_COUNT],
            soulstones: SoulstonePool::new(),
            buffs: BuffLevels::new(),
            dungeons: DungeonRegistry::new(),
            ranks: RankCounters::new(),
            guild: None,
        }
    }
}

/// Exploration progress actions that gate the catalog but are driven
/// elsewhere.
const EXPLORATION: [(usize, &str); 10] = [
    (0, "Wander"),
    (0, "Met"),
    (0, "Secrets"),
    (1, "Witch"),
    (2, "Drunk"),
    (3, "Cavern"),
    (3, "Illusions"),
    (4, "Tour"),
    (4, "Citizen"),
    (5, "Meander"),
];

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A world where every exploration action is at level 100.
    pub fn fully_explored() -> Self {
        let mut world = Self::new();
        for (town, var) in EXPLORATION {
            world.set_level(town, var, 100);
        }
        world
    }

    pub fn action(&self, town: usize, var_name: &str) -> Option<&ActionState> {
        self.towns.get(town)?.actions.get(var_name)
    }

    /// State for an action, created at defaults on first use.
    pub fn action_mut(&mut self, town: usize, var_name: &str) -> &mut ActionState {
        if self.towns.len() <= town {
            self.towns.resize_with(town + 1, TownState::default);
        }
        self.towns[town]
            .actions
            .entry(var_name.to_string())
            .or_default()
    }

    /// Progress level of an action; zero if it never ran.
    pub fn level(&self, town: usize, var_name: &str) -> u32 {
        self.action(town, var_name).map_or(0, ActionState::level)
    }

    pub fn set_level(&mut self, town: usize, var_name: &str, level: u32) {
        self.action_mut(town, var_name).exp = exp_for_level(level);
    }

    pub fn completions(&self, town: usize, var_name: &str) -> u64 {
        self.action(town, var_name).map_or(0, |s| s.completions)
    }

    pub fn loop_counter(&self, town: usize, var_name: &str) -> u64 {
        self.action(town, var_name).map_or(0, |s| s.loop_counter)
    }
}
