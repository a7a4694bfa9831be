//! Dungeon floors and their decaying soulstone chance.

use crate::core::constants::{
    LARGE_DUNGEON_FLOORS, SMALL_DUNGEON_FLOORS, SPIRE_FLOORS, STARTING_SOULSTONE_CHANCE,
};
use crate::stats::Stat;
use serde::{Deserialize, Serialize};

/// The three dungeons, in reward-magnitude order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DungeonKind {
    Small,
    Large,
    Spire,
}

impl DungeonKind {
    pub const ALL: [DungeonKind; 3] = [DungeonKind::Small, DungeonKind::Large, DungeonKind::Spire];

    /// Dungeon index `d`; rewards scale with `10^d`.
    pub fn index(&self) -> usize {
        match self {
            DungeonKind::Small => 0,
            DungeonKind::Large => 1,
            DungeonKind::Spire => 2,
        }
    }

    pub fn floor_count(&self) -> usize {
        match self {
            DungeonKind::Small => SMALL_DUNGEON_FLOORS,
            DungeonKind::Large => LARGE_DUNGEON_FLOORS,
            DungeonKind::Spire => SPIRE_FLOORS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DungeonKind::Small => "Small Dungeon",
            DungeonKind::Large => "Large Dungeon",
            DungeonKind::Spire => "The Spire",
        }
    }
}

/// One floor's draw state. Created at chance 1.0 and only ever decays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorState {
    pub ss_chance: f64,
    pub completed: u64,
    pub last_stat: Option<Stat>,
}

impl Default for FloorState {
    fn default() -> Self {
        Self {
            ss_chance: STARTING_SOULSTONE_CHANCE,
            completed: 0,
            last_stat: None,
        }
    }
}

/// Fixed-length floor lists for every dungeon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonRegistry {
    dungeons: Vec<Vec<FloorState>>,
}

impl Default for DungeonRegistry {
    fn default() -> Self {
        let dungeons = DungeonKind::ALL
            .iter()
            .map(|kind| vec![FloorState::default(); kind.floor_count()])
            .collect();
        Self { dungeons }
    }
}

impl DungeonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floors(&self, kind: DungeonKind) -> &[FloorState] {
        &self.dungeons[kind.index()]
    }

    pub fn floor(&self, kind: DungeonKind, floor: usize) -> Option<&FloorState> {
        self.dungeons[kind.index()].get(floor)
    }

    pub fn floor_mut(&mut self, kind: DungeonKind, floor: usize) -> Option<&mut FloorState> {
        self.dungeons[kind.index()].get_mut(floor)
    }
}

/// Result of a single reward draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Success { stat: Stat, amount: u64 },
    Failure,
    /// The floor index is past the end of the dungeon; nothing changed.
    Exhausted,
}
