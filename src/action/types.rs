//! Static action definitions and the hook signatures they carry.

use super::state::ActionState;
use crate::core::config::EngineConfig;
use crate::dungeon::DungeonKind;
use crate::host::Host;
use crate::rank::RankTrack;
use crate::stats::Stat;
use crate::world::WorldState;
use rand::RngCore;
use std::fmt;

/// Everything a hook may read or mutate while a tick is resolved.
pub struct TickContext<'a> {
    pub world: &'a mut WorldState,
    pub host: &'a mut dyn Host,
    pub config: &'a EngineConfig,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> TickContext<'a> {
    pub fn new(
        world: &'a mut WorldState,
        host: &'a mut dyn Host,
        config: &'a EngineConfig,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            world,
            host,
            config,
            rng,
        }
    }

    /// Host stat level, used to scale favored-stat progress.
    pub fn stat_multiplier(&self, stat: Stat) -> f64 {
        1.0 + self.host.stat_level(stat) / crate::core::constants::STAT_LEVEL_DIVISOR
    }
}

/// Position of a segment within a multipart action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentCursor {
    /// Segment counter with the lookahead offset applied.
    pub loop_counter: u64,
    /// Counter the action is actually at.
    pub base_counter: u64,
    pub offset: u64,
    pub loop_index: u64,
    pub segment: u64,
    pub completions: u64,
    pub favored: Stat,
}

pub type Predicate = fn(&TickContext<'_>, &ActionState) -> bool;
pub type Effect = fn(&mut TickContext<'_>, &ActionState);
pub type CostFn = fn(&TickContext<'_>, &SegmentCursor) -> f64;
pub type Amount = fn(&TickContext<'_>) -> f64;

#[derive(Clone, Copy)]
pub enum SkillExp {
    Flat(f64),
    Scaled(Amount),
}

/// How the current part of a multipart action is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartNaming {
    /// "Patient Three"
    Ordinal { label: &'static str },
    /// Floor number in words, then "{label} Complete" past the last floor.
    Dungeon {
        dungeon: DungeonKind,
        label: &'static str,
    },
    /// Current rank, optionally prefixed ("Rank E-, Mult x1.15").
    Rank {
        track: RankTrack,
        prefix: Option<&'static str>,
    },
    Fixed(&'static str),
}

#[derive(Clone, Copy)]
pub struct MultipartSpec {
    pub loop_stats: &'static [Stat],
    /// Segments per loop; `None` uses `loop_stats.len()`.
    pub segments: Option<u64>,
    pub loop_cost: CostFn,
    pub tick_progress: CostFn,
    pub segment_finished: Option<Effect>,
    pub loops_finished: Option<Effect>,
    pub naming: PartNaming,
}

impl MultipartSpec {
    pub fn segment_count(&self) -> u64 {
        self.segments.unwrap_or(self.loop_stats.len() as u64)
    }

    /// A loop needs at least one segment and one stat to favor.
    pub fn is_well_formed(&self) -> bool {
        !self.loop_stats.is_empty() && self.segment_count() > 0
    }
}

#[derive(Clone, Copy)]
pub enum Archetype {
    Normal,
    /// Completions add experience toward a level-100 progress bar.
    Progress { exp_gain: Amount },
    /// Completions search a finite pool of items.
    Limited {
        reward_ratio: u64,
        total: fn(&TickContext<'_>) -> u64,
        reward: fn(&mut TickContext<'_>) -> f64,
    },
    Multipart(MultipartSpec),
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Normal => "normal",
            Archetype::Progress { .. } => "progress",
            Archetype::Limited { .. } => "limited",
            Archetype::Multipart(_) => "multipart",
        }
    }
}

/// An authored action. Immutable; all mutable state lives in
/// [`ActionState`] inside the [`WorldState`].
#[derive(Clone, Copy)]
pub struct ActionDefinition {
    pub name: &'static str,
    pub var_name: &'static str,
    pub town: usize,
    pub exp_mult: f64,
    pub stats: &'static [(Stat, f64)],
    pub skills: &'static [(&'static str, SkillExp)],
    /// Display metadata only.
    pub affected_by: &'static [&'static str],
    /// Ticks per unit of work for non-multipart archetypes.
    pub mana_cost: Amount,
    pub visible: Predicate,
    pub unlocked: Predicate,
    pub can_start: Predicate,
    pub cost: Option<Effect>,
    pub finish: Option<Effect>,
    pub archetype: Archetype,
}

impl fmt::Debug for ActionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDefinition")
            .field("name", &self.name)
            .field("town", &self.town)
            .field("archetype", &self.archetype.name())
            .finish_non_exhaustive()
    }
}

impl ActionDefinition {
    pub fn multipart(&self) -> Option<&MultipartSpec> {
        match &self.archetype {
            Archetype::Multipart(spec) => Some(spec),
            _ => None,
        }
    }

    /// This action's state, or defaults if it never ran.
    pub fn state(&self, world: &WorldState) -> ActionState {
        world
            .action(self.town, self.var_name)
            .cloned()
            .unwrap_or_default()
    }
}

/// Where an action stands in the visible → unlocked → can-start pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Hidden,
    Locked,
    Blocked,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Locked,
    CannotStart,
    /// The action's segment layout or cost cannot be advanced.
    Misconfigured,
}

/// What one `step` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub ticks_used: u64,
    pub segments_completed: u64,
    /// Loops for multipart actions, units of work otherwise.
    pub completions: u64,
    pub stopped: Option<StopReason>,
}

impl StepReport {
    pub fn merge(&mut self, other: StepReport) {
        self.ticks_used += other.ticks_used;
        self.segments_completed += other.segments_completed;
        self.completions += other.completions;
        self.stopped = other.stopped;
    }
}

pub fn always(_: &TickContext<'_>, _: &ActionState) -> bool {
    true
}
