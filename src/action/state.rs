//! Mutable per-action state, one instance per action and town.

use crate::core::constants::{PROGRESS_EXP_CAP, PROGRESS_EXP_PER_LEVEL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Between units of work; `can_start` is checked before the next one.
    #[default]
    Idle,
    /// `cost` has been paid for the current unit of work.
    Advancing,
}

/// Bookkeeping for limited actions: a finite pool of items, some of them
/// good.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitedState {
    pub total: u64,
    pub checked: u64,
    pub good: u64,
    /// Known-good items still usable this loop.
    pub good_temp: u64,
    pub loot: u64,
}

impl LimitedState {
    pub fn unchecked(&self) -> u64 {
        self.total.saturating_sub(self.checked)
    }

    /// Make every known-good item usable again.
    pub fn reset_loop(&mut self) {
        self.good_temp = self.good;
    }

    /// Resolve one completion. Unchecked items are searched first; every
    /// `reward_ratio`-th checked item is good. Once everything is checked,
    /// known-good items are consumed instead.
    ///
    /// Returns true when `reward` was applied.
    pub fn finish_regular(&mut self, reward_ratio: u64, reward: impl FnOnce() -> f64) -> bool {
        if self.checked > self.total {
            tracing::warn!(
                total = self.total,
                checked = self.checked,
                "limited action checked past its total, clamping"
            );
            self.checked = self.total;
            self.good = self.total / reward_ratio;
            self.good_temp = self.good;
        }

        if self.unchecked() > 0 {
            self.checked += 1;
            if self.checked % reward_ratio == 0 {
                self.good += 1;
                self.loot += reward().max(0.0) as u64;
                return true;
            }
            false
        } else if self.good_temp > 0 {
            self.good_temp -= 1;
            self.loot += reward().max(0.0) as u64;
            true
        } else {
            false
        }
    }
}

/// Progress accumulator and counters for a single action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionState {
    /// Segments completed over the action's lifetime. Never reset.
    pub loop_counter: u64,
    /// Progress toward the current segment (or unit of work).
    pub progress: f64,
    /// Completed loops (multipart) or units of work (other archetypes).
    pub completions: u64,
    pub phase: Phase,
    /// Progress-archetype experience.
    pub exp: f64,
    pub limited: LimitedState,
    /// Current part name.
    pub label: String,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add progress experience, capped at level 100.
    pub fn finish_progress(&mut self, exp: f64) -> u32 {
        let before = self.level();
        self.exp = (self.exp + exp).min(PROGRESS_EXP_CAP);
        let after = self.level();
        if after > before {
            tracing::debug!(level = after, "progress level up");
        }
        after
    }

    pub fn level(&self) -> u32 {
        level_for_exp(self.exp)
    }
}

/// Level reached with `exp`; level `n` needs `100 * n(n+1)/2`.
pub fn level_for_exp(exp: f64) -> u32 {
    let scaled = 8.0 * exp / PROGRESS_EXP_PER_LEVEL + 1.0;
    ((scaled.sqrt() - 1.0) / 2.0).floor().max(0.0) as u32
}

/// Exp needed to reach `level`.
pub fn exp_for_level(level: u32) -> f64 {
    let n = level as f64;
    PROGRESS_EXP_PER_LEVEL * n * (n + 1.0) / 2.0
}
