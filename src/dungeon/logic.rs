//! Per-floor soulstone draws.

use super::types::{DrawOutcome, DungeonKind, DungeonRegistry};
use crate::core::constants::{DIVINE_REWARD_DIVISOR, DIVINE_REWARD_EXPONENT, SOULSTONE_CHANCE_DECAY};
use crate::soulstone::SoulstonePool;
use crate::stats::Stat;
use rand::Rng;

/// Soulstones granted by a successful draw in `kind`.
///
/// `max(1, floor(10^d * (1 + divine / 60)^0.25))`
pub fn reward_amount(kind: DungeonKind, divine: f64) -> u64 {
    let base = 10f64.powi(kind.index() as i32);
    let scale = (1.0 + divine / DIVINE_REWARD_DIVISOR).powf(DIVINE_REWARD_EXPONENT);
    ((base * scale).floor() as u64).max(1)
}

/// Resolve a cleared floor: count the clear, roll against the floor's
/// chance and on success bank soulstones in a uniformly drawn stat.
///
/// An out-of-range floor returns [`DrawOutcome::Exhausted`] and touches
/// nothing.
pub fn draw_reward<R: Rng + ?Sized>(
    registry: &mut DungeonRegistry,
    pool: &mut SoulstonePool,
    kind: DungeonKind,
    floor: usize,
    divine: f64,
    rng: &mut R,
) -> DrawOutcome {
    let Some(state) = registry.floor_mut(kind, floor) else {
        return DrawOutcome::Exhausted;
    };
    state.completed += 1;

    let roll: f64 = rng.gen();
    if roll > state.ss_chance {
        tracing::debug!(dungeon = kind.name(), floor, chance = state.ss_chance, "no soulstone");
        return DrawOutcome::Failure;
    }

    let stat = Stat::ALL[rng.gen_range(0..Stat::ALL.len())];
    let amount = reward_amount(kind, divine);
    pool.add(stat, amount);
    state.last_stat = Some(stat);
    state.ss_chance *= SOULSTONE_CHANCE_DECAY;

    tracing::info!(
        dungeon = kind.name(),
        floor,
        stat = stat.name(),
        amount,
        next_chance = state.ss_chance,
        "soulstone found"
    );

    DrawOutcome::Success { stat, amount }
}
