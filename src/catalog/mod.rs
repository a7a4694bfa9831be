//! A representative action catalog covering every archetype and every
//! subsystem the engine drives.

mod basic;
mod dungeons;
mod guilds;
mod rituals;

pub use basic::{BUY_GLASSES, FIGHT_MONSTERS, HEAL_THE_SICK, MEET_PEOPLE, PICK_LOCKS, SMASH_POTS, TRAIN_STRENGTH, WANDER};
pub use dungeons::{LARGE_DUNGEON, SMALL_DUNGEON, THE_SPIRE};
pub use guilds::{
    ADVENTURE_GUILD, CRAFTING_GUILD, FIGHT_FROST_GIANTS, FIGHT_JUNGLE_MONSTERS, SEEK_BLESSING,
    WIZARD_COLLEGE,
};
pub use rituals::{DARK_RITUAL, GREAT_FEAST, IMBUE_BODY, IMBUE_MIND, MINE_SOULSTONES};

use crate::action::types::{ActionDefinition, SegmentCursor, TickContext};
use crate::error::{EngineError, Result};

pub static ALL: [&ActionDefinition; 22] = [
    &WANDER,
    &SMASH_POTS,
    &PICK_LOCKS,
    &BUY_GLASSES,
    &MEET_PEOPLE,
    &TRAIN_STRENGTH,
    &HEAL_THE_SICK,
    &FIGHT_MONSTERS,
    &SMALL_DUNGEON,
    &DARK_RITUAL,
    &ADVENTURE_GUILD,
    &LARGE_DUNGEON,
    &CRAFTING_GUILD,
    &MINE_SOULSTONES,
    &IMBUE_MIND,
    &IMBUE_BODY,
    &WIZARD_COLLEGE,
    &GREAT_FEAST,
    &FIGHT_FROST_GIANTS,
    &SEEK_BLESSING,
    &THE_SPIRE,
    &FIGHT_JUNGLE_MONSTERS,
];

/// Find an action by display name or variable name, ignoring case.
pub fn lookup(name: &str) -> Result<&'static ActionDefinition> {
    ALL.iter()
        .copied()
        .find(|def| def.name.eq_ignore_ascii_case(name) || def.var_name.eq_ignore_ascii_case(name))
        .ok_or_else(|| EngineError::UnknownAction(name.to_string()))
}

fn skill(ctx: &TickContext<'_>, name: &str) -> f64 {
    ctx.host.skill_level(name)
}

fn level(ctx: &TickContext<'_>, town: usize, var_name: &str) -> u32 {
    ctx.world.level(town, var_name)
}

/// `sqrt(1 + completions / divisor)`
fn diminishing(completions: u64, divisor: f64) -> f64 {
    (1.0 + completions as f64 / divisor).sqrt()
}

/// Favored-stat multiplier for the cursor's segment.
fn favored(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    ctx.stat_multiplier(cursor.favored)
}
