//! Dungeon runs: one floor per loop, a soulstone draw per cleared floor.

use super::{favored, level, skill};
use crate::action::state::ActionState;
use crate::action::types::{
    ActionDefinition, Archetype, MultipartSpec, PartNaming, SegmentCursor, SkillExp, TickContext,
};
use crate::buffs::Buff;
use crate::core::constants::FLOOR_COMPLETIONS_DIVISOR;
use crate::core::math::precision3;
use crate::dungeon::{draw_reward, DrawOutcome, DungeonKind};
use crate::host::ViewEvent;
use crate::stats::Stat;

const SMALL_STATS: &[Stat] = &[
    Stat::Dex,
    Stat::Con,
    Stat::Dex,
    Stat::Cha,
    Stat::Dex,
    Stat::Str,
    Stat::Luck,
];

const LARGE_STATS: &[Stat] = &[
    Stat::Cha,
    Stat::Spd,
    Stat::Str,
    Stat::Cha,
    Stat::Dex,
    Stat::Dex,
    Stat::Str,
];

const SPIRE_STATS: &[Stat] = &[
    Stat::Per,
    Stat::Int,
    Stat::Con,
    Stat::Spd,
    Stat::Dex,
    Stat::Per,
    Stat::Int,
    Stat::Str,
    Stat::Soul,
];

/// Floor the action is on (or about to start).
fn current_floor(loop_counter: u64, stats: &[Stat]) -> usize {
    (loop_counter / stats.len() as u64) as usize
}

fn floor_open(state: &ActionState, kind: DungeonKind, stats: &[Stat]) -> bool {
    current_floor(state.loop_counter, stats) < kind.floor_count()
}

/// Diminishing returns from the floor's own clear count.
fn floor_bonus(ctx: &TickContext<'_>, kind: DungeonKind, cursor: &SegmentCursor, stats: &[Stat]) -> f64 {
    let floor = current_floor(cursor.base_counter, stats);
    let completed = ctx.world.dungeons.floor(kind, floor).map_or(0, |f| f.completed);
    (1.0 + completed as f64 / FLOOR_COMPLETIONS_DIVISOR).sqrt()
}

/// Draw on the floor the loop just cleared.
fn settle_floor(ctx: &mut TickContext<'_>, state: &ActionState, kind: DungeonKind, stats: &[Stat]) -> DrawOutcome {
    let cleared = current_floor(state.loop_counter, stats).saturating_sub(1);
    let divine = skill(ctx, "Divine");
    let outcome = draw_reward(
        &mut ctx.world.dungeons,
        &mut ctx.world.soulstones,
        kind,
        cleared,
        divine,
        ctx.rng,
    );
    if let DrawOutcome::Success { .. } = outcome {
        ctx.host.notify(ViewEvent::SoulstonesChanged);
    }
    outcome
}

fn small_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    (ctx.host.self_combat() + skill(ctx, "Magic"))
        * favored(ctx, cursor)
        * floor_bonus(ctx, DungeonKind::Small, cursor, SMALL_STATS)
}

fn small_loops_finished(ctx: &mut TickContext<'_>, state: &ActionState) {
    match settle_floor(ctx, state, DungeonKind::Small, SMALL_STATS) {
        DrawOutcome::Success { .. } if ctx.host.global_story() <= 1 => ctx.host.unlock_global_story(1),
        DrawOutcome::Failure if ctx.host.global_story() <= 2 => ctx.host.unlock_global_story(2),
        _ => {}
    }
}

fn small_finish(ctx: &mut TickContext<'_>, state: &ActionState) {
    ctx.host.unlock_story("smallDungeonAttempted");
    if state.loop_counter >= 42 {
        ctx.host.unlock_story("clearSDungeon");
    }
}

pub static SMALL_DUNGEON: ActionDefinition = ActionDefinition {
    name: "Small Dungeon",
    var_name: "SDungeon",
    town: 0,
    exp_mult: 1.0,
    stats: &[
        (Stat::Str, 0.1),
        (Stat::Dex, 0.4),
        (Stat::Con, 0.3),
        (Stat::Cha, 0.1),
        (Stat::Luck, 0.1),
    ],
    skills: &[("Combat", SkillExp::Flat(5.0)), ("Magic", SkillExp::Flat(5.0))],
    affected_by: &[],
    mana_cost: |_| 2000.0,
    visible: |ctx, _| skill(ctx, "Combat") + skill(ctx, "Magic") >= 15.0,
    unlocked: |ctx, _| skill(ctx, "Combat") + skill(ctx, "Magic") >= 35.0,
    can_start: |ctx, state| {
        ctx.host.resource("reputation") >= 2.0 && floor_open(state, DungeonKind::Small, SMALL_STATS)
    },
    cost: None,
    finish: Some(small_finish),
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: SMALL_STATS,
        segments: None,
        loop_cost: |_, cursor| precision3(2f64.powi(cursor.loop_index as i32) * 15_000.0),
        tick_progress: small_progress,
        segment_finished: None,
        loops_finished: Some(small_loops_finished),
        naming: PartNaming::Dungeon {
            dungeon: DungeonKind::Small,
            label: "Floor",
        },
    }),
};

fn large_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    (ctx.host.team_combat() + skill(ctx, "Magic"))
        * favored(ctx, cursor)
        * floor_bonus(ctx, DungeonKind::Large, cursor, LARGE_STATS)
}

fn large_finish(ctx: &mut TickContext<'_>, state: &ActionState) {
    ctx.host.unlock_story("largeDungeonAttempted");
    if state.loop_counter >= 63 {
        ctx.host.unlock_story("clearLDungeon");
    }
}

pub static LARGE_DUNGEON: ActionDefinition = ActionDefinition {
    name: "Large Dungeon",
    var_name: "LDungeon",
    town: 2,
    exp_mult: 2.0,
    stats: &[
        (Stat::Str, 0.2),
        (Stat::Dex, 0.2),
        (Stat::Con, 0.2),
        (Stat::Cha, 0.3),
        (Stat::Luck, 0.1),
    ],
    skills: &[("Combat", SkillExp::Flat(15.0)), ("Magic", SkillExp::Flat(15.0))],
    affected_by: &["Gather Team"],
    mana_cost: |_| 6000.0,
    visible: |ctx, _| level(ctx, 2, "Drunk") >= 5,
    unlocked: |ctx, _| level(ctx, 2, "Drunk") >= 20,
    can_start: |ctx, state| {
        ctx.host.resource("teamMembers") >= 1.0 && floor_open(state, DungeonKind::Large, LARGE_STATS)
    },
    cost: None,
    finish: Some(large_finish),
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: LARGE_STATS,
        segments: None,
        loop_cost: |_, cursor| precision3(3f64.powi(cursor.loop_index as i32) * 500_000.0),
        tick_progress: large_progress,
        segment_finished: None,
        loops_finished: Some(|ctx, state| {
            settle_floor(ctx, state, DungeonKind::Large, LARGE_STATS);
        }),
        naming: PartNaming::Dungeon {
            dungeon: DungeonKind::Large,
            label: "Floor",
        },
    }),
};

fn spire_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    (ctx.host.self_combat() + skill(ctx, "Magic"))
        * favored(ctx, cursor)
        * floor_bonus(ctx, DungeonKind::Spire, cursor, SPIRE_STATS)
}

/// Clearing a floor at or above the current Aspirant level raises it, up
/// to the configured cap.
fn spire_loops_finished(ctx: &mut TickContext<'_>, state: &ActionState) {
    settle_floor(ctx, state, DungeonKind::Spire, SPIRE_STATS);
    let cleared = current_floor(state.loop_counter, SPIRE_STATS).saturating_sub(1);
    let buffs = &ctx.world.buffs;
    if cleared >= buffs.level(Buff::Aspirant) as usize
        && buffs.below_cap(Buff::Aspirant, &ctx.config.buff_caps)
    {
        ctx.world.buffs.increment(Buff::Aspirant);
        ctx.host.notify(ViewEvent::BuffChanged(Buff::Aspirant));
    }
}

pub static THE_SPIRE: ActionDefinition = ActionDefinition {
    name: "The Spire",
    var_name: "TheSpire",
    town: 5,
    exp_mult: 1.0,
    stats: &[
        (Stat::Str, 0.1),
        (Stat::Dex, 0.1),
        (Stat::Spd, 0.1),
        (Stat::Con, 0.1),
        (Stat::Per, 0.2),
        (Stat::Int, 0.2),
        (Stat::Soul, 0.2),
    ],
    skills: &[],
    affected_by: &[],
    mana_cost: |ctx| 100_000.0 * 0.9f64.powf(ctx.host.resource("pylons")),
    visible: |ctx, _| level(ctx, 5, "Meander") >= 5,
    unlocked: |ctx, _| skill(ctx, "Combat") + skill(ctx, "Magic") >= 35.0,
    can_start: |_, state| floor_open(state, DungeonKind::Spire, SPIRE_STATS),
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: SPIRE_STATS,
        segments: None,
        loop_cost: |_, cursor| precision3(2f64.powi(cursor.loop_index as i32) * 10_000_000.0),
        tick_progress: spire_progress,
        segment_finished: None,
        loops_finished: Some(spire_loops_finished),
        naming: PartNaming::Dungeon {
            dungeon: DungeonKind::Spire,
            label: "Floor",
        },
    }),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_floor() {
        assert_eq!(current_floor(0, SMALL_STATS), 0);
        assert_eq!(current_floor(6, SMALL_STATS), 0);
        assert_eq!(current_floor(7, SMALL_STATS), 1);
        assert_eq!(current_floor(42, SMALL_STATS), 6);
        assert_eq!(current_floor(9, SPIRE_STATS), 1);
    }

    #[test]
    fn test_floor_open_until_last_floor_cleared() {
        let mut state = ActionState::new();
        state.loop_counter = 35;
        assert!(floor_open(&state, DungeonKind::Small, SMALL_STATS));
        state.loop_counter = 42;
        assert!(!floor_open(&state, DungeonKind::Small, SMALL_STATS));
    }
}
