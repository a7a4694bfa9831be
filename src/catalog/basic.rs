//! Town 0: exploration, limited searches, training and the first
//! multipart actions.

use super::{diminishing, favored, level, skill};
use crate::action::state::ActionState;
use crate::action::types::{
    always, ActionDefinition, Archetype, MultipartSpec, PartNaming, SegmentCursor, SkillExp,
    TickContext,
};
use crate::core::constants::COMPLETIONS_DIVISOR;
use crate::core::math::fibonacci;
use crate::stats::Stat;

fn wander_level(ctx: &TickContext<'_>) -> u32 {
    level(ctx, 0, "Wander")
}

fn met_level(ctx: &TickContext<'_>) -> u32 {
    level(ctx, 0, "Met")
}

fn wander_exp(ctx: &TickContext<'_>) -> f64 {
    let glasses = if ctx.host.has_item("glasses") { 4.0 } else { 1.0 };
    200.0 * glasses
}

pub static WANDER: ActionDefinition = ActionDefinition {
    name: "Wander",
    var_name: "Wander",
    town: 0,
    exp_mult: 1.0,
    stats: &[
        (Stat::Per, 0.2),
        (Stat::Con, 0.2),
        (Stat::Cha, 0.2),
        (Stat::Spd, 0.3),
        (Stat::Luck, 0.1),
    ],
    skills: &[],
    affected_by: &["Buy Glasses"],
    mana_cost: |_| 250.0,
    visible: always,
    unlocked: always,
    can_start: always,
    cost: None,
    finish: None,
    archetype: Archetype::Progress {
        exp_gain: wander_exp,
    },
};

pub static MEET_PEOPLE: ActionDefinition = ActionDefinition {
    name: "Meet People",
    var_name: "Met",
    town: 0,
    exp_mult: 1.0,
    stats: &[(Stat::Int, 0.1), (Stat::Cha, 0.8), (Stat::Soul, 0.1)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 800.0,
    visible: |ctx, _| wander_level(ctx) >= 10,
    unlocked: |ctx, _| wander_level(ctx) >= 22,
    can_start: always,
    cost: None,
    finish: None,
    archetype: Archetype::Progress {
        exp_gain: |_| 200.0,
    },
};

fn pots_total(ctx: &TickContext<'_>) -> u64 {
    u64::from(wander_level(ctx)) * 5
}

/// Each good pot releases mana.
fn pots_reward(ctx: &mut TickContext<'_>) -> f64 {
    let mana = (100.0 * (1.0 + skill(ctx, "Dark") / 60.0).powf(0.25)).floor();
    ctx.host.add_resource("mana", mana);
    mana
}

pub static SMASH_POTS: ActionDefinition = ActionDefinition {
    name: "Smash Pots",
    var_name: "Pots",
    town: 0,
    exp_mult: 1.0,
    stats: &[(Stat::Str, 0.2), (Stat::Per, 0.2), (Stat::Spd, 0.6)],
    skills: &[],
    affected_by: &[],
    mana_cost: |ctx| (50.0 / (1.0 + skill(ctx, "Practical") / 100.0)).ceil(),
    visible: always,
    unlocked: always,
    can_start: always,
    cost: None,
    finish: None,
    archetype: Archetype::Limited {
        reward_ratio: 10,
        total: pots_total,
        reward: pots_reward,
    },
};

fn locks_total(ctx: &TickContext<'_>) -> u64 {
    let spatio = skill(ctx, "Spatiomancy").clamp(100.0, 300.0) - 100.0;
    (f64::from(wander_level(ctx)) * (1.0 + spatio / 200.0)).floor() as u64
}

fn locks_reward(ctx: &mut TickContext<'_>) -> f64 {
    let practical = skill(ctx, "Practical").min(200.0);
    let gold = (10.0 * (1.0 + practical / 100.0)).floor();
    ctx.host.add_resource("gold", gold);
    gold
}

pub static PICK_LOCKS: ActionDefinition = ActionDefinition {
    name: "Pick Locks",
    var_name: "Locks",
    town: 0,
    exp_mult: 1.0,
    stats: &[
        (Stat::Dex, 0.5),
        (Stat::Per, 0.3),
        (Stat::Spd, 0.1),
        (Stat::Luck, 0.1),
    ],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 400.0,
    visible: |ctx, _| wander_level(ctx) >= 3,
    unlocked: |ctx, _| wander_level(ctx) >= 20,
    can_start: always,
    cost: None,
    finish: None,
    archetype: Archetype::Limited {
        reward_ratio: 10,
        total: locks_total,
        reward: locks_reward,
    },
};

fn buy_glasses(ctx: &mut TickContext<'_>, _: &ActionState) {
    if !ctx.host.has_item("glasses") {
        ctx.host.add_resource("glasses", 1.0);
    }
    ctx.host.unlock_story("glassesBought");
}

pub static BUY_GLASSES: ActionDefinition = ActionDefinition {
    name: "Buy Glasses",
    var_name: "BuyGlasses",
    town: 0,
    exp_mult: 1.0,
    stats: &[(Stat::Cha, 0.7), (Stat::Spd, 0.3)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 50.0,
    visible: |ctx, _| wander_level(ctx) >= 3,
    unlocked: |ctx, _| wander_level(ctx) >= 20,
    can_start: |ctx, _| ctx.host.resource("gold") >= 10.0,
    cost: Some(|ctx, _| ctx.host.add_resource("gold", -10.0)),
    finish: Some(buy_glasses),
    archetype: Archetype::Normal,
};

pub static TRAIN_STRENGTH: ActionDefinition = ActionDefinition {
    name: "Train Strength",
    var_name: "TrainStrength",
    town: 0,
    exp_mult: 4.0,
    stats: &[(Stat::Str, 0.8), (Stat::Con, 0.2)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 2000.0,
    visible: |ctx, _| met_level(ctx) >= 1,
    unlocked: |ctx, _| met_level(ctx) >= 5,
    can_start: always,
    cost: None,
    finish: Some(|ctx, _| ctx.host.unlock_story("strengthTrained")),
    archetype: Archetype::Normal,
};

fn heal_cost(_: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    fibonacci(cursor.loop_index + 3) * 5000.0
}

fn heal_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    skill(ctx, "Magic")
        * (skill(ctx, "Restoration") / 50.0).max(1.0)
        * favored(ctx, cursor)
        * diminishing(cursor.completions, COMPLETIONS_DIVISOR)
}

pub static HEAL_THE_SICK: ActionDefinition = ActionDefinition {
    name: "Heal The Sick",
    var_name: "Heal",
    town: 0,
    exp_mult: 1.0,
    stats: &[
        (Stat::Per, 0.2),
        (Stat::Int, 0.2),
        (Stat::Cha, 0.2),
        (Stat::Soul, 0.4),
    ],
    skills: &[("Magic", SkillExp::Flat(10.0))],
    affected_by: &[],
    mana_cost: |_| 2500.0,
    visible: |ctx, _| level(ctx, 0, "Secrets") >= 20,
    unlocked: |ctx, _| skill(ctx, "Magic") >= 12.0,
    can_start: |ctx, _| ctx.host.resource("reputation") >= 1.0,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Per, Stat::Int, Stat::Cha],
        segments: None,
        loop_cost: heal_cost,
        tick_progress: heal_progress,
        segment_finished: None,
        loops_finished: Some(|ctx, _| ctx.host.add_resource("reputation", 3.0)),
        naming: PartNaming::Ordinal { label: "Patient" },
    }),
};

/// Costs climb with every segment, not just every loop.
fn fight_cost(_: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    let step = cursor.loop_counter - (cursor.base_counter + 2) / 3;
    fibonacci(step + 1) * 10_000.0
}

fn fight_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    ctx.host.self_combat() * favored(ctx, cursor) * diminishing(cursor.completions, COMPLETIONS_DIVISOR)
}

pub static FIGHT_MONSTERS: ActionDefinition = ActionDefinition {
    name: "Fight Monsters",
    var_name: "Fight",
    town: 0,
    exp_mult: 1.0,
    stats: &[
        (Stat::Str, 0.3),
        (Stat::Spd, 0.3),
        (Stat::Con, 0.3),
        (Stat::Luck, 0.1),
    ],
    skills: &[("Combat", SkillExp::Flat(10.0))],
    affected_by: &[],
    mana_cost: |_| 2000.0,
    visible: |ctx, _| level(ctx, 0, "Secrets") >= 20,
    unlocked: |ctx, _| skill(ctx, "Combat") >= 10.0,
    can_start: |ctx, _| ctx.host.resource("reputation") >= 2.0,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[
            Stat::Spd,
            Stat::Spd,
            Stat::Spd,
            Stat::Str,
            Stat::Str,
            Stat::Str,
            Stat::Con,
            Stat::Con,
            Stat::Con,
        ],
        segments: Some(3),
        loop_cost: fight_cost,
        tick_progress: fight_progress,
        segment_finished: Some(|ctx, _| ctx.host.add_resource("gold", 20.0)),
        loops_finished: None,
        naming: PartNaming::Ordinal { label: "Monster" },
    }),
};
