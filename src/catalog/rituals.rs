//! Soulstone sinks and sources: sacrifice rituals, the body imbuement and
//! the soulstone mine.

use super::{favored, level, skill};
use crate::action::state::ActionState;
use crate::action::types::{
    ActionDefinition, Archetype, MultipartSpec, PartNaming, SegmentCursor, TickContext,
};
use crate::buffs::Buff;
use crate::core::constants::{DIVINE_REWARD_DIVISOR, DIVINE_REWARD_EXPONENT};
use crate::host::ViewEvent;
use crate::soulstone::{can_sacrifice, sacrifice, SacrificeTerms};
use crate::stats::Stat;
use rand::Rng;

fn sacrifice_gate(ctx: &TickContext<'_>, terms: &SacrificeTerms) -> bool {
    let allowed = can_sacrifice(
        &ctx.world.soulstones,
        &ctx.world.buffs,
        &ctx.config.buff_caps,
        terms,
    );
    if !allowed && !ctx.world.buffs.below_cap(terms.buff, &ctx.config.buff_caps) {
        tracing::warn!(buff = terms.buff.name(), "buff cap reached, loop blocked");
    }
    allowed
}

fn settle_sacrifice(ctx: &mut TickContext<'_>, terms: &SacrificeTerms) {
    sacrifice(&mut ctx.world.soulstones, &mut ctx.world.buffs, terms);
    ctx.host.notify(ViewEvent::SoulstonesChanged);
    ctx.host.notify(ViewEvent::BuffChanged(terms.buff));
}

/// Segment `s` of a ritual loop costs `base * (step * s + 1)`.
fn ritual_cost(cursor: &SegmentCursor, base: f64, step: f64) -> f64 {
    base * (step * cursor.segment as f64 + 1.0)
}

fn witch_discount(ctx: &TickContext<'_>) -> f64 {
    1.0 - f64::from(level(ctx, 1, "Witch")) * 0.005
}

fn ritual_terms(ctx: &TickContext<'_>, loops: u64) -> SacrificeTerms {
    SacrificeTerms {
        buff: Buff::Ritual,
        loops,
        scaling: 50,
        discount: skill(ctx, "Commune") / 100.0,
    }
}

fn dark_ritual_can_start(ctx: &TickContext<'_>, state: &ActionState) -> bool {
    ctx.host.resource("reputation") <= -5.0
        && sacrifice_gate(ctx, &ritual_terms(ctx, state.completions))
}

fn dark_ritual_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    skill(ctx, "Dark") * favored(ctx, cursor) / witch_discount(ctx)
}

fn dark_ritual_finished(ctx: &mut TickContext<'_>, state: &ActionState) {
    let terms = ritual_terms(ctx, state.completions);
    settle_sacrifice(ctx, &terms);
}

pub static DARK_RITUAL: ActionDefinition = ActionDefinition {
    name: "Dark Ritual",
    var_name: "DarkRitual",
    town: 1,
    exp_mult: 10.0,
    stats: &[(Stat::Spd, 0.1), (Stat::Int, 0.1), (Stat::Soul, 0.8)],
    skills: &[],
    affected_by: &[],
    mana_cost: |ctx| (50_000.0 * witch_discount(ctx)).ceil(),
    visible: |ctx, _| level(ctx, 1, "Witch") >= 20,
    unlocked: |ctx, _| level(ctx, 1, "Witch") >= 50 && skill(ctx, "Dark") >= 50.0,
    can_start: dark_ritual_can_start,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Spd, Stat::Int, Stat::Soul],
        segments: None,
        loop_cost: |_, cursor| ritual_cost(cursor, 1e6, 2.0),
        tick_progress: dark_ritual_progress,
        segment_finished: None,
        loops_finished: Some(dark_ritual_finished),
        naming: PartNaming::Fixed("Perform Dark Ritual"),
    }),
};

fn mind_terms(loops: u64) -> SacrificeTerms {
    SacrificeTerms {
        buff: Buff::Imbuement,
        loops,
        scaling: 20,
        discount: 0.0,
    }
}

fn magic_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    skill(ctx, "Magic") * favored(ctx, cursor)
}

pub static IMBUE_MIND: ActionDefinition = ActionDefinition {
    name: "Imbue Mind",
    var_name: "ImbueMind",
    town: 3,
    exp_mult: 5.0,
    stats: &[(Stat::Spd, 0.1), (Stat::Per, 0.1), (Stat::Int, 0.8)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 500_000.0,
    visible: |ctx, _| level(ctx, 3, "Illusions") >= 50,
    unlocked: |ctx, _| level(ctx, 3, "Illusions") >= 70 && skill(ctx, "Magic") >= 300.0,
    can_start: |ctx, state| sacrifice_gate(ctx, &mind_terms(state.completions)),
    cost: None,
    finish: Some(|ctx, _| ctx.host.unlock_story("imbueMindThirdSegmentReached")),
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Spd, Stat::Per, Stat::Int],
        segments: None,
        loop_cost: |_, cursor| ritual_cost(cursor, 1e8, 5.0),
        tick_progress: magic_progress,
        segment_finished: None,
        loops_finished: Some(|ctx, state| settle_sacrifice(ctx, &mind_terms(state.completions))),
        naming: PartNaming::Fixed("Imbue Mind"),
    }),
};

/// Every talent must cover the next Imbuement2 level, and Imbuement must
/// stay ahead of it.
fn imbue_body_can_start(ctx: &TickContext<'_>, _: &ActionState) -> bool {
    let buffs = &ctx.world.buffs;
    let next = f64::from(buffs.level(Buff::Imbuement2) + 1);
    buffs.level(Buff::Imbuement) > buffs.level(Buff::Imbuement2)
        && buffs.below_cap(Buff::Imbuement2, &ctx.config.buff_caps)
        && Stat::ALL.iter().all(|&stat| ctx.host.talent(stat) >= next)
}

/// Trade talent levels for a permanent Imbuement2 level.
fn imbue_body_finished(ctx: &mut TickContext<'_>, _: &ActionState) {
    let drained = f64::from(ctx.world.buffs.level(Buff::Imbuement2) + 1);
    for stat in Stat::ALL {
        let talent = ctx.host.talent(stat);
        ctx.host.set_talent(stat, (talent - drained).max(0.0));
    }
    ctx.world.buffs.increment(Buff::Imbuement2);
    ctx.host.notify(ViewEvent::BuffChanged(Buff::Imbuement2));
}

pub static IMBUE_BODY: ActionDefinition = ActionDefinition {
    name: "Imbue Body",
    var_name: "ImbueBody",
    town: 3,
    exp_mult: 5.0,
    stats: &[(Stat::Dex, 0.1), (Stat::Str, 0.1), (Stat::Con, 0.8)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 500_000.0,
    visible: |ctx, _| ctx.world.buffs.level(Buff::Imbuement) > 1,
    unlocked: |ctx, _| {
        ctx.world.buffs.level(Buff::Imbuement) > ctx.world.buffs.level(Buff::Imbuement2)
    },
    can_start: imbue_body_can_start,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Dex, Stat::Str, Stat::Con],
        segments: None,
        loop_cost: |_, cursor| ritual_cost(cursor, 1e8, 5.0),
        tick_progress: magic_progress,
        segment_finished: None,
        loops_finished: Some(imbue_body_finished),
        naming: PartNaming::Fixed("Imbue Body"),
    }),
};

fn feast_terms(ctx: &TickContext<'_>, loops: u64) -> SacrificeTerms {
    SacrificeTerms {
        buff: Buff::Feast,
        loops,
        scaling: 5000,
        discount: skill(ctx, "Gluttony") / 100.0,
    }
}

fn feast_can_start(ctx: &TickContext<'_>, state: &ActionState) -> bool {
    ctx.host.resource("reputation") >= 100.0
        && sacrifice_gate(ctx, &feast_terms(ctx, state.completions))
}

fn feast_finished(ctx: &mut TickContext<'_>, state: &ActionState) {
    let terms = feast_terms(ctx, state.completions);
    settle_sacrifice(ctx, &terms);
}

pub static GREAT_FEAST: ActionDefinition = ActionDefinition {
    name: "Great Feast",
    var_name: "GreatFeast",
    town: 4,
    exp_mult: 5.0,
    stats: &[(Stat::Spd, 0.1), (Stat::Int, 0.1), (Stat::Soul, 0.8)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 5_000_000.0,
    visible: |ctx, _| level(ctx, 4, "Tour") >= 80,
    unlocked: |ctx, _| level(ctx, 4, "Tour") >= 100,
    can_start: feast_can_start,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Spd, Stat::Int, Stat::Soul],
        segments: None,
        loop_cost: |_, cursor| ritual_cost(cursor, 1e9, 5.0),
        tick_progress: |ctx, cursor| skill(ctx, "Practical") * favored(ctx, cursor),
        segment_finished: None,
        loops_finished: Some(feast_finished),
        naming: PartNaming::Fixed("Host Great Feast"),
    }),
};

fn mine_total(ctx: &TickContext<'_>) -> u64 {
    let spatio = skill(ctx, "Spatiomancy").clamp(700.0, 900.0) - 700.0;
    (f64::from(level(ctx, 3, "Cavern")) * 3.0 * (1.0 + spatio / 200.0)).floor() as u64
}

/// A good vein banks soulstones in a random stat.
fn mine_reward(ctx: &mut TickContext<'_>) -> f64 {
    let amount = (1.0 + skill(ctx, "Divine") / DIVINE_REWARD_DIVISOR)
        .powf(DIVINE_REWARD_EXPONENT)
        .floor()
        .max(1.0);
    let stat = Stat::ALL[ctx.rng.gen_range(0..Stat::ALL.len())];
    ctx.world.soulstones.add(stat, amount as u64);
    ctx.host.notify(ViewEvent::SoulstonesChanged);
    tracing::info!(stat = stat.name(), amount, "soulstones mined");
    amount
}

pub static MINE_SOULSTONES: ActionDefinition = ActionDefinition {
    name: "Mine Soulstones",
    var_name: "MineSoulstones",
    town: 3,
    exp_mult: 1.0,
    stats: &[(Stat::Str, 0.6), (Stat::Dex, 0.1), (Stat::Con, 0.3)],
    skills: &[],
    affected_by: &["Buy Pickaxe"],
    mana_cost: |_| 5000.0,
    visible: |ctx, _| level(ctx, 3, "Cavern") >= 2,
    unlocked: |ctx, _| level(ctx, 3, "Cavern") >= 20,
    can_start: |ctx, _| ctx.host.has_item("pickaxe"),
    cost: None,
    finish: None,
    archetype: Archetype::Limited {
        reward_ratio: 10,
        total: mine_total,
        reward: mine_reward,
    },
};
