//! Rank-bearing actions: the two guilds, the college and the two
//! campaigns.

use super::{diminishing, favored, level, skill};
use crate::action::state::ActionState;
use crate::action::types::{
    always, ActionDefinition, Archetype, MultipartSpec, PartNaming, SegmentCursor, SkillExp,
    TickContext,
};
use crate::core::constants::GUILD_COMPLETIONS_DIVISOR;
use crate::core::math::precision3;
use crate::rank::RankTrack;
use crate::stats::Stat;
use crate::world::Guild;

/// Guild rank milestones: counter reached, rank name.
const GUILD_MILESTONES: [(u64, &str); 8] = [
    (0, "E"),
    (3, "D"),
    (6, "C"),
    (9, "B"),
    (12, "A"),
    (15, "S"),
    (27, "U"),
    (39, "Godlike"),
];

/// Advance a rank track by one segment and log tier changes.
fn advance_rank(ctx: &mut TickContext<'_>, track: RankTrack) {
    let before = ctx.world.ranks.rank(track);
    ctx.world.ranks.advance(track);
    let after = ctx.world.ranks.rank(track);
    if after.tier_index != before.tier_index {
        tracing::info!(track = ?track, rank = %after, "rank reached");
    }
}

fn unlock_rank_stories(ctx: &mut TickContext<'_>, track: RankTrack, prefix: &str) {
    let counter = ctx.world.ranks.counter(track);
    for (threshold, name) in GUILD_MILESTONES {
        if counter >= threshold {
            ctx.host.unlock_story(&format!("{}Rank{}Reached", prefix, name));
        }
    }
}

fn guild_cost(cursor: &SegmentCursor, scale: f64) -> f64 {
    precision3(1.2f64.powi(cursor.loop_counter as i32)) * scale
}

/// Campaign and college segments grow by 1.3x each.
fn campaign_cost(cursor: &SegmentCursor, scale: f64) -> f64 {
    precision3(1.3f64.powi(cursor.loop_counter as i32)) * scale
}

fn guild_bonus(cursor: &SegmentCursor) -> f64 {
    diminishing(cursor.completions, GUILD_COMPLETIONS_DIVISOR)
}

fn drunk_level(ctx: &TickContext<'_>) -> u32 {
    level(ctx, 2, "Drunk")
}

fn not_in_guild_other_than(ctx: &TickContext<'_>, guild: Guild) -> bool {
    ctx.world.guild.map_or(true, |current| current == guild)
}

fn adventure_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    (skill(ctx, "Magic") / 2.0 + ctx.host.self_combat()) * favored(ctx, cursor) * guild_bonus(cursor)
}

fn adventure_segment(ctx: &mut TickContext<'_>, _: &ActionState) {
    advance_rank(ctx, RankTrack::AdventureGuild);
    ctx.host.add_resource("mana", 200.0);
}

fn adventure_finish(ctx: &mut TickContext<'_>, _: &ActionState) {
    ctx.world.guild = Some(Guild::Adventure);
    ctx.host.unlock_story("advGuildTestsTaken");
}

pub static ADVENTURE_GUILD: ActionDefinition = ActionDefinition {
    name: "Adventure Guild",
    var_name: "AdvGuild",
    town: 2,
    exp_mult: 1.0,
    stats: &[(Stat::Str, 0.4), (Stat::Dex, 0.3), (Stat::Con, 0.3)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 3000.0,
    visible: |ctx, _| drunk_level(ctx) >= 5,
    unlocked: |ctx, _| drunk_level(ctx) >= 20,
    can_start: |ctx, _| not_in_guild_other_than(ctx, Guild::Adventure),
    cost: None,
    finish: Some(adventure_finish),
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Str, Stat::Dex, Stat::Con],
        segments: None,
        loop_cost: |_, cursor| guild_cost(cursor, 5e6),
        tick_progress: adventure_progress,
        segment_finished: Some(adventure_segment),
        loops_finished: Some(|ctx, _| unlock_rank_stories(ctx, RankTrack::AdventureGuild, "advGuild")),
        naming: PartNaming::Rank {
            track: RankTrack::AdventureGuild,
            prefix: Some("Rank"),
        },
    }),
};

fn crafting_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    (skill(ctx, "Magic") / 2.0 + skill(ctx, "Crafting")) * favored(ctx, cursor) * guild_bonus(cursor)
}

/// Crafting experience is earned per segment rather than per loop.
fn crafting_segment(ctx: &mut TickContext<'_>, _: &ActionState) {
    advance_rank(ctx, RankTrack::CraftingGuild);
    ctx.host.grant_skill_exp("Crafting", 50.0);
    ctx.host.add_resource("gold", 10.0);
}

fn crafting_finish(ctx: &mut TickContext<'_>, _: &ActionState) {
    ctx.world.guild = Some(Guild::Crafting);
    ctx.host.unlock_story("craftGuildTestsTaken");
}

pub static CRAFTING_GUILD: ActionDefinition = ActionDefinition {
    name: "Crafting Guild",
    var_name: "CraftGuild",
    town: 2,
    exp_mult: 1.0,
    stats: &[(Stat::Dex, 0.3), (Stat::Per, 0.3), (Stat::Int, 0.4)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 3000.0,
    visible: |ctx, _| drunk_level(ctx) >= 5,
    unlocked: |ctx, _| drunk_level(ctx) >= 30,
    can_start: |ctx, _| not_in_guild_other_than(ctx, Guild::Crafting),
    cost: None,
    finish: Some(crafting_finish),
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Int, Stat::Per, Stat::Dex],
        segments: None,
        loop_cost: |_, cursor| guild_cost(cursor, 2e6),
        tick_progress: crafting_progress,
        segment_finished: Some(crafting_segment),
        loops_finished: Some(|ctx, _| unlock_rank_stories(ctx, RankTrack::CraftingGuild, "craftGuild")),
        naming: PartNaming::Rank {
            track: RankTrack::CraftingGuild,
            prefix: Some("Rank"),
        },
    }),
};

const COLLEGE_SKILLS: [&str; 7] = [
    "Magic",
    "Practical",
    "Dark",
    "Chronomancy",
    "Pyromancy",
    "Restoration",
    "Spatiomancy",
];

fn college_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    let study: f64 = COLLEGE_SKILLS.iter().map(|name| skill(ctx, name)).sum();
    study * favored(ctx, cursor) * guild_bonus(cursor)
}

fn college_can_start(ctx: &TickContext<'_>, _: &ActionState) -> bool {
    ctx.host.resource("gold") >= 500.0 && ctx.host.resource("favors") >= 10.0
}

fn college_cost(ctx: &mut TickContext<'_>, _: &ActionState) {
    ctx.host.add_resource("gold", -500.0);
    ctx.host.add_resource("favors", -10.0);
}

pub static WIZARD_COLLEGE: ActionDefinition = ActionDefinition {
    name: "Wizard College",
    var_name: "WizCollege",
    town: 4,
    exp_mult: 1.0,
    stats: &[(Stat::Int, 0.5), (Stat::Soul, 0.3), (Stat::Cha, 0.2)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 10_000.0,
    visible: |ctx, _| level(ctx, 4, "Tour") >= 40,
    unlocked: |ctx, _| level(ctx, 4, "Tour") >= 60,
    can_start: college_can_start,
    cost: Some(college_cost),
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Int, Stat::Cha, Stat::Soul],
        segments: None,
        loop_cost: |_, cursor| campaign_cost(cursor, 1e7),
        tick_progress: college_progress,
        segment_finished: Some(|ctx, _| advance_rank(ctx, RankTrack::WizardCollege)),
        loops_finished: None,
        naming: PartNaming::Rank {
            track: RankTrack::WizardCollege,
            prefix: None,
        },
    }),
};

fn combat_progress(ctx: &TickContext<'_>, cursor: &SegmentCursor) -> f64 {
    ctx.host.self_combat() * favored(ctx, cursor) * guild_bonus(cursor)
}

fn citizen_level(ctx: &TickContext<'_>) -> u32 {
    level(ctx, 4, "Citizen")
}

pub static FIGHT_FROST_GIANTS: ActionDefinition = ActionDefinition {
    name: "Fight Frost Giants",
    var_name: "FightFrostGiants",
    town: 4,
    exp_mult: 1.0,
    stats: &[(Stat::Str, 0.5), (Stat::Con, 0.3), (Stat::Per, 0.2)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 20_000.0,
    visible: |ctx, _| citizen_level(ctx) >= 80,
    unlocked: |ctx, _| citizen_level(ctx) >= 100,
    can_start: |ctx, _| ctx.host.has_item("pegasus"),
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Per, Stat::Con, Stat::Str],
        segments: None,
        loop_cost: |_, cursor| campaign_cost(cursor, 1e7),
        tick_progress: combat_progress,
        segment_finished: Some(|ctx, _| advance_rank(ctx, RankTrack::FrostGiants)),
        loops_finished: None,
        naming: PartNaming::Rank {
            track: RankTrack::FrostGiants,
            prefix: None,
        },
    }),
};

/// Divine experience scales with the Frost Giants rank.
fn blessing_exp(ctx: &TickContext<'_>) -> f64 {
    (50.0 * ctx.world.ranks.bonus(RankTrack::FrostGiants)).floor()
}

pub static SEEK_BLESSING: ActionDefinition = ActionDefinition {
    name: "Seek Blessing",
    var_name: "SeekBlessing",
    town: 4,
    exp_mult: 1.0,
    stats: &[(Stat::Cha, 0.5), (Stat::Luck, 0.5)],
    skills: &[("Divine", SkillExp::Scaled(blessing_exp))],
    affected_by: &["Fight Frost Giants"],
    mana_cost: |_| 1_000_000.0,
    visible: |ctx, _| citizen_level(ctx) >= 80,
    unlocked: |ctx, _| citizen_level(ctx) >= 100,
    can_start: |ctx, _| ctx.host.has_item("pegasus"),
    cost: None,
    finish: None,
    archetype: Archetype::Normal,
};

pub static FIGHT_JUNGLE_MONSTERS: ActionDefinition = ActionDefinition {
    name: "Fight Jungle Monsters",
    var_name: "FightJungleMonsters",
    town: 6,
    exp_mult: 1.0,
    stats: &[(Stat::Str, 0.2), (Stat::Dex, 0.3), (Stat::Per, 0.4)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 30_000.0,
    visible: always,
    unlocked: always,
    can_start: always,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: &[Stat::Dex, Stat::Str, Stat::Per],
        segments: None,
        loop_cost: |_, cursor| campaign_cost(cursor, 1e8),
        tick_progress: combat_progress,
        segment_finished: Some(|ctx, _| {
            advance_rank(ctx, RankTrack::JungleMonsters);
            ctx.host.add_resource("hide", 1.0);
        }),
        loops_finished: None,
        naming: PartNaming::Rank {
            track: RankTrack::JungleMonsters,
            prefix: None,
        },
    }),
};
