//! Integration test: the segmented loop engine
//!
//! Drives hand-built multipart actions through `step` and checks segment
//! carry-over, loop completion, batch invariance and the per-loop start
//! check.

use idleloop::action::{
    always, eligibility, step, ActionDefinition, Archetype, Eligibility, MultipartSpec,
    PartNaming, Phase, SkillExp, StopReason, TickContext,
};
use idleloop::core::config::EngineConfig;
use idleloop::engine::{preview_loop_cost, preview_tick_progress};
use idleloop::host::{Host, SandboxHost, ViewEvent};
use idleloop::stats::Stat;
use idleloop::world::WorldState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DRILL_STATS: &[Stat] = &[Stat::Str, Stat::Dex, Stat::Con];

/// Three segments of 1000 at a flat 500 per tick.
static DRILL: ActionDefinition = ActionDefinition {
    name: "Drill",
    var_name: "Drill",
    town: 0,
    exp_mult: 2.0,
    stats: &[(Stat::Str, 0.5), (Stat::Dex, 0.5)],
    skills: &[("Combat", SkillExp::Flat(3.0))],
    affected_by: &[],
    mana_cost: |_| 1000.0,
    visible: always,
    unlocked: always,
    can_start: always,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: DRILL_STATS,
        segments: None,
        loop_cost: |_, _| 1000.0,
        tick_progress: |_, _| 500.0,
        segment_finished: None,
        loops_finished: None,
        naming: PartNaming::Ordinal { label: "Drill" },
    }),
};

/// Uneven rate so progress carries between segments.
static MARCH: ActionDefinition = ActionDefinition {
    name: "March",
    var_name: "March",
    town: 0,
    exp_mult: 1.0,
    stats: &[(Stat::Spd, 1.0)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 1000.0,
    visible: always,
    unlocked: always,
    can_start: always,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: DRILL_STATS,
        segments: None,
        loop_cost: |_, cursor| 1000.0 * (cursor.segment + 1) as f64,
        tick_progress: |_, _| 700.0,
        segment_finished: None,
        loops_finished: None,
        naming: PartNaming::Fixed("March"),
    }),
};

/// Each loop burns one unit of fuel; no fuel, no loop. Hooks record
/// their order through host resources.
static CONVOY: ActionDefinition = ActionDefinition {
    name: "Convoy",
    var_name: "Convoy",
    town: 0,
    exp_mult: 1.0,
    stats: &[(Stat::Con, 1.0)],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 1000.0,
    visible: always,
    unlocked: |ctx, _| ctx.host.resource("permit") > 0.0,
    can_start: |ctx, _| ctx.host.resource("fuel") >= 1.0,
    cost: None,
    finish: Some(|ctx, _| ctx.host.add_resource("finished", 1.0)),
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: DRILL_STATS,
        segments: None,
        loop_cost: |_, _| 100.0,
        tick_progress: |_, _| 100.0,
        segment_finished: Some(|ctx, _| ctx.host.add_resource("segments", 1.0)),
        loops_finished: Some(|ctx, _| {
            let seen = ctx.host.resource("segments");
            ctx.host.add_resource("segments_at_loop", seen);
            let finished = ctx.host.resource("finished");
            ctx.host.add_resource("finished_at_loop", finished);
            ctx.host.add_resource("fuel", -1.0);
        }),
        naming: PartNaming::Fixed("Convoy"),
    }),
};

static BROKEN: ActionDefinition = ActionDefinition {
    name: "Broken",
    var_name: "Broken",
    town: 0,
    exp_mult: 1.0,
    stats: &[],
    skills: &[],
    affected_by: &[],
    mana_cost: |_| 1000.0,
    visible: always,
    unlocked: always,
    can_start: always,
    cost: None,
    finish: None,
    archetype: Archetype::Multipart(MultipartSpec {
        loop_stats: DRILL_STATS,
        segments: None,
        loop_cost: |_, _| 0.0,
        tick_progress: |_, _| 1.0,
        segment_finished: None,
        loops_finished: None,
        naming: PartNaming::Fixed("Broken"),
    }),
};

fn run(def: &ActionDefinition, world: &mut WorldState, host: &mut SandboxHost, ticks: u64) -> idleloop::action::StepReport {
    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ctx = TickContext::new(world, host, &config, &mut rng);
    step(def, &mut ctx, ticks)
}

#[test]
fn test_three_segments_at_half_cost_per_tick() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new();

    let report = run(&DRILL, &mut world, &mut host, 2);
    assert_eq!(report.segments_completed, 1);
    assert_eq!(world.loop_counter(0, "Drill"), 1);
    assert_eq!(world.completions(0, "Drill"), 0);

    let report = run(&DRILL, &mut world, &mut host, 4);
    assert_eq!(report.segments_completed, 2);
    assert_eq!(report.completions, 1);
    assert_eq!(world.loop_counter(0, "Drill"), 3);
    assert_eq!(world.completions(0, "Drill"), 1);

    let state = world.action(0, "Drill").expect("drill state");
    assert_eq!(state.progress, 0.0);
    assert_eq!(state.phase, Phase::Idle);
}

#[test]
fn test_stat_and_skill_experience() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new();
    run(&DRILL, &mut world, &mut host, 6);

    // 0.5 weight * exp_mult 2 per tick over 6 ticks.
    assert_eq!(host.stat_exp(Stat::Str), 6.0);
    assert_eq!(host.stat_exp(Stat::Dex), 6.0);
    assert_eq!(host.stat_exp(Stat::Con), 0.0);
    // One loop: 3 * exp_mult 2.
    assert_eq!(host.skill_exp("Combat"), 6.0);
}

#[test]
fn test_progress_carries_into_next_segment() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new();

    run(&MARCH, &mut world, &mut host, 2);
    let state = world.action(0, "March").expect("march state");
    assert_eq!(state.loop_counter, 1);
    assert!((state.progress - 400.0).abs() < 1e-9);

    // Segment two costs 2000: 400 + 700 * 3 = 2500.
    run(&MARCH, &mut world, &mut host, 3);
    let state = world.action(0, "March").expect("march state");
    assert_eq!(state.loop_counter, 2);
    assert!((state.progress - 500.0).abs() < 1e-9);
}

#[test]
fn test_one_tick_can_finish_a_whole_loop() {
    static FLASH: ActionDefinition = ActionDefinition {
        name: "Flash",
        var_name: "Flash",
        town: 0,
        exp_mult: 1.0,
        stats: &[],
        skills: &[],
        affected_by: &[],
        mana_cost: |_| 1000.0,
        visible: always,
        unlocked: always,
        can_start: always,
        cost: None,
        finish: None,
        archetype: Archetype::Multipart(MultipartSpec {
            loop_stats: DRILL_STATS,
            segments: None,
            loop_cost: |_, _| 1000.0,
            tick_progress: |_, _| 3500.0,
            segment_finished: None,
            loops_finished: None,
            naming: PartNaming::Fixed("Flash"),
        }),
    };

    let mut world = WorldState::new();
    let mut host = SandboxHost::new();
    let report = run(&FLASH, &mut world, &mut host, 1);
    assert_eq!(report.ticks_used, 1);
    assert_eq!(report.segments_completed, 3);
    assert_eq!(report.completions, 1);
    assert_eq!(report.stopped, None);

    let state = world.action(0, "Flash").expect("flash state");
    assert_eq!(state.loop_counter, 3);
    assert_eq!(state.completions, 1);
    assert!((state.progress - 500.0).abs() < 1e-9);
    // The carry already belongs to the next loop.
    assert_eq!(state.phase, Phase::Advancing);

    let kinds: Vec<&str> = host
        .events
        .iter()
        .filter_map(|event| match event {
            ViewEvent::SegmentCompleted { .. } => Some("segment"),
            ViewEvent::LoopCompleted { .. } => Some("loop"),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, ["segment", "segment", "segment", "loop"]);
}

#[test]
fn test_carry_waits_for_next_start() {
    static TANKER: ActionDefinition = ActionDefinition {
        name: "Tanker",
        var_name: "Tanker",
        town: 0,
        exp_mult: 1.0,
        stats: &[],
        skills: &[],
        affected_by: &[],
        mana_cost: |_| 1000.0,
        visible: always,
        unlocked: always,
        can_start: |ctx, _| ctx.host.resource("fuel") >= 1.0,
        cost: None,
        finish: None,
        archetype: Archetype::Multipart(MultipartSpec {
            loop_stats: DRILL_STATS,
            segments: None,
            loop_cost: |_, _| 100.0,
            tick_progress: |_, _| 250.0,
            segment_finished: None,
            loops_finished: Some(|ctx, _| ctx.host.add_resource("fuel", -1.0)),
            naming: PartNaming::Fixed("Tanker"),
        }),
    };

    let mut world = WorldState::new();
    let mut host = SandboxHost::new().with_resource("fuel", 1.0);

    // 250 then 300: three segments, then the start check fails with 200 left.
    let report = run(&TANKER, &mut world, &mut host, 10);
    assert_eq!(report.ticks_used, 2);
    assert_eq!(report.completions, 1);
    assert_eq!(report.stopped, Some(StopReason::CannotStart));
    let state = world.action(0, "Tanker").expect("tanker state");
    assert_eq!(state.loop_counter, 3);
    assert_eq!(state.phase, Phase::Idle);
    assert!((state.progress - 200.0).abs() < 1e-9);

    host.add_resource("fuel", 1.0);
    let report = run(&TANKER, &mut world, &mut host, 10);
    assert_eq!(report.ticks_used, 1);
    assert_eq!(report.segments_completed, 3);
    assert_eq!(report.stopped, Some(StopReason::CannotStart));
    let state = world.action(0, "Tanker").expect("tanker state");
    assert_eq!(state.loop_counter, 6);
    assert!((state.progress - 150.0).abs() < 1e-9);
}

#[test]
fn test_batch_size_does_not_change_outcome() {
    let mut single_world = WorldState::new();
    let mut single_host = SandboxHost::new();
    for _ in 0..11 {
        run(&MARCH, &mut single_world, &mut single_host, 1);
    }

    let mut batch_world = WorldState::new();
    let mut batch_host = SandboxHost::new();
    run(&MARCH, &mut batch_world, &mut batch_host, 11);

    assert_eq!(single_world, batch_world);
    assert_eq!(single_host.events, batch_host.events);
    assert_eq!(single_host.stat_exp(Stat::Spd), batch_host.stat_exp(Stat::Spd));
}

#[test]
fn test_counter_never_decreases() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new();
    let mut previous = 0;
    for _ in 0..40 {
        run(&MARCH, &mut world, &mut host, 1);
        let counter = world.loop_counter(0, "March");
        assert!(counter >= previous);
        assert!(counter - previous <= 1);
        previous = counter;
    }
}

#[test]
fn test_hooks_run_in_order() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new()
        .with_resource("permit", 1.0)
        .with_resource("fuel", 1.0);

    run(&CONVOY, &mut world, &mut host, 3);

    // All three segment hooks fire before the loop hook, and the loop hook
    // fires before finish.
    assert_eq!(host.resource("segments_at_loop"), 3.0);
    assert_eq!(host.resource("finished_at_loop"), 0.0);
    assert_eq!(host.resource("finished"), 1.0);

    let kinds: Vec<&str> = host
        .events
        .iter()
        .filter_map(|event| match event {
            ViewEvent::SegmentCompleted { .. } => Some("segment"),
            ViewEvent::LoopCompleted { .. } => Some("loop"),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, ["segment", "segment", "segment", "loop"]);
}

#[test]
fn test_start_rechecked_every_loop() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new()
        .with_resource("permit", 1.0)
        .with_resource("fuel", 2.0);

    let report = run(&CONVOY, &mut world, &mut host, 100);
    assert_eq!(report.completions, 2);
    assert_eq!(report.ticks_used, 6);
    assert_eq!(report.stopped, Some(StopReason::CannotStart));
    assert_eq!(world.completions(0, "Convoy"), 2);

    // Topping up lets the next call continue from the same counter.
    host.add_resource("fuel", 1.0);
    let report = run(&CONVOY, &mut world, &mut host, 3);
    assert_eq!(report.completions, 1);
    assert_eq!(world.loop_counter(0, "Convoy"), 9);
}

#[test]
fn test_locked_action_does_nothing() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new().with_resource("fuel", 5.0);

    let report = run(&CONVOY, &mut world, &mut host, 10);
    assert_eq!(report.ticks_used, 0);
    assert_eq!(report.stopped, Some(StopReason::Locked));
    assert_eq!(world.loop_counter(0, "Convoy"), 0);
    assert!(host.events.is_empty());
}

#[test]
fn test_eligibility_pipeline() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new();
    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    {
        let ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);
        assert_eq!(eligibility(&CONVOY, &ctx), Eligibility::Locked);
    }
    host.add_resource("permit", 1.0);
    {
        let ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);
        assert_eq!(eligibility(&CONVOY, &ctx), Eligibility::Blocked);
    }
    host.add_resource("fuel", 1.0);
    let ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);
    assert_eq!(eligibility(&CONVOY, &ctx), Eligibility::Ready);
}

#[test]
fn test_preview_does_not_mutate() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new();
    run(&MARCH, &mut world, &mut host, 2);
    let before = world.clone();

    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);
    assert_eq!(preview_loop_cost(&MARCH, &ctx, 0), Some(2000.0));
    assert_eq!(preview_loop_cost(&MARCH, &ctx, 1), Some(3000.0));
    assert_eq!(preview_tick_progress(&MARCH, &ctx, 2), Some(700.0));
    drop(ctx);

    assert_eq!(world, before);
}

#[test]
fn test_part_label_follows_loops() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new();
    run(&DRILL, &mut world, &mut host, 1);
    assert_eq!(world.action(0, "Drill").map(|s| s.label.as_str()), Some("Drill One"));

    run(&DRILL, &mut world, &mut host, 6);
    assert_eq!(world.action(0, "Drill").map(|s| s.label.as_str()), Some("Drill Two"));
    assert!(host.events.contains(&ViewEvent::PartRenamed {
        action: "Drill",
        label: "Drill Two".to_string(),
    }));
}

#[test]
fn test_zero_cost_never_starts() {
    let mut world = WorldState::new();
    let mut host = SandboxHost::new();
    let report = run(&BROKEN, &mut world, &mut host, 5);
    assert_eq!(report.stopped, Some(StopReason::Misconfigured));
    assert_eq!(report.ticks_used, 0);
    assert_eq!(world.loop_counter(0, "Broken"), 0);
    assert_eq!(host.stat_exp(Stat::Str), 0.0);
    assert!(host.events.is_empty());
}

#[test]
fn test_empty_segment_layouts_never_start() {
    static HOLLOW: ActionDefinition = ActionDefinition {
        name: "Hollow",
        var_name: "Hollow",
        town: 0,
        exp_mult: 1.0,
        stats: &[],
        skills: &[],
        affected_by: &[],
        mana_cost: |_| 1000.0,
        visible: always,
        unlocked: always,
        can_start: always,
        cost: None,
        finish: None,
        archetype: Archetype::Multipart(MultipartSpec {
            loop_stats: DRILL_STATS,
            segments: Some(0),
            loop_cost: |_, _| 100.0,
            tick_progress: |_, _| 100.0,
            segment_finished: None,
            loops_finished: None,
            naming: PartNaming::Ordinal { label: "Hollow" },
        }),
    };
    static STATLESS: ActionDefinition = ActionDefinition {
        name: "Statless",
        var_name: "Statless",
        town: 0,
        exp_mult: 1.0,
        stats: &[],
        skills: &[],
        affected_by: &[],
        mana_cost: |_| 1000.0,
        visible: always,
        unlocked: always,
        can_start: always,
        cost: None,
        finish: None,
        archetype: Archetype::Multipart(MultipartSpec {
            loop_stats: &[],
            segments: None,
            loop_cost: |_, _| 100.0,
            tick_progress: |_, _| 100.0,
            segment_finished: None,
            loops_finished: None,
            naming: PartNaming::Ordinal { label: "Statless" },
        }),
    };

    let mut world = WorldState::new();
    let mut host = SandboxHost::new();
    for def in [&HOLLOW, &STATLESS] {
        let report = run(def, &mut world, &mut host, 3);
        assert_eq!(report.stopped, Some(StopReason::Misconfigured));
        assert_eq!(report.ticks_used, 0);
    }
    assert!(host.events.is_empty());

    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);
    assert_eq!(preview_loop_cost(&HOLLOW, &ctx, 0), None);
    assert_eq!(preview_tick_progress(&STATLESS, &ctx, 0), None);
}
