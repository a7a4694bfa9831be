//! Integration test: dungeon floor reward draws
//!
//! Exercises the draw directly and through full Small Dungeon runs.

use idleloop::action::{step, StopReason, TickContext};
use idleloop::buffs::Buff;
use idleloop::catalog::{LARGE_DUNGEON, SMALL_DUNGEON, THE_SPIRE};
use idleloop::core::config::EngineConfig;
use idleloop::dungeon::{draw_reward, DrawOutcome, DungeonKind, DungeonRegistry};
use idleloop::engine::preview_loop_cost;
use idleloop::host::{SandboxHost, ViewEvent};
use idleloop::soulstone::SoulstonePool;
use idleloop::world::WorldState;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_success_decays_chance_from_half() {
    let mut registry = DungeonRegistry::new();
    let mut pool = SoulstonePool::new();
    registry
        .floor_mut(DungeonKind::Large, 3)
        .expect("large floor 3")
        .ss_chance = 0.5;

    let mut low_roll = StepRng::new(0, 0);
    let outcome = draw_reward(&mut registry, &mut pool, DungeonKind::Large, 3, 0.0, &mut low_roll);

    assert!(matches!(outcome, DrawOutcome::Success { amount: 10, .. }));
    let floor = registry.floor(DungeonKind::Large, 3).expect("large floor 3");
    assert!((floor.ss_chance - 0.49).abs() < 1e-12);
    assert_eq!(floor.completed, 1);
    assert_eq!(pool.total(), 10);
}

#[test]
fn test_completed_counts_every_draw() {
    let mut registry = DungeonRegistry::new();
    let mut pool = SoulstonePool::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let mut successes = 0;
    for _ in 0..200 {
        if let DrawOutcome::Success { .. } =
            draw_reward(&mut registry, &mut pool, DungeonKind::Small, 2, 0.0, &mut rng)
        {
            successes += 1;
        }
    }

    let floor = registry.floor(DungeonKind::Small, 2).expect("small floor 2");
    assert_eq!(floor.completed, 200);
    assert!(successes > 0 && successes < 200);
    assert_eq!(pool.total(), successes);
    // Only successes decay the chance.
    assert!((floor.ss_chance - 0.98f64.powi(successes as i32)).abs() < 1e-9);

    for other in 0..DungeonKind::Small.floor_count() {
        if other != 2 {
            assert_eq!(registry.floor(DungeonKind::Small, other).map(|f| f.completed), Some(0));
        }
    }
}

#[test]
fn test_high_roll_fails_without_reward() {
    let mut registry = DungeonRegistry::new();
    let mut pool = SoulstonePool::new();
    registry.floor_mut(DungeonKind::Spire, 0).expect("spire floor 0").ss_chance = 0.5;

    let mut high_roll = StepRng::new(u64::MAX, 0);
    let outcome = draw_reward(&mut registry, &mut pool, DungeonKind::Spire, 0, 0.0, &mut high_roll);

    assert_eq!(outcome, DrawOutcome::Failure);
    let floor = registry.floor(DungeonKind::Spire, 0).expect("spire floor 0");
    assert_eq!(floor.ss_chance, 0.5);
    assert_eq!(floor.completed, 1);
    assert_eq!(floor.last_stat, None);
    assert_eq!(pool.total(), 0);
}

#[test]
fn test_out_of_range_floor_is_exhausted() {
    let mut registry = DungeonRegistry::new();
    let mut pool = SoulstonePool::new();
    let before = registry.clone();
    let mut rng = StepRng::new(0, 0);

    let floor = DungeonKind::Small.floor_count();
    let outcome = draw_reward(&mut registry, &mut pool, DungeonKind::Small, floor, 0.0, &mut rng);
    assert_eq!(outcome, DrawOutcome::Exhausted);
    assert_eq!(registry, before);
}

#[test]
fn test_small_dungeon_run_clears_every_floor_once() {
    let mut world = WorldState::fully_explored();
    let mut host = SandboxHost::veteran();
    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);

    let report = step(&SMALL_DUNGEON, &mut ctx, 100_000);
    assert_eq!(report.stopped, Some(StopReason::CannotStart));
    assert_eq!(report.completions, 6);
    assert_eq!(report.segments_completed, 42);

    for floor in ctx.world.dungeons.floors(DungeonKind::Small) {
        assert_eq!(floor.completed, 1);
        // The first draw on a fresh floor always succeeds.
        assert!((floor.ss_chance - 0.98).abs() < 1e-12);
        assert!(floor.last_stat.is_some());
    }
    assert_eq!(ctx.world.soulstones.total(), 6);
    assert_eq!(
        ctx.world.action(0, "SDungeon").map(|s| s.label.as_str()),
        Some("Floor Complete")
    );
    drop(ctx);

    let draws = host
        .events
        .iter()
        .filter(|event| **event == ViewEvent::SoulstonesChanged)
        .count();
    assert_eq!(draws, 6);
    assert!(host.stories.contains("clearSDungeon"));
}

#[test]
fn test_dungeon_runs_are_seed_deterministic() {
    let run = |seed: u64| {
        let mut world = WorldState::fully_explored();
        let mut host = SandboxHost::veteran();
        let config = EngineConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);
        step(&SMALL_DUNGEON, &mut ctx, 100_000);
        world.soulstones
    };
    assert_eq!(run(5), run(5));
}

#[test]
fn test_spire_respects_aspirant_cap() {
    let mut world = WorldState::fully_explored();
    let mut host = SandboxHost::veteran().with_combat(1e12, 1e12);
    let config = EngineConfig::default().with_cap(Buff::Aspirant, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);

    let report = step(&THE_SPIRE, &mut ctx, 200);
    assert!(report.completions > 1);
    assert_eq!(ctx.world.buffs.level(Buff::Aspirant), 1);
    drop(ctx);

    let raises = host
        .events
        .iter()
        .filter(|event| **event == ViewEvent::BuffChanged(Buff::Aspirant))
        .count();
    assert_eq!(raises, 1);
}

#[test]
fn test_floor_cost_rounds_after_scaling() {
    let mut world = WorldState::fully_explored();
    let mut host = SandboxHost::veteran();
    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let ctx = TickContext::new(&mut world, &mut host, &config, &mut rng);

    // Floor six: 3^5 * 500k = 121.5M, three significant digits.
    assert_eq!(preview_loop_cost(&LARGE_DUNGEON, &ctx, 35), Some(122_000_000.0));
    assert_eq!(preview_loop_cost(&SMALL_DUNGEON, &ctx, 0), Some(15_000.0));
}
