//! Main simulation runner.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::action::{step, ActionDefinition, StopReason, TickContext};
use crate::buffs::Buff;
use crate::catalog;
use crate::core::config::EngineConfig;
use crate::error::Result;
use crate::host::SandboxHost;
use crate::stats::Stat;
use crate::world::WorldState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Soulstones each stat starts with, enough to open a few sacrifices.
const STARTING_SOULSTONES: u64 = 1000;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, engine: &EngineConfig) -> Result<SimReport> {
    let def = catalog::lookup(&config.action)?;
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(def, config, engine, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} loops, {} segments, {} ticks, soulstones {:+}",
                run_idx + 1,
                config.num_runs,
                run.loops_completed,
                run.segments_completed,
                run.ticks_used,
                run.soulstone_delta
            );
        }
        all_runs.push(run);
    }

    Ok(SimReport::from_runs(def.name, all_runs))
}

fn simulate_single_run(
    def: &ActionDefinition,
    config: &SimConfig,
    engine: &EngineConfig,
    rng: &mut ChaCha8Rng,
) -> RunStats {
    let mut world = WorldState::fully_explored();
    for stat in Stat::ALL {
        world.soulstones.add(stat, STARTING_SOULSTONES);
    }
    let starting_soulstones = world.soulstones.total() as i64;
    let mut host = SandboxHost::veteran();
    let mut ctx = TickContext::new(&mut world, &mut host, engine, rng);

    let mut totals = crate::action::StepReport::default();
    let batch = config.batch_ticks.max(1);
    while totals.ticks_used < config.max_ticks_per_run {
        let budget = batch.min(config.max_ticks_per_run - totals.ticks_used);
        let report = step(def, &mut ctx, budget);
        let stalled = report.ticks_used == 0;
        totals.merge(report);
        if totals.stopped.is_some() || stalled {
            break;
        }
    }

    let state = def.state(ctx.world);
    RunStats {
        ticks_used: totals.ticks_used,
        loops_completed: totals.completions,
        segments_completed: totals.segments_completed,
        soulstone_delta: ctx.world.soulstones.total() as i64 - starting_soulstones,
        stopped: totals.stopped.map(|reason| match reason {
            StopReason::Locked => "locked",
            StopReason::CannotStart => "cannot start",
            StopReason::Misconfigured => "misconfigured",
        }),
        final_label: state.label,
        buff_levels: Buff::ALL
            .iter()
            .map(|&buff| (buff.name().to_string(), ctx.world.buffs.level(buff)))
            .collect(),
    }
}
