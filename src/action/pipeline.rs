//! The shared eligibility pipeline: unlocked → can-start → cost → finish.

use super::state::{ActionState, Phase};
use super::types::{
    ActionDefinition, Archetype, Eligibility, SkillExp, StepReport, StopReason, TickContext,
};
use crate::engine;

/// Display-level summary of whether an action could run right now.
/// Visibility never blocks an unlocked action.
pub fn eligibility(def: &ActionDefinition, ctx: &TickContext<'_>) -> Eligibility {
    let state = def.state(ctx.world);
    if !(def.unlocked)(ctx, &state) {
        if (def.visible)(ctx, &state) {
            Eligibility::Locked
        } else {
            Eligibility::Hidden
        }
    } else if (def.can_start)(ctx, &state) || state.phase == Phase::Advancing {
        Eligibility::Ready
    } else {
        Eligibility::Blocked
    }
}

/// Spend `ticks` on an action.
///
/// Locked actions do nothing. Multipart actions are handed to the loop
/// engine; the rest accrue one unit of progress per tick toward their
/// mana cost.
pub fn step(def: &ActionDefinition, ctx: &mut TickContext<'_>, ticks: u64) -> StepReport {
    let snapshot = def.state(ctx.world);
    if !(def.unlocked)(ctx, &snapshot) {
        tracing::debug!(action = def.name, "action is locked");
        return StepReport {
            stopped: Some(StopReason::Locked),
            ..StepReport::default()
        };
    }

    match &def.archetype {
        Archetype::Multipart(spec) => engine::advance(def, spec, ctx, ticks),
        _ => run_units(def, ctx, ticks),
    }
}

fn run_units(def: &ActionDefinition, ctx: &mut TickContext<'_>, ticks: u64) -> StepReport {
    let mut report = StepReport::default();

    for _ in 0..ticks {
        if ctx.world.action_mut(def.town, def.var_name).phase == Phase::Idle {
            let snapshot = def.state(ctx.world);
            if !(def.can_start)(ctx, &snapshot) {
                tracing::debug!(action = def.name, "cannot start");
                report.stopped = Some(StopReason::CannotStart);
                break;
            }
            if let Some(cost) = def.cost {
                cost(ctx, &snapshot);
            }
            ctx.world.action_mut(def.town, def.var_name).phase = Phase::Advancing;
        }

        let needed = (def.mana_cost)(ctx).max(1.0);
        grant_stat_exp(def, ctx);
        report.ticks_used += 1;

        let state = ctx.world.action_mut(def.town, def.var_name);
        state.progress += 1.0;
        if state.progress < needed {
            continue;
        }
        state.progress -= needed;
        state.completions += 1;

        complete_unit(def, ctx);
        report.completions += 1;
    }

    report
}

fn complete_unit(def: &ActionDefinition, ctx: &mut TickContext<'_>) {
    match def.archetype {
        Archetype::Progress { exp_gain } => {
            let gain = exp_gain(ctx);
            ctx.world
                .action_mut(def.town, def.var_name)
                .finish_progress(gain);
        }
        Archetype::Limited {
            reward_ratio,
            total,
            reward,
        } => {
            let total = total(ctx);
            let mut limited =
                std::mem::take(&mut ctx.world.action_mut(def.town, def.var_name).limited);
            limited.total = total;
            limited.finish_regular(reward_ratio, || reward(ctx));
            ctx.world.action_mut(def.town, def.var_name).limited = limited;
        }
        Archetype::Normal | Archetype::Multipart(_) => {}
    }

    let snapshot: ActionState = def.state(ctx.world);
    if let Some(finish) = def.finish {
        finish(ctx, &snapshot);
    }
    grant_skill_exp(def, ctx);
    ctx.world.action_mut(def.town, def.var_name).phase = Phase::Idle;

    tracing::debug!(
        action = def.name,
        completions = snapshot.completions,
        "unit of work complete"
    );
}

/// Stat experience for one tick: each weighted stat gets `weight * exp_mult`.
pub(crate) fn grant_stat_exp(def: &ActionDefinition, ctx: &mut TickContext<'_>) {
    for &(stat, weight) in def.stats {
        ctx.host.grant_stat_exp(stat, weight * def.exp_mult);
    }
}

/// Skill experience for one completion, scaled by `exp_mult`.
pub(crate) fn grant_skill_exp(def: &ActionDefinition, ctx: &mut TickContext<'_>) {
    for &(skill, amount) in def.skills {
        let base = match amount {
            SkillExp::Flat(value) => value,
            SkillExp::Scaled(scaled) => scaled(ctx),
        };
        ctx.host.grant_skill_exp(skill, base * def.exp_mult);
    }
}
