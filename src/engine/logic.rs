use super::naming::part_name;
use crate::action::pipeline::{grant_skill_exp, grant_stat_exp};
use crate::action::state::{ActionState, Phase};
use crate::action::types::{
    ActionDefinition, MultipartSpec, SegmentCursor, StepReport, StopReason, TickContext,
};
use crate::core::math::floor_div_eps;
use crate::host::ViewEvent;

/// Cursor for the segment `offset` places past the action's current one.
/// `None` when the spec has no segments or no loop stats.
pub fn segment_cursor(spec: &MultipartSpec, state: &ActionState, offset: u64) -> Option<SegmentCursor> {
    if !spec.is_well_formed() {
        return None;
    }
    let segments = spec.segment_count();
    let loop_counter = state.loop_counter + offset;
    let stat_index = (loop_counter % spec.loop_stats.len() as u64) as usize;

    Some(SegmentCursor {
        loop_counter,
        base_counter: state.loop_counter,
        offset,
        loop_index: floor_div_eps(loop_counter as f64, segments as f64),
        segment: loop_counter % segments,
        completions: state.completions,
        favored: spec.loop_stats[stat_index],
    })
}

/// Per-tick progress the action would make `offset` segments from now.
/// Does not mutate anything.
pub fn preview_tick_progress(def: &ActionDefinition, ctx: &TickContext<'_>, offset: u64) -> Option<f64> {
    let spec = def.multipart()?;
    let cursor = segment_cursor(spec, &def.state(ctx.world), offset)?;
    Some((spec.tick_progress)(ctx, &cursor))
}

/// Cost of the segment `offset` places past the current one.
pub fn preview_loop_cost(def: &ActionDefinition, ctx: &TickContext<'_>, offset: u64) -> Option<f64> {
    let spec = def.multipart()?;
    let cursor = segment_cursor(spec, &def.state(ctx.world), offset)?;
    Some((spec.loop_cost)(ctx, &cursor))
}

fn relabel(def: &ActionDefinition, spec: &MultipartSpec, ctx: &mut TickContext<'_>) {
    let label = part_name(def, spec, ctx.world);
    let state = ctx.world.action_mut(def.town, def.var_name);
    if state.label != label {
        state.label = label.clone();
        ctx.host.notify(ViewEvent::PartRenamed {
            action: def.name,
            label,
        });
    }
}

/// Cursor and cost of the segment the action is on. `None` (logged) when
/// the cost is not a positive finite number.
fn priced_segment(
    def: &ActionDefinition,
    spec: &MultipartSpec,
    ctx: &TickContext<'_>,
) -> Option<(SegmentCursor, f64)> {
    let cursor = segment_cursor(spec, &def.state(ctx.world), 0)?;
    let needed = (spec.loop_cost)(ctx, &cursor);
    if needed > 0.0 && needed.is_finite() {
        Some((cursor, needed))
    } else {
        tracing::warn!(
            action = def.name,
            loop_counter = cursor.loop_counter,
            cost = needed,
            "segment cost is not positive, refusing to advance"
        );
        None
    }
}

/// Idle to advancing: checks `can_start`, pays the start cost.
fn try_start(def: &ActionDefinition, spec: &MultipartSpec, ctx: &mut TickContext<'_>) -> bool {
    let snapshot = def.state(ctx.world);
    if !(def.can_start)(ctx, &snapshot) {
        tracing::debug!(action = def.name, "cannot start next loop");
        return false;
    }
    if let Some(cost) = def.cost {
        cost(ctx, &snapshot);
    }
    ctx.world.action_mut(def.town, def.var_name).phase = Phase::Advancing;
    relabel(def, spec, ctx);
    true
}

/// Book one finished segment, and the loop if it was the last one.
/// Returns true when a loop completed.
fn complete_segment(
    def: &ActionDefinition,
    spec: &MultipartSpec,
    ctx: &mut TickContext<'_>,
    needed: f64,
    report: &mut StepReport,
) -> bool {
    let state = ctx.world.action_mut(def.town, def.var_name);
    state.progress -= needed;
    state.loop_counter += 1;
    let loop_counter = state.loop_counter;
    let snapshot = state.clone();
    report.segments_completed += 1;

    tracing::debug!(
        action = def.name,
        loop_counter,
        carried = snapshot.progress,
        "segment complete"
    );
    if let Some(hook) = spec.segment_finished {
        hook(ctx, &snapshot);
    }
    ctx.host.notify(ViewEvent::SegmentCompleted {
        action: def.name,
        loop_counter,
    });

    if loop_counter % spec.segment_count() != 0 {
        return false;
    }

    let state = ctx.world.action_mut(def.town, def.var_name);
    state.completions += 1;
    let snapshot = state.clone();

    if let Some(hook) = spec.loops_finished {
        hook(ctx, &snapshot);
    }
    if let Some(finish) = def.finish {
        finish(ctx, &snapshot);
    }
    grant_skill_exp(def, ctx);
    ctx.world.action_mut(def.town, def.var_name).phase = Phase::Idle;
    report.completions += 1;

    tracing::debug!(
        action = def.name,
        completions = snapshot.completions,
        "loop complete"
    );
    ctx.host.notify(ViewEvent::LoopCompleted {
        action: def.name,
        completions: snapshot.completions,
    });
    relabel(def, spec, ctx);
    true
}

/// Resolve `ticks` ticks of a multipart action, one at a time.
///
/// Each tick adds the current segment's rate to the accumulator, then
/// completes segments in order for as long as the accumulator covers the
/// next segment's cost. A loop completes when the counter reaches a
/// multiple of the segment count. Leftover progress only flows into the
/// next loop once `can_start` passes again; otherwise it stays on the
/// action and the step stops.
///
/// Actions with no segments, no loop stats, or a non-positive cost never
/// start and report [`StopReason::Misconfigured`].
pub fn advance(
    def: &ActionDefinition,
    spec: &MultipartSpec,
    ctx: &mut TickContext<'_>,
    ticks: u64,
) -> StepReport {
    let mut report = StepReport::default();
    if !spec.is_well_formed() {
        tracing::warn!(
            action = def.name,
            segments = spec.segment_count(),
            loop_stats = spec.loop_stats.len(),
            "multipart action has no segments to advance"
        );
        report.stopped = Some(StopReason::Misconfigured);
        return report;
    }

    'ticks: for _ in 0..ticks {
        let Some((cursor, _)) = priced_segment(def, spec, ctx) else {
            report.stopped = Some(StopReason::Misconfigured);
            break;
        };
        if ctx.world.action_mut(def.town, def.var_name).phase == Phase::Idle
            && !try_start(def, spec, ctx)
        {
            report.stopped = Some(StopReason::CannotStart);
            break;
        }

        let rate = (spec.tick_progress)(ctx, &cursor);
        if !rate.is_finite() {
            tracing::warn!(action = def.name, rate, "tick progress is not finite");
            report.stopped = Some(StopReason::Misconfigured);
            break;
        }
        grant_stat_exp(def, ctx);
        report.ticks_used += 1;
        ctx.world.action_mut(def.town, def.var_name).progress += rate;

        loop {
            let Some((_, needed)) = priced_segment(def, spec, ctx) else {
                report.stopped = Some(StopReason::Misconfigured);
                break 'ticks;
            };
            if ctx.world.action_mut(def.town, def.var_name).progress < needed {
                break;
            }
            if !complete_segment(def, spec, ctx, needed, &mut report) {
                continue;
            }
            if ctx.world.action_mut(def.town, def.var_name).progress <= 0.0 {
                break;
            }
            if !try_start(def, spec, ctx) {
                report.stopped = Some(StopReason::CannotStart);
                break 'ticks;
            }
        }

        relabel(def, spec, ctx);
    }

    report
}
