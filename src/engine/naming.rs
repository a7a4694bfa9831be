//! Part and segment labels for multipart actions.

use crate::action::types::{ActionDefinition, MultipartSpec, PartNaming};
use crate::core::math::{capitalize, number_to_words};
use crate::rank::Rank;
use crate::world::WorldState;

fn words(n: u64) -> String {
    capitalize(&number_to_words(n))
}

fn rank_label(prefix: Option<&str>, rank: &Rank) -> String {
    match prefix {
        Some(prefix) => format!("{} {}", prefix, rank),
        None => rank.to_string(),
    }
}

/// Label of the part the action is currently on.
pub fn part_name(def: &ActionDefinition, spec: &MultipartSpec, world: &WorldState) -> String {
    let counter = world.loop_counter(def.town, def.var_name);
    let loop_index = counter / spec.segment_count().max(1);

    match spec.naming {
        PartNaming::Ordinal { label } => format!("{} {}", label, words(loop_index + 1)),
        PartNaming::Dungeon { dungeon, label } => {
            let floor = loop_index + 1;
            if floor as usize <= dungeon.floor_count() {
                format!("{} {}", label, words(floor))
            } else {
                format!("{} Complete", label)
            }
        }
        PartNaming::Rank { track, prefix } => rank_label(prefix, &world.ranks.rank(track)),
        PartNaming::Fixed(text) => text.to_string(),
    }
}

/// Label of segment `segment` within the current loop. Rank tracks preview
/// the rank that segment will reach.
pub fn segment_name(
    def: &ActionDefinition,
    spec: &MultipartSpec,
    world: &WorldState,
    segment: u64,
) -> String {
    match spec.naming {
        PartNaming::Rank { track, prefix } => {
            rank_label(prefix, &world.ranks.rank_at(track, segment % 3))
        }
        _ => {
            let part = part_name(def, spec, world);
            match spec.loop_stats.len() as u64 {
                0 => format!("{}: {}", part, words(segment + 1)),
                len => {
                    let stat = spec.loop_stats[(segment % len) as usize];
                    format!("{}: {} ({})", part, words(segment + 1), stat)
                }
            }
        }
    }
}
