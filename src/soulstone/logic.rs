use super::types::{SacrificeReceipt, SacrificeTerms, SoulstonePool};
use crate::buffs::BuffLevels;
use crate::core::config::BuffCaps;
use crate::core::constants::{SACRIFICE_OTHER_STATS, SACRIFICE_SHARES};
use crate::stats::Stat;

/// Soulstones each non-favored stat pays for a loop priced at `loops`.
pub fn required_per_stat(loops: u64, scaling: u64, discount: f64) -> u64 {
    let total = (loops * scaling) as f64;
    (total / SACRIFICE_SHARES as f64 / (1.0 + discount)).floor() as u64
}

/// Soulstones the favored stat pays: the full price minus what the other
/// eight stats cover.
pub fn favored_share(loops: u64, scaling: u64, discount: f64) -> u64 {
    let others = required_per_stat(loops, scaling, discount) * SACRIFICE_OTHER_STATS;
    (loops * scaling).saturating_sub(others)
}

/// Stat with the largest bank; the earliest stat wins ties.
pub fn favored_stat(pool: &SoulstonePool) -> Stat {
    let mut favored = Stat::ALL[0];
    let mut best = pool.amount(favored);
    for stat in Stat::ALL.into_iter().skip(1) {
        let amount = pool.amount(stat);
        if amount > best {
            favored = stat;
            best = amount;
        }
    }
    favored
}

/// Whether the pool can pay for the next loop (`terms.loops + 1`) and the
/// buff is still below its configured cap.
pub fn can_sacrifice(
    pool: &SoulstonePool,
    buffs: &BuffLevels,
    caps: &BuffCaps,
    terms: &SacrificeTerms,
) -> bool {
    if !buffs.below_cap(terms.buff, caps) {
        return false;
    }
    let next = terms.loops + 1;
    let required = required_per_stat(next, terms.scaling, terms.discount);
    let favored = favored_stat(pool);

    let others_ok = Stat::ALL
        .into_iter()
        .filter(|&s| s != favored)
        .all(|s| pool.amount(s) >= required);

    others_ok && pool.amount(favored) >= favored_share(next, terms.scaling, terms.discount)
}

/// Settle a finished loop: raise the buff and debit the pool.
///
/// `terms.loops` is the completion count including the loop being settled.
/// The start gate is not re-checked; the pool only ever grows between the
/// gate and settlement, so an overdraft panics.
pub fn sacrifice(
    pool: &mut SoulstonePool,
    buffs: &mut BuffLevels,
    terms: &SacrificeTerms,
) -> SacrificeReceipt {
    let buff_level = buffs.increment(terms.buff);
    let per_other_stat = required_per_stat(terms.loops, terms.scaling, terms.discount);
    let favored = favored_stat(pool);
    let favored_paid = favored_share(terms.loops, terms.scaling, terms.discount);

    for stat in Stat::ALL {
        if stat == favored {
            pool.debit(stat, favored_paid);
        } else {
            pool.debit(stat, per_other_stat);
        }
    }

    tracing::info!(
        buff = terms.buff.name(),
        level = buff_level,
        favored = favored.name(),
        favored_paid,
        per_other_stat,
        "soulstones sacrificed"
    );

    SacrificeReceipt {
        buff: terms.buff,
        buff_level,
        favored,
        favored_paid,
        per_other_stat,
    }
}
