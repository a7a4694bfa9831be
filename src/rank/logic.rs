use super::types::{Rank, RankTable};
use crate::core::constants::{SUBRANKS_PER_TIER, SUBRANK_SUFFIXES};
use crate::core::math::precision3;

/// Counter value the bonus is evaluated at.
///
/// With a lookahead `offset` the counter is moved to sub-rank `offset` of
/// the current tier (offsets past 2 reach into later tiers).
pub fn effective_counter(counter: u64, offset: Option<u64>) -> u64 {
    match offset {
        Some(offset) => counter - counter % SUBRANKS_PER_TIER + offset,
        None => counter,
    }
}

/// Resolve a segment counter against a rank table.
///
/// The tier (and so the name) always comes from `counter`; the suffix and
/// bonus follow the lookahead `offset` when one is given. Past the end of
/// the table the apex name and flat apex bonus are returned.
pub fn rank_for(table: &RankTable, counter: u64, offset: Option<u64>) -> Rank {
    let tier_index = counter / SUBRANKS_PER_TIER;

    let Some(base) = table.names.get(tier_index as usize) else {
        return Rank {
            tier_index,
            name: table.apex_name.to_string(),
            bonus: table.apex_bonus,
            is_apex: true,
        };
    };

    let subrank = offset.unwrap_or(counter) % SUBRANKS_PER_TIER;
    let effective = effective_counter(counter, offset);

    Rank {
        tier_index,
        name: format!("{}{}", base, SUBRANK_SUFFIXES[subrank as usize]),
        bonus: precision3(table.curve.evaluate(effective)),
        is_apex: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::types::{RankTrack, ADVENTURE_GUILD, WIZARD_COLLEGE};

    #[test]
    fn test_tier_and_suffix_cycle() {
        for c in 0..39u64 {
            let rank = rank_for(&ADVENTURE_GUILD, c, None);
            assert_eq!(rank.tier_index, c / 3);
            let expected_suffix = ["-", "", "+"][(c % 3) as usize];
            let base = ADVENTURE_GUILD.names[(c / 3) as usize];
            assert_eq!(rank.name, format!("{}{}", base, expected_suffix));
        }
    }

    #[test]
    fn test_first_ranks() {
        assert_eq!(rank_for(&ADVENTURE_GUILD, 0, None).name, "F-");
        assert_eq!(rank_for(&ADVENTURE_GUILD, 1, None).name, "F");
        assert_eq!(rank_for(&ADVENTURE_GUILD, 2, None).name, "F+");
        assert_eq!(rank_for(&ADVENTURE_GUILD, 3, None).name, "E-");
        assert_eq!(rank_for(&ADVENTURE_GUILD, 0, None).bonus, 1.0);
    }

    #[test]
    fn test_guild_bonus_polynomial() {
        // 1 + 6/20 + 36/300 = 1.42
        assert_eq!(rank_for(&ADVENTURE_GUILD, 6, None).bonus, 1.42);
        // 1 + 38/20 + 1444/300 = 7.713.. -> 7.71
        assert_eq!(rank_for(&ADVENTURE_GUILD, 38, None).bonus, 7.71);
    }

    #[test]
    fn test_apex_at_thirty_nine() {
        let rank = rank_for(&ADVENTURE_GUILD, 39, None);
        assert!(rank.is_apex);
        assert_eq!(rank.name, "Godlike");
        assert_eq!(rank.bonus, 10.0);
        assert_eq!(rank.tier_index, 13);
    }

    #[test]
    fn test_apex_bonus_is_flat() {
        for c in [39u64, 40, 100, 10_000] {
            let rank = rank_for(&ADVENTURE_GUILD, c, None);
            assert_eq!(rank.bonus, ADVENTURE_GUILD.apex_bonus);
            assert_eq!(rank.name, "Godlike");
        }
        // The polynomial would keep climbing; the apex does not.
        assert!(ADVENTURE_GUILD.curve.evaluate(40) > ADVENTURE_GUILD.apex_bonus);
    }

    #[test]
    fn test_bonus_non_decreasing_until_apex() {
        for track in RankTrack::ALL {
            let table = track.table();
            let width = table.names.len() as u64 * 3;
            let mut previous = 0.0;
            for c in 0..width {
                let bonus = rank_for(table, c, None).bonus;
                assert!(
                    bonus >= previous,
                    "{:?}: bonus dropped at {} ({} < {})",
                    track,
                    c,
                    bonus,
                    previous
                );
                previous = bonus;
            }
            for c in width..width + 10 {
                assert_eq!(rank_for(table, c, None).bonus, table.apex_bonus);
            }
        }
    }

    #[test]
    fn test_lookahead_does_not_depend_on_current_subrank() {
        // Counter 4 is "E"; previewing sub-rank 2 evaluates at counter 5.
        let preview = rank_for(&ADVENTURE_GUILD, 4, Some(2));
        assert_eq!(preview.name, "E+");
        assert_eq!(preview.bonus, rank_for(&ADVENTURE_GUILD, 5, None).bonus);

        // Previewing sub-rank 0 evaluates at the start of the tier.
        let preview = rank_for(&ADVENTURE_GUILD, 5, Some(0));
        assert_eq!(preview.name, "E-");
        assert_eq!(preview.bonus, rank_for(&ADVENTURE_GUILD, 3, None).bonus);
    }

    #[test]
    fn test_effective_counter() {
        assert_eq!(effective_counter(7, None), 7);
        assert_eq!(effective_counter(7, Some(0)), 6);
        assert_eq!(effective_counter(7, Some(2)), 8);
        assert_eq!(effective_counter(0, Some(1)), 1);
    }

    #[test]
    fn test_wizard_college_power_curve() {
        let rank = rank_for(&WIZARD_COLLEGE, 10, None);
        assert_eq!(rank.name, "Student");
        let expected = precision3(1.0 + 0.02 * 10f64.powf(1.05));
        assert_eq!(rank.bonus, expected);

        let apex = rank_for(&WIZARD_COLLEGE, 60, None);
        assert_eq!(apex.name, "Merlin");
        assert_eq!(apex.bonus, 5.0);
    }

    #[test]
    fn test_display_includes_multiplier() {
        let rank = rank_for(&ADVENTURE_GUILD, 6, None);
        assert_eq!(rank.to_string(), "D-, Mult x1.42");
    }
}
