use crate::buffs::Buff;
use crate::stats::Stat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-stat soulstone banks. Only dungeon draws and sacrifices touch them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoulstonePool {
    banks: BTreeMap<Stat, u64>,
}

impl SoulstonePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_amounts(amounts: &[(Stat, u64)]) -> Self {
        let mut pool = Self::new();
        for &(stat, amount) in amounts {
            pool.add(stat, amount);
        }
        pool
    }

    pub fn amount(&self, stat: Stat) -> u64 {
        self.banks.get(&stat).copied().unwrap_or(0)
    }

    pub fn add(&mut self, stat: Stat, amount: u64) {
        *self.banks.entry(stat).or_insert(0) += amount;
    }

    /// Remove soulstones from a bank. Panics if the bank would go negative.
    pub fn debit(&mut self, stat: Stat, amount: u64) {
        let bank = self.banks.entry(stat).or_insert(0);
        assert!(
            *bank >= amount,
            "soulstone bank {} overdrawn: {} < {}",
            stat,
            bank,
            amount
        );
        *bank -= amount;
    }

    pub fn total(&self) -> u64 {
        self.banks.values().sum()
    }
}

/// Parameters of one sacrifice-for-buff loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SacrificeTerms {
    pub buff: Buff,
    /// Completed loops of the sacrificing action. The start gate prices the
    /// next loop (`loops + 1`); settlement prices the loop just finished.
    pub loops: u64,
    pub scaling: u64,
    /// Skill-derived discount, `>= 0`.
    pub discount: f64,
}

/// What a settled sacrifice removed from the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SacrificeReceipt {
    pub buff: Buff,
    pub buff_level: u32,
    pub favored: Stat,
    pub favored_paid: u64,
    pub per_other_stat: u64,
}

impl SacrificeReceipt {
    pub fn total_paid(&self) -> u64 {
        self.favored_paid + self.per_other_stat * crate::core::constants::SACRIFICE_OTHER_STATS
    }
}
