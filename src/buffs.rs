//! Permanent buff levels raised by loop completions.

use crate::core::config::BuffCaps;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Buff {
    Ritual,
    Imbuement,
    Imbuement2,
    Imbuement3,
    Feast,
    Aspirant,
}

impl Buff {
    pub const ALL: [Buff; 6] = [
        Buff::Ritual,
        Buff::Imbuement,
        Buff::Imbuement2,
        Buff::Imbuement3,
        Buff::Feast,
        Buff::Aspirant,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Buff::Ritual => "Ritual",
            Buff::Imbuement => "Imbuement",
            Buff::Imbuement2 => "Imbuement2",
            Buff::Imbuement3 => "Imbuement3",
            Buff::Feast => "Feast",
            Buff::Aspirant => "Aspirant",
        }
    }

    pub fn from_name(name: &str) -> Option<Buff> {
        Buff::ALL.iter().copied().find(|b| b.name() == name)
    }
}

impl fmt::Display for Buff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named buff counters. Levels only ever go up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffLevels {
    levels: BTreeMap<Buff, u32>,
}

impl BuffLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, buff: Buff) -> u32 {
        self.levels.get(&buff).copied().unwrap_or(0)
    }

    /// Raise a buff by one level, returning the new level.
    pub fn increment(&mut self, buff: Buff) -> u32 {
        let level = self.levels.entry(buff).or_insert(0);
        *level += 1;
        tracing::info!(buff = buff.name(), level = *level, "buff level raised");
        *level
    }

    /// True when the buff may be raised again under the configured cap.
    /// Only consulted when a loop starts.
    pub fn below_cap(&self, buff: Buff, caps: &BuffCaps) -> bool {
        self.level(buff) < caps.cap(buff)
    }
}
