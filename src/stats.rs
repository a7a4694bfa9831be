//! The nine character stats that favor loop segments and bank soulstones.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    Dex,
    Str,
    Con,
    Spd,
    Per,
    Cha,
    Int,
    Luck,
    Soul,
}

impl Stat {
    /// All stats in canonical order. Tie-breaks ("first maximum wins")
    /// and uniform draws index into this list.
    pub const ALL: [Stat; 9] = [
        Stat::Dex,
        Stat::Str,
        Stat::Con,
        Stat::Spd,
        Stat::Per,
        Stat::Cha,
        Stat::Int,
        Stat::Luck,
        Stat::Soul,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Dex => "Dex",
            Stat::Str => "Str",
            Stat::Con => "Con",
            Stat::Spd => "Spd",
            Stat::Per => "Per",
            Stat::Cha => "Cha",
            Stat::Int => "Int",
            Stat::Luck => "Luck",
            Stat::Soul => "Soul",
        }
    }

    pub fn from_name(name: &str) -> Option<Stat> {
        Stat::ALL.iter().copied().find(|s| s.name() == name)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
