//! Rank tracks, their name tables and bonus curves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Shape of a track's bonus multiplier as a function of the effective
/// segment counter `e`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BonusCurve {
    /// `1 + e / linear_div + e^2 / square_div`
    Quadratic { linear_div: f64, square_div: f64 },
    /// `1 + coefficient * e^exponent`
    Power { coefficient: f64, exponent: f64 },
}

impl BonusCurve {
    pub fn evaluate(&self, effective: u64) -> f64 {
        let e = effective as f64;
        match *self {
            BonusCurve::Quadratic {
                linear_div,
                square_div,
            } => 1.0 + e / linear_div + e * e / square_div,
            BonusCurve::Power {
                coefficient,
                exponent,
            } => 1.0 + coefficient * e.powf(exponent),
        }
    }
}

/// A finite, ordered list of tier names plus the apex that follows it.
#[derive(Debug)]
pub struct RankTable {
    pub names: &'static [&'static str],
    pub curve: BonusCurve,
    pub apex_name: &'static str,
    /// Flat multiplier once the table is exhausted. Deliberately below the
    /// curve's continuation so growth stops at the apex.
    pub apex_bonus: f64,
}

const GUILD_CURVE: BonusCurve = BonusCurve::Quadratic {
    linear_div: 20.0,
    square_div: 300.0,
};

const GUILD_NAMES: &[&str] = &[
    "F", "E", "D", "C", "B", "A", "S", "SS", "SSS", "SSSS", "U", "UU", "UUU",
];

pub static ADVENTURE_GUILD: RankTable = RankTable {
    names: GUILD_NAMES,
    curve: GUILD_CURVE,
    apex_name: "Godlike",
    apex_bonus: 10.0,
};

pub static CRAFTING_GUILD: RankTable = RankTable {
    names: GUILD_NAMES,
    curve: GUILD_CURVE,
    apex_name: "Godlike",
    apex_bonus: 10.0,
};

pub static WIZARD_COLLEGE: RankTable = RankTable {
    names: &[
        "Initiate",
        "Student",
        "Apprentice",
        "Disciple",
        "Spellcaster",
        "Magician",
        "Wizard",
        "Great Wizard",
        "Grand Wizard",
        "Archwizard",
        "Sage",
        "Great Sage",
        "Grand Sage",
        "Archsage",
        "Magus",
        "Great Magus",
        "Grand Magus",
        "Archmagus",
        "Member of The Council of the Seven",
        "Chair of The Council of the Seven",
    ],
    curve: BonusCurve::Power {
        coefficient: 0.02,
        exponent: 1.05,
    },
    apex_name: "Merlin",
    apex_bonus: 5.0,
};

pub static FROST_GIANTS: RankTable = RankTable {
    names: &[
        "Private",
        "Corporal",
        "Specialist",
        "Sergeant",
        "Staff Sergeant",
        "Sergeant First Class",
        "Master Sergeant",
        "Sergeant Major",
        "Warrant Officer",
        "Chief Warrant Officer",
        "Second Lieutenant",
        "First Lieutenant",
        "Major",
        "Lieutenant Colonel",
        "Colonel",
        "Lieutenant Commander",
        "Commander",
        "Captain",
        "Rear Admiral",
        "Vice Admiral",
    ],
    curve: BonusCurve::Power {
        coefficient: 0.05,
        exponent: 1.05,
    },
    apex_name: "Admiral",
    apex_bonus: 10.0,
};

pub static JUNGLE_MONSTERS: RankTable = RankTable {
    names: &[
        "Frog",
        "Toucan",
        "Sloth",
        "Pangolin",
        "Python",
        "Tapir",
        "Okapi",
        "Bonobo",
        "Jaguar",
        "Chimpanzee",
        "Anaconda",
        "Lion",
        "Tiger",
        "Bear",
        "Crocodile",
        "Rhino",
        "Gorilla",
        "Hippo",
        "Elephant",
    ],
    curve: BonusCurve::Power {
        coefficient: 0.05,
        exponent: 1.05,
    },
    apex_name: "Stampede",
    apex_bonus: 10.0,
};

/// Each rank-bearing mechanic owns one independent counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RankTrack {
    AdventureGuild,
    CraftingGuild,
    WizardCollege,
    FrostGiants,
    JungleMonsters,
}

impl RankTrack {
    pub const ALL: [RankTrack; 5] = [
        RankTrack::AdventureGuild,
        RankTrack::CraftingGuild,
        RankTrack::WizardCollege,
        RankTrack::FrostGiants,
        RankTrack::JungleMonsters,
    ];

    pub fn table(&self) -> &'static RankTable {
        match self {
            RankTrack::AdventureGuild => &ADVENTURE_GUILD,
            RankTrack::CraftingGuild => &CRAFTING_GUILD,
            RankTrack::WizardCollege => &WIZARD_COLLEGE,
            RankTrack::FrostGiants => &FROST_GIANTS,
            RankTrack::JungleMonsters => &JUNGLE_MONSTERS,
        }
    }
}

/// A resolved rank: tier, display name with sub-rank suffix, multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Rank {
    pub tier_index: u64,
    pub name: String,
    pub bonus: f64,
    pub is_apex: bool,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Mult x{}", self.name, self.bonus)
    }
}

/// Segment counters for every rank track. Counters never decrease.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankCounters {
    counters: BTreeMap<RankTrack, u64>,
}

impl RankCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, track: RankTrack) -> u64 {
        self.counters.get(&track).copied().unwrap_or(0)
    }

    /// Advance a track by one segment, returning the new counter.
    pub fn advance(&mut self, track: RankTrack) -> u64 {
        let counter = self.counters.entry(track).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Current rank of a track.
    pub fn rank(&self, track: RankTrack) -> Rank {
        super::logic::rank_for(track.table(), self.counter(track), None)
    }

    /// Rank preview for sub-rank `offset` of the current tier.
    pub fn rank_at(&self, track: RankTrack, offset: u64) -> Rank {
        super::logic::rank_for(track.table(), self.counter(track), Some(offset))
    }

    pub fn bonus(&self, track: RankTrack) -> f64 {
        self.rank(track).bonus
    }
}
