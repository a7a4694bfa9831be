use super::{Host, ViewEvent};
use crate::stats::Stat;
use std::collections::{BTreeSet, HashMap, HashSet};

/// In-memory host used by tests and the simulator.
///
/// Levels are fixed unless set explicitly; granted experience is only
/// recorded, never converted into levels.
#[derive(Debug, Clone, Default)]
pub struct SandboxHost {
    pub skills: HashMap<String, f64>,
    pub stats: HashMap<Stat, f64>,
    pub talents: HashMap<Stat, f64>,
    pub resources: HashMap<String, f64>,
    pub self_combat: f64,
    pub team_combat: f64,
    pub stories: HashSet<String>,
    pub towns: BTreeSet<usize>,
    pub global_story: u32,
    pub skill_exp: HashMap<String, f64>,
    pub stat_exp: HashMap<Stat, f64>,
    pub events: Vec<ViewEvent>,
}

impl SandboxHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A late-game character: every gate in the catalog that depends on
    /// skills, combat or stats is open.
    pub fn veteran() -> Self {
        let mut host = Self::new()
            .with_combat(5_000.0, 20_000.0)
            .with_resource("reputation", 200.0)
            .with_resource("gold", 1_000_000.0)
            .with_resource("favors", 1_000.0)
            .with_resource("teamMembers", 5.0)
            .with_resource("pegasus", 1.0)
            .with_resource("pickaxe", 1.0);
        for skill in [
            "Magic",
            "Combat",
            "Practical",
            "Dark",
            "Crafting",
            "Restoration",
            "Divine",
            "Commune",
            "Gluttony",
            "Chronomancy",
            "Pyromancy",
            "Spatiomancy",
        ] {
            host.skills.insert(skill.to_string(), 500.0);
        }
        for stat in Stat::ALL {
            host.stats.insert(stat, 100.0);
            host.talents.insert(stat, 100.0);
        }
        host
    }

    pub fn with_skill(mut self, skill: &str, level: f64) -> Self {
        self.skills.insert(skill.to_string(), level);
        self
    }

    pub fn with_stat(mut self, stat: Stat, level: f64) -> Self {
        self.stats.insert(stat, level);
        self
    }

    pub fn with_talent(mut self, stat: Stat, level: f64) -> Self {
        self.talents.insert(stat, level);
        self
    }

    pub fn with_resource(mut self, name: &str, amount: f64) -> Self {
        self.resources.insert(name.to_string(), amount);
        self
    }

    pub fn with_combat(mut self, self_combat: f64, team_combat: f64) -> Self {
        self.self_combat = self_combat;
        self.team_combat = team_combat;
        self
    }

    pub fn skill_exp(&self, skill: &str) -> f64 {
        self.skill_exp.get(skill).copied().unwrap_or(0.0)
    }

    pub fn stat_exp(&self, stat: Stat) -> f64 {
        self.stat_exp.get(&stat).copied().unwrap_or(0.0)
    }
}

impl Host for SandboxHost {
    fn skill_level(&self, skill: &str) -> f64 {
        self.skills.get(skill).copied().unwrap_or(0.0)
    }

    fn stat_level(&self, stat: Stat) -> f64 {
        self.stats.get(&stat).copied().unwrap_or(0.0)
    }

    fn talent(&self, stat: Stat) -> f64 {
        self.talents.get(&stat).copied().unwrap_or(0.0)
    }

    fn set_talent(&mut self, stat: Stat, level: f64) {
        self.talents.insert(stat, level);
    }

    fn self_combat(&self) -> f64 {
        self.self_combat
    }

    fn team_combat(&self) -> f64 {
        self.team_combat
    }

    fn resource(&self, name: &str) -> f64 {
        self.resources.get(name).copied().unwrap_or(0.0)
    }

    fn add_resource(&mut self, name: &str, amount: f64) {
        *self.resources.entry(name.to_string()).or_insert(0.0) += amount;
    }

    fn reset_resource(&mut self, name: &str) {
        self.resources.remove(name);
    }

    fn grant_skill_exp(&mut self, skill: &str, amount: f64) {
        *self.skill_exp.entry(skill.to_string()).or_insert(0.0) += amount;
    }

    fn grant_stat_exp(&mut self, stat: Stat, amount: f64) {
        *self.stat_exp.entry(stat).or_insert(0.0) += amount;
    }

    fn unlock_story(&mut self, flag: &str) {
        self.stories.insert(flag.to_string());
    }

    fn has_story(&self, flag: &str) -> bool {
        self.stories.contains(flag)
    }

    fn unlock_town(&mut self, town: usize) {
        self.towns.insert(town);
    }

    fn unlock_global_story(&mut self, story: u32) {
        self.global_story = self.global_story.max(story);
    }

    fn global_story(&self) -> u32 {
        self.global_story
    }

    fn notify(&mut self, event: ViewEvent) {
        self.events.push(event);
    }
}
