//! Engine configuration: the externally supplied buff caps.
//!
//! Caps are read-only while ticks are processed and are consulted only
//! when a capped loop is about to start. The config is plain JSON so a
//! front end can edit it between sessions.

use crate::buffs::Buff;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Per-buff level caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuffCaps {
    caps: BTreeMap<Buff, u32>,
}

impl Default for BuffCaps {
    fn default() -> Self {
        let caps = BTreeMap::from([
            (Buff::Ritual, 666),
            (Buff::Imbuement, 500),
            (Buff::Imbuement2, 500),
            (Buff::Imbuement3, 7),
            (Buff::Feast, 100),
            (Buff::Aspirant, 20),
        ]);
        Self { caps }
    }
}

impl BuffCaps {
    /// Configured cap; buffs missing from the config are capped at zero.
    pub fn cap(&self, buff: Buff) -> u32 {
        self.caps.get(&buff).copied().unwrap_or(0)
    }

    pub fn set_cap(&mut self, buff: Buff, cap: u32) {
        self.caps.insert(buff, cap);
    }

    pub fn with_cap(mut self, buff: Buff, cap: u32) -> Self {
        self.set_cap(buff, cap);
        self
    }

    /// Set a cap from a `Name=value` pair such as `Ritual=25`.
    pub fn apply_override(&mut self, entry: &str) -> Result<()> {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| EngineError::UnknownBuff(entry.to_string()))?;
        let buff =
            Buff::from_name(name.trim()).ok_or_else(|| EngineError::UnknownBuff(name.to_string()))?;
        let cap = value
            .trim()
            .parse::<u32>()
            .map_err(|_| EngineError::UnknownBuff(entry.to_string()))?;
        self.set_cap(buff, cap);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub buff_caps: BuffCaps,
}

impl EngineConfig {
    pub fn with_cap(mut self, buff: Buff, cap: u32) -> Self {
        self.buff_caps.set_cap(buff, cap);
        self
    }

    /// Config with every cap at zero: no capped loop may start.
    pub fn locked() -> Self {
        let mut buff_caps = BuffCaps::default();
        for buff in Buff::ALL {
            buff_caps.set_cap(buff, 0);
        }
        Self { buff_caps }
    }

    /// Config with effectively unlimited caps, for balance runs.
    pub fn uncapped() -> Self {
        let mut buff_caps = BuffCaps::default();
        for buff in Buff::ALL {
            buff_caps.set_cap(buff, u32::MAX);
        }
        Self { buff_caps }
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from `path`, falling back to defaults if the file is missing.
    pub fn load_json_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_json(path)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
