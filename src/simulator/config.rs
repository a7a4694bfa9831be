//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Tick budget per run
    pub max_ticks_per_run: u64,

    /// Catalog action to drive, by name or variable name
    pub action: String,

    /// Ticks handed to the engine per step
    pub batch_ticks: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_ticks_per_run: 100_000,
            action: "Small Dungeon".to_string(),
            batch_ticks: 100,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for dungeon reward rates
    pub fn dungeon_test(action: &str) -> Self {
        Self {
            num_runs: 50,
            action: action.to_string(),
            ..Default::default()
        }
    }

    /// Quick config for sacrifice pacing
    pub fn sacrifice_test() -> Self {
        Self {
            num_runs: 10,
            max_ticks_per_run: 1_000_000,
            action: "Great Feast".to_string(),
            batch_ticks: 1000,
            ..Default::default()
        }
    }
}
