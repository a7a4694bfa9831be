// Loop arithmetic
pub const LOOP_EPSILON: f64 = 0.0001;

// Rank curves
pub const SUBRANKS_PER_TIER: u64 = 3;
pub const SUBRANK_SUFFIXES: [&str; 3] = ["-", "", "+"];

// Dungeons
pub const SOULSTONE_CHANCE_DECAY: f64 = 0.98;
pub const STARTING_SOULSTONE_CHANCE: f64 = 1.0;
pub const SMALL_DUNGEON_FLOORS: usize = 6;
pub const LARGE_DUNGEON_FLOORS: usize = 9;
pub const SPIRE_FLOORS: usize = 20;
pub const DIVINE_REWARD_DIVISOR: f64 = 60.0;
pub const DIVINE_REWARD_EXPONENT: f64 = 0.25;

// Soulstone sacrifice: one favored stat plus eight others
pub const SACRIFICE_SHARES: u64 = 9;
pub const SACRIFICE_OTHER_STATS: u64 = 8;

// Progress actions (level n needs 100 * n(n+1)/2 exp)
pub const PROGRESS_EXP_PER_LEVEL: f64 = 100.0;
pub const PROGRESS_EXP_CAP: f64 = 505_000.0;

// Tick progress scaling
pub const STAT_LEVEL_DIVISOR: f64 = 100.0;
pub const COMPLETIONS_DIVISOR: f64 = 100.0;
pub const GUILD_COMPLETIONS_DIVISOR: f64 = 1000.0;
pub const FLOOR_COMPLETIONS_DIVISOR: f64 = 200.0;

// World layout
pub const TOWN_COUNT: usize = 9;
