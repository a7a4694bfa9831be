//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a single run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub ticks_used: u64,
    pub loops_completed: u64,
    pub segments_completed: u64,
    /// Net soulstone change: dungeon and mine income minus sacrifices.
    pub soulstone_delta: i64,
    pub stopped: Option<&'static str>,
    pub final_label: String,
    pub buff_levels: BTreeMap<String, u32>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub action: &'static str,
    pub num_runs: u32,
    pub runs_stopped: u32,

    pub avg_ticks_used: f64,
    pub avg_loops: f64,
    pub avg_segments: f64,
    pub avg_soulstone_delta: f64,
    pub max_buff_levels: BTreeMap<String, u32>,

    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(action: &'static str, runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let denom = num_runs.max(1) as f64;
        let average = |f: fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / denom;

        let mut max_buff_levels = BTreeMap::new();
        for run in &runs {
            for (buff, &level) in &run.buff_levels {
                let best = max_buff_levels.entry(buff.clone()).or_insert(0);
                *best = (*best).max(level);
            }
        }

        Self {
            action,
            num_runs,
            runs_stopped: runs.iter().filter(|r| r.stopped.is_some()).count() as u32,
            avg_ticks_used: average(|r| r.ticks_used as f64),
            avg_loops: average(|r| r.loops_completed as f64),
            avg_segments: average(|r| r.segments_completed as f64),
            avg_soulstone_delta: average(|r| r.soulstone_delta as f64),
            max_buff_levels,
            run_stats: runs,
        }
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!("                    {}\n", self.action));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} stopped early\n\n",
            self.num_runs, self.runs_stopped
        ));

        report.push_str("── LOOPS ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Ticks Used:      {:.0}\n", self.avg_ticks_used));
        report.push_str(&format!("  Avg Loops:           {:.2}\n", self.avg_loops));
        report.push_str(&format!("  Avg Segments:        {:.2}\n", self.avg_segments));
        report.push_str(&format!(
            "  Avg Soulstone Delta: {:+.1}\n\n",
            self.avg_soulstone_delta
        ));

        report.push_str("── BUFFS (max reached) ──────────────────────────────────────────\n");
        for (buff, level) in &self.max_buff_levels {
            if *level > 0 {
                report.push_str(&format!("  {:<20} {}\n", buff, level));
            }
        }

        if let Some(last) = self.run_stats.last() {
            report.push_str(&format!("\nLast label: {}\n", last.final_label));
        }
        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
