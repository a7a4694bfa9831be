//! Loop balance simulator CLI.
//!
//! Drive one catalog action for many seeded runs and summarize loops,
//! segments, soulstone flow and buff levels.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 100 Small Dungeon runs
//!   cargo run --bin simulate -- -a "Great Feast" -n 5  # Sacrifice pacing
//!   cargo run --bin simulate -- --seed 42             # Reproducible run

use idleloop::core::config::EngineConfig;
use idleloop::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

struct CliArgs {
    sim: SimConfig,
    config_path: Option<PathBuf>,
    cap_overrides: Vec<String>,
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    let mut engine = match &cli.config_path {
        Some(path) => match EngineConfig::load_json_or_default(path) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };
    for entry in &cli.cap_overrides {
        if let Err(e) = engine.buff_caps.apply_override(entry) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let config = cli.sim;
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              IDLELOOP BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Action:         {}", config.action);
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Ticks:      {}", config.max_ticks_per_run);
    println!("  Batch:          {}", config.batch_ticks);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config, &engine) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.to_text());

    if cli.json {
        let filename = format!("sim_report_{}.json", config.seed.unwrap_or(0));
        if let Err(e) = std::fs::write(&filename, report.to_json()) {
            eprintln!("Error: failed to write {}: {}", filename, e);
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs {
        sim: SimConfig::default(),
        config_path: None,
        cap_overrides: Vec::new(),
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    cli.sim.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-a" | "--action" => {
                if i + 1 < args.len() {
                    cli.sim.action = args[i + 1].clone();
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    cli.sim.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    cli.sim.max_ticks_per_run = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "-b" | "--batch" => {
                if i + 1 < args.len() {
                    cli.sim.batch_ticks = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    cli.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--cap" => {
                if i + 1 < args.len() {
                    cli.cap_overrides.push(args[i + 1].clone());
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                cli.sim.verbosity = 2;
            }
            "--json" => {
                cli.json = true;
            }
            "--dungeon" => {
                cli.sim = SimConfig::dungeon_test("Large Dungeon");
            }
            "--sacrifice" => {
                cli.sim = SimConfig::sacrifice_test();
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    cli
}

fn print_help() {
    println!("Idleloop Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -a, --action <NAME>  Catalog action to drive (default: Small Dungeon)");
    println!("    -n, --runs <N>       Number of simulation runs (default: 100)");
    println!("    -s, --seed <S>       Random seed for reproducibility");
    println!("    -t, --ticks <T>      Tick budget per run (default: 100,000)");
    println!("    -b, --batch <B>      Ticks per engine step (default: 100)");
    println!("    -c, --config <PATH>  Engine config JSON with buff caps");
    println!("    --cap <NAME=N>       Override one buff cap, e.g. Feast=3");
    println!("    -v, --verbose        Print every run");
    println!("    --json               Save JSON report");
    println!("    --dungeon            Quick Large Dungeon reward check");
    println!("    --sacrifice          Quick Great Feast sacrifice check");
    println!("    -h, --help           Show this help");
    println!();
    println!("Set RUST_LOG=idleloop=debug for per-segment engine logs.");
}
