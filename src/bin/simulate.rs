//! Floor simulator CLI.
//!
//! Run Monte Carlo descents to check layout quality and combat pacing.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 100 runs over floors 1..=20
//!   cargo run --bin simulate -- -n 500 --floors 1..5
//!   cargo run --bin simulate -- --seed 42 --json  # Reproducible, JSON to stdout

use std::env;
use std::process::ExitCode;

use wordcaster::core::GameConfig;
use wordcaster::logging::{init_tracing, LogLevel, TracingConfig};
use wordcaster::simulator::{run_simulation, SimConfig};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let (config, json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    init_tracing(&TracingConfig::with_level(LogLevel::from_verbosity(
        config.verbosity,
    )));

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              WORDCASTER FLOOR SIMULATOR                       ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Floors:         {}..={}", config.start_floor, config.end_floor);
        println!("  Combat:         {}", config.simulate_combat);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
    ExitCode::SUCCESS
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_floor_range(value: &str) -> Result<(u32, u32), String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("floor range must look like 1..20, got {}", value))?;
    let end = end.trim_start_matches('=');
    let start: u32 = start.parse().map_err(|_| format!("bad floor: {}", start))?;
    let end: u32 = end.parse().map_err(|_| format!("bad floor: {}", end))?;
    if start == 0 || start > end {
        return Err(format!("empty floor range {}", value));
    }
    Ok((start, end))
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                let value = next_value(args, &mut i, "--runs")?;
                config.num_runs = value.parse().map_err(|_| format!("bad run count: {}", value))?;
            }
            "-f" | "--floors" => {
                let (start, end) = parse_floor_range(next_value(args, &mut i, "--floors")?)?;
                config.start_floor = start;
                config.end_floor = end;
            }
            "-s" | "--seed" => {
                let value = next_value(args, &mut i, "--seed")?;
                config.seed = Some(value.parse().map_err(|_| format!("bad seed: {}", value))?);
            }
            "-c" | "--config" => {
                let path = next_value(args, &mut i, "--config")?;
                config.game = GameConfig::load(path).map_err(|e| e.to_string())?;
            }
            "--no-combat" => {
                config.simulate_combat = false;
            }
            "--json" => {
                json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {
                let seed = config.seed;
                config = SimConfig {
                    seed,
                    ..SimConfig::quick()
                };
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option {}", other)),
        }
        i += 1;
    }

    Ok((config, json))
}

fn print_help() {
    println!("Wordcaster Floor Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of descents (default: 100)");
    println!("    -f, --floors <A..B>   Floor range, inclusive (default: 1..20)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -c, --config <FILE>   JSON game config (room sizing, player stats)");
    println!("    --no-combat           Only generate floors");
    println!("    --json                Print the report as JSON");
    println!("    --quick               20 runs over floors 1..5");
    println!("    -v, --verbose         Log every run");
    println!("    -h, --help            Show this help");
}
