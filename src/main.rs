//! Wordcaster floor viewer.
//!
//! Generates one dungeon floor and prints it as an ASCII map with its
//! rooms, doors and planned enemies.

use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wordcaster::build_info;
use wordcaster::core::GameConfig;
use wordcaster::dungeon::map::{legend, render_ascii};
use wordcaster::dungeon::{reachable_rooms, DungeonGenerator};
use wordcaster::economy::{JsonFileStore, Wallet};
use wordcaster::logging::{init_tracing, LogLevel, TracingConfig};
use wordcaster::progression::{floor_description, level_name, plan_spawns, progression_table};
use wordcaster::StorageError;

struct Options {
    floor: u32,
    seed: Option<u64>,
    config_path: Option<String>,
    json: bool,
    progression: bool,
    wallet: bool,
    verbosity: u8,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        floor: 1,
        seed: None,
        config_path: None,
        json: false,
        progression: false,
        wallet: false,
        verbosity: 0,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match flag {
            "-f" | "--floor" => {
                let v = value()?;
                options.floor = v.parse().map_err(|_| format!("bad floor: {}", v))?;
            }
            "-s" | "--seed" => {
                let v = value()?;
                options.seed = Some(v.parse().map_err(|_| format!("bad seed: {}", v))?);
            }
            "-c" | "--config" => {
                options.config_path = Some(value()?);
            }
            "--json" => options.json = true,
            "--progression" => options.progression = true,
            "--wallet" => options.wallet = true,
            "-v" | "--verbose" => options.verbosity = options.verbosity.saturating_add(1),
            "--version" | "-V" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option {}", other)),
        }
        i += 1;
    }
    Ok(options)
}

fn print_help() {
    println!("Wordcaster - dungeon floors for a reading roguelike\n");
    println!("Usage: wordcaster [OPTIONS]\n");
    println!("Options:");
    println!("  -f, --floor <N>       Floor to generate (default: 1)");
    println!("  -s, --seed <S>        Seed for a reproducible layout");
    println!("  -c, --config <FILE>   JSON game config");
    println!("      --json            Print the dungeon as JSON instead of a map");
    println!("      --progression     Print the reading level of every floor and exit");
    println!("      --wallet          Show the saved gold-word wallet and exit");
    println!("  -v, --verbose         More logging (repeatable)");
    println!("  -V, --version         Show version information");
    println!("  -h, --help            Show this help message");
}

fn print_progression() {
    println!("Floor  Level  Grade");
    for entry in progression_table() {
        println!(
            "{:5}  {:5}  {}{}",
            entry.floor,
            entry.level,
            level_name(entry.floor),
            if entry.is_transition { " *" } else { "" }
        );
    }
}

fn print_wallet() -> Result<(), StorageError> {
    let store = JsonFileStore::open_default()?;
    let wallet = Wallet::load(&store)?.unwrap_or_default();
    let stats = wallet.statistics();

    println!("Wallet in {}", store.dir().display());
    println!("Balance: {} gold words", wallet.balance());
    println!(
        "Earned {} / spent {} (recent history)",
        stats.total_earned, stats.total_spent
    );
    for t in wallet.recent_transactions(5) {
        println!("  {:?} {:>5}  {}", t.kind, t.amount, t.source);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("error: {}", msg);
            return ExitCode::from(2);
        }
    };

    init_tracing(&TracingConfig::with_level(LogLevel::from_verbosity(
        options.verbosity,
    )));

    if options.progression {
        print_progression();
        return ExitCode::SUCCESS;
    }
    if options.wallet {
        return match print_wallet() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match &options.config_path {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generator = DungeonGenerator::new(config.rooms);
    let dungeon = generator.generate(options.floor, &mut rng);

    if options.json {
        match serde_json::to_string_pretty(&dungeon) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("{}", floor_description(dungeon.floor));
    println!("Reading level: {}", level_name(dungeon.floor));
    println!(
        "{}x{} tiles, {} rooms, {} doors, {} attempt(s){}",
        dungeon.width,
        dungeon.height,
        dungeon.rooms.len(),
        dungeon.doors.len(),
        dungeon.generation_attempts,
        if dungeon.fully_connected {
            ""
        } else {
            " (DISCONNECTED)"
        }
    );
    if let Some(distance) = dungeon.boss_distance() {
        println!("Boss room {} tiles from the entrance", distance);
    }
    println!();
    print!("{}", render_ascii(&dungeon));
    println!("{}", legend());
    println!();

    let reachable = reachable_rooms(&dungeon);
    let spawns = plan_spawns(&dungeon, &mut rng);
    for (index, room) in dungeon.rooms.iter().enumerate() {
        let enemies: Vec<String> = spawns
            .iter()
            .filter(|s| s.room_index == index)
            .map(|s| format!("{} L{}", s.display_name(), s.level))
            .collect();
        println!(
            "  {:2} {:?} at ({}, {}) {}x{}{}{}",
            index,
            room.room_type,
            room.x,
            room.y,
            room.width,
            room.height,
            if reachable.contains(&index) {
                ""
            } else {
                " [unreachable]"
            },
            if enemies.is_empty() {
                String::new()
            } else {
                format!(" - {}", enemies.join(", "))
            }
        );
    }

    ExitCode::SUCCESS
}
