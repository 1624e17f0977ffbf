//! Battle balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze combat balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # Default: 1000 battles in level 1
//!   cargo run --bin simulate -- -n 100 -l 3         # 100 battles in level 3
//!   cargo run --bin simulate -- -c s3_storage       # With one concept learned
//!   cargo run --bin simulate -- --seed 42           # Reproducible run

use cloud_quest::concepts::ALL_CONCEPTS;
use cloud_quest::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cloud_quest=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CLOUD QUEST BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Battles:        {}", config.num_runs);
    println!("  Level:          {}", config.level_id);
    println!("  Max Turns:      {}", config.max_turns);
    if config.learned_concepts.is_empty() {
        println!("  Concepts:       none");
    } else {
        println!("  Concepts:       {}", config.learned_concepts.join(", "));
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match report
            .to_json()
            .and_then(|json| std::fs::write(&filename, json).map_err(Into::into))
        {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    config.level_id = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-c" | "--concept" => {
                if i + 1 < args.len() {
                    config.learned_concepts.push(args[i + 1].clone());
                    i += 1;
                }
            }
            "--all-concepts" => {
                config.learned_concepts = ALL_CONCEPTS.iter().map(|c| c.id.to_string()).collect();
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--turns" => {
                if i + 1 < args.len() {
                    config.max_turns = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--health" => {
                if i + 1 < args.len() {
                    if let Ok(health) = args[i + 1].parse::<u32>() {
                        config.balance.starting_health = health;
                        i += 1;
                    }
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = config.quick();
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Cloud Quest Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of battles (default: 1000)");
    println!("    -l, --level <L>     Level whose enemies to fight (default: 1)");
    println!("    -c, --concept <ID>  Learn a concept before fighting (repeatable)");
    println!("    --all-concepts      Learn every concept");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --turns <T>     Turns before fleeing (default: 50)");
    println!("    --health <H>        Starting health (default: 100)");
    println!("    -v, --verbose       Verbose output");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (100 battles, other flags kept)");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=cloud_quest=debug to trace every phase change.");
}
