//! CLI entry point for wayfarer
//!
//! Plays an adventure engine to completion, restarting it after every death.

use std::path::PathBuf;
use std::process;
use wayfarer::debug::DebugConfig;
use wayfarer::{AgentConfig, Explorer, ProcessSession, storage};

struct PlayOptions {
    engine: PathBuf,
    engine_args: Vec<String>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    max_lives: Option<usize>,
    checkpoint: Option<PathBuf>,
    debug: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => {
            if args.len() < 3 {
                eprintln!("Error: Missing engine path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            let options = match parse_play_options(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("Error: {}", message);
                    eprintln!();
                    print_usage();
                    process::exit(1);
                }
            };
            run_play(options);
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("wayfarer - Autonomous text adventure explorer");
    println!();
    println!("USAGE:");
    println!("    wayfarer play <engine> [OPTIONS] [-- <engine args>...]");
    println!();
    println!("COMMANDS:");
    println!("    play <engine>    Explore the engine until every puzzle is solved");
    println!("    --help, -h       Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --config <file.json>    Load agent configuration");
    println!("    --seed <n>              Seed the exploration for a reproducible run");
    println!("    --max-lives <n>         Give up after n lives");
    println!("    --checkpoint <file>     Resume from and save progress to this file");
    println!("    -- <args>...            Pass the remaining arguments to the engine");
    println!("    --debug                 Log events, checkpoints and engine traffic");
    println!();
    println!("EXAMPLES:");
    println!("    wayfarer play ./adventure");
    println!("    wayfarer play ./adventure --seed 42 --checkpoint progress.json");
    println!("    wayfarer play ./vm -- challenge.bin");
}

fn parse_play_options(args: &[String]) -> Result<PlayOptions, String> {
    let mut options = PlayOptions {
        engine: PathBuf::from(&args[0]),
        engine_args: Vec::new(),
        config: None,
        seed: None,
        max_lives: None,
        checkpoint: None,
        debug: false,
    };

    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--" => {
                options.engine_args = rest.by_ref().cloned().collect();
            }
            "--debug" => options.debug = true,
            "--config" => options.config = Some(PathBuf::from(value(flag, rest.next())?)),
            "--checkpoint" => {
                options.checkpoint = Some(PathBuf::from(value(flag, rest.next())?));
            }
            "--seed" => {
                let raw = value(flag, rest.next())?;
                options.seed = Some(
                    raw.parse()
                        .map_err(|_| format!("Invalid seed '{}'", raw))?,
                );
            }
            "--max-lives" => {
                let raw = value(flag, rest.next())?;
                options.max_lives = Some(
                    raw.parse()
                        .map_err(|_| format!("Invalid life count '{}'", raw))?,
                );
            }
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    Ok(options)
}

fn value<'a>(flag: &str, next: Option<&'a String>) -> Result<&'a str, String> {
    next.map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn run_play(options: PlayOptions) {
    let mut config = match &options.config {
        Some(path) => match AgentConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: Failed to load configuration");
                eprintln!("Reason: {}", err);
                process::exit(1);
            }
        },
        None => AgentConfig::default(),
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if options.max_lives.is_some() {
        config.max_lives = options.max_lives;
    }
    if options.checkpoint.is_some() {
        config.checkpoint_path = options.checkpoint;
    }
    if options.debug {
        config.debug = DebugConfig::verbose();
    }

    let resume = match &config.checkpoint_path {
        Some(path) => match storage::read_file(path) {
            Ok(progress) => progress,
            Err(err) => {
                eprintln!("Error: Failed to read progress file '{}'", path.display());
                eprintln!("Reason: {}", err);
                process::exit(1);
            }
        },
        None => None,
    };

    let mut explorer = match Explorer::standard(config) {
        Ok(explorer) => explorer,
        Err(err) => {
            eprintln!("Error: Invalid event catalogue");
            eprintln!("Reason: {}", err);
            process::exit(1);
        }
    };
    if let Some(progress) = resume {
        println!(
            "Resuming from {} saved actions, {} open events",
            progress.checkpoint.actions.len(),
            progress.open.len()
        );
        explorer = match explorer.resume(progress) {
            Ok(explorer) => explorer,
            Err(err) => {
                eprintln!("Error: Saved progress does not match the event catalogue");
                eprintln!("Reason: {}", err);
                process::exit(1);
            }
        };
    }

    let engine = options.engine;
    let engine_args = options.engine_args;
    match explorer.run(|| ProcessSession::spawn(&engine, &engine_args)) {
        Ok(summary) => {
            for resolution in &summary.resolutions {
                println!("* {}", resolution.toast);
            }
            println!();
            println!("{}", summary.final_text.trim_end());
            println!();
            println!("Finished after {} lives", summary.lives);
        }
        Err(err) => {
            eprintln!("Error: Exploration failed");
            eprintln!("Reason: {}", err);
            process::exit(1);
        }
    }
}
