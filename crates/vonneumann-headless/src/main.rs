//! vonneumann-headless: run the Von Neumann simulation without a renderer.
//!
//! Usage:
//!   vonneumann-headless [--seed N] [--ticks N] [--config sim.json]
//!                       [--commands schedule.json] [--auto] [--realtime]
//!                       [--summary-every N] [--json]

mod game_loop;

use std::path::{Path, PathBuf};
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use vonneumann_core::commands::PlayerCommand;
use vonneumann_sim::{SimConfig, SimulationEngine};

use game_loop::{LoopOptions, ScheduledCommand};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    init_tracing();

    let mut config = match parse_path(&args, "--config") {
        Some(path) => SimConfig::from_json_file(&path).unwrap_or_else(|err| {
            eprintln!("Error loading {}: {err}", path.display());
            process::exit(1);
        }),
        None => SimConfig::default(),
    };
    if let Some(seed) = parse_number(&args, "--seed") {
        config.seed = seed;
    }
    if args.iter().any(|a| a == "--auto") {
        config.autonomous_seed_probe = true;
    }

    let mut options = LoopOptions {
        realtime: args.iter().any(|a| a == "--realtime"),
        ..Default::default()
    };
    if let Some(ticks) = parse_number(&args, "--ticks") {
        options.ticks = ticks;
    }
    if let Some(every) = parse_number(&args, "--summary-every") {
        options.summary_every = every;
    }

    let mut schedule = vec![ScheduledCommand {
        tick: 0,
        command: PlayerCommand::StartExpedition,
    }];
    if let Some(path) = parse_path(&args, "--commands") {
        schedule.extend(load_schedule(&path));
    }
    schedule.sort_by_key(|c| c.tick);

    info!(
        seed = config.seed,
        ticks = options.ticks,
        auto = config.autonomous_seed_probe,
        realtime = options.realtime,
        "starting headless run"
    );

    let mut engine = SimulationEngine::new(config);
    let last = game_loop::run(&mut engine, schedule, &options);
    game_loop::log_summary(&last);

    let stats = engine.stats();
    info!(
        mined = stats.total_matter_mined,
        probes_built = stats.probes_built,
        rovers_built = stats.rovers_built,
        stations_formed = stats.stations_formed,
        "run complete"
    );

    if args.iter().any(|a| a == "--json") {
        match serde_json::to_string_pretty(&last) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error serializing snapshot: {err}");
                process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "vonneumann-headless: run the simulation without a renderer\n\
         \n\
           --seed <N>           RNG seed (overrides the config file)\n\
           --ticks <N>          Loop iterations to run (default: 3600)\n\
           --config <path>      JSON SimConfig file\n\
           --commands <path>    JSON list of {{\"tick\": N, \"command\": {{...}}}}\n\
           --auto               Start with the seed probe autonomous\n\
           --realtime           Pace ticks to wall-clock time\n\
           --summary-every <N>  Status line interval in ticks (0 = off)\n\
           --json               Print the final snapshot as JSON\n\
         \n\
         Set RUST_LOG=debug to see AI decisions and rejected commands.\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
    }
    None
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    flag_value(args, flag).map(PathBuf::from)
}

fn parse_number(args: &[String], flag: &str) -> Option<u64> {
    let raw = flag_value(args, flag)?;
    match raw.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            eprintln!("Invalid value for {flag}: {raw}");
            process::exit(1);
        }
    }
}

fn load_schedule(path: &Path) -> Vec<ScheduledCommand> {
    let text = std::fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Error reading {}: {err}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|err| {
        eprintln!("Error parsing {}: {err}", path.display());
        process::exit(1);
    })
}
