//! rampart-run: headless match runner.
//!
//! Usage:
//!   rampart-run --character mage --difficulty 2 --seed 7
//!   rampart-run --training 30 --store progress.json
//!   rampart-run --crowd --config tuning.json --json

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rampart_core::config::MatchConfig;
use rampart_core::constants::TICK_RATE;
use rampart_core::enums::{CharacterId, GamePhase};
use rampart_core::events::MatchEvent;
use rampart_core::state::MatchSnapshot;
use rampart_sim::persistence::{JsonFileStore, MemoryStore, ProgressStore};
use rampart_sim::{MatchEngine, SimConfig};

/// Extra seconds a defense match may run past its countdown before the
/// runner gives up.
const OVERRUN_GRACE_SECS: u32 = 5;

struct Options {
    seed: u64,
    character: CharacterId,
    difficulty: usize,
    training_secs: Option<u32>,
    crowd: bool,
    config: Option<PathBuf>,
    store: Option<PathBuf>,
    json: bool,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let options = parse_options(&args)?;
    let snapshot = run(&options)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_summary(&snapshot);
    }
    Ok(())
}

fn print_usage() {
    eprintln!(
        "rampart-run: headless RAMPART match runner\n\
         \n\
           --seed <N>            RNG seed (default: 42)\n\
           --character <name>    archer | ranger | mage (default: archer)\n\
           --difficulty <0-2>    Easy, Normal, Hard (default: 0)\n\
           --training <SECS>     Run training mode for SECS seconds instead\n\
           --crowd               Enable barrier crowd control\n\
           --config <path>       JSON tuning override\n\
           --store <path>        JSON file for persisted XP\n\
           --json                Print the final snapshot as JSON\n\
         \n\
         Logging follows RUST_LOG (default: info).\n"
    );
}

fn value_of<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_options(args: &[String]) -> Result<Options> {
    let seed: u64 = match value_of(args, "--seed") {
        Some(s) => s.parse().with_context(|| format!("Invalid --seed: {s}"))?,
        None => 42,
    };
    let character = match value_of(args, "--character") {
        Some(s) => s.parse::<CharacterId>().map_err(|e| anyhow!(e))?,
        None => CharacterId::default(),
    };
    let difficulty: usize = match value_of(args, "--difficulty") {
        Some(s) => s.parse().with_context(|| format!("Invalid --difficulty: {s}"))?,
        None => 0,
    };
    let training_secs: Option<u32> = match value_of(args, "--training") {
        Some(s) => Some(s.parse().with_context(|| format!("Invalid --training: {s}"))?),
        None => None,
    };

    for arg in args.iter().filter(|a| a.starts_with("--")) {
        let known = [
            "--seed",
            "--character",
            "--difficulty",
            "--training",
            "--crowd",
            "--config",
            "--store",
            "--json",
        ];
        if !known.contains(&arg.as_str()) {
            bail!("Unknown option: {arg}");
        }
    }

    Ok(Options {
        seed,
        character,
        difficulty,
        training_secs,
        crowd: args.iter().any(|a| a == "--crowd"),
        config: value_of(args, "--config").map(PathBuf::from),
        store: value_of(args, "--store").map(PathBuf::from),
        json: args.iter().any(|a| a == "--json"),
    })
}

fn load_config(options: &Options) -> Result<MatchConfig> {
    let mut config = match &options.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => MatchConfig::default(),
    };
    if options.crowd {
        config.crowd.enabled = true;
    }
    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

fn open_store(options: &Options) -> Result<Box<dyn ProgressStore>> {
    match &options.store {
        Some(path) => {
            let store = JsonFileStore::open(path).map_err(|e| anyhow!(e))?;
            info!(path = %path.display(), "Using progress file");
            Ok(Box::new(store))
        }
        None => Ok(Box::new(MemoryStore::new())),
    }
}

fn run(options: &Options) -> Result<MatchSnapshot> {
    let match_config = load_config(options)?;
    let duration_secs = match_config.castle.match_duration_secs;
    let mut engine = MatchEngine::with_store(
        SimConfig {
            seed: options.seed,
            match_config,
        },
        open_store(options)?,
    );

    engine.select_character(options.character);
    let max_ticks = match options.training_secs {
        Some(secs) => {
            engine.start_training();
            u64::from(secs) * u64::from(TICK_RATE)
        }
        None => {
            engine.start_match(options.difficulty);
            u64::from(duration_secs + OVERRUN_GRACE_SECS) * u64::from(TICK_RATE)
        }
    };

    let mut snapshot = engine.snapshot();
    for _ in 0..max_ticks {
        snapshot = engine.tick();
        report(&snapshot);
        if engine.phase() == GamePhase::Finished {
            return Ok(snapshot);
        }
    }

    if options.training_secs.is_none() {
        bail!("Match did not finish within {max_ticks} ticks");
    }
    Ok(snapshot)
}

fn report(snapshot: &MatchSnapshot) {
    for event in &snapshot.events {
        match event {
            MatchEvent::LevelUp { character, level } => {
                info!(%character, level, "Level up");
            }
            MatchEvent::CastleDamaged { health } => {
                debug!(health, "Castle hit");
            }
            MatchEvent::EnemyKilled { xp_awarded, .. } => {
                debug!(xp_awarded, "Enemy down");
            }
            _ => {}
        }
    }
}

fn print_summary(snapshot: &MatchSnapshot) {
    let player = &snapshot.player;
    println!("Mode:        {:?} ({:?})", snapshot.mode, snapshot.difficulty);
    println!("Outcome:     {:?}", snapshot.match_state);
    println!("Time:        {:.1}s", snapshot.time.elapsed_secs());
    println!(
        "Castle:      {}/{} ({:.0}%)",
        snapshot.castle.health,
        snapshot.castle.max_health,
        snapshot.castle.percent * 100.0
    );
    println!(
        "Character:   {} level {} ({}/{} XP, {} total)",
        player.character, player.level, player.xp, player.xp_max, player.total_xp
    );
    println!(
        "Stats:       attack {:.1}, fire rate {:.2}/s, {} projectile(s), pierce {}",
        player.attack, player.fire_rate, player.projectile_count, player.pierce
    );
    println!(
        "Escalation:  step {} (x{:.2} enemies, x{:.2} XP)",
        snapshot.difficulty_step, snapshot.enemy_multiplier, snapshot.xp_multiplier
    );
    println!("On field:    {} enemies", snapshot.enemies.len());
}
