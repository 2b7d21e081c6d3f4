//! Zone Royale - Headless Match Runner
//!
//! Plays a full match against the enemy AI with a scripted or automatic
//! player and prints a summary as JSON or text.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zone_royale::core::config::{load_config, GameConfig};
use zone_royale::core::error::Result;
use zone_royale::game::{autopilot, Match, MatchSummary, PlayerIntent};

/// Headless Zone Royale runner
#[derive(Parser, Debug)]
#[command(name = "zone_royale")]
#[command(about = "Run a battle royale match against the enemy AI")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Configuration name (loaded from data/config/)
    #[arg(long, default_value = "default")]
    config: String,

    /// Override the turn limit
    #[arg(long)]
    turns: Option<u32>,

    /// Override the number of enemies
    #[arg(long)]
    enemies: Option<u32>,

    /// Comma-separated player intents to play before the autopilot takes
    /// over, e.g. "up,up,shoot_left,heal"
    #[arg(long)]
    script: Option<String>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "zone_royale=debug"
    } else {
        "zone_royale=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(&args.config).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config '{}': {}, using defaults", args.config, e);
        GameConfig::default()
    });
    if let Some(turns) = args.turns {
        config.game.max_turns = turns;
    }
    if let Some(enemies) = args.enemies {
        config.game.enemy_count = enemies;
    }
    config.validate()?;

    let mut script = match &args.script {
        Some(text) => text
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<PlayerIntent>)
            .collect::<std::result::Result<Vec<_>, _>>()?,
        None => Vec::new(),
    }
    .into_iter();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut game = Match::new(config, seed)?;
    let summary = game.run(|state, config| {
        script
            .next()
            .unwrap_or_else(|| autopilot(state, config))
    });

    if args.verbose {
        for entry in game.state.log.entries.iter().filter(|e| e.style.is_some()) {
            eprintln!("  [{}] {}", entry.turn, entry.message);
        }
    }

    match args.format.as_str() {
        "text" => print_text(&summary),
        _ => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

fn print_text(summary: &MatchSummary) {
    let outcome = summary.outcome.map_or("unfinished", |o| o.name());
    println!("=== Match Result ===");
    println!("Seed: {}", summary.seed);
    println!("Outcome: {}", outcome);
    println!("Turns: {}", summary.turns);
    println!("Player HP: {}", summary.player_hp);
    println!("Surviving enemies: {}", summary.surviving_enemies);
    println!("Eliminations: {}", summary.eliminations);
}
