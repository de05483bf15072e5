//! Hexbloom headless bot runner.
//!
//! Usage:
//!   hexbloom --games 20 --bot greedy --seed 7
//!   hexbloom --mode daily --date 2026-10-16 --json

use clap::Parser;
use hexbloom_core::{BotDifficulty, DailyDate, GameMode};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;
mod session;

use report::RunSummary;
use session::{GameSession, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "hexbloom", version, about = "Play Hexbloom games with a bot")]
struct Cli {
    /// Game mode: "endless" or "daily"
    #[arg(long, env = "HEXBLOOM_MODE", default_value = "endless", value_parser = parse_mode)]
    mode: GameMode,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    games: usize,

    /// Base seed; game i uses seed + i. Random if omitted
    #[arg(long, env = "HEXBLOOM_SEED")]
    seed: Option<u64>,

    /// Bot difficulty: "easy" or "greedy"
    #[arg(long, default_value = "greedy")]
    bot: BotDifficulty,

    /// Stop a game after this many moves
    #[arg(long, default_value = "500")]
    max_moves: u32,

    /// Daily puzzle date as YYYY-MM-DD. Defaults to today
    #[arg(long)]
    date: Option<DailyDate>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "endless" => Ok(GameMode::Endless),
        "daily" => Ok(GameMode::Daily),
        other => Err(format!("unknown mode: {}", other)),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let base_seed = cli.seed.unwrap_or_else(rand::random);
    let config = SessionConfig {
        mode: cli.mode,
        bot: cli.bot,
        date: cli.date.unwrap_or_else(DailyDate::today),
        max_moves: cli.max_moves,
    };

    info!(
        mode = ?config.mode,
        bot = %config.bot,
        games = cli.games,
        seed = base_seed,
        "Starting Hexbloom run..."
    );

    let mut reports = Vec::with_capacity(cli.games);
    for index in 0..cli.games {
        let seed = base_seed.wrapping_add(index as u64);
        reports.push(GameSession::new(index, seed, config.clone()).run()?);
    }

    let summary = RunSummary::new(config.mode, config.bot, reports);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }

    Ok(())
}
