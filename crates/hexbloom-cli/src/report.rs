//! Serializable results of bot runs.

use hexbloom_core::{BotDifficulty, DailyDate, GameMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub index: usize,
    pub mode: GameMode,
    /// Seed for the bot and, in endless mode, the dealer
    pub seed: u64,
    pub daily_date: Option<DailyDate>,
    pub score: u32,
    pub moves: u32,
    /// Placements that cleared at least one pattern
    pub clearing_moves: u32,
    pub best_move: u32,
    /// False when the run stopped at the move limit
    pub game_over: bool,
    pub daily_completed: bool,
    pub daily_remaining_hits: u32,
}

/// Aggregate over a batch of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: GameMode,
    pub bot: BotDifficulty,
    pub games: Vec<GameReport>,
    pub mean_score: f64,
    pub best_score: u32,
    pub mean_moves: f64,
    pub dailies_completed: usize,
}

impl RunSummary {
    pub fn new(mode: GameMode, bot: BotDifficulty, games: Vec<GameReport>) -> Self {
        let count = games.len().max(1) as f64;
        let mean_score = games.iter().map(|g| g.score as f64).sum::<f64>() / count;
        let mean_moves = games.iter().map(|g| g.moves as f64).sum::<f64>() / count;
        let best_score = games.iter().map(|g| g.score).max().unwrap_or(0);
        let dailies_completed = games.iter().filter(|g| g.daily_completed).count();

        Self {
            mode,
            bot,
            games,
            mean_score,
            best_score,
            mean_moves,
            dailies_completed,
        }
    }
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "game {:>3}  seed {:<20} score {:>6}  moves {:>4}  clears {:>4}  best {:>4}",
            self.index, self.seed, self.score, self.moves, self.clearing_moves, self.best_move
        )?;
        if self.mode == GameMode::Daily {
            if self.daily_completed {
                write!(f, "  completed")?;
            } else {
                write!(f, "  {} hits left", self.daily_remaining_hits)?;
            }
        }
        if !self.game_over {
            write!(f, "  (move limit)")?;
        }
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for game in &self.games {
            writeln!(f, "{}", game)?;
        }
        write!(
            f,
            "{} games, {} bot: mean score {:.1}, best {}, mean moves {:.1}",
            self.games.len(),
            self.bot,
            self.mean_score,
            self.best_score,
            self.mean_moves
        )?;
        if self.mode == GameMode::Daily {
            write!(f, ", {} completed", self.dailies_completed)?;
        }
        Ok(())
    }
}
