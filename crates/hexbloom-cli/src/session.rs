//! A single bot-driven game.

use hexbloom_core::{
    create_daily_game_state_for, create_initial_game_state, Bot, BotDifficulty, DailyDate,
    EntropyRng, GameError, GameEvent, GameMode, GameState,
};
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

use crate::report::GameReport;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Bot chose a rejected action: {0}")]
    Rejected(#[from] GameError),
}

/// Settings shared by every game of a run.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub bot: BotDifficulty,
    /// Daily puzzle date; ignored in endless mode
    pub date: DailyDate,
    pub max_moves: u32,
}

/// One game with its bot and random source.
pub struct GameSession {
    pub index: usize,
    pub seed: u64,
    config: SessionConfig,
    state: GameState,
    bot: Bot,
    rng: EntropyRng<StdRng>,
    clearing_moves: u32,
    best_move: u32,
}

impl GameSession {
    pub fn new(index: usize, seed: u64, config: SessionConfig) -> Self {
        let mut rng = EntropyRng::seeded(seed);
        let state = match config.mode {
            GameMode::Endless => create_initial_game_state(&mut rng),
            GameMode::Daily => create_daily_game_state_for(config.date),
        };

        Self {
            index,
            seed,
            bot: Bot::with_seed(config.bot, seed),
            config,
            state,
            rng,
            clearing_moves: 0,
            best_move: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.game_over || self.state.moves >= self.config.max_moves
    }

    /// Play one move. Returns false if the bot had nothing to play.
    pub fn step(&mut self) -> Result<bool, SessionError> {
        let Some(action) = self.bot.choose_action(&self.state) else {
            return Ok(false);
        };

        let (next, events) = self.state.apply_action(action, &mut self.rng)?;
        for event in &events {
            match event {
                GameEvent::PatternsCleared { patterns, .. } => {
                    self.clearing_moves += 1;
                    debug!(game = self.index, count = patterns.len(), "patterns cleared");
                }
                GameEvent::PointsScored { points, .. } => {
                    self.best_move = self.best_move.max(*points);
                }
                _ => {}
            }
        }
        self.state = next;
        Ok(true)
    }

    /// Play until the game ends or the move limit is hit.
    pub fn run(mut self) -> Result<GameReport, SessionError> {
        while !self.is_done() {
            if !self.step()? {
                break;
            }
        }

        info!(
            game = self.index,
            score = self.state.score,
            moves = self.state.moves,
            "game finished"
        );
        Ok(self.report())
    }

    pub fn report(&self) -> GameReport {
        GameReport {
            index: self.index,
            mode: self.state.mode,
            seed: self.seed,
            daily_date: self.state.daily_date,
            score: self.state.score,
            moves: self.state.moves,
            clearing_moves: self.clearing_moves,
            best_move: self.best_move,
            game_over: self.state.game_over,
            daily_completed: self.state.daily_completed,
            daily_remaining_hits: self.state.daily_remaining_hits,
        }
    }
}
