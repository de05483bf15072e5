//! Automated players.
//!
//! Two difficulty levels:
//! - Easy: random valid placement
//! - Greedy: the placement that scores the most right now, preferring the
//!   one that leaves the board emptiest

use crate::actions::GameAction;
use crate::game::GameState;
use crate::rng::EntropyRng;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    Easy,
    Greedy,
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotDifficulty::Easy => write!(f, "easy"),
            BotDifficulty::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for BotDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(BotDifficulty::Easy),
            "greedy" => Ok(BotDifficulty::Greedy),
            other => Err(format!("unknown bot difficulty: {}", other)),
        }
    }
}

/// A bot that can decide on placements
pub struct Bot {
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose an action from the valid actions
    pub fn choose_action(&mut self, game: &GameState) -> Option<GameAction> {
        let valid_actions = game.valid_actions();
        if valid_actions.is_empty() {
            return None;
        }

        match self.difficulty {
            BotDifficulty::Easy => self.choose_easy(&valid_actions),
            BotDifficulty::Greedy => self.choose_greedy(game, &valid_actions),
        }
    }

    fn choose_easy(&mut self, actions: &[GameAction]) -> Option<GameAction> {
        actions.choose(&mut self.rng).cloned()
    }

    fn choose_greedy(&mut self, game: &GameState, actions: &[GameAction]) -> Option<GameAction> {
        let mut best: Option<(&GameAction, u32, usize)> = None;

        for action in actions {
            let GameAction::Place { piece_id, origin } = action;
            // Golden respawn draws land here, not in the game's stream
            let mut scratch = EntropyRng::new(&mut self.rng);
            let Ok(result) = game.preview(*piece_id, origin, &mut scratch) else {
                continue;
            };
            let points = result.points_gained();
            let filled = result.board.filled_count();

            let better = match best {
                None => true,
                Some((_, best_points, best_filled)) => {
                    points > best_points || (points == best_points && filled < best_filled)
                }
            };
            if better {
                best = Some((action, points, filled));
            }
        }

        best.map(|(action, _, _)| action.clone())
    }
}
