//! Core game state machine.
//!
//! This module contains the `GameState` struct, the constructors for both
//! modes, and the turn-level `apply_action` that wraps
//! [`apply_placement`](crate::placement::apply_placement).
//!
//! States are values: `apply_action` borrows the current state and returns the
//! next one, so callers can keep old snapshots for undo or replay.

use crate::actions::{GameAction, GameEvent};
use crate::board::{topology, BoardState};
use crate::daily::{assign_daily_ids, deal_daily_hand, generate_daily_puzzle, DailyDate};
use crate::dealer::{deal_playable_hand, DealConfig, HAND_SIZE};
use crate::golden::spawn_golden_cell;
use crate::hex::CellId;
use crate::placement::{apply_placement, has_any_valid_move, valid_origins, PlacementResult};
use crate::rng::{DailyRng, RandomSource};
use crate::shapes::ActivePiece;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Which rule set is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Endless play with a roaming golden cell
    Endless,
    /// Date-seeded puzzle with numbered target cells
    Daily,
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    #[error("Game is over")]
    GameOver,

    #[error("No piece {0} in hand")]
    UnknownPiece(Uuid),

    #[error("Cell {0} is not on the board")]
    UnknownCell(CellId),

    #[error("Piece does not fit there")]
    InvalidPlacement,

    #[error("Invalid game state JSON: {0}")]
    InvalidJson(String),
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub board: BoardState,
    pub score: u32,
    /// Consecutive placements that cleared something
    pub streak: u32,
    /// Pieces still in hand, in slot order
    pub hand: Vec<ActivePiece>,
    /// Piece id per slot; `None` once that slot's piece is placed
    pub hand_slots: [Option<Uuid>; HAND_SIZE],
    pub game_over: bool,
    pub moves: u32,
    /// Numbered cells with hits left (daily only)
    pub daily_hits: BTreeMap<CellId, u32>,
    pub daily_total_hits: u32,
    pub daily_remaining_hits: u32,
    pub daily_completed: bool,
    /// Golden cell (endless only)
    pub golden_cell_id: Option<CellId>,
    /// Date the daily puzzle was generated for
    pub daily_date: Option<DailyDate>,
    pub daily_seed: Option<i32>,
    /// Position in the daily stream after the last deal
    pub daily_rng: Option<DailyRng>,
    /// Hands dealt so far in a daily game, the opening hand included
    pub daily_hand_deals: u32,
}

/// Every cell of the board, empty.
pub fn create_empty_board() -> BoardState {
    BoardState::empty(topology())
}

/// A new endless game: empty board, golden cell, playable hand.
pub fn create_initial_game_state<R: RandomSource>(rng: &mut R) -> GameState {
    let mut state = GameState::blank(GameMode::Endless);
    state.golden_cell_id = spawn_golden_cell(topology(), &state.board, &[], rng);
    let hand = deal_playable_hand(&state.board, &DealConfig::default(), rng);
    state.set_hand(hand);
    state
}

/// Today's daily puzzle on the local clock.
pub fn create_daily_game_state() -> GameState {
    create_daily_game_state_for(DailyDate::today())
}

/// The daily puzzle for `date`.
pub fn create_daily_game_state_for(date: DailyDate) -> GameState {
    let puzzle = generate_daily_puzzle(topology(), date.seed(), &DealConfig::default());

    let mut state = GameState::blank(GameMode::Daily);
    state.board = puzzle.board;
    state.daily_total_hits = puzzle.targets.total_hits;
    state.daily_remaining_hits = puzzle.targets.total_hits;
    state.daily_hits = puzzle.targets.hits;
    state.daily_date = Some(date);
    state.daily_seed = Some(puzzle.seed);
    state.daily_rng = Some(puzzle.rng);
    state.daily_hand_deals = 1;
    state.set_hand(puzzle.hand);
    state
}

impl GameState {
    /// Empty board, empty hand, zeroed counters
    pub fn blank(mode: GameMode) -> Self {
        Self {
            mode,
            board: create_empty_board(),
            score: 0,
            streak: 0,
            hand: Vec::new(),
            hand_slots: [None; HAND_SIZE],
            game_over: false,
            moves: 0,
            daily_hits: BTreeMap::new(),
            daily_total_hits: 0,
            daily_remaining_hits: 0,
            daily_completed: false,
            golden_cell_id: None,
            daily_date: None,
            daily_seed: None,
            daily_rng: None,
            daily_hand_deals: 0,
        }
    }

    fn set_hand(&mut self, hand: Vec<ActivePiece>) {
        self.hand_slots = [None; HAND_SIZE];
        for (slot, piece) in self.hand_slots.iter_mut().zip(&hand) {
            *slot = Some(piece.id);
        }
        self.hand = hand;
    }

    /// Get a hand piece by id
    pub fn piece(&self, id: Uuid) -> Option<&ActivePiece> {
        self.hand.iter().find(|p| p.id == id)
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        self.game_over
    }

    /// Every legal placement for the pieces in hand
    pub fn valid_actions(&self) -> Vec<GameAction> {
        if self.game_over {
            return Vec::new();
        }
        self.hand
            .iter()
            .flat_map(|piece| {
                valid_origins(&self.board, &piece.shape)
                    .into_iter()
                    .map(move |origin| GameAction::place(piece.id, origin))
            })
            .collect()
    }

    /// Preview a placement without committing it.
    pub fn preview<R: RandomSource>(
        &self,
        piece_id: Uuid,
        origin: &CellId,
        rng: &mut R,
    ) -> Result<PlacementResult, GameError> {
        let piece = self.piece(piece_id).ok_or(GameError::UnknownPiece(piece_id))?;
        if self.board.get(origin).is_none() {
            return Err(GameError::UnknownCell(origin.clone()));
        }
        apply_placement(self, piece, origin, rng).ok_or(GameError::InvalidPlacement)
    }

    /// Apply an action and return the next state with the events it caused.
    ///
    /// `rng` feeds endless-mode dealing and golden cell moves. Daily games deal
    /// from the stream stored in the state instead.
    pub fn apply_action<R: RandomSource>(
        &self,
        action: GameAction,
        rng: &mut R,
    ) -> Result<(GameState, Vec<GameEvent>), GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }

        let GameAction::Place { piece_id, origin } = action;
        let result = self.preview(piece_id, &origin, rng)?;

        let mut next = self.clone();
        let mut events = vec![GameEvent::PiecePlaced {
            piece_id,
            cells: result.placed_cell_ids.clone(),
        }];

        next.board = result.board;
        next.moves += 1;
        next.score += result.score.points_gained;

        if result.cleared_patterns.is_empty() {
            next.streak = 0;
        } else {
            next.streak += 1;
            events.push(GameEvent::PatternsCleared {
                patterns: result
                    .cleared_patterns
                    .iter()
                    .map(|p| (p.id.clone(), p.kind))
                    .collect(),
                cells: result.cleared_cell_ids.clone(),
            });
            events.push(GameEvent::PointsScored {
                points: result.score.points_gained,
                combo_multiplier: result.score.combo_multiplier,
                streak_multiplier: result.score.streak_multiplier,
                total: next.score,
            });
        }

        for (cell, before) in &self.daily_hits {
            let remaining = result.daily_hits.get(cell).copied().unwrap_or(0);
            if remaining < *before {
                events.push(GameEvent::DailyTargetHit {
                    cell: cell.clone(),
                    remaining,
                });
            }
        }
        next.daily_hits = result.daily_hits;
        next.daily_remaining_hits = result.daily_remaining_hits;
        next.daily_completed = result.daily_completed;
        if next.daily_completed && !self.daily_completed {
            info!(moves = next.moves, score = next.score, "daily puzzle completed");
            events.push(GameEvent::DailyCompleted {
                moves: next.moves,
                score: next.score,
            });
        }

        if result.golden_cleared {
            if let Some(from) = &self.golden_cell_id {
                events.push(GameEvent::GoldenCellMoved {
                    from: from.clone(),
                    to: result.golden_cell_id.clone(),
                });
            }
        }
        next.golden_cell_id = result.golden_cell_id;

        next.hand.retain(|p| p.id != piece_id);
        for slot in next.hand_slots.iter_mut() {
            if *slot == Some(piece_id) {
                *slot = None;
            }
        }

        if next.hand.is_empty() && !next.daily_completed {
            let hand = next.deal_next_hand(rng);
            events.push(GameEvent::HandDealt {
                piece_ids: hand.iter().map(|p| p.id).collect(),
            });
            next.set_hand(hand);
        }

        if next.daily_completed || !has_any_valid_move(&next.board, &next.hand) {
            next.game_over = true;
            info!(score = next.score, moves = next.moves, mode = ?next.mode, "game over");
            events.push(GameEvent::GameOver {
                score: next.score,
                moves: next.moves,
            });
        }

        Ok((next, events))
    }

    fn deal_next_hand<R: RandomSource>(&mut self, rng: &mut R) -> Vec<ActivePiece> {
        let config = DealConfig::default();
        match self.mode {
            GameMode::Endless => deal_playable_hand(&self.board, &config, rng),
            GameMode::Daily => {
                let deal = self.daily_hand_deals;
                let hand = match (self.daily_rng.as_mut(), self.daily_seed) {
                    (Some(stream), Some(seed)) => {
                        let mut hand = deal_playable_hand(&self.board, &config, stream);
                        assign_daily_ids(&mut hand, seed, deal);
                        hand
                    }
                    (Some(stream), None) => deal_playable_hand(&self.board, &config, stream),
                    (None, Some(seed)) => {
                        deal_daily_hand(topology(), &self.board, seed, self.daily_hand_deals)
                    }
                    (None, None) => deal_playable_hand(&self.board, &config, rng),
                };
                self.daily_hand_deals += 1;
                hand
            }
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string(self).map_err(|e| GameError::InvalidJson(e.to_string()))
    }

    /// Restore from JSON produced by [`GameState::to_json`]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let state: GameState =
            serde_json::from_str(json).map_err(|e| GameError::InvalidJson(e.to_string()))?;
        if !state.board.matches_topology(topology()) {
            return Err(GameError::InvalidJson(
                "board cells do not match the topology".to_string(),
            ));
        }
        Ok(state)
    }
}
