//! Hand dealing.
//!
//! A hand is three pieces drawn uniformly from the catalog. The only bias is
//! a soft cap on heavy hands: a 4-cell piece is redrawn while it would push
//! the hand's running size total over the budget, up to a retry limit.
//!
//! Random draws are consumed in a fixed order per slot: shape picks (first
//! pick plus any redraws), then one rotation pick. Seeded streams rely on it.

use crate::board::BoardState;
use crate::placement::has_any_valid_move;
use crate::rng::RandomSource;
use crate::shapes::{all_piece_shapes, ActivePiece, PieceShape, MAX_PIECE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Pieces per hand
pub const HAND_SIZE: usize = 3;

/// Tunables for dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealConfig {
    /// Full hands to try before settling for an unplayable one
    pub max_attempts: usize,
    /// Running size total a 4-cell piece should not push the hand past
    pub heavy_piece_budget: usize,
    /// Redraws per slot before a heavy piece is accepted anyway
    pub heavy_retry_limit: usize,
}

impl Default for DealConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            heavy_piece_budget: 10,
            heavy_retry_limit: 20,
        }
    }
}

impl DealConfig {
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

fn pick_shape<'a, R: RandomSource>(deck: &'a [PieceShape], rng: &mut R) -> &'a PieceShape {
    &deck[rng.pick_index(deck.len())]
}

/// Deal one hand, playable or not.
pub fn deal_hand<R: RandomSource>(config: &DealConfig, rng: &mut R) -> Vec<ActivePiece> {
    let deck = all_piece_shapes();
    let mut hand = Vec::with_capacity(HAND_SIZE);
    let mut running_total = 0;

    for _ in 0..HAND_SIZE {
        let mut shape = pick_shape(deck, rng);
        let mut retries = 0;
        while shape.size == MAX_PIECE_SIZE
            && running_total + shape.size > config.heavy_piece_budget
            && retries < config.heavy_retry_limit
        {
            shape = pick_shape(deck, rng);
            retries += 1;
        }

        let rotation = rng.pick_index(6) as u8;
        running_total += shape.size;
        hand.push(ActivePiece::new(shape, rotation));
    }

    hand
}

/// Whether `piece` has at least one legal origin on `board`.
pub fn piece_fits(board: &BoardState, piece: &ActivePiece) -> bool {
    has_any_valid_move(board, std::slice::from_ref(piece))
}

/// Deal hands until one has a piece that fits on `board`.
///
/// Returns the last hand dealt if `config.max_attempts` runs out.
pub fn deal_playable_hand<R: RandomSource>(
    board: &BoardState,
    config: &DealConfig,
    rng: &mut R,
) -> Vec<ActivePiece> {
    let mut hand = Vec::new();
    for attempt in 1..=config.max_attempts.max(1) {
        hand = deal_hand(config, rng);
        if hand.iter().any(|piece| piece_fits(board, piece)) {
            debug!(attempt, "dealt playable hand");
            return hand;
        }
    }
    warn!(
        attempts = config.max_attempts,
        "no playable hand found, keeping the last one"
    );
    hand
}
