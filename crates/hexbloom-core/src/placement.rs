//! Placement validation and the placement/clear state transition.
//!
//! `apply_placement` never touches the state it is given: it works on a copy
//! of the board and hands every updated field back in a [`PlacementResult`].
//! An illegal move is `None`, never a panic or an error.

use crate::board::{find_clears, topology, BoardState, Pattern, Topology};
use crate::game::{GameMode, GameState};
use crate::golden::spawn_golden_cell;
use crate::hex::CellId;
use crate::rng::RandomSource;
use crate::scoring::{score, ScoreBreakdown, ScoreInput};
use crate::shapes::{ActivePiece, PieceShape};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a placement changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Board after filling and clearing
    pub board: BoardState,
    /// Cells the piece covered, before any clear
    pub placed_cell_ids: Vec<CellId>,
    pub cleared_cell_ids: Vec<CellId>,
    pub cleared_patterns: Vec<Pattern>,
    pub score: ScoreBreakdown,
    pub daily_hits: BTreeMap<CellId, u32>,
    pub daily_remaining_hits: u32,
    pub daily_completed: bool,
    pub golden_cell_id: Option<CellId>,
    pub golden_cleared: bool,
}

impl PlacementResult {
    pub fn points_gained(&self) -> u32 {
        self.score.points_gained
    }

    pub fn cleared_anything(&self) -> bool {
        !self.cleared_patterns.is_empty()
    }
}

/// Cells `shape` would cover with its origin on `origin`, in shape order.
///
/// `None` if the origin is not a board cell, or if any target is off the
/// board or already filled.
pub fn can_place_piece(
    board: &BoardState,
    shape: &PieceShape,
    origin: &CellId,
) -> Option<Vec<CellId>> {
    board.get(origin)?;
    let origin = origin.coord().ok()?;

    let mut targets = Vec::with_capacity(shape.cells.len());
    for offset in &shape.cells {
        let id = CellId::from(origin.offset_by(*offset));
        if !board.is_empty_cell(&id) {
            return None;
        }
        targets.push(id);
    }
    Some(targets)
}

/// Every origin cell at which `shape` fits on `board`.
pub fn valid_origins(board: &BoardState, shape: &PieceShape) -> Vec<CellId> {
    board
        .iter()
        .map(|(id, _)| id)
        .filter(|id| can_place_piece(board, shape, id).is_some())
        .cloned()
        .collect()
}

/// Whether any piece in `hand` has a legal origin on `board`.
pub fn has_any_valid_move(board: &BoardState, hand: &[ActivePiece]) -> bool {
    hand.iter().any(|piece| {
        board
            .iter()
            .any(|(id, _)| can_place_piece(board, &piece.shape, id).is_some())
    })
}

/// Place `piece` with its origin on `origin` and resolve clears.
pub fn apply_placement<R: RandomSource>(
    state: &GameState,
    piece: &ActivePiece,
    origin: &CellId,
    rng: &mut R,
) -> Option<PlacementResult> {
    apply_placement_on(topology(), state, piece, origin, rng)
}

/// [`apply_placement`] against an explicit topology.
pub fn apply_placement_on<R: RandomSource>(
    topology: &Topology,
    state: &GameState,
    piece: &ActivePiece,
    origin: &CellId,
    rng: &mut R,
) -> Option<PlacementResult> {
    let placed_cell_ids = can_place_piece(&state.board, &piece.shape, origin)?;

    let mut board = state.board.clone();
    for id in &placed_cell_ids {
        board.fill(id);
    }

    let clears = find_clears(topology, &board);

    let mut daily_hits = state.daily_hits.clone();
    let mut daily_remaining_hits = state.daily_remaining_hits;
    let mut daily_completed = state.daily_completed;

    if clears.is_empty() {
        return Some(PlacementResult {
            board,
            placed_cell_ids,
            cleared_cell_ids: Vec::new(),
            cleared_patterns: Vec::new(),
            score: ScoreBreakdown::none(),
            daily_hits,
            daily_remaining_hits,
            daily_completed,
            golden_cell_id: state.golden_cell_id.clone(),
            golden_cleared: false,
        });
    }

    if state.mode == GameMode::Daily {
        let before = daily_remaining_hits;
        for (id, hits) in daily_hits.iter_mut() {
            let taken = clears.pattern_count(id) as u32;
            *hits = hits.saturating_sub(taken);
        }
        daily_hits.retain(|_, hits| *hits > 0);
        daily_remaining_hits = daily_hits.values().sum();
        if before > 0 && daily_remaining_hits == 0 {
            daily_completed = true;
        }
    }

    for id in &clears.cell_ids {
        board.clear(id);
    }
    for id in daily_hits.keys() {
        board.fill(id);
    }

    let mut golden_cell_id = state.golden_cell_id.clone();
    let mut golden_cleared = false;
    if state.mode == GameMode::Endless {
        match &state.golden_cell_id {
            Some(golden) if clears.contains_cell(golden) => {
                golden_cleared = true;
                let forbidden = topology.rosettes_of(golden);
                golden_cell_id = spawn_golden_cell(topology, &board, &forbidden, rng);
            }
            Some(_) => {}
            // A clear may have opened room for a golden cell that found none before
            None => golden_cell_id = spawn_golden_cell(topology, &board, &[], rng),
        }
    }

    let board_cleared = !state.board.is_empty() && board.is_empty();
    let score = score(ScoreInput {
        clear_count: clears.patterns.len(),
        streak: state.streak,
        board_cleared,
        golden_cleared,
    });

    Some(PlacementResult {
        board,
        placed_cell_ids,
        cleared_cell_ids: clears.cell_ids,
        cleared_patterns: clears.patterns,
        score,
        daily_hits,
        daily_remaining_hits,
        daily_completed,
        golden_cell_id,
        golden_cleared,
    })
}
