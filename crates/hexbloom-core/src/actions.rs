//! Player actions and the events they produce.

use crate::board::PatternKind;
use crate::hex::CellId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Drop a hand piece with its origin on a board cell
    Place { piece_id: Uuid, origin: CellId },
}

impl GameAction {
    pub fn place(piece_id: Uuid, origin: CellId) -> Self {
        GameAction::Place { piece_id, origin }
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A piece was placed
    PiecePlaced {
        piece_id: Uuid,
        cells: Vec<CellId>,
    },

    /// One or more patterns completed and were emptied
    PatternsCleared {
        patterns: Vec<(String, PatternKind)>,
        cells: Vec<CellId>,
    },

    /// Points were awarded
    PointsScored {
        points: u32,
        combo_multiplier: f64,
        streak_multiplier: f64,
        total: u32,
    },

    /// The golden cell was cleared and moved
    GoldenCellMoved {
        from: CellId,
        to: Option<CellId>,
    },

    /// A numbered daily cell lost hits
    DailyTargetHit {
        cell: CellId,
        remaining: u32,
    },

    /// Every numbered daily cell reached zero
    DailyCompleted { moves: u32, score: u32 },

    /// A fresh hand was dealt
    HandDealt { piece_ids: Vec<Uuid> },

    /// No piece in hand fits anymore, or the daily puzzle is done
    GameOver { score: u32, moves: u32 },
}
