//! Hexbloom - a hex-grid line and rosette clearing puzzle
//!
//! This crate provides the rules engine for Hexbloom, including:
//! - Axial hex coordinates and the 49-cell rosette board
//! - The catalog of 1-4 cell pieces and hand dealing
//! - Placement, clearing and scoring
//! - The roaming golden cell (endless) and date-seeded puzzles (daily)
//! - A value-style game state machine with bots
//!
//! # Architecture
//!
//! The engine is platform-agnostic and never reads the clock or an ambient
//! RNG on its own: every random decision takes a [`RandomSource`]. It can be
//! compiled to:
//! - Native Rust for headless bot runs
//! - WebAssembly for browser play (`wasm` feature)
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates and cell ids
//! - [`board`]: Board topology, patterns and cell states
//! - [`shapes`]: Piece catalog
//! - [`placement`]: Placement validation and resolution
//! - [`scoring`]: Points, combos and streaks
//! - [`golden`]: Golden cell spawning
//! - [`daily`]: Daily puzzle generation
//! - [`dealer`]: Hand dealing
//! - [`game`]: Game state machine

pub mod actions;
pub mod board;
pub mod bot;
pub mod daily;
pub mod dealer;
pub mod game;
pub mod golden;
pub mod hex;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod shapes;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{find_clears, topology, BoardState, CellState, Pattern, PatternKind, Topology};
pub use bot::{Bot, BotDifficulty};
pub use daily::{deal_daily_hand, generate_daily_puzzle, DailyDate};
pub use dealer::{deal_playable_hand, DealConfig, HAND_SIZE};
pub use game::{
    create_daily_game_state, create_daily_game_state_for, create_empty_board,
    create_initial_game_state, GameError, GameMode, GameState,
};
pub use golden::spawn_golden_cell;
pub use hex::{CellId, Direction, HexCoord};
pub use placement::{apply_placement, can_place_piece, has_any_valid_move, PlacementResult};
pub use rng::{DailyRng, EntropyRng, RandomSource};
pub use scoring::{score, ScoreBreakdown, ScoreInput};
pub use shapes::{all_piece_shapes, ActivePiece, PieceShape};
