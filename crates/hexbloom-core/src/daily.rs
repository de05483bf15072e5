//! Date-seeded daily puzzle generation.
//!
//! The calendar date is hashed into a seed, the seed drives a [`DailyRng`],
//! and the stream is consumed in this order:
//! 1. For each non-central rosette, in layout order: one draw for the target
//!    cell (index into center-then-neighbors), one draw for its hit count.
//! 2. Hand dealing, as documented in [`crate::dealer`].
//!
//! Two implementations fed the same date therefore agree on the whole puzzle.

use crate::board::{BoardState, Topology};
use crate::dealer::{deal_playable_hand, DealConfig};
use crate::hex::CellId;
use crate::rng::{DailyRng, RandomSource};
use crate::shapes::ActivePiece;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Smallest starting hit count for a numbered cell
pub const MIN_TARGET_HITS: u32 = 2;

/// Number of distinct hit counts, `MIN_TARGET_HITS..MIN_TARGET_HITS + HIT_CHOICES`
pub const HIT_CHOICES: usize = 3;

/// Draws skipped per earlier hand when rebuilding a later daily hand
pub const DRAWS_PER_PRIOR_HAND: usize = 1000;

/// A local calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DailyDate {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DailyDateError {
    #[error("expected YYYY-MM-DD, got {0:?}")]
    Malformed(String),
    #[error("{0} is not a calendar date")]
    OutOfRange(String),
}

impl DailyDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Today on the local clock
    pub fn today() -> Self {
        Self::from(Local::now().date_naive())
    }

    /// Seed derived from the date's `YYYY-MM-DD` key
    pub fn seed(&self) -> i32 {
        string_hash(&self.to_string())
    }
}

impl From<NaiveDate> for DailyDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DailyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for DailyDate {
    type Err = DailyDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| DailyDateError::Malformed(s.to_string()))?;
        if date.year() < 0 {
            return Err(DailyDateError::OutOfRange(s.to_string()));
        }
        Ok(Self::from(date))
    }
}

/// Polynomial string hash: `hash = hash * 31 + code_unit`, wrapping at 32 bits.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Index of the rosette whose mean coordinate is closest to the origin.
pub fn central_rosette(topology: &Topology) -> usize {
    let distance = |(q, r): (f64, f64)| q * q + q * r + r * r;
    topology
        .rosettes()
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            distance(a.average_coord()).total_cmp(&distance(b.average_coord()))
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Piece id for `slot` of the `deal`-th hand (0 = opening) of the puzzle `seed`.
///
/// Built from the arguments alone so that ids never consume draws from the
/// daily stream.
pub fn daily_piece_id(seed: i32, deal: u32, slot: usize) -> Uuid {
    Uuid::from_u128(((seed as u32 as u128) << 64) | ((deal as u128) << 8) | slot as u128)
}

/// Replace the ids of a freshly dealt daily hand with [`daily_piece_id`]s.
pub fn assign_daily_ids(hand: &mut [ActivePiece], seed: i32, deal: u32) {
    for (slot, piece) in hand.iter_mut().enumerate() {
        piece.id = daily_piece_id(seed, deal, slot);
    }
}

/// Numbered target cells of a daily puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub hits: BTreeMap<CellId, u32>,
    pub total_hits: u32,
}

/// One numbered cell in every rosette except the central one.
pub fn generate_targets<R: RandomSource>(topology: &Topology, rng: &mut R) -> DailyTargets {
    let central = central_rosette(topology);
    let mut hits = BTreeMap::new();

    for (index, rosette) in topology.rosettes().iter().enumerate() {
        if index == central {
            continue;
        }
        let cell = rosette.cell_ids[rng.pick_index(rosette.cell_ids.len())].clone();
        let count = MIN_TARGET_HITS + rng.pick_index(HIT_CHOICES) as u32;
        hits.insert(cell, count);
    }

    let total_hits = hits.values().sum();
    DailyTargets { hits, total_hits }
}

/// Draws `generate_targets` consumes on `topology`
pub fn target_draw_count(topology: &Topology) -> usize {
    topology.rosettes().len().saturating_sub(1) * 2
}

/// A generated daily puzzle: targets on a board, the opening hand, and the
/// stream position after dealing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPuzzle {
    pub seed: i32,
    pub targets: DailyTargets,
    pub board: BoardState,
    pub hand: Vec<ActivePiece>,
    pub rng: DailyRng,
}

/// Build the puzzle for `seed`.
pub fn generate_daily_puzzle(topology: &Topology, seed: i32, config: &DealConfig) -> DailyPuzzle {
    let mut rng = DailyRng::new(seed);
    let targets = generate_targets(topology, &mut rng);

    let mut board = BoardState::empty(topology);
    for id in targets.hits.keys() {
        board.fill(id);
    }

    let mut hand = deal_playable_hand(&board, config, &mut rng);
    assign_daily_ids(&mut hand, seed, 0);
    debug!(
        seed,
        targets = targets.hits.len(),
        total_hits = targets.total_hits,
        "generated daily puzzle"
    );

    DailyPuzzle {
        seed,
        targets,
        board,
        hand,
        rng,
    }
}

/// Rebuild a daily hand from the seed alone.
///
/// Skips the target draws, then a fixed block of [`DRAWS_PER_PRIOR_HAND`]
/// per earlier hand. This matches the opening hand exactly; later hands are
/// an approximation, since the real draws per hand depend on retries. Games
/// that keep their [`DailyRng`] should continue it instead.
pub fn deal_daily_hand(
    topology: &Topology,
    board: &BoardState,
    seed: i32,
    hand_deal_count: u32,
) -> Vec<ActivePiece> {
    let mut rng = DailyRng::new(seed);
    rng.skip(target_draw_count(topology));
    rng.skip(DRAWS_PER_PRIOR_HAND * hand_deal_count as usize);
    let mut hand = deal_playable_hand(board, &DealConfig::default(), &mut rng);
    assign_daily_ids(&mut hand, seed, hand_deal_count);
    hand
}
