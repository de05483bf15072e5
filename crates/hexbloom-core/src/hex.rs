//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the foundational coordinate types for the board:
//! - `HexCoord`: an axial position on the infinite hex grid
//! - `Direction`: the six unit steps between neighboring hexes
//! - `CellId`: the canonical `"q,r"` string key that identifies board cells
//!
//! We use axial coordinates because they make neighbor calculations elegant and
//! rotations about the origin a two-term formula.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the six unit steps on the hex grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// (1, 0)
    East,
    /// (1, -1)
    NorthEast,
    /// (0, -1)
    NorthWest,
    /// (-1, 0)
    West,
    /// (-1, 1)
    SouthWest,
    /// (0, 1)
    SouthEast,
}

impl Direction {
    /// All directions, starting from East
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// The three axes lines are walked along. Each axis is covered once.
    pub const PRIMARY: [Direction; 3] = [Direction::East, Direction::NorthEast, Direction::NorthWest];

    /// Unit offset `(dq, dr)` for this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (0, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (0, 1),
        }
    }

    /// The direction pointing the other way
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::West => Direction::East,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Component-wise sum, used to move a relative offset onto an origin
    pub const fn offset_by(&self, other: HexCoord) -> HexCoord {
        HexCoord::new(self.q + other.q, self.r + other.r)
    }

    /// The six neighboring hexes in `Direction::ALL` order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }

    /// Get the neighbor in a specific direction
    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        let (dq, dr) = direction.offset();
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Rotate one sixth-turn about the origin.
    pub const fn rotate(&self) -> HexCoord {
        HexCoord::new(-self.r, self.q + self.r)
    }

    /// Rotate `turns` sixth-turns about the origin.
    pub fn rotated(&self, turns: u8) -> HexCoord {
        (0..turns % 6).fold(*self, |coord, _| coord.rotate())
    }

    /// Mirror across the q = r axis (swaps q and r, keeps s).
    pub const fn reflect(&self) -> HexCoord {
        HexCoord::new(self.r, self.q)
    }

    /// Canonical cell key for this coordinate
    pub fn id(&self) -> CellId {
        CellId::from(*self)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Error returned when a cell key is not of the form `"q,r"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed cell id: {0:?}")]
pub struct ParseCellIdError(pub String);

/// Canonical `"q,r"` key for a board cell.
///
/// Cell identity and equality go through this key only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the key back into a coordinate
    pub fn coord(&self) -> Result<HexCoord, ParseCellIdError> {
        self.0.parse()
    }
}

impl From<HexCoord> for CellId {
    fn from(coord: HexCoord) -> Self {
        CellId(coord.to_string())
    }
}

impl FromStr for HexCoord {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseCellIdError(s.to_string());
        let (q, r) = s.split_once(',').ok_or_else(malformed)?;
        let q = q.trim().parse().map_err(|_| malformed())?;
        let r = r.trim().parse().map_err(|_| malformed())?;
        Ok(HexCoord::new(q, r))
    }
}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<HexCoord>().map(CellId::from)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hex_neighbors() {
        let center = HexCoord::new(0, 0);
        let neighbors = center.neighbors();

        // Should have 6 unique neighbors
        let unique: HashSet<_> = neighbors.iter().collect();
        assert_eq!(unique.len(), 6);

        for neighbor in &neighbors {
            assert_eq!(center.distance_to(neighbor), 1);
        }
    }

    #[test]
    fn test_direction_offsets_match_unit_vectors() {
        let offsets: Vec<_> = Direction::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(
            offsets,
            vec![(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)]
        );
    }

    #[test]
    fn test_opposite_direction_cancels() {
        let origin = HexCoord::new(2, -1);
        for dir in Direction::ALL {
            assert_eq!(origin.neighbor(dir).neighbor(dir.opposite()), origin);
        }
    }

    #[test]
    fn test_hex_distance() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(2, -1);
        assert_eq!(a.distance_to(&b), 2);

        let c = HexCoord::new(-3, 3);
        assert_eq!(a.distance_to(&c), 3);
    }

    #[test]
    fn test_rotation_cycles_through_neighbors() {
        let east = HexCoord::new(1, 0);
        let ring: Vec<_> = (0..6).map(|t| east.rotated(t)).collect();
        assert_eq!(
            ring,
            vec![
                HexCoord::new(1, 0),
                HexCoord::new(0, 1),
                HexCoord::new(-1, 1),
                HexCoord::new(-1, 0),
                HexCoord::new(0, -1),
                HexCoord::new(1, -1),
            ]
        );
        assert_eq!(east.rotated(6), east);
    }

    #[test]
    fn test_rotation_preserves_distance() {
        let a = HexCoord::new(3, -1);
        for t in 0..6 {
            assert_eq!(a.rotated(t).distance_to(&HexCoord::default()), 3);
        }
    }

    #[test]
    fn test_reflect_is_involution() {
        let a = HexCoord::new(2, -5);
        assert_eq!(a.reflect().reflect(), a);
        assert_eq!(a.reflect().s(), a.s());
    }

    #[test]
    fn test_cell_id_round_trip() {
        let coord = HexCoord::new(-3, 2);
        let id = coord.id();
        assert_eq!(id.as_str(), "-3,2");
        assert_eq!(id.coord(), Ok(coord));
        assert_eq!("-3,2".parse::<CellId>(), Ok(id));
    }

    #[test]
    fn test_malformed_cell_id_is_rejected() {
        assert!("3".parse::<HexCoord>().is_err());
        assert!("a,b".parse::<HexCoord>().is_err());
    }
}
