//! Polyhex piece catalog.
//!
//! Every connected shape of 1 to 4 hexes, one per equivalence class under the
//! 12-element symmetry group (6 rotations, each optionally mirrored). The
//! catalog is grown breadth-first: each shape of size `n` spawns candidates of
//! size `n + 1` by adding any free neighbor of any of its cells.
//!
//! Dealt pieces may be rotated (see [`PieceShape::rotated`]) but are never
//! mirrored; mirroring only matters for deduplication here.

use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use uuid::Uuid;

/// Largest piece in the catalog
pub const MAX_PIECE_SIZE: usize = 4;

/// A piece outline as offsets from an implicit origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceShape {
    pub id: String,
    pub cells: Vec<HexCoord>,
    pub size: usize,
}

impl PieceShape {
    /// A copy rotated `turns` sixth-turns about the origin.
    pub fn rotated(&self, turns: u8) -> PieceShape {
        PieceShape {
            id: self.id.clone(),
            cells: self.cells.iter().map(|c| c.rotated(turns)).collect(),
            size: self.size,
        }
    }

    /// Canonical key of this outline
    pub fn canonical_key(&self) -> String {
        canonical_key(&self.cells)
    }
}

/// A dealt piece: one catalog shape in a fixed rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    /// Unique per dealt instance
    pub id: Uuid,
    /// Offsets already rotated
    pub shape: PieceShape,
    /// Sixth-turns applied to the catalog shape
    pub rotation: u8,
}

impl ActivePiece {
    pub fn new(shape: &PieceShape, rotation: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape: shape.rotated(rotation),
            rotation: rotation % 6,
        }
    }
}

/// Translate so the minimum `q` and minimum `r` are both zero, then sort.
pub fn normalize(cells: &[HexCoord]) -> Vec<HexCoord> {
    let min_q = cells.iter().map(|c| c.q).min().unwrap_or(0);
    let min_r = cells.iter().map(|c| c.r).min().unwrap_or(0);
    let mut out: Vec<HexCoord> = cells
        .iter()
        .map(|c| HexCoord::new(c.q - min_q, c.r - min_r))
        .collect();
    out.sort();
    out
}

fn encode(cells: &[HexCoord]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// All 12 rotations and reflections of a cell set, each normalized.
pub fn symmetry_variants(cells: &[HexCoord]) -> Vec<Vec<HexCoord>> {
    let mut variants = Vec::with_capacity(12);
    for mirrored in [false, true] {
        for turns in 0..6u8 {
            let transformed: Vec<HexCoord> = cells
                .iter()
                .map(|c| {
                    let base = if mirrored { c.reflect() } else { *c };
                    base.rotated(turns)
                })
                .collect();
            variants.push(normalize(&transformed));
        }
    }
    variants
}

/// Lexicographically smallest encoding among the 12 symmetry variants.
pub fn canonical_key(cells: &[HexCoord]) -> String {
    symmetry_variants(cells)
        .iter()
        .map(|v| encode(v))
        .min()
        .unwrap_or_default()
}

/// Grow the catalog up to `max_size` cells, sorted by ascending size.
pub fn enumerate_shapes(max_size: usize) -> Vec<PieceShape> {
    if max_size == 0 {
        return Vec::new();
    }

    let mut by_size: Vec<Vec<Vec<HexCoord>>> = vec![vec![vec![HexCoord::new(0, 0)]]];
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(canonical_key(&by_size[0][0]));

    for _ in 1..max_size {
        let mut next = Vec::new();
        if let Some(current) = by_size.last() {
            for shape in current {
                let occupied: HashSet<HexCoord> = shape.iter().copied().collect();
                for cell in shape {
                    for neighbor in cell.neighbors() {
                        if occupied.contains(&neighbor) {
                            continue;
                        }
                        let mut grown = shape.clone();
                        grown.push(neighbor);
                        let grown = normalize(&grown);
                        if seen.insert(canonical_key(&grown)) {
                            next.push(grown);
                        }
                    }
                }
            }
        }
        by_size.push(next);
    }

    by_size
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(index, cells)| PieceShape {
            id: format!("hex{}-{}", cells.len(), index),
            size: cells.len(),
            cells,
        })
        .collect()
}

static ALL_PIECE_SHAPES: LazyLock<Vec<PieceShape>> =
    LazyLock::new(|| enumerate_shapes(MAX_PIECE_SIZE));

/// The piece deck: every polyhex of 1 to [`MAX_PIECE_SIZE`] cells.
pub fn all_piece_shapes() -> &'static [PieceShape] {
    &ALL_PIECE_SHAPES
}

/// Look up a catalog shape by id
pub fn shape_by_id(id: &str) -> Option<&'static PieceShape> {
    all_piece_shapes().iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_connected(cells: &[HexCoord]) -> bool {
        let set: HashSet<_> = cells.iter().copied().collect();
        let mut stack = vec![cells[0]];
        let mut visited = HashSet::new();
        while let Some(c) = stack.pop() {
            if !visited.insert(c) {
                continue;
            }
            for n in c.neighbors() {
                if set.contains(&n) {
                    stack.push(n);
                }
            }
        }
        visited.len() == cells.len()
    }

    #[test]
    fn test_catalog_counts_per_size() {
        let shapes = all_piece_shapes();
        let count = |n| shapes.iter().filter(|s| s.size == n).count();
        // Free polyhexes: 1, 1, 3, 7
        assert_eq!(count(1), 1);
        assert_eq!(count(2), 1);
        assert_eq!(count(3), 3);
        assert_eq!(count(4), 7);
        assert_eq!(shapes.len(), 12);
    }

    #[test]
    fn test_catalog_sorted_by_size() {
        let sizes: Vec<_> = all_piece_shapes().iter().map(|s| s.size).collect();
        let mut sorted = sizes.clone();
        sorted.sort();
        assert_eq!(sizes, sorted);
    }

    #[test]
    fn test_no_two_shapes_share_a_symmetry_class() {
        let shapes = all_piece_shapes();
        for (i, a) in shapes.iter().enumerate() {
            let variant_keys: HashSet<String> =
                symmetry_variants(&a.cells).iter().map(|v| encode(v)).collect();
            for b in shapes.iter().skip(i + 1) {
                assert!(
                    !variant_keys.contains(&b.canonical_key()),
                    "{} and {} are the same shape",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_shapes_are_connected_and_sized() {
        for shape in all_piece_shapes() {
            assert_eq!(shape.cells.len(), shape.size);
            assert!(is_connected(&shape.cells), "{} is not connected", shape.id);
        }
    }

    #[test]
    fn test_canonical_key_is_symmetry_invariant() {
        let bent = vec![HexCoord::new(0, 0), HexCoord::new(1, 0), HexCoord::new(1, 1)];
        let key = canonical_key(&bent);
        for variant in symmetry_variants(&bent) {
            assert_eq!(canonical_key(&variant), key);
        }
    }

    #[test]
    fn test_rotation_keeps_class_and_size() {
        for shape in all_piece_shapes() {
            for turns in 0..6 {
                let rotated = shape.rotated(turns);
                assert_eq!(rotated.size, shape.size);
                assert_eq!(rotated.canonical_key(), shape.canonical_key());
            }
        }
    }

    #[test]
    fn test_normalize_moves_minimum_to_origin() {
        let cells = vec![HexCoord::new(3, -2), HexCoord::new(2, -1)];
        assert_eq!(
            normalize(&cells),
            vec![HexCoord::new(0, 1), HexCoord::new(1, 0)]
        );
    }

    #[test]
    fn test_shape_lookup() {
        let first = &all_piece_shapes()[0];
        assert_eq!(shape_by_id(&first.id), Some(first));
        assert!(shape_by_id("nope").is_none());
    }
}
