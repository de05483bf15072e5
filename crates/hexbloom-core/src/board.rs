//! Board topology and occupancy.
//!
//! This module contains:
//! - The fixed rosette layout the board is built from
//! - Scoring pattern derivation (rosettes and full-length lines)
//! - `BoardState`, the per-cell empty/filled map
//! - Clear detection shared by placement and the golden cell spawner
//!
//! The topology is computed once and shared through [`topology`].

use crate::hex::{CellId, Direction, HexCoord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

/// Rosette centers. `(0, 0)` plus six satellites; no two rosettes share a
/// cell and every neighboring pair of rosettes touches along exactly three
/// cell edges. Found offline by searching candidate centers.
pub const ROSETTE_CENTERS: [HexCoord; 7] = [
    HexCoord::new(0, 0),
    HexCoord::new(2, 1),
    HexCoord::new(-1, 3),
    HexCoord::new(-3, 2),
    HexCoord::new(-2, -1),
    HexCoord::new(1, -3),
    HexCoord::new(3, -2),
];

/// Cells in one rosette: the center plus its six neighbors
pub const ROSETTE_SIZE: usize = 7;

/// Total number of cells on the board
pub const BOARD_CELL_COUNT: usize = ROSETTE_CENTERS.len() * ROSETTE_SIZE;

/// A board cell. Created once when the topology is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub coord: HexCoord,
}

/// Kind of scoring pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Straight run along one axis
    Line,
    /// Rosette: a center cell and its six neighbors
    Flower,
}

/// A set of cells that clears when every one of them is filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: String,
    pub kind: PatternKind,
    /// For flowers the center comes first
    pub cell_ids: Vec<CellId>,
}

impl Pattern {
    /// Whether every cell of this pattern is filled on `board`
    pub fn is_complete(&self, board: &BoardState) -> bool {
        self.cell_ids.iter().all(|id| board.is_filled(id))
    }

    pub fn contains(&self, id: &CellId) -> bool {
        self.cell_ids.contains(id)
    }
}

/// A rosette of the layout: center plus the cells it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rosette {
    pub center: HexCoord,
    /// Center first, then neighbors in `Direction::ALL` order
    pub cell_ids: Vec<CellId>,
}

impl Rosette {
    fn around(center: HexCoord) -> Self {
        let cell_ids = std::iter::once(center)
            .chain(center.neighbors())
            .map(CellId::from)
            .collect();
        Self { center, cell_ids }
    }

    /// Mean axial coordinate of the rosette's cells
    pub fn average_coord(&self) -> (f64, f64) {
        let (mut q, mut r) = (0.0, 0.0);
        let mut count = 0.0;
        for id in &self.cell_ids {
            if let Ok(coord) = id.coord() {
                q += coord.q as f64;
                r += coord.r as f64;
                count += 1.0;
            }
        }
        if count == 0.0 {
            (0.0, 0.0)
        } else {
            (q / count, r / count)
        }
    }
}

/// Static board facts: cells, rosettes and every derived pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    cells: Vec<Cell>,
    coords: HashMap<CellId, HexCoord>,
    rosettes: Vec<Rosette>,
    /// Flowers first, then every derived line (including short ones)
    patterns: Vec<Pattern>,
    scoring_line_ids: Vec<String>,
    flower_ids: Vec<String>,
}

impl Topology {
    /// Build the board from [`ROSETTE_CENTERS`].
    pub fn build() -> Self {
        Self::from_centers(&ROSETTE_CENTERS)
    }

    /// Build a board as the union of the rosettes around `centers`.
    pub fn from_centers(centers: &[HexCoord]) -> Self {
        let rosettes: Vec<Rosette> = centers.iter().map(|c| Rosette::around(*c)).collect();

        let mut cells = Vec::new();
        let mut coords = HashMap::new();
        for center in centers {
            for coord in std::iter::once(*center).chain(center.neighbors()) {
                let id = CellId::from(coord);
                if !coords.contains_key(&id) {
                    coords.insert(id.clone(), coord);
                    cells.push(Cell { id, coord });
                }
            }
        }

        let mut patterns = Vec::new();
        let mut flower_ids = Vec::new();
        for rosette in &rosettes {
            if rosette.cell_ids.iter().all(|id| coords.contains_key(id)) {
                let id = format!("flower-{}", rosette.center);
                flower_ids.push(id.clone());
                patterns.push(Pattern {
                    id,
                    kind: PatternKind::Flower,
                    cell_ids: rosette.cell_ids.clone(),
                });
            }
        }

        let lines = derive_lines(&cells, &coords);
        let full_length = lines.iter().map(|l| l.cell_ids.len()).max().unwrap_or(0);
        let scoring_line_ids = lines
            .iter()
            .filter(|l| l.cell_ids.len() == full_length)
            .map(|l| l.id.clone())
            .collect();
        patterns.extend(lines);

        Self {
            cells,
            coords,
            rosettes,
            patterns,
            scoring_line_ids,
            flower_ids,
        }
    }

    /// All cells in build order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_ids(&self) -> impl Iterator<Item = &CellId> {
        self.cells.iter().map(|c| &c.id)
    }

    pub fn contains(&self, id: &CellId) -> bool {
        self.coords.contains_key(id)
    }

    /// Coordinate of a board cell, `None` if the id is not on the board
    pub fn coord_of(&self, id: &CellId) -> Option<HexCoord> {
        self.coords.get(id).copied()
    }

    pub fn rosettes(&self) -> &[Rosette] {
        &self.rosettes
    }

    /// Indices of the rosettes that contain `id`
    pub fn rosettes_of(&self, id: &CellId) -> Vec<usize> {
        self.rosettes
            .iter()
            .enumerate()
            .filter(|(_, r)| r.cell_ids.contains(id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Every derived pattern, scoring or not
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Flowers and full-length lines
    pub fn scoring_patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(move |p| match p.kind {
            PatternKind::Flower => true,
            PatternKind::Line => self.scoring_line_ids.contains(&p.id),
        })
    }

    pub fn scoring_line_ids(&self) -> &[String] {
        &self.scoring_line_ids
    }

    pub fn flower_ids(&self) -> &[String] {
        &self.flower_ids
    }

    /// Length a line must have to score: the longest line the layout has.
    pub fn full_line_length(&self) -> usize {
        self.patterns
            .iter()
            .filter(|p| p.kind == PatternKind::Line)
            .map(|p| p.cell_ids.len())
            .max()
            .unwrap_or(0)
    }
}

/// Walk every primary axis from each cell with no predecessor on that axis.
fn derive_lines(cells: &[Cell], coords: &HashMap<CellId, HexCoord>) -> Vec<Pattern> {
    let mut seen: HashSet<Vec<CellId>> = HashSet::new();
    let mut lines = Vec::new();

    for (axis, direction) in Direction::PRIMARY.iter().enumerate() {
        for cell in cells {
            let before = CellId::from(cell.coord.neighbor(direction.opposite()));
            if coords.contains_key(&before) {
                continue;
            }

            let mut run = vec![cell.id.clone()];
            let mut cursor = cell.coord.neighbor(*direction);
            while coords.contains_key(&CellId::from(cursor)) {
                run.push(CellId::from(cursor));
                cursor = cursor.neighbor(*direction);
            }

            if seen.insert(run.clone()) {
                lines.push(Pattern {
                    id: format!("line-{}-{}", axis, cell.coord),
                    kind: PatternKind::Line,
                    cell_ids: run,
                });
            }
        }
    }

    lines
}

static TOPOLOGY: LazyLock<Topology> = LazyLock::new(Topology::build);

/// The process-wide board topology.
pub fn topology() -> &'static Topology {
    &TOPOLOGY
}

/// Occupancy of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    Filled,
}

/// Occupancy of every board cell.
///
/// Holds exactly one entry per topology cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardState {
    cells: BTreeMap<CellId, CellState>,
}

impl BoardState {
    /// Every cell of `topology` empty
    pub fn empty(topology: &Topology) -> Self {
        Self {
            cells: topology
                .cell_ids()
                .map(|id| (id.clone(), CellState::Empty))
                .collect(),
        }
    }

    pub fn get(&self, id: &CellId) -> Option<CellState> {
        self.cells.get(id).copied()
    }

    pub fn is_filled(&self, id: &CellId) -> bool {
        self.get(id) == Some(CellState::Filled)
    }

    pub fn is_empty_cell(&self, id: &CellId) -> bool {
        self.get(id) == Some(CellState::Empty)
    }

    /// Mark a cell filled. Ids not on the board are ignored.
    pub fn fill(&mut self, id: &CellId) {
        if let Some(state) = self.cells.get_mut(id) {
            *state = CellState::Filled;
        }
    }

    /// Mark a cell empty. Ids not on the board are ignored.
    pub fn clear(&mut self, id: &CellId) {
        if let Some(state) = self.cells.get_mut(id) {
            *state = CellState::Empty;
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.values().filter(|s| **s == CellState::Filled).count()
    }

    /// True when no cell is filled
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellId, CellState)> {
        self.cells.iter().map(|(id, s)| (id, *s))
    }

    /// Whether the key set matches `topology` exactly
    pub fn matches_topology(&self, topology: &Topology) -> bool {
        self.cells.len() == topology.cells().len()
            && topology.cell_ids().all(|id| self.cells.contains_key(id))
    }
}

/// Patterns that would clear on a board, and the union of their cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSet {
    pub patterns: Vec<Pattern>,
    /// Distinct cells, in first-seen order
    pub cell_ids: Vec<CellId>,
}

impl ClearSet {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn contains_cell(&self, id: &CellId) -> bool {
        self.cell_ids.contains(id)
    }

    /// Number of clearing patterns `id` belongs to
    pub fn pattern_count(&self, id: &CellId) -> usize {
        self.patterns.iter().filter(|p| p.contains(id)).count()
    }
}

/// Scan every scoring pattern and collect those fully filled on `board`.
pub fn find_clears(topology: &Topology, board: &BoardState) -> ClearSet {
    let mut clears = ClearSet::default();
    let mut seen = HashSet::new();

    for pattern in topology.scoring_patterns() {
        if pattern.is_complete(board) {
            for id in &pattern.cell_ids {
                if seen.insert(id.clone()) {
                    clears.cell_ids.push(id.clone());
                }
            }
            clears.patterns.push(pattern.clone());
        }
    }

    clears
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rosette_cells(center: HexCoord) -> HashSet<HexCoord> {
        std::iter::once(center).chain(center.neighbors()).collect()
    }

    fn touching_pairs(a: HexCoord, b: HexCoord) -> usize {
        let cells_b = rosette_cells(b);
        rosette_cells(a)
            .iter()
            .map(|x| x.neighbors().iter().filter(|n| cells_b.contains(n)).count())
            .sum()
    }

    #[test]
    fn test_board_has_49_cells() {
        let topo = topology();
        assert_eq!(topo.cells().len(), 49);
        assert_eq!(topo.cells().len(), BOARD_CELL_COUNT);
    }

    #[test]
    fn test_seven_flowers_of_seven_cells() {
        let topo = topology();
        let flowers: Vec<_> = topo
            .patterns()
            .iter()
            .filter(|p| p.kind == PatternKind::Flower)
            .collect();
        assert_eq!(flowers.len(), 7);
        assert_eq!(topo.flower_ids().len(), 7);
        for flower in &flowers {
            assert_eq!(flower.cell_ids.len(), 7);
        }
    }

    #[test]
    fn test_flowers_are_disjoint() {
        let topo = topology();
        let mut seen = HashSet::new();
        for flower in topo.patterns().iter().filter(|p| p.kind == PatternKind::Flower) {
            for id in &flower.cell_ids {
                assert!(seen.insert(id.clone()), "{} is in two flowers", id);
            }
        }
    }

    #[test]
    fn test_flower_lists_center_first() {
        let topo = topology();
        let flower = &topo.patterns()[0];
        assert_eq!(flower.cell_ids[0], HexCoord::new(0, 0).id());
    }

    #[test]
    fn test_satellites_touch_center_and_ring_neighbors_along_three_edges() {
        let center = ROSETTE_CENTERS[0];
        let satellites = &ROSETTE_CENTERS[1..];
        for (i, sat) in satellites.iter().enumerate() {
            assert_eq!(touching_pairs(center, *sat), 3);
            let next = satellites[(i + 1) % satellites.len()];
            assert_eq!(touching_pairs(*sat, next), 3);
        }
    }

    #[test]
    fn test_full_line_length_is_computed_as_seven() {
        assert_eq!(topology().full_line_length(), 7);
    }

    #[test]
    fn test_scoring_lines_have_full_length() {
        let topo = topology();
        let lines: Vec<_> = topo
            .scoring_patterns()
            .filter(|p| p.kind == PatternKind::Line)
            .collect();
        assert_eq!(lines.len(), 15);
        for line in lines {
            assert_eq!(line.cell_ids.len(), 7);
        }
    }

    #[test]
    fn test_short_lines_are_not_scoring() {
        let topo = topology();
        let short = topo
            .patterns()
            .iter()
            .filter(|p| p.kind == PatternKind::Line && p.cell_ids.len() < 7)
            .count();
        assert!(short > 0);
        assert_eq!(
            topo.scoring_patterns().count(),
            topo.flower_ids().len() + topo.scoring_line_ids().len()
        );
    }

    #[test]
    fn test_lines_are_unique() {
        let topo = topology();
        let mut seen = HashSet::new();
        for line in topo.patterns().iter().filter(|p| p.kind == PatternKind::Line) {
            assert!(seen.insert(line.cell_ids.clone()));
        }
    }

    #[test]
    fn test_every_line_is_straight() {
        let topo = topology();
        for line in topo.patterns().iter().filter(|p| p.kind == PatternKind::Line) {
            let coords: Vec<_> = line
                .cell_ids
                .iter()
                .map(|id| topo.coord_of(id).unwrap())
                .collect();
            for pair in coords.windows(2) {
                assert_eq!(pair[0].distance_to(&pair[1]), 1);
            }
            if coords.len() > 2 {
                let step = (coords[1].q - coords[0].q, coords[1].r - coords[0].r);
                for pair in coords.windows(2) {
                    assert_eq!((pair[1].q - pair[0].q, pair[1].r - pair[0].r), step);
                }
            }
        }
    }

    #[test]
    fn test_empty_board_matches_topology() {
        let topo = topology();
        let board = BoardState::empty(topo);
        assert!(board.matches_topology(topo));
        assert!(board.is_empty());
        assert_eq!(board.len(), 49);
    }

    #[test]
    fn test_fill_ignores_unknown_cells() {
        let topo = topology();
        let mut board = BoardState::empty(topo);
        board.fill(&HexCoord::new(40, 40).id());
        assert!(board.matches_topology(topo));
        assert!(board.is_empty());
    }

    #[test]
    fn test_find_clears_on_complete_flower() {
        let topo = topology();
        let mut board = BoardState::empty(topo);
        for id in &topo.rosettes()[1].cell_ids {
            board.fill(id);
        }

        let clears = find_clears(topo, &board);
        assert_eq!(clears.patterns.len(), 1);
        assert_eq!(clears.patterns[0].kind, PatternKind::Flower);
        assert_eq!(clears.cell_ids.len(), 7);
    }

    #[test]
    fn test_find_clears_counts_shared_cells_per_pattern() {
        let topo = topology();
        let mut board = BoardState::empty(topo);
        let flower = &topo.rosettes()[0];
        for id in &flower.cell_ids {
            board.fill(id);
        }
        for q in -3..=3 {
            board.fill(&HexCoord::new(q, 0).id());
        }

        let clears = find_clears(topo, &board);
        assert_eq!(clears.patterns.len(), 2);
        assert_eq!(clears.pattern_count(&HexCoord::new(0, 0).id()), 2);
        assert_eq!(clears.pattern_count(&HexCoord::new(3, 0).id()), 1);
        // 7 flower cells + 4 line cells outside the flower
        assert_eq!(clears.cell_ids.len(), 11);
    }

    #[test]
    fn test_rosettes_of_cell() {
        let topo = topology();
        assert_eq!(topo.rosettes_of(&HexCoord::new(0, 0).id()), vec![0]);
        assert_eq!(topo.rosettes_of(&HexCoord::new(2, 1).id()), vec![1]);
        assert!(topo.rosettes_of(&HexCoord::new(9, 9).id()).is_empty());
    }
}
