//! Golden cell placement for endless mode.
//!
//! The golden cell roams: when it is cleared it is awarded and immediately
//! moved somewhere else, never into the rosette it was just cleared from.

use crate::board::{find_clears, BoardState, Topology};
use crate::hex::CellId;
use crate::rng::RandomSource;
use tracing::{debug, warn};

/// Pick a cell for the golden marker.
///
/// Cells are tried in shuffled order. A filled cell is always accepted since
/// marking it changes no occupancy. An empty cell is accepted only if filling
/// it would not complete a pattern. Cells inside any of `forbidden_rosettes`
/// are skipped. Falls back to any filled, allowed cell, then to `None`.
pub fn spawn_golden_cell<R: RandomSource>(
    topology: &Topology,
    board: &BoardState,
    forbidden_rosettes: &[usize],
    rng: &mut R,
) -> Option<CellId> {
    let is_forbidden = |id: &CellId| {
        topology
            .rosettes_of(id)
            .iter()
            .any(|r| forbidden_rosettes.contains(r))
    };

    let mut candidates: Vec<&CellId> = topology.cell_ids().collect();
    rng.shuffle(&mut candidates);

    for id in &candidates {
        if is_forbidden(id) {
            continue;
        }
        if board.is_filled(id) {
            return Some((*id).clone());
        }

        let mut trial = board.clone();
        trial.fill(id);
        if find_clears(topology, &trial).is_empty() {
            return Some((*id).clone());
        }
    }

    let fallback = topology
        .cell_ids()
        .find(|id| board.is_filled(id) && !is_forbidden(id))
        .cloned();
    match &fallback {
        Some(id) => debug!(cell = %id, "golden cell fell back to a filled cell"),
        None => warn!("no cell available for the golden cell"),
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::topology;
    use crate::rng::EntropyRng;

    #[test]
    fn test_spawns_on_empty_board() {
        let topo = topology();
        let board = BoardState::empty(topo);
        let mut rng = EntropyRng::seeded(1);
        let cell = spawn_golden_cell(topo, &board, &[], &mut rng);
        assert!(cell.is_some_and(|id| topo.contains(&id)));
    }

    #[test]
    fn test_never_spawns_in_forbidden_rosette() {
        let topo = topology();
        let board = BoardState::empty(topo);
        for seed in 0..50 {
            let mut rng = EntropyRng::seeded(seed);
            let cell = spawn_golden_cell(topo, &board, &[0, 3], &mut rng).unwrap();
            let rosettes = topo.rosettes_of(&cell);
            assert!(!rosettes.contains(&0) && !rosettes.contains(&3));
        }
    }

    #[test]
    fn test_never_completes_a_pattern() {
        let topo = topology();
        let mut board = BoardState::empty(topo);
        // Leave one hole in every flower
        for rosette in topo.rosettes() {
            for id in &rosette.cell_ids[1..] {
                board.fill(id);
            }
        }

        for seed in 0..50 {
            let mut rng = EntropyRng::seeded(seed);
            let cell = spawn_golden_cell(topo, &board, &[], &mut rng).unwrap();
            let mut trial = board.clone();
            trial.fill(&cell);
            assert!(find_clears(topo, &trial).is_empty());
        }
    }

    #[test]
    fn test_all_forbidden_yields_none() {
        let topo = topology();
        let board = BoardState::empty(topo);
        let all: Vec<usize> = (0..topo.rosettes().len()).collect();
        let mut rng = EntropyRng::seeded(9);
        assert_eq!(spawn_golden_cell(topo, &board, &all, &mut rng), None);
    }
}
