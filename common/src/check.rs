//! Validity predicates over a grid.
//!
//! Every predicate walks the clue cells and compares the clue value with the
//! trap and unknown counts around it. None of them fail: the caller decides
//! whether `false` means "reject the input" or "prune this branch".

use crate::error::ClueViolation;
use crate::grid::{Grid, Point};

/// Full check: every clue sees exactly its value in trap neighbours.
///
/// The grid must be fully resolved. An unknown cell left around a clue is a
/// caller bug: debug builds panic on it, release builds report the grid as
/// invalid.
pub fn is_valid(grid: &Grid) -> bool {
    grid.clues().all(|(point, k)| {
        let counts = grid.neighbor_counts(point);
        debug_assert_eq!(
            counts.unknowns, 0,
            "full check on unresolved neighbourhood of {point}"
        );
        counts.unknowns == 0 && counts.traps == k as usize
    })
}

/// Partial check: no clue has more traps than its value, and every clue can
/// still reach its value with the unknowns left around it.
pub fn is_valid_partial(grid: &Grid) -> bool {
    find_violation(grid).is_none()
}

/// The partial check restricted to the clues adjacent to `point`.
///
/// Assigning `point` can only affect those clues, so this is enough when the
/// rest of the grid was already known to be consistent.
pub fn is_consistent_around(grid: &Grid, point: Point) -> bool {
    grid.neighbors(point)
        .all(|neighbor| match grid.get(neighbor).clue_value() {
            Some(k) => violation_at(grid, neighbor, k).is_none(),
            None => true,
        })
}

/// Rejects a puzzle that cannot be solved before any encoding work begins.
pub fn check_grid_validity(grid: &Grid) -> bool {
    is_valid_partial(grid)
}

/// First clue, in row-major order, that the partial check fails on.
pub fn find_violation(grid: &Grid) -> Option<ClueViolation> {
    grid.clues()
        .find_map(|(point, k)| violation_at(grid, point, k))
}

fn violation_at(grid: &Grid, point: Point, clue: u8) -> Option<ClueViolation> {
    let counts = grid.neighbor_counts(point);
    let k = clue as usize;
    if counts.traps > k || counts.traps + counts.unknowns < k {
        Some(ClueViolation {
            point,
            clue,
            traps: counts.traps,
            unknowns: counts.unknowns,
        })
    } else {
        None
    }
}
