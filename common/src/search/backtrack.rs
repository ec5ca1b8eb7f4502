use log::debug;

use crate::check;
use crate::error::SolveError;
use crate::grid::{Cell, Grid, Point};

use super::{SearchStats, Selection, Strategy};

/// Which value a cell is tried with first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueOrder {
    #[default]
    GemFirst,
    TrapFirst,
}

impl ValueOrder {
    fn values(self) -> [Cell; 2] {
        match self {
            ValueOrder::GemFirst => [Cell::Gem, Cell::Trap],
            ValueOrder::TrapFirst => [Cell::Trap, Cell::Gem],
        }
    }
}

/// How much of the grid is re-checked after each tentative assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pruning {
    /// Partial check over every clue.
    #[default]
    Global,
    /// Partial check over the clues next to the assigned cell only.
    Local,
}

/// Depth-first search over the unknown cells of the grid itself, no CNF.
///
/// Each tentative assignment is followed by a partial consistency check and
/// undone when both values fail beneath it.
pub struct Backtracking {
    selection: Box<dyn Selection>,
    values: ValueOrder,
    pruning: Pruning,
    stats: SearchStats,
}

impl Backtracking {
    pub fn new(selection: impl Selection + 'static) -> Self {
        Backtracking {
            selection: Box::new(selection),
            values: ValueOrder::default(),
            pruning: Pruning::default(),
            stats: SearchStats::default(),
        }
    }

    pub fn with_values(mut self, values: ValueOrder) -> Self {
        self.values = values;
        self
    }

    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Counters of the last run.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn is_consistent(&self, grid: &Grid, assigned: Point) -> bool {
        match self.pruning {
            Pruning::Global => check::is_valid_partial(grid),
            Pruning::Local => check::is_consistent_around(grid, assigned),
        }
    }

    fn search(&mut self, grid: &mut Grid) -> bool {
        let Some(point) = self.selection.select(grid) else {
            return check::is_valid(grid);
        };
        debug_assert_eq!(grid.get(point), Cell::Unknown);
        self.stats.nodes += 1;

        for value in self.values.values() {
            grid.set(point, value);
            if self.is_consistent(grid, point) && self.search(grid) {
                return true;
            }
        }

        grid.set(point, Cell::Unknown);
        self.stats.backtracks += 1;
        false
    }
}

impl Strategy for Backtracking {
    fn name(&self) -> &'static str {
        "backtrack"
    }

    fn run(&mut self, grid: &mut Grid) -> Result<bool, SolveError> {
        self.stats = SearchStats::default();
        // Local pruning only looks at clues next to new assignments, so the
        // starting grid has to be consistent everywhere.
        if !check::is_valid_partial(grid) {
            return Ok(false);
        }

        self.selection.prepare(grid);
        let found = self.search(grid);
        debug!(
            "backtrack: {} nodes, {} backtracks",
            self.stats.nodes, self.stats.backtracks
        );
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ClueAdjacency, RowMajor};

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn test_value_order_decides_which_solution_is_found() {
        let mut gem_first = grid("_,1,_");
        assert!(Backtracking::new(RowMajor).run(&mut gem_first).unwrap());
        assert_eq!(gem_first, grid("G,1,T"));

        let mut trap_first = grid("_,1,_");
        let mut strategy = Backtracking::new(RowMajor).with_values(ValueOrder::TrapFirst);
        assert!(strategy.run(&mut trap_first).unwrap());
        assert_eq!(trap_first, grid("T,1,G"));
    }

    #[test]
    fn test_exhausted_search_restores_grid() {
        let original = grid("1,_,0\nG,G,G");
        let mut g = original.clone();
        let mut strategy = Backtracking::new(RowMajor);
        assert!(!strategy.run(&mut g).unwrap());
        assert_eq!(g, original);
        assert_eq!(strategy.stats().backtracks, 1);
    }

    #[test]
    fn test_inconsistent_start_is_rejected() {
        let original = grid("1,T,_\nT,_,_");
        let mut g = original.clone();
        let mut strategy = Backtracking::new(RowMajor).with_pruning(Pruning::Local);
        assert!(!strategy.run(&mut g).unwrap());
        assert_eq!(g, original);
        assert_eq!(strategy.stats(), SearchStats::default());
    }

    #[test]
    fn test_orders_and_pruning_agree_on_a_unique_puzzle() {
        // Corner 3s pin down every cell.
        let puzzle = grid("3,_,_,3\n_,_,_,_\n_,_,_,_\n3,_,_,3");
        let expected = grid("3,T,T,3\nT,T,T,T\nT,T,T,T\n3,T,T,3");
        for pruning in [Pruning::Global, Pruning::Local] {
            let mut g = puzzle.clone();
            let mut row_major = Backtracking::new(RowMajor).with_pruning(pruning);
            assert!(row_major.run(&mut g).unwrap());
            assert_eq!(g, expected);

            let mut g = puzzle.clone();
            let mut adjacency = Backtracking::new(ClueAdjacency::default()).with_pruning(pruning);
            assert!(adjacency.run(&mut g).unwrap());
            assert_eq!(g, expected);
        }
    }

    #[test]
    fn test_stats_count_nodes_per_run() {
        let puzzle = grid("_,_,_,_,_,_\n_,_,_,_,_,_\n_,_,_,_,2,_");
        let mut strategy = Backtracking::new(ClueAdjacency::default());

        let mut g = puzzle.clone();
        assert!(strategy.run(&mut g).unwrap());
        assert!(check::is_valid(&g));
        let first = strategy.stats();
        // Every cell is decided once; the pruning never has to undo a cell.
        assert_eq!(first.nodes, 17);
        assert_eq!(first.backtracks, 0);

        let mut g = puzzle.clone();
        assert!(strategy.run(&mut g).unwrap());
        assert_eq!(strategy.stats(), first);
    }
}
