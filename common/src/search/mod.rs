//! Solving strategies and the driver that runs them.
//!
//! Every strategy takes a grid with unknown cells and either resolves all of
//! them in place or reports that it found no assignment, leaving the grid as it
//! was. [`solve`] wraps a strategy with the shared pre-checks: input
//! validation, a working copy and the propagation pass.

mod backtrack;
mod clause_search;
mod enumerate;
mod sat;
mod selection;

use log::{debug, info, warn};

use crate::check;
use crate::error::SolveError;
use crate::grid::Grid;
use crate::propagate::propagate;

pub use backtrack::{Backtracking, Pruning, ValueOrder};
pub use clause_search::ClauseSearch;
pub use enumerate::{DEFAULT_ENUMERATION_LIMIT, Enumeration};
pub use sat::{SatBackend, SatStrategy, Varisat};
pub use selection::{ClueAdjacency, RowMajor, Selection};

pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Resolves every unknown cell of `grid`. Returns `Ok(false)`, with the
    /// grid unchanged, when no satisfying assignment was found.
    fn run(&mut self, grid: &mut Grid) -> Result<bool, SolveError>;
}

/// The two terminal results of a search that did not hit an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Grid),
    NoSolution,
}

impl Outcome {
    pub fn grid(&self) -> Option<&Grid> {
        match self {
            Outcome::Solved(grid) => Some(grid),
            Outcome::NoSolution => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    /// Run the propagation pass before handing the grid to the strategy.
    pub propagate: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions { propagate: true }
    }
}

/// Node and backtrack counters of a depth-first search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub backtracks: u64,
}

/// Runs `strategy` on a copy of `grid`.
///
/// A grid failing the pre-validity check is rejected before any work is done.
/// If propagation alone exposes a contradiction the puzzle has no solution and
/// the strategy is not consulted.
pub fn solve(
    grid: &Grid,
    strategy: &mut dyn Strategy,
    options: &SolveOptions,
) -> Result<Outcome, SolveError> {
    if let Some(violation) = check::find_violation(grid) {
        warn!("{}: grid is invalid: {violation}", strategy.name());
        return Err(SolveError::InvalidGrid(violation));
    }

    let mut working = grid.clone();
    if options.propagate {
        propagate(&mut working);
        if let Some(violation) = check::find_violation(&working) {
            info!("{}: propagation reached a contradiction: {violation}", strategy.name());
            return Ok(Outcome::NoSolution);
        }
    }
    debug!(
        "{}: {} unknown cells left to search",
        strategy.name(),
        working.count_unknown()
    );

    if strategy.run(&mut working)? {
        debug_assert!(working.is_resolved() && check::is_valid(&working));
        info!("{}: solution found", strategy.name());
        Ok(Outcome::Solved(working))
    } else {
        info!("{}: no solution found", strategy.name());
        Ok(Outcome::NoSolution)
    }
}

/// The strategies selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum StrategyKind {
    Sat,
    Enumerate,
    Backtrack,
    ClauseSearch,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Sat,
        StrategyKind::Enumerate,
        StrategyKind::Backtrack,
        StrategyKind::ClauseSearch,
    ];

    pub fn build(self, config: &StrategyConfig) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Sat => Box::new(SatStrategy::new(Varisat)),
            StrategyKind::Enumerate => Box::new(Enumeration::with_limit(config.enumeration_limit)),
            StrategyKind::Backtrack => {
                let selection: Box<dyn Selection> = match config.order {
                    SelectionKind::RowMajor => Box::new(RowMajor),
                    SelectionKind::ClueAdjacency => Box::new(ClueAdjacency::default()),
                };
                Box::new(
                    Backtracking::new(selection)
                        .with_values(config.values)
                        .with_pruning(config.pruning),
                )
            }
            StrategyKind::ClauseSearch => Box::new(ClauseSearch::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SelectionKind {
    #[default]
    RowMajor,
    ClueAdjacency,
}

/// Knobs shared by [`StrategyKind::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyConfig {
    pub order: SelectionKind,
    pub values: ValueOrder,
    pub pruning: Pruning,
    pub enumeration_limit: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            order: SelectionKind::default(),
            values: ValueOrder::default(),
            pruning: Pruning::default(),
            enumeration_limit: DEFAULT_ENUMERATION_LIMIT,
        }
    }
}
