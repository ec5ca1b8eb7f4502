//! Solver for trap/gem grid puzzles.
//!
//! A grid holds numeric clues, each giving the number of traps among its eight
//! neighbours, and unknown cells that must each become a trap or a gem so that
//! every clue holds. The crate provides the building blocks (consistency
//! checks, a propagation pass, a CNF compiler) and several interchangeable
//! strategies that find a satisfying assignment or prove there is none.

pub mod check;
pub mod encode;
pub mod error;
pub mod grid;
pub mod io;
pub mod propagate;
pub mod samples;
pub mod search;

pub use error::{BadCell, ClueViolation, GridError, SolveError, Unsatisfiable};
pub use grid::{Cell, Grid, Point};
pub use search::{Outcome, SolveOptions, Strategy, StrategyConfig, StrategyKind, solve};
