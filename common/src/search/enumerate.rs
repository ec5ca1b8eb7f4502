use log::{debug, warn};

use crate::encode::compile;
use crate::error::SolveError;
use crate::grid::Grid;

use super::Strategy;

pub const DEFAULT_ENUMERATION_LIMIT: usize = 24;

/// Hard ceiling: candidates are counted in a `u64`.
const MAX_ENUMERATION_LIMIT: usize = 63;

/// Tries every assignment in lexicographic order (variable 1 most
/// significant, gem before trap) and keeps the first one that satisfies every
/// clause. No pruning, so it refuses grids with more than `limit` variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enumeration {
    limit: usize,
}

impl Default for Enumeration {
    fn default() -> Self {
        Enumeration {
            limit: DEFAULT_ENUMERATION_LIMIT,
        }
    }
}

impl Enumeration {
    /// `limit` is capped at 63 variables.
    pub fn with_limit(limit: usize) -> Self {
        Enumeration {
            limit: limit.min(MAX_ENUMERATION_LIMIT),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Strategy for Enumeration {
    fn name(&self) -> &'static str {
        "enumerate"
    }

    fn run(&mut self, grid: &mut Grid) -> Result<bool, SolveError> {
        let encoding = compile(grid)?;
        let n = encoding.cnf.var_count;
        if n > self.limit {
            warn!("enumerate: refusing {n} variables, limit is {}", self.limit);
            return Err(SolveError::TooManyVariables {
                count: n,
                limit: self.limit,
            });
        }

        let mut assignment = vec![false; n];
        for candidate in 0..1u64 << n {
            for (i, value) in assignment.iter_mut().enumerate() {
                *value = (candidate >> (n - 1 - i)) & 1 == 1;
            }
            if encoding.cnf.is_satisfied_by(&assignment) {
                debug!("enumerate: candidate {candidate} of {} accepted", 1u64 << n);
                encoding.apply(grid, &assignment);
                return Ok(true);
            }
        }
        debug!("enumerate: all {} candidates rejected", 1u64 << n);
        Ok(false)
    }
}
