use log::debug;

use crate::encode::{Clause, Var, compile, to_var};
use crate::error::SolveError;
use crate::grid::Grid;

use super::{SearchStats, Strategy};

/// Depth-first search over the compiled clauses.
///
/// Variables are decided most referenced first (ties to the lower id), gem
/// before trap. After each decision only the clauses mentioning the decided
/// variable are checked; a clause whose literals are all false ends the branch.
/// No clauses are learned from conflicts.
#[derive(Debug, Clone, Default)]
pub struct ClauseSearch {
    stats: SearchStats,
}

impl ClauseSearch {
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl Strategy for ClauseSearch {
    fn name(&self) -> &'static str {
        "clause-search"
    }

    fn run(&mut self, grid: &mut Grid) -> Result<bool, SolveError> {
        let encoding = compile(grid)?;
        let mut search = Search::new(&encoding.cnf.clauses, encoding.cnf.var_count);

        let found = search.descend(0);
        self.stats = search.stats;
        debug!(
            "clause-search: {} nodes, {} backtracks",
            self.stats.nodes, self.stats.backtracks
        );
        if found {
            let assignment: Vec<bool> = search
                .assignment
                .iter()
                .map(|value| value.unwrap_or(false))
                .collect();
            encoding.apply(grid, &assignment);
        }
        Ok(found)
    }
}

struct Search<'a> {
    clauses: &'a [Clause],
    /// Clause indices per variable, indexed by `var - 1`.
    occurrences: Vec<Vec<usize>>,
    order: Vec<Var>,
    assignment: Vec<Option<bool>>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(clauses: &'a [Clause], var_count: usize) -> Self {
        let mut occurrences = vec![Vec::new(); var_count];
        for (i, clause) in clauses.iter().enumerate() {
            for &lit in clause {
                occurrences[to_var(lit) - 1].push(i);
            }
        }

        let mut order: Vec<Var> = (1..=var_count).collect();
        order.sort_by_key(|&var| std::cmp::Reverse(occurrences[var - 1].len()));

        Search {
            clauses,
            occurrences,
            order,
            assignment: vec![None; var_count],
            stats: SearchStats::default(),
        }
    }

    fn descend(&mut self, depth: usize) -> bool {
        // Every clause was checked when its last variable was decided.
        let Some(&var) = self.order.get(depth) else {
            return true;
        };
        self.stats.nodes += 1;

        for value in [false, true] {
            self.assignment[var - 1] = Some(value);
            if !self.falsifies(var) && self.descend(depth + 1) {
                return true;
            }
        }

        self.assignment[var - 1] = None;
        self.stats.backtracks += 1;
        false
    }

    /// Whether some clause containing `var` now has every literal false.
    fn falsifies(&self, var: Var) -> bool {
        self.occurrences[var - 1].iter().any(|&i| {
            self.clauses[i]
                .iter()
                .all(|&lit| self.assignment[to_var(lit) - 1] == Some(lit < 0))
        })
    }
}
