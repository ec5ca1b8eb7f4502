//! Grid to CNF translation.
//!
//! Every unknown cell becomes a boolean variable (true = trap) and every clue
//! becomes an "exactly a of n" constraint over the variables around it, where
//! `a` is the clue value minus the traps already on the grid. The constraint is
//! spelled out with plain clause families, no auxiliary counting variables:
//!
//! - at least `a`: every subset of size `n - a + 1` contains a trap,
//! - at most `a`: every subset of size `a + 1` contains a gem.

use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;
use log::debug;

use crate::error::{ClueViolation, Unsatisfiable};
use crate::grid::{Cell, Grid, Point};

/// A signed variable id. Positive means "is a trap", negative "is a gem".
pub type Lit = i32;

/// 1-based variable id.
pub type Var = usize;

/// A disjunction of literals, sorted by variable with no repeats.
pub type Clause = Vec<Lit>;

pub fn to_var(lit: Lit) -> Var {
    lit.unsigned_abs() as Var
}

/// A clause set over the dense variable range `1..=var_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    pub var_count: usize,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    /// Evaluates a total assignment. `assignment[v - 1]` holds variable `v`.
    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|&lit| eval(assignment, lit)))
    }
}

pub(crate) fn eval(assignment: &[bool], lit: Lit) -> bool {
    assignment[to_var(lit) - 1] == (lit > 0)
}

/// Bidirectional map between unknown cells and the variables standing for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarMap {
    points: Vec<Point>,
    vars: HashMap<Point, Var>,
}

impl VarMap {
    /// Numbers the unknown cells of `grid` in row-major order, starting at 1.
    pub fn new(grid: &Grid) -> Self {
        let points: Vec<Point> = grid.unknowns().collect();
        let vars = points
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, i + 1))
            .collect();
        VarMap { points, vars }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn var(&self, point: Point) -> Option<Var> {
        self.vars.get(&point).copied()
    }

    pub fn point(&self, var: Var) -> Point {
        self.points[var - 1]
    }

    /// `(var, point)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Var, Point)> + '_ {
        self.points.iter().enumerate().map(|(i, &p)| (i + 1, p))
    }
}

/// The compiled form of a grid: its clauses and the variable numbering they use.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub cnf: Cnf,
    pub vars: VarMap,
}

impl Encoding {
    /// Writes a truth assignment back onto the grid it was compiled from.
    /// Variables the assignment does not cover become gems.
    pub fn apply(&self, grid: &mut Grid, assignment: &[bool]) {
        for (var, point) in self.vars.iter() {
            let is_trap = assignment.get(var - 1).copied().unwrap_or(false);
            grid.set(point, if is_trap { Cell::Trap } else { Cell::Gem });
        }
    }
}

/// Compiles the clues of `grid` into a deduplicated clause set.
///
/// Fails on the first clue whose remaining trap count cannot be met by its
/// unknown neighbours.
pub fn compile(grid: &Grid) -> Result<Encoding, Unsatisfiable> {
    let vars = VarMap::new(grid);
    let mut clauses = BTreeSet::new();

    for (point, k) in grid.clues() {
        let counts = grid.neighbor_counts(point);
        let lits: Vec<Lit> = grid
            .neighbors(point)
            .filter_map(|n| vars.var(n))
            .map(|v| v as Lit)
            .collect();

        let adjusted = k as isize - counts.traps as isize;
        if adjusted < 0 || adjusted > lits.len() as isize {
            return Err(Unsatisfiable(ClueViolation {
                point,
                clue: k,
                traps: counts.traps,
                unknowns: lits.len(),
            }));
        }
        encode_exactly_k(&mut clauses, &lits, adjusted as usize);
    }

    let cnf = Cnf {
        var_count: vars.len(),
        clauses: clauses.into_iter().collect(),
    };
    debug!(
        "compiled {} variables into {} clauses",
        cnf.var_count,
        cnf.clauses.len()
    );
    Ok(Encoding { cnf, vars })
}

/// Encodes an "exactly k" constraint. `k` must lie in `0..=lits.len()`.
fn encode_exactly_k(clauses: &mut BTreeSet<Clause>, lits: &[Lit], k: usize) {
    let n = lits.len();
    debug_assert!(k <= n);
    if n == 0 {
        return;
    }
    if k == 0 {
        // All must be gems.
        for &lit in lits {
            insert(clauses, vec![-lit]);
        }
    } else if k == n {
        // All must be traps.
        for &lit in lits {
            insert(clauses, vec![lit]);
        }
    } else {
        encode_at_least_k(clauses, lits, k);
        encode_at_most_k(clauses, lits, k);
    }
}

fn encode_at_least_k(clauses: &mut BTreeSet<Clause>, lits: &[Lit], k: usize) {
    for combo in lits.iter().copied().combinations(lits.len() - k + 1) {
        insert(clauses, combo);
    }
}

fn encode_at_most_k(clauses: &mut BTreeSet<Clause>, lits: &[Lit], k: usize) {
    for combo in lits.iter().copied().combinations(k + 1) {
        insert(clauses, combo.into_iter().map(|lit| -lit).collect());
    }
}

/// Canonicalises a clause before inserting it, so that the same literal set
/// produced by two overlapping clues is stored once.
fn insert(clauses: &mut BTreeSet<Clause>, mut clause: Clause) {
    clause.sort_by_key(|&lit| (to_var(lit), lit));
    clause.dedup();
    clauses.insert(clause);
}
