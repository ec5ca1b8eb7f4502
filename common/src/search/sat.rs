use anyhow::Context;
use log::debug;
use varisat::{CnfFormula, ExtendFormula, Solver};

use crate::encode::{Cnf, compile};
use crate::error::SolveError;
use crate::grid::Grid;

use super::Strategy;

/// An external satisfiability capability.
///
/// Takes a clause set over `1..=cnf.var_count` and returns a total assignment
/// (`assignment[v - 1]` is variable `v`) or `None` when the set is UNSAT.
pub trait SatBackend {
    fn solve(&mut self, cnf: &Cnf) -> anyhow::Result<Option<Vec<bool>>>;
}

/// [`SatBackend`] backed by the `varisat` CDCL solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Varisat;

impl SatBackend for Varisat {
    fn solve(&mut self, cnf: &Cnf) -> anyhow::Result<Option<Vec<bool>>> {
        let mut formula = CnfFormula::new();
        for clause in &cnf.clauses {
            let lits: Vec<varisat::Lit> = clause
                .iter()
                .map(|&lit| varisat::Lit::from_dimacs(lit as isize))
                .collect();
            formula.add_clause(&lits);
        }

        let mut solver = Solver::new();
        solver.add_formula(&formula);

        if !solver.solve()? {
            return Ok(None);
        }

        let model = solver.model().ok_or(anyhow::anyhow!("solver_model_fail"))?;
        // Variables that occur in no clause are missing from the model; they stay false.
        let mut assignment = vec![false; cnf.var_count];
        for lit in model {
            let var = lit.var().to_dimacs() as usize;
            if let Some(value) = assignment.get_mut(var - 1) {
                *value = lit.is_positive();
            }
        }
        Ok(Some(assignment))
    }
}

/// Compiles the grid and hands the clauses to a [`SatBackend`].
#[derive(Debug, Clone, Default)]
pub struct SatStrategy<B> {
    backend: B,
}

impl<B: SatBackend> SatStrategy<B> {
    pub fn new(backend: B) -> Self {
        SatStrategy { backend }
    }
}

impl<B: SatBackend> Strategy for SatStrategy<B> {
    fn name(&self) -> &'static str {
        "sat"
    }

    fn run(&mut self, grid: &mut Grid) -> Result<bool, SolveError> {
        let encoding = compile(grid)?;
        debug!(
            "sat: {} variables, {} clauses",
            encoding.cnf.var_count,
            encoding.cnf.clauses.len()
        );

        let Some(assignment) = self
            .backend
            .solve(&encoding.cnf)
            .context("SAT backend failed")?
        else {
            return Ok(false);
        };
        encoding.apply(grid, &assignment);
        Ok(true)
    }
}
