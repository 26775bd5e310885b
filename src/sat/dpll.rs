#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A built-in DPLL-style model enumerator.
//!
//! This is the bundled [`SatOracle`] implementation: a plain backtracking
//! search over the dense variable space `1..=num_vars` that collects every
//! satisfying assignment. Branches are abandoned as soon as some clause has
//! all of its literals assigned false. The constraint formulas produced by
//! the preference engine are small (one variable per domain value), so no
//! watched-literal machinery is needed here; production deployments can
//! substitute a full solver behind the same trait.

use crate::error::{PreferenceError, Result};
use crate::sat::clause::Clause;
use crate::sat::cnf::Formula;
use crate::sat::model::Model;
use crate::sat::solver::SatOracle;

/// A backtracking SAT oracle that enumerates all models of a formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct DpllOracle;

impl DpllOracle {
    /// Recursive backtracking search. Variables are assigned in index order;
    /// a literal is decided once its variable index is below `next`.
    /// Returns `true` when `limit` models have been collected.
    fn search(
        clauses: &[&Clause],
        num_vars: u32,
        next: u32,
        assignment: &mut [bool],
        models: &mut Vec<Model>,
        limit: usize,
    ) -> bool {
        if Self::has_conflict(clauses, next, assignment) {
            return false;
        }
        if next > num_vars {
            #[allow(clippy::cast_possible_wrap)]
            let literals = (1..=num_vars).map(|v| {
                let lit = v as i32;
                if assignment[v as usize] { lit } else { -lit }
            });
            models.push(Model::from_valid(literals));
            return models.len() >= limit;
        }
        for polarity in [true, false] {
            assignment[next as usize] = polarity;
            if Self::search(clauses, num_vars, next + 1, assignment, models, limit) {
                return true;
            }
        }
        false
    }

    /// Returns `true` if some clause has every literal assigned false under
    /// the partial assignment of variables `1..next`.
    fn has_conflict(clauses: &[&Clause], next: u32, assignment: &[bool]) -> bool {
        clauses.iter().any(|clause| {
            clause.iter().all(|lit| {
                let var = lit.unsigned_abs();
                var < next && assignment[var as usize] != lit.is_positive()
            })
        })
    }

    fn enumerate(formula: &Formula, num_vars: u32, limit: usize) -> Result<Vec<Model>> {
        let clauses: Vec<&Clause> = formula.clauses().collect();
        for clause in &clauses {
            if clause.is_empty() {
                return Ok(Vec::new());
            }
            if let Some(lit) = clause.iter().find(|l| l.unsigned_abs() > num_vars) {
                return Err(PreferenceError::UnknownLiteral(lit));
            }
        }
        let mut assignment = vec![false; num_vars as usize + 1];
        let mut models = Vec::new();
        Self::search(&clauses, num_vars, 1, &mut assignment, &mut models, limit);
        Ok(models)
    }
}

impl SatOracle for DpllOracle {
    fn solve(&self, formula: &Formula, num_vars: u32) -> Result<Vec<Model>> {
        Self::enumerate(formula, num_vars, usize::MAX)
    }

    fn is_satisfiable(&self, formula: &Formula) -> Result<bool> {
        Ok(!Self::enumerate(formula, formula.max_variable(), 1)?.is_empty())
    }
}
