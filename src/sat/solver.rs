#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The SAT oracle boundary.

use crate::error::Result;
use crate::sat::clause::Clause;
use crate::sat::cnf::Formula;
use crate::sat::model::Model;

/// An external SAT procedure, consumed as an oracle.
///
/// Implementations must be deterministic per call: [`SatOracle::solve`]
/// enumerates the complete model set of the formula each time it is invoked.
pub trait SatOracle {
    /// Returns every complete satisfying assignment of `formula` over the
    /// variables `1..=num_vars`.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying procedure.
    fn solve(&self, formula: &Formula, num_vars: u32) -> Result<Vec<Model>>;

    /// Returns `true` if `formula` has at least one satisfying assignment.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying procedure.
    fn is_satisfiable(&self, formula: &Formula) -> Result<bool> {
        Ok(!self.solve(formula, formula.max_variable())?.is_empty())
    }

    /// Returns `true` if the conjunction of `formula`'s clauses logically
    /// entails `clause`: formula ∧ ¬clause is unsatisfiable.
    ///
    /// This is a pure predicate; the formula is not modified.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying procedure.
    fn implies(&self, formula: &Formula, clause: &Clause) -> Result<bool> {
        let mut refutation = formula.clone();
        refutation.add_negated_clause(clause);
        Ok(!self.is_satisfiable(&refutation)?)
    }
}
