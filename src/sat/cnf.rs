#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Boolean formulas in conjunctive normal form.
//!
//! Two variants are provided: [`Formula`], a single-owner mutable formula,
//! and [`SyncFormula`], which accepts clause additions from multiple threads
//! and hands out atomic snapshots. Both use set semantics: adding a clause
//! that is already present leaves the formula unchanged.

use crate::error::Result;
use crate::sat::clause::{Clause, Lit};
use rustc_hash::FxHashSet;
use std::sync::{Mutex, PoisonError};

/// A boolean formula in conjunctive normal form, owned by a single caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    clauses: FxHashSet<Clause>,
}

impl Formula {
    /// Creates an empty formula.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the specified clause.
    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.insert(clause);
    }

    /// Adds the negation of the specified clause: one unit clause per
    /// negated literal (De Morgan's law).
    pub fn add_negated_clause(&mut self, clause: &Clause) {
        for lit in clause.iter() {
            self.clauses.insert(Clause::from_valid([-lit]));
        }
    }

    /// Adds a trivial clause consisting of the specified literal.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PreferenceError::ZeroLiteral`] if `lit` is 0.
    pub fn add_literal(&mut self, lit: Lit) -> Result<()> {
        self.clauses.insert(Clause::unit(lit)?);
        Ok(())
    }

    /// Iterates over the clauses of the current snapshot. The iterator is
    /// finite and restartable.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Returns the number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if the formula holds no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns `true` if the formula contains the given clause.
    #[must_use]
    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    /// Returns the highest variable index mentioned by any clause.
    #[must_use]
    pub fn max_variable(&self) -> u32 {
        self.clauses
            .iter()
            .map(Clause::max_variable)
            .max()
            .unwrap_or(0)
    }
}

impl Extend<Clause> for Formula {
    fn extend<T: IntoIterator<Item = Clause>>(&mut self, iter: T) {
        self.clauses.extend(iter);
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

/// A formula safe for concurrent clause addition.
///
/// All mutations go through an internal mutex; [`SyncFormula::snapshot`] and
/// [`SyncFormula::len`] observe an atomic view of the clause set.
#[derive(Debug, Default)]
pub struct SyncFormula {
    inner: Mutex<Formula>,
}

impl SyncFormula {
    /// Creates an empty thread-safe formula.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the specified clause.
    pub fn add_clause(&self, clause: Clause) {
        self.lock().add_clause(clause);
    }

    /// Adds the negation of the specified clause (De Morgan's law), as a
    /// single atomic update.
    pub fn add_negated_clause(&self, clause: &Clause) {
        self.lock().add_negated_clause(clause);
    }

    /// Returns the number of clauses at this instant.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the formula holds no clauses at this instant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns an independent copy of the current clause set.
    #[must_use]
    pub fn snapshot(&self) -> Formula {
        self.lock().clone()
    }

    /// Consumes the wrapper and returns the accumulated formula.
    #[must_use]
    pub fn into_inner(self) -> Formula {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Formula> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
