#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Incremental construction of the feasibility closure.
//!
//! The builder consumes candidate branch clauses and keeps exactly those
//! that are entailed by the knowledge base but not already entailed by the
//! clauses accepted so far. The redundancy check runs against the
//! accumulated formula first, so entailed-by-closure candidates never reach
//! the expensive knowledge-base oracle.
//!
//! [`ClosureBuilder::accept`] may be called concurrently: the whole
//! check-then-act sequence runs inside a single mutual-exclusion domain, so
//! two equivalent candidates can never both pass the redundancy check.

use crate::error::{PreferenceError, Result};
use crate::preference::constraint::{Constraint, ConstraintSet};
use crate::preference::oracle::KnowledgeBase;
use crate::preference::table::DomainTable;
use crate::sat::clause::Clause;
use crate::sat::cnf::SyncFormula;
use crate::sat::solver::SatOracle;
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct AcceptState {
    accepted: FxHashSet<Constraint>,
    error: Option<PreferenceError>,
}

/// Accumulates the feasibility closure from candidate branch clauses.
pub struct ClosureBuilder<'a, K, S, J>
where
    K: KnowledgeBase,
    S: SatOracle,
    J: Fn(&Constraint, &DomainTable) -> K::Axiom,
{
    table: &'a DomainTable,
    knowledge_base: &'a K,
    sat: &'a S,
    inject: &'a J,
    formula: SyncFormula,
    state: Mutex<AcceptState>,
}

impl<'a, K, S, J> ClosureBuilder<'a, K, S, J>
where
    K: KnowledgeBase,
    S: SatOracle,
    J: Fn(&Constraint, &DomainTable) -> K::Axiom,
{
    /// Creates an empty builder over the given table and oracles.
    pub fn new(table: &'a DomainTable, knowledge_base: &'a K, sat: &'a S, inject: &'a J) -> Self {
        Self {
            table,
            knowledge_base,
            sat,
            inject,
            formula: SyncFormula::new(),
            state: Mutex::new(AcceptState::default()),
        }
    }

    /// Judges one candidate clause. Returns `true` if the owning branch is
    /// still eligible for further expansion, `false` if the branch should be
    /// pruned: the candidate was redundant, or it was accepted into the
    /// closure (its subtree is already captured).
    ///
    /// Once an oracle has failed, every subsequent candidate is pruned; the
    /// latched error surfaces from [`ClosureBuilder::build`].
    pub fn accept(&self, candidate: &Clause) -> bool {
        let mut state = self.lock();
        if state.error.is_some() {
            return false;
        }
        match self.judge(&mut state, candidate) {
            Ok(eligible) => eligible,
            Err(error) => {
                state.error = Some(error);
                false
            }
        }
    }

    fn judge(&self, state: &mut AcceptState, candidate: &Clause) -> Result<bool> {
        if self.sat.implies(&self.formula.snapshot(), candidate)? {
            trace!("candidate {candidate} redundant, skipping entailment check");
            return Ok(false);
        }
        let constraint = Constraint::feasibility_from_clause(candidate, self.table)?;
        let axiom = (self.inject)(&constraint, self.table);
        if self.knowledge_base.is_entailed(&axiom)? {
            debug!("closure accepts {constraint}");
            self.formula.add_clause(candidate.clone());
            state.accepted.insert(constraint);
            Ok(false)
        } else {
            trace!("candidate {candidate} not entailed, branch stays open");
            Ok(true)
        }
    }

    /// Returns the immutable constraint-set snapshot collected so far.
    ///
    /// # Errors
    ///
    /// Surfaces the first oracle failure observed by [`ClosureBuilder::accept`].
    pub fn build(self) -> Result<ConstraintSet> {
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        match state.error {
            Some(error) => Err(error),
            None => Ok(ConstraintSet::new(state.accepted)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AcceptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
