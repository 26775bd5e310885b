#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Capability traits for the external collaborators of the engine.
//!
//! Each role is an explicit interface injected at construction, so tests can
//! substitute deterministic doubles and production code can plug in real
//! reasoners. Oracle failures are fatal to the calling operation and are
//! never retried here.

use crate::error::Result;
use crate::preference::domain::Outcome;
use crate::sat::clause::Clause;

/// The background knowledge base: consistency checking plus entailment of
/// axioms produced by the caller-supplied injection function.
pub trait KnowledgeBase {
    /// The axiom representation understood by this knowledge base.
    type Axiom;

    /// Returns `true` if the knowledge base is consistent.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying reasoner.
    fn is_consistent(&self) -> Result<bool>;

    /// Returns `true` if the knowledge base entails `axiom`. Invoked once
    /// per non-redundant candidate during closure construction, so it may be
    /// expensive.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying reasoner.
    fn is_entailed(&self, axiom: &Self::Axiom) -> Result<bool>;
}

/// The CP-net dominance relation, supplied by the preference-graph
/// component.
pub trait DominanceOracle {
    /// Returns `true` if outcome `candidate` dominates outcome `other`
    /// under the CP-net semantics.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying dominance test, which may
    /// itself perform fallible I/O.
    fn dominates(&self, candidate: &Outcome, other: &Outcome) -> Result<bool>;
}

/// A stateful process producing candidate branch clauses, driven in a loop
/// until exhausted.
///
/// The callback receives one candidate clause per live branch and returns
/// whether that branch should keep expanding. Implementations may invoke the
/// callback concurrently from multiple threads.
pub trait BranchProducer {
    /// Returns `true` once no live branches remain.
    fn is_exhausted(&self) -> bool;

    /// Expands every live branch once, feeding each candidate clause to
    /// `callback`.
    fn expand<F>(&mut self, callback: F)
    where
        F: Fn(&Clause) -> bool + Sync;
}
