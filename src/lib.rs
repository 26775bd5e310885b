#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(missing_docs)]
//! Computes the Pareto-optimal outcomes of a conditional preference network
//! (CP-net) restricted to outcomes that are feasible under a background
//! knowledge base.
//!
//! Preference and feasibility constraints are encoded as boolean formulas in
//! conjunctive normal form over a dense signed-literal space. The feasibility
//! closure is derived incrementally by filtering candidate clauses through an
//! external entailment oracle, and the final outcome set is computed by the
//! HARD-PARETO algorithm: three satisfiability problems plus a pairwise
//! dominance fallback for unresolved outcomes.
//!
//! Knowledge-base reasoning, SAT solving and CP-net dominance are consumed
//! through capability traits so they can be replaced with test doubles or
//! production reasoners.

/// The `error` module defines the crate-wide error taxonomy.
pub mod error;

/// The `preference` module implements the preference-side machinery: domain
/// tables, constraints, the feasibility closure and the Pareto engine.
pub mod preference;

/// The `sat` module implements the boolean machinery: clauses, CNF formulas,
/// models and the SAT oracle boundary.
pub mod sat;
