#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Preference-side machinery: domain tables, constraints, the feasibility
//! closure and the Pareto-optimal engine.

/// The feasibility closure builder.
pub mod closure;

/// Tagged implication constraints and immutable constraint sets.
pub mod constraint;

/// Preference spaces and outcomes.
pub mod domain;

/// The Pareto-optimal engine and its builder.
pub mod engine;

/// The default candidate-branch producer.
pub mod forest;

/// Single-slot lazy memoization.
pub mod lazy;

/// External capability traits: knowledge base, dominance, branch producer.
pub mod oracle;

/// The domain-value / literal / external-identifier table.
pub mod table;
