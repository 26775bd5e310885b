#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Boolean machinery: clauses, CNF formulas, satisfying models and the SAT
//! oracle boundary.

/// Disjunctions of signed DIMACS literals.
pub mod clause;

/// CNF formulas, in single-owner and thread-safe variants.
pub mod cnf;

/// Built-in backtracking model enumerator.
pub mod dpll;

/// Complete satisfying assignments.
pub mod model;

/// The SAT oracle capability trait.
pub mod solver;
