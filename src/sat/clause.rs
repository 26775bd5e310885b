#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Clauses over signed DIMACS literals.

use crate::error::{PreferenceError, Result};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// A signed DIMACS literal. The absolute value indexes a domain value, the
/// sign encodes polarity. 0 is never a valid literal.
pub type Lit = i32;

/// A disjunction of signed literals.
///
/// Literals are stored sorted and deduplicated, so two clauses compare equal
/// exactly when they contain the same literal set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: SmallVec<[Lit; 8]>,
}

impl Clause {
    /// Creates a clause from the given literals, deduplicating them.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::ZeroLiteral`] if any literal is 0.
    pub fn new(literals: impl IntoIterator<Item = Lit>) -> Result<Self> {
        let mut literals: SmallVec<[Lit; 8]> = literals.into_iter().collect();
        if literals.contains(&0) {
            return Err(PreferenceError::ZeroLiteral);
        }
        literals.sort_unstable();
        literals.dedup();
        Ok(Self { literals })
    }

    /// Creates a unit clause holding the single literal `lit`.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::ZeroLiteral`] if `lit` is 0.
    pub fn unit(lit: Lit) -> Result<Self> {
        Self::new([lit])
    }

    /// Creates a clause from literals already known to be nonzero.
    pub(crate) fn from_valid(literals: impl IntoIterator<Item = Lit>) -> Self {
        let mut literals: SmallVec<[Lit; 8]> = literals.into_iter().collect();
        debug_assert!(!literals.contains(&0));
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// Returns the number of distinct literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` if the clause holds no literals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Iterates over the literals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.literals.iter().copied()
    }

    /// Returns `true` if the clause contains `lit`.
    #[must_use]
    pub fn contains(&self, lit: Lit) -> bool {
        self.literals.contains(&lit)
    }

    /// Returns the highest variable index mentioned by the clause.
    #[must_use]
    pub fn max_variable(&self) -> u32 {
        self.literals
            .iter()
            .map(|l| l.unsigned_abs())
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literals.iter().join(" "))
    }
}
