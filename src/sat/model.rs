#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Satisfying assignments of a CNF formula.

use crate::error::{PreferenceError, Result};
use crate::sat::clause::Lit;

/// One satisfying assignment: a set of signed literals, one per variable
/// index. Literals are stored sorted by variable, so two models compare
/// equal exactly when they assign the same polarities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Model {
    literals: Vec<Lit>,
}

impl Model {
    /// Creates a model from the given literals.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::ZeroLiteral`] if any literal is 0, and
    /// [`PreferenceError::ContradictoryModel`] if both polarities of a
    /// variable are present.
    pub fn new(literals: impl IntoIterator<Item = Lit>) -> Result<Self> {
        let mut literals: Vec<Lit> = literals.into_iter().collect();
        if literals.contains(&0) {
            return Err(PreferenceError::ZeroLiteral);
        }
        literals.sort_unstable_by_key(|l| (l.unsigned_abs(), *l));
        literals.dedup();
        for pair in literals.windows(2) {
            if pair[0].unsigned_abs() == pair[1].unsigned_abs() {
                return Err(PreferenceError::ContradictoryModel(pair[1]));
            }
        }
        Ok(Self { literals })
    }

    /// Creates a model from literals already known to be nonzero and
    /// pairwise distinct in variable.
    pub(crate) fn from_valid(literals: impl IntoIterator<Item = Lit>) -> Self {
        let mut literals: Vec<Lit> = literals.into_iter().collect();
        debug_assert!(!literals.contains(&0));
        literals.sort_unstable_by_key(|l| l.unsigned_abs());
        Self { literals }
    }

    /// Iterates over all literals in variable order.
    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.literals.iter().copied()
    }

    /// Iterates over the positive literals in variable order.
    pub fn positives(&self) -> impl Iterator<Item = Lit> + '_ {
        self.literals.iter().copied().filter(|l| l.is_positive())
    }

    /// Returns the number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` if the model assigns no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let a = Model::new([3, -1, 2]).unwrap();
        let b = Model::new([-1, 2, 3]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![-1, 2, 3]);
    }

    #[test]
    fn test_positives() {
        let model = Model::new([-1, 2, -3, 4]).unwrap();
        assert_eq!(model.positives().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_contradiction_rejected() {
        assert!(matches!(
            Model::new([1, -1]),
            Err(PreferenceError::ContradictoryModel(_))
        ));
    }

    #[test]
    fn test_zero_rejected() {
        assert!(matches!(
            Model::new([0, 1]),
            Err(PreferenceError::ZeroLiteral)
        ));
    }
}
