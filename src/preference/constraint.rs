#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Implication constraints over domain values, and immutable sets thereof.
//!
//! A constraint reads "left implies right": the antecedent is a conjunction
//! of domain-value truth requirements, the consequent a disjunction. Each
//! constraint converts to exactly one CNF clause and, independently, to one
//! knowledge-base axiom through a caller-supplied injection function.

use crate::error::Result;
use crate::preference::table::DomainTable;
use crate::sat::clause::Clause;
use crate::sat::cnf::Formula;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::fmt;

/// The provenance of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    /// Derived from the preference graph's optimum set.
    Optimality,
    /// Derived from the feasibility closure.
    Feasibility,
}

/// A tagged implication constraint between partial truth-assignments of
/// domain values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Constraint {
    kind: ConstraintKind,
    left: BTreeMap<String, bool>,
    right: BTreeMap<String, bool>,
}

impl Constraint {
    /// Creates an optimality constraint.
    pub fn optimality<N: Into<String>>(
        left: impl IntoIterator<Item = (N, bool)>,
        right: impl IntoIterator<Item = (N, bool)>,
    ) -> Self {
        Self::new(ConstraintKind::Optimality, left, right)
    }

    /// Creates a feasibility constraint.
    pub fn feasibility<N: Into<String>>(
        left: impl IntoIterator<Item = (N, bool)>,
        right: impl IntoIterator<Item = (N, bool)>,
    ) -> Self {
        Self::new(ConstraintKind::Feasibility, left, right)
    }

    fn new<N: Into<String>>(
        kind: ConstraintKind,
        left: impl IntoIterator<Item = (N, bool)>,
        right: impl IntoIterator<Item = (N, bool)>,
    ) -> Self {
        Self {
            kind,
            left: left.into_iter().map(|(n, b)| (n.into(), b)).collect(),
            right: right.into_iter().map(|(n, b)| (n.into(), b)).collect(),
        }
    }

    /// Interprets a branch clause as a feasibility constraint: negative
    /// literals become required antecedent values, positive literals become
    /// consequent values.
    ///
    /// # Errors
    ///
    /// Fails if the clause mentions a literal outside the table.
    pub fn feasibility_from_clause(clause: &Clause, table: &DomainTable) -> Result<Self> {
        let mut left = BTreeMap::new();
        let mut right = BTreeMap::new();
        for lit in clause.iter() {
            let value = table.domain_value(lit)?.to_owned();
            if lit < 0 {
                left.insert(value, true);
            } else {
                right.insert(value, true);
            }
        }
        Ok(Self {
            kind: ConstraintKind::Feasibility,
            left,
            right,
        })
    }

    /// Returns the provenance tag.
    #[must_use]
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Returns the antecedent: domain value -> required truth.
    #[must_use]
    pub fn left(&self) -> &BTreeMap<String, bool> {
        &self.left
    }

    /// Returns the consequent: domain value -> required truth.
    #[must_use]
    pub fn right(&self) -> &BTreeMap<String, bool> {
        &self.right
    }

    /// Converts the implication to its CNF form: the negation of every
    /// antecedent requirement, joined with the consequent requirements.
    ///
    /// # Errors
    ///
    /// Fails if a domain value is absent from the table.
    pub fn to_clause(&self, table: &DomainTable) -> Result<Clause> {
        let mut literals = Vec::with_capacity(self.left.len() + self.right.len());
        for (value, &truth) in &self.left {
            let lit = table.positive_literal(value)?;
            literals.push(if truth { -lit } else { lit });
        }
        for (value, &truth) in &self.right {
            let lit = table.positive_literal(value)?;
            literals.push(if truth { lit } else { -lit });
        }
        Clause::new(literals)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |entries: &BTreeMap<String, bool>, joiner: &str| {
            entries
                .iter()
                .map(|(value, &truth)| {
                    if truth {
                        value.clone()
                    } else {
                        format!("not({value})")
                    }
                })
                .join(joiner)
        };
        let left = side(&self.left, " AND ");
        let right = side(&self.right, " OR ");
        if left.is_empty() {
            f.write_str(&right)
        } else {
            write!(f, "{left} IMPLIES {right}")
        }
    }
}

/// An immutable set of constraints, lazily convertible to clauses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstraintSet {
    constraints: FxHashSet<Constraint>,
}

impl ConstraintSet {
    /// Creates a constraint set from the given constraints.
    pub fn new(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self {
            constraints: constraints.into_iter().collect(),
        }
    }

    /// Returns the number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if the set holds no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns `true` if the set contains `constraint`.
    #[must_use]
    pub fn contains(&self, constraint: &Constraint) -> bool {
        self.constraints.contains(constraint)
    }

    /// Iterates over the constraints in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Lazily converts the constraints to clauses over `table`.
    pub fn clauses<'a>(
        &'a self,
        table: &'a DomainTable,
    ) -> impl Iterator<Item = Result<Clause>> + 'a {
        self.constraints.iter().map(|c| c.to_clause(table))
    }

    /// Collects the constraint clauses into a CNF formula.
    ///
    /// # Errors
    ///
    /// Fails if any constraint mentions a domain value absent from `table`.
    pub fn to_formula(&self, table: &DomainTable) -> Result<Formula> {
        self.clauses(table).collect()
    }

    /// Returns the union of this set and `other`. The result may mix
    /// constraint kinds.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            constraints: self
                .constraints
                .union(&other.constraints)
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<Constraint> for ConstraintSet {
    fn from_iter<T: IntoIterator<Item = Constraint>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::domain::PreferenceSpace;
    use crate::preference::table::ExternalId;

    fn table() -> DomainTable {
        let space =
            PreferenceSpace::new([("A", vec!["a1", "a2"]), ("B", vec!["b1", "b2"])]).unwrap();
        DomainTable::build(
            &space,
            |v, s| ExternalId::new(format!("{v}{s}")),
            &FxHashSet::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_to_clause_negates_antecedent() {
        // a1 AND not(a2) IMPLIES b1: clause (-1 v 2 v 3).
        let constraint =
            Constraint::optimality([("a1", true), ("a2", false)], [("b1", true)]);
        let clause = constraint.to_clause(&table()).unwrap();
        assert_eq!(clause, Clause::new([-1, 2, 3]).unwrap());
    }

    #[test]
    fn test_feasibility_from_clause_polarities() {
        let table = table();
        // (-1 v 4): a1 implies b2.
        let clause = Clause::new([-1, 4]).unwrap();
        let constraint = Constraint::feasibility_from_clause(&clause, &table).unwrap();
        assert_eq!(constraint.kind(), ConstraintKind::Feasibility);
        assert_eq!(constraint.left().get("a1"), Some(&true));
        assert_eq!(constraint.right().get("b2"), Some(&true));
        assert_eq!(constraint.to_clause(&table).unwrap(), clause);
    }

    #[test]
    fn test_display_format() {
        let constraint =
            Constraint::optimality([("a1", true), ("a2", false)], [("b1", true)]);
        assert_eq!(constraint.to_string(), "a1 AND not(a2) IMPLIES b1");
        let tautology: Constraint = Constraint::optimality::<&str>([], [("b1", true)]);
        assert_eq!(tautology.to_string(), "b1");
    }

    #[test]
    fn test_set_semantics_and_union() {
        let a = Constraint::optimality::<&str>([], [("a1", true)]);
        let b = Constraint::optimality::<&str>([], [("b1", true)]);
        let set = ConstraintSet::new([a.clone(), a.clone(), b.clone()]);
        assert_eq!(set.len(), 2);
        let union = set.union(&ConstraintSet::new([a, b]));
        assert_eq!(union.len(), 2);
    }

    #[test]
    fn test_unknown_value_fails_conversion() {
        let constraint = Constraint::optimality::<&str>([], [("zzz", true)]);
        assert!(constraint.to_clause(&table()).is_err());
    }
}
