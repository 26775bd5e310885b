#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The equivalency table between domain values, DIMACS literals and external
//! identifiers.
//!
//! For preference variables *A* and *B* with domains `a1, a2, a3` and
//! `b1, b2`, the table has the form:
//!
//! ```text
//! "a1" <-> 1 <-> id("a1")
//! "a2" <-> 2 <-> id("a2")
//! "a3" <-> 3 <-> id("a3")
//! "b1" <-> 4 <-> id("b1")
//! "b2" <-> 5 <-> id("b2")
//! ```
//!
//! The table is built once and never changes afterwards.

use crate::error::{PreferenceError, Result};
use crate::preference::domain::PreferenceSpace;
use crate::sat::clause::Lit;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Suffixes tried, in order, when a generated identifier collides with an
/// existing one.
const DISAMBIGUATION_SUFFIXES: [&str; 4] = ["", "_pref", "_user", "_aug"];

/// An opaque identifier naming a domain value in the external knowledge
/// base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalId(String);

impl ExternalId {
    /// Creates an identifier from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable bijection between domain values, positive DIMACS literals
/// `1..=size` and external identifiers. All lookups are O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTable {
    values: Vec<String>,
    ids: Vec<ExternalId>,
    by_value: FxHashMap<String, u32>,
    by_id: FxHashMap<ExternalId, u32>,
}

impl DomainTable {
    /// Builds the table from the full ordered set of domain values of
    /// `space`, assigning literals in declaration order.
    ///
    /// `policy` maps a domain value and a disambiguation suffix to a
    /// candidate identifier. Candidates colliding with `reserved` or with an
    /// identifier already assigned are retried with the next suffix.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::IdentifierExhausted`] if every suffix
    /// collides for some domain value.
    pub fn build(
        space: &PreferenceSpace,
        policy: impl Fn(&str, &str) -> ExternalId,
        reserved: &FxHashSet<ExternalId>,
    ) -> Result<Self> {
        let mut values = Vec::new();
        let mut ids = Vec::new();
        let mut by_value = FxHashMap::default();
        let mut by_id: FxHashMap<ExternalId, u32> = FxHashMap::default();
        for value in space.domain_values() {
            let literal = u32::try_from(values.len() + 1)
                .map_err(|_| PreferenceError::IdentifierExhausted(value.to_owned()))?;
            let id = DISAMBIGUATION_SUFFIXES
                .iter()
                .map(|suffix| policy(value, suffix))
                .find(|id| !reserved.contains(id) && !by_id.contains_key(id))
                .ok_or_else(|| PreferenceError::IdentifierExhausted(value.to_owned()))?;
            by_value.insert(value.to_owned(), literal);
            by_id.insert(id.clone(), literal);
            values.push(value.to_owned());
            ids.push(id);
        }
        Ok(Self {
            values,
            ids,
            by_value,
            by_id,
        })
    }

    /// Returns the positive literal representing `value`.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::UnknownDomainValue`] if the value is not
    /// in the table.
    #[allow(clippy::cast_possible_wrap)]
    pub fn positive_literal(&self, value: &str) -> Result<Lit> {
        self.by_value
            .get(value)
            .map(|&l| l as Lit)
            .ok_or_else(|| PreferenceError::UnknownDomainValue(value.to_owned()))
    }

    /// Returns the domain value represented by `literal`. A negative literal
    /// is looked up by its absolute value.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::ZeroLiteral`] for literal 0 and
    /// [`PreferenceError::UnknownLiteral`] for an out-of-range literal.
    pub fn domain_value(&self, literal: Lit) -> Result<&str> {
        if literal == 0 {
            return Err(PreferenceError::ZeroLiteral);
        }
        self.values
            .get(literal.unsigned_abs() as usize - 1)
            .map(String::as_str)
            .ok_or(PreferenceError::UnknownLiteral(literal))
    }

    /// Returns the external identifier of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::UnknownDomainValue`] if the value is not
    /// in the table.
    pub fn external_id(&self, value: &str) -> Result<&ExternalId> {
        let literal = self.positive_literal(value)?;
        Ok(&self.ids[literal.unsigned_abs() as usize - 1])
    }

    /// Returns the domain value carrying the external identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::UnknownDomainValue`] if no value carries
    /// the identifier.
    pub fn value_of_id(&self, id: &ExternalId) -> Result<&str> {
        self.by_id
            .get(id)
            .map(|&l| self.values[l as usize - 1].as_str())
            .ok_or_else(|| PreferenceError::UnknownDomainValue(id.to_string()))
    }

    /// Returns the number of mappings, which is also the highest literal.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn size(&self) -> u32 {
        self.values.len() as u32
    }

    /// Iterates over the table's literals, `1..=size`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn literals(&self) -> impl Iterator<Item = Lit> {
        (1..=self.size()).map(|l| l as Lit)
    }

    /// Iterates over the external identifiers in literal order.
    pub fn external_ids(&self) -> impl Iterator<Item = &ExternalId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> PreferenceSpace {
        PreferenceSpace::new([("A", vec!["a1", "a2", "a3"]), ("B", vec!["b1", "b2"])]).unwrap()
    }

    fn plain_policy(value: &str, suffix: &str) -> ExternalId {
        ExternalId::new(format!("{value}{suffix}"))
    }

    fn table() -> DomainTable {
        DomainTable::build(&space(), plain_policy, &FxHashSet::default()).unwrap()
    }

    #[test]
    fn test_round_trip_and_contiguity() {
        let space = space();
        let table = table();
        assert_eq!(table.size(), 5);
        let mut seen = Vec::new();
        for value in space.domain_values() {
            let literal = table.positive_literal(value).unwrap();
            assert_eq!(table.domain_value(literal).unwrap(), value);
            assert_eq!(table.domain_value(-literal).unwrap(), value);
            seen.push(literal);
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(table.literals().collect::<Vec<_>>(), seen);
    }

    #[test]
    fn test_zero_literal_rejected() {
        assert!(matches!(
            table().domain_value(0),
            Err(PreferenceError::ZeroLiteral)
        ));
    }

    #[test]
    fn test_unknown_lookups_fail() {
        let table = table();
        assert!(matches!(
            table.domain_value(6),
            Err(PreferenceError::UnknownLiteral(6))
        ));
        assert!(matches!(
            table.positive_literal("c1"),
            Err(PreferenceError::UnknownDomainValue(_))
        ));
        assert!(matches!(
            table.value_of_id(&ExternalId::new("c1")),
            Err(PreferenceError::UnknownDomainValue(_))
        ));
    }

    #[test]
    fn test_id_lookup_round_trip() {
        let table = table();
        let id = table.external_id("b2").unwrap().clone();
        assert_eq!(id.as_str(), "b2");
        assert_eq!(table.value_of_id(&id).unwrap(), "b2");
    }

    #[test]
    fn test_disambiguation_suffixes() {
        let reserved: FxHashSet<ExternalId> =
            [ExternalId::new("a1"), ExternalId::new("a1_pref")]
                .into_iter()
                .collect();
        let table = DomainTable::build(&space(), plain_policy, &reserved).unwrap();
        assert_eq!(table.external_id("a1").unwrap().as_str(), "a1_user");
        assert_eq!(table.external_id("a2").unwrap().as_str(), "a2");
        assert_eq!(
            table.external_ids().map(ExternalId::as_str).collect::<Vec<_>>(),
            vec!["a1_user", "a2", "a3", "b1", "b2"]
        );
    }

    #[test]
    fn test_identifier_exhaustion_is_fatal() {
        // A constant policy collides on every suffix for the second value.
        let result = DomainTable::build(
            &space(),
            |_, _| ExternalId::new("same"),
            &FxHashSet::default(),
        );
        assert!(matches!(
            result,
            Err(PreferenceError::IdentifierExhausted(_))
        ));
    }
}
