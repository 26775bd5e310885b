#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Preference variables, their domains, and total outcome assignments.

use crate::error::{PreferenceError, Result};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// One preference variable together with its ordered domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceVariable {
    name: String,
    domain: Vec<String>,
}

impl PreferenceVariable {
    /// Returns the variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the domain values in declaration order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// The set of preference variables of a CP-net, in declaration order.
///
/// Domain values are globally distinct: the same value may not appear under
/// two variables, since each value maps to a single DIMACS literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSpace {
    variables: Vec<PreferenceVariable>,
    value_owner: FxHashMap<String, usize>,
}

impl PreferenceSpace {
    /// Creates a preference space from `(variable, domain)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on duplicate variable names, empty domains, or domain values
    /// shared between variables.
    pub fn new<N: Into<String>>(
        variables: impl IntoIterator<Item = (N, Vec<N>)>,
    ) -> Result<Self> {
        let mut out = Vec::new();
        let mut value_owner = FxHashMap::default();
        for (index, (name, domain)) in variables.into_iter().enumerate() {
            let name = name.into();
            if out.iter().any(|v: &PreferenceVariable| v.name == name) {
                return Err(PreferenceError::DuplicateVariable(name));
            }
            if domain.is_empty() {
                return Err(PreferenceError::EmptyDomain(name));
            }
            let mut values = Vec::with_capacity(domain.len());
            for value in domain {
                let value = value.into();
                if value_owner.insert(value.clone(), index).is_some() {
                    return Err(PreferenceError::DuplicateDomainValue(value));
                }
                values.push(value);
            }
            out.push(PreferenceVariable {
                name,
                domain: values,
            });
        }
        Ok(Self {
            variables: out,
            value_owner,
        })
    }

    /// Returns the number of preference variables.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Iterates over the variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &PreferenceVariable> {
        self.variables.iter()
    }

    /// Iterates over every domain value, variable by variable, in
    /// declaration order. This is the literal-assignment order of the
    /// domain table.
    pub fn domain_values(&self) -> impl Iterator<Item = &str> {
        self.variables
            .iter()
            .flat_map(|v| v.domain.iter().map(String::as_str))
    }

    /// Returns the variable owning `value`, if any.
    #[must_use]
    pub fn variable_of(&self, value: &str) -> Option<&PreferenceVariable> {
        self.value_owner.get(value).map(|&i| &self.variables[i])
    }

    /// Returns the variable named `name`, if any.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&PreferenceVariable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// A total assignment mapping each preference variable to exactly one of its
/// domain values. Outcomes are immutable value objects: equality and hashing
/// follow the assignment content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outcome {
    assignments: BTreeMap<String, String>,
}

impl Outcome {
    /// Creates an outcome over `space` from `(variable, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::InvalidOutcome`] if the assignment is
    /// partial, repeats a variable, names an unknown variable, or assigns a
    /// value outside the variable's domain.
    pub fn new<N: Into<String>>(
        space: &PreferenceSpace,
        assignments: impl IntoIterator<Item = (N, N)>,
    ) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (name, value) in assignments {
            let (name, value) = (name.into(), value.into());
            let Some(variable) = space.variable(&name) else {
                return Err(PreferenceError::InvalidOutcome(format!(
                    "unknown variable '{name}'"
                )));
            };
            if space.variable_of(&value).is_none_or(|owner| owner.name != variable.name) {
                return Err(PreferenceError::InvalidOutcome(format!(
                    "value '{value}' is not in the domain of '{name}'"
                )));
            }
            if map.insert(name.clone(), value).is_some() {
                return Err(PreferenceError::InvalidOutcome(format!(
                    "variable '{name}' assigned twice"
                )));
            }
        }
        if map.len() != space.variable_count() {
            return Err(PreferenceError::InvalidOutcome(format!(
                "expected {} assignments, got {}",
                space.variable_count(),
                map.len()
            )));
        }
        Ok(Self { assignments: map })
    }

    /// Returns the value assigned to `variable`, if present.
    #[must_use]
    pub fn value_of(&self, variable: &str) -> Option<&str> {
        self.assignments.get(variable).map(String::as_str)
    }

    /// Iterates over `(variable, value)` pairs in variable-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> PreferenceSpace {
        PreferenceSpace::new([("A", vec!["a1", "a2"]), ("B", vec!["b1", "b2"])]).unwrap()
    }

    #[test]
    fn test_domain_values_in_declaration_order() {
        let space = space();
        let values: Vec<_> = space.domain_values().collect();
        assert_eq!(values, vec!["a1", "a2", "b1", "b2"]);
        assert_eq!(space.variable_count(), 2);
        assert_eq!(space.variable_of("b1").map(PreferenceVariable::name), Some("B"));
        assert!(space.variable_of("zzz").is_none());
    }

    #[test]
    fn test_duplicate_value_across_variables_rejected() {
        let result = PreferenceSpace::new([("A", vec!["x"]), ("B", vec!["x"])]);
        assert!(matches!(
            result,
            Err(PreferenceError::DuplicateDomainValue(_))
        ));
    }

    #[test]
    fn test_empty_domain_rejected() {
        let result = PreferenceSpace::new([("A", vec![])]);
        assert!(matches!(result, Err(PreferenceError::EmptyDomain(_))));
    }

    #[test]
    fn test_outcome_total_assignment() {
        let space = space();
        let outcome = Outcome::new(&space, [("A", "a1"), ("B", "b2")]).unwrap();
        assert_eq!(outcome.value_of("A"), Some("a1"));
        assert_eq!(outcome.value_of("B"), Some("b2"));
    }

    #[test]
    fn test_outcome_partial_assignment_rejected() {
        let space = space();
        assert!(matches!(
            Outcome::new(&space, [("A", "a1")]),
            Err(PreferenceError::InvalidOutcome(_))
        ));
    }

    #[test]
    fn test_outcome_repeated_variable_rejected() {
        let space = space();
        assert!(matches!(
            Outcome::new(&space, [("A", "a1"), ("A", "a2"), ("B", "b1")]),
            Err(PreferenceError::InvalidOutcome(_))
        ));
    }

    #[test]
    fn test_outcome_foreign_value_rejected() {
        let space = space();
        assert!(matches!(
            Outcome::new(&space, [("A", "b1"), ("B", "b2")]),
            Err(PreferenceError::InvalidOutcome(_))
        ));
    }

    #[test]
    fn test_outcome_equality_by_content() {
        let space = space();
        let a = Outcome::new(&space, [("A", "a1"), ("B", "b1")]).unwrap();
        let b = Outcome::new(&space, [("B", "b1"), ("A", "a1")]).unwrap();
        assert_eq!(a, b);
    }
}
