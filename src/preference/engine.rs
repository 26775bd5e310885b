#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The Pareto-optimal engine: the ontological variant of the HARD-PARETO
//! algorithm.
//!
//! The engine combines three boolean problems over the same literal space:
//! the optimality constraints from the preference graph, the feasibility
//! closure derived from the knowledge base, and their union. When the union
//! models coincide with either side the result is immediate; otherwise the
//! feasible-but-unverified outcomes are checked pairwise against the
//! dominance oracle, and the undominated ones join the result.
//!
//! All collaborators are injected through capability traits at construction
//! time, and every configuration problem is rejected before an engine is
//! handed out.

use crate::error::{PreferenceError, Result};
use crate::preference::closure::ClosureBuilder;
use crate::preference::constraint::{Constraint, ConstraintSet};
use crate::preference::domain::{Outcome, PreferenceSpace};
use crate::preference::forest::PreferenceForest;
use crate::preference::lazy::Lazy;
use crate::preference::oracle::{BranchProducer, DominanceOracle, KnowledgeBase};
use crate::preference::table::{DomainTable, ExternalId};
use crate::sat::model::Model;
use crate::sat::solver::SatOracle;
use log::debug;
use rustc_hash::FxHashSet;

/// Maps a constraint to a knowledge-base axiom. Expected to be pure.
pub type AxiomInjection<A> = fn(&Constraint, &DomainTable) -> A;

/// Computes Pareto-optimal outcomes of a CP-net restricted to the outcomes
/// feasible under a background knowledge base.
pub struct ParetoEngine<K, S, D, J>
where
    K: KnowledgeBase,
    S: SatOracle,
    D: DominanceOracle,
    J: Fn(&Constraint, &DomainTable) -> K::Axiom,
{
    space: PreferenceSpace,
    table: DomainTable,
    knowledge_base: K,
    sat: S,
    dominance: D,
    inject: J,
    optimality: ConstraintSet,
    closure: Lazy<ConstraintSet>,
}

impl<K, S, D, J> ParetoEngine<K, S, D, J>
where
    K: KnowledgeBase + Sync,
    S: SatOracle + Sync,
    D: DominanceOracle,
    J: Fn(&Constraint, &DomainTable) -> K::Axiom + Sync,
{
    /// Returns a builder for an engine over `space`.
    #[must_use]
    pub fn builder(space: PreferenceSpace) -> EngineBuilder<K, S, D, J> {
        EngineBuilder::new(space)
    }

    /// Returns the domain table underlying every clause of this engine.
    #[must_use]
    pub fn domain_table(&self) -> &DomainTable {
        &self.table
    }

    /// Returns the externally supplied optimality constraint set: the
    /// constraints every undominated outcome satisfies.
    #[must_use]
    pub fn optimum_set(&self) -> &ConstraintSet {
        &self.optimality
    }

    /// Returns the injected dominance oracle.
    #[must_use]
    pub fn dominance_oracle(&self) -> &D {
        &self.dominance
    }

    /// Returns the feasibility closure: the minimal constraint set, entailed
    /// by the knowledge base, that feasible outcomes must satisfy. Computed
    /// on first use and cached for the engine's lifetime.
    ///
    /// # Errors
    ///
    /// Propagates oracle failures from the closure construction.
    pub fn closure(&self) -> Result<&ConstraintSet> {
        self.closure.get_or_compute(|| self.compute_closure())
    }

    fn compute_closure(&self) -> Result<ConstraintSet> {
        let builder =
            ClosureBuilder::new(&self.table, &self.knowledge_base, &self.sat, &self.inject);
        let mut forest = PreferenceForest::new(self.table.size());
        while !forest.is_exhausted() {
            forest.expand(|clause| builder.accept(clause));
        }
        builder.build()
    }

    /// Solves a constraint set as a boolean problem over the full literal
    /// space, returning the deduplicated model set.
    ///
    /// # Errors
    ///
    /// Fails on unknown domain values or SAT oracle failure.
    pub fn solve_constraints(&self, constraints: &ConstraintSet) -> Result<FxHashSet<Model>> {
        let formula = constraints.to_formula(&self.table)?;
        Ok(self
            .sat
            .solve(&formula, self.table.size())?
            .into_iter()
            .collect())
    }

    /// Converts a satisfying model into an outcome.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::ModelShape`] when the model's positive
    /// literals do not select exactly one domain value per preference
    /// variable, and [`PreferenceError::UnassignedVariable`] when a variable
    /// is left without a value. Either indicates a bug in formula
    /// construction, not a recoverable condition.
    pub fn interpret_model(&self, model: &Model) -> Result<Outcome> {
        let mut selected: FxHashSet<&str> = FxHashSet::default();
        for lit in model.positives() {
            selected.insert(self.table.domain_value(lit)?);
        }
        if selected.len() != self.space.variable_count() {
            return Err(PreferenceError::ModelShape {
                expected: self.space.variable_count(),
                actual: selected.len(),
            });
        }
        let mut assignments = Vec::with_capacity(self.space.variable_count());
        for variable in self.space.variables() {
            let value = variable
                .domain()
                .iter()
                .find(|v| selected.contains(v.as_str()))
                .ok_or_else(|| PreferenceError::UnassignedVariable(variable.name().to_owned()))?;
            assignments.push((variable.name().to_owned(), value.clone()));
        }
        Outcome::new(&self.space, assignments)
    }

    /// Computes the Pareto-optimal outcome set.
    ///
    /// # Errors
    ///
    /// Propagates closure, SAT and dominance oracle failures, and
    /// model-shape violations.
    pub fn pareto_optimal(&self) -> Result<FxHashSet<Outcome>> {
        let feasibility = self.closure()?;
        let combined = self.optimality.union(feasibility);

        let undominated_models = self.solve_constraints(&self.optimality)?;
        let feasible_models = self.solve_constraints(feasibility)?;
        let pareto_models = self.solve_constraints(&combined)?;

        let feasible_outcomes = self.interpret_all(&feasible_models)?;
        let mut pareto_outcomes = self.interpret_all(&pareto_models)?;

        // Trivial conditions: every feasible outcome is already optimal, or
        // every CP-net-optimal outcome is already feasible.
        if pareto_models == feasible_models
            || (!undominated_models.is_empty() && pareto_models == undominated_models)
        {
            debug!("trivial condition met, skipping dominance fallback");
            return Ok(pareto_outcomes);
        }

        // The unverified outcomes are feasible but not known to be optimal.
        let unverified: Vec<Outcome> = feasible_outcomes
            .difference(&pareto_outcomes)
            .cloned()
            .collect();
        debug!("dominance fallback over {} unverified outcomes", unverified.len());
        for outcome in unverified {
            let mut dominated = false;
            for candidate in &feasible_outcomes {
                if self.dominance.dominates(candidate, &outcome)? {
                    dominated = true;
                    break;
                }
            }
            if !dominated {
                pareto_outcomes.insert(outcome);
            }
        }
        Ok(pareto_outcomes)
    }

    fn interpret_all(&self, models: &FxHashSet<Model>) -> Result<FxHashSet<Outcome>> {
        models.iter().map(|m| self.interpret_model(m)).collect()
    }
}

/// Collects the parameters of a [`ParetoEngine`] and validates them
/// eagerly: missing or doubly-supplied parameters, unknown domain values in
/// the optimality constraints, and inconsistent knowledge bases all fail
/// [`EngineBuilder::build`] before any engine exists.
pub struct EngineBuilder<K, S, D, J>
where
    K: KnowledgeBase,
    S: SatOracle,
    D: DominanceOracle,
    J: Fn(&Constraint, &DomainTable) -> K::Axiom,
{
    space: PreferenceSpace,
    base: Option<K>,
    constrained: Option<K>,
    optimality: Option<ConstraintSet>,
    sat: Option<S>,
    dominance: Option<D>,
    inject: Option<J>,
    id_policy: Option<Box<dyn Fn(&str, &str) -> ExternalId>>,
    reserved: Option<FxHashSet<ExternalId>>,
    duplicate: Option<&'static str>,
}

impl<K, S, D, J> EngineBuilder<K, S, D, J>
where
    K: KnowledgeBase + Sync,
    S: SatOracle + Sync,
    D: DominanceOracle,
    J: Fn(&Constraint, &DomainTable) -> K::Axiom + Sync,
{
    fn new(space: PreferenceSpace) -> Self {
        Self {
            space,
            base: None,
            constrained: None,
            optimality: None,
            sat: None,
            dominance: None,
            inject: None,
            id_policy: None,
            reserved: None,
            duplicate: None,
        }
    }

    /// Sets the base knowledge base, used only for the construction-time
    /// consistency check. Required.
    #[must_use]
    pub fn base_knowledge_base(mut self, base: K) -> Self {
        self.note_duplicate(self.base.is_some(), "base_knowledge_base");
        self.base = Some(base);
        self
    }

    /// Sets the constrained knowledge base the engine reasons against.
    /// Required.
    #[must_use]
    pub fn knowledge_base(mut self, constrained: K) -> Self {
        self.note_duplicate(self.constrained.is_some(), "knowledge_base");
        self.constrained = Some(constrained);
        self
    }

    /// Sets the externally computed optimality constraint set. Required.
    #[must_use]
    pub fn optimality_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.note_duplicate(self.optimality.is_some(), "optimality_constraints");
        self.optimality = Some(constraints);
        self
    }

    /// Sets the SAT oracle. Required.
    #[must_use]
    pub fn sat_oracle(mut self, sat: S) -> Self {
        self.note_duplicate(self.sat.is_some(), "sat_oracle");
        self.sat = Some(sat);
        self
    }

    /// Sets the dominance oracle. Required.
    #[must_use]
    pub fn dominance_oracle(mut self, dominance: D) -> Self {
        self.note_duplicate(self.dominance.is_some(), "dominance_oracle");
        self.dominance = Some(dominance);
        self
    }

    /// Sets the axiom injection function translating constraints into
    /// knowledge-base axioms. Required.
    #[must_use]
    pub fn axiom_injection(mut self, inject: J) -> Self {
        self.note_duplicate(self.inject.is_some(), "axiom_injection");
        self.inject = Some(inject);
        self
    }

    /// Sets the external-identifier generation policy. Optional; by default
    /// the identifier is the domain value plus the disambiguation suffix.
    #[must_use]
    pub fn id_policy(mut self, policy: impl Fn(&str, &str) -> ExternalId + 'static) -> Self {
        self.note_duplicate(self.id_policy.is_some(), "id_policy");
        self.id_policy = Some(Box::new(policy));
        self
    }

    /// Sets the identifiers already taken in the knowledge base. Optional;
    /// defaults to the empty set.
    #[must_use]
    pub fn reserved_ids(mut self, reserved: FxHashSet<ExternalId>) -> Self {
        self.note_duplicate(self.reserved.is_some(), "reserved_ids");
        self.reserved = Some(reserved);
        self
    }

    /// Validates the collected parameters and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for missing or duplicate parameters or
    /// unknown domain values in the optimality constraints, and a
    /// consistency error if either knowledge base is inconsistent.
    pub fn build(self) -> Result<ParetoEngine<K, S, D, J>> {
        if let Some(name) = self.duplicate {
            return Err(PreferenceError::DuplicateParameter(name));
        }
        let base = Self::required(self.base, "base_knowledge_base")?;
        let constrained = Self::required(self.constrained, "knowledge_base")?;
        let optimality = Self::required(self.optimality, "optimality_constraints")?;
        let sat = Self::required(self.sat, "sat_oracle")?;
        let dominance = Self::required(self.dominance, "dominance_oracle")?;
        let inject = Self::required(self.inject, "axiom_injection")?;

        let policy = self
            .id_policy
            .unwrap_or_else(|| Box::new(|value: &str, suffix: &str| {
                ExternalId::new(format!("{value}{suffix}"))
            }));
        let reserved = self.reserved.unwrap_or_default();
        let table = DomainTable::build(&self.space, policy.as_ref(), &reserved)?;

        // Surface unknown domain values in the optimality constraints now
        // rather than at solve time.
        for clause in optimality.clauses(&table) {
            clause?;
        }

        if !base.is_consistent()? {
            return Err(PreferenceError::InconsistentBase);
        }
        if !constrained.is_consistent()? {
            return Err(PreferenceError::InconsistentPreferences);
        }

        Ok(ParetoEngine {
            space: self.space,
            table,
            knowledge_base: constrained,
            sat,
            dominance,
            inject,
            optimality,
            closure: Lazy::new(),
        })
    }

    fn required<T>(value: Option<T>, name: &'static str) -> Result<T> {
        value.ok_or(PreferenceError::MissingParameter(name))
    }

    fn note_duplicate(&mut self, already_set: bool, name: &'static str) {
        if already_set && self.duplicate.is_none() {
            self.duplicate = Some(name);
        }
    }
}
