//! End-to-end HARD-PARETO scenarios over a two-variable CP-net, with
//! deterministic stand-ins for the knowledge base and the dominance oracle.

use hard_pareto::error::Result;
use hard_pareto::preference::constraint::{Constraint, ConstraintSet};
use hard_pareto::preference::domain::{Outcome, PreferenceSpace};
use hard_pareto::preference::engine::{AxiomInjection, ParetoEngine};
use hard_pareto::preference::oracle::{DominanceOracle, KnowledgeBase};
use hard_pareto::preference::table::DomainTable;
use hard_pareto::sat::clause::Clause;
use hard_pareto::sat::cnf::Formula;
use hard_pareto::sat::dpll::DpllOracle;
use hard_pareto::sat::solver::SatOracle;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A knowledge base whose theory is a clause set over the domain literals;
/// an axiom (itself a clause) is entailed exactly when the theory entails
/// it.
struct ClauseKb {
    theory: Formula,
}

impl ClauseKb {
    fn new(clauses: &[&[i32]]) -> Self {
        Self {
            theory: clauses
                .iter()
                .map(|c| Clause::new(c.iter().copied()).unwrap())
                .collect(),
        }
    }
}

impl KnowledgeBase for ClauseKb {
    type Axiom = Clause;

    fn is_consistent(&self) -> Result<bool> {
        DpllOracle.is_satisfiable(&self.theory)
    }

    fn is_entailed(&self, axiom: &Clause) -> Result<bool> {
        DpllOracle.implies(&self.theory, axiom)
    }
}

/// A scripted dominance oracle: `dominates(a, b)` holds for the listed
/// `(a, b)` pairs only. Counts invocations.
struct ScriptedDominance {
    pairs: Vec<(Outcome, Outcome)>,
    calls: AtomicUsize,
    queried: Mutex<Vec<Outcome>>,
}

impl ScriptedDominance {
    fn new(pairs: Vec<(Outcome, Outcome)>) -> Self {
        Self {
            pairs,
            calls: AtomicUsize::new(0),
            queried: Mutex::new(Vec::new()),
        }
    }
}

impl DominanceOracle for ScriptedDominance {
    fn dominates(&self, candidate: &Outcome, other: &Outcome) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(other.clone());
        Ok(self
            .pairs
            .iter()
            .any(|(a, b)| a == candidate && b == other))
    }
}

fn inject(constraint: &Constraint, table: &DomainTable) -> Clause {
    constraint.to_clause(table).unwrap()
}

fn space() -> PreferenceSpace {
    PreferenceSpace::new([("A", vec!["a1", "a2"]), ("B", vec!["b1", "b2"])]).unwrap()
}

fn outcome(space: &PreferenceSpace, a: &str, b: &str) -> Outcome {
    Outcome::new(space, [("A", a), ("B", b)]).unwrap()
}

/// Partition clauses closing the world: exactly one value per variable.
/// Literals: a1=1, a2=2, b1=3, b2=4.
const PARTITION: &[&[i32]] = &[&[1, 2], &[-1, -2], &[3, 4], &[-3, -4]];

/// Feasibility restriction: `a2` and `b1` never hold together.
const EXCLUSION: &[i32] = &[-2, -3];

fn build_engine(
    theory: &[&[i32]],
    optimality: ConstraintSet,
    dominance: ScriptedDominance,
) -> ParetoEngine<ClauseKb, DpllOracle, ScriptedDominance, AxiomInjection<Clause>> {
    ParetoEngine::builder(space())
        .base_knowledge_base(ClauseKb::new(&[]))
        .knowledge_base(ClauseKb::new(theory))
        .optimality_constraints(optimality)
        .sat_oracle(DpllOracle)
        .dominance_oracle(dominance)
        .axiom_injection(inject as AxiomInjection<Clause>)
        .build()
        .unwrap()
}

#[test]
fn trivial_condition_skips_dominance_when_union_equals_feasible() {
    // No optimality constraints: the union problem is the feasibility
    // problem, so the result is the full feasible set with no dominance
    // queries.
    let theory: Vec<&[i32]> = PARTITION.iter().copied().chain([EXCLUSION]).collect();
    let engine = build_engine(&theory, ConstraintSet::default(), ScriptedDominance::new(vec![]));

    let outcomes = engine.pareto_optimal().unwrap();

    let space = space();
    let expected: Vec<Outcome> = vec![
        outcome(&space, "a1", "b1"),
        outcome(&space, "a1", "b2"),
        outcome(&space, "a2", "b2"),
    ];
    assert_eq!(outcomes.len(), 3);
    assert!(expected.iter().all(|o| outcomes.contains(o)));
    assert_eq!(engine.dominance_oracle().calls.load(Ordering::SeqCst), 0);
}

#[test]
fn trivial_condition_skips_dominance_when_union_equals_optimality() {
    // The optimality constraints pin the single outcome a1,b1, which is
    // feasible: the union models equal the optimality models and the
    // dominance fallback never runs.
    let theory: Vec<&[i32]> = PARTITION.iter().copied().chain([EXCLUSION]).collect();
    let optimality = ConstraintSet::new([
        Constraint::optimality::<&str>([], [("a1", true)]),
        Constraint::optimality::<&str>([("a2", true)], []),
        Constraint::optimality::<&str>([], [("b1", true)]),
        Constraint::optimality::<&str>([("b2", true)], []),
    ]);
    let engine = build_engine(&theory, optimality, ScriptedDominance::new(vec![]));

    let outcomes = engine.pareto_optimal().unwrap();

    let space = space();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes.contains(&outcome(&space, "a1", "b1")));
    assert_eq!(engine.dominance_oracle().calls.load(Ordering::SeqCst), 0);
}

#[test]
fn fallback_finds_undominated_feasible_outcome() {
    // CP-net optimum: a1 and b1. Feasible outcomes: a1b1, a1b2, a2b2.
    // The union pins a1b1 only, so a1b2 and a2b2 are unverified. a2b2 is
    // dominated by a1b1; a1b2 is undominated and must join the result via
    // the dominance scan, not via the SAT union.
    let theory: Vec<&[i32]> = PARTITION.iter().copied().chain([EXCLUSION]).collect();
    let optimality = ConstraintSet::new([
        Constraint::optimality::<&str>([], [("a1", true)]),
        Constraint::optimality::<&str>([], [("b1", true)]),
    ]);
    let space = space();
    let dominance = ScriptedDominance::new(vec![(
        outcome(&space, "a1", "b1"),
        outcome(&space, "a2", "b2"),
    )]);
    let engine = build_engine(&theory, optimality, dominance);

    let outcomes = engine.pareto_optimal().unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.contains(&outcome(&space, "a1", "b1")));
    assert!(outcomes.contains(&outcome(&space, "a1", "b2")));
    assert!(!outcomes.contains(&outcome(&space, "a2", "b2")));

    // The dominance oracle was consulted for both unverified outcomes, and
    // a1b2 survived one full scan of the feasible set.
    let queried = engine.dominance_oracle().queried.lock().unwrap().clone();
    assert!(queried.contains(&outcome(&space, "a1", "b2")));
    assert!(queried.contains(&outcome(&space, "a2", "b2")));
    assert!(engine.dominance_oracle().calls.load(Ordering::SeqCst) > 0);
}

#[test]
fn closure_result_is_deterministic_across_engines() {
    let theory: Vec<&[i32]> = PARTITION.iter().copied().chain([EXCLUSION]).collect();
    let first = build_engine(&theory, ConstraintSet::default(), ScriptedDominance::new(vec![]));
    let second = build_engine(&theory, ConstraintSet::default(), ScriptedDominance::new(vec![]));
    assert_eq!(first.closure().unwrap(), second.closure().unwrap());
}
