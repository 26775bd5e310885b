#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The default candidate-branch producer.
//!
//! Candidates are clauses over the dense literal space `1..=size`. The
//! forest starts from the two unit clauses of every variable index and grows
//! each surviving branch by one literal per generation, always towards
//! higher indices so that every literal set is visited exactly once. A
//! branch whose callback returns `false` is pruned together with its whole
//! subtree; since the subtree holds only supersets (weaker clauses), pruning
//! an accepted or redundant branch loses nothing.

use crate::preference::oracle::BranchProducer;
use crate::sat::clause::{Clause, Lit};
use smallvec::SmallVec;

#[derive(Debug, Clone)]
struct Branch {
    literals: SmallVec<[Lit; 8]>,
    /// Highest variable index in `literals`; children extend from here.
    last: u32,
}

/// A level-synchronous forest over the literal space `1..=size`.
#[derive(Debug, Clone)]
pub struct PreferenceForest {
    frontier: Vec<Branch>,
    size: u32,
}

impl PreferenceForest {
    /// Creates the forest over `size` variables, with every unit clause as
    /// a root.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(size: u32) -> Self {
        let frontier = (1..=size)
            .flat_map(|var| {
                let lit = var as Lit;
                [
                    Branch {
                        literals: SmallVec::from_slice(&[lit]),
                        last: var,
                    },
                    Branch {
                        literals: SmallVec::from_slice(&[-lit]),
                        last: var,
                    },
                ]
            })
            .collect();
        Self { frontier, size }
    }
}

impl BranchProducer for PreferenceForest {
    fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    #[allow(clippy::cast_possible_wrap)]
    fn expand<F>(&mut self, callback: F)
    where
        F: Fn(&Clause) -> bool + Sync,
    {
        let mut next = Vec::new();
        for branch in std::mem::take(&mut self.frontier) {
            let clause = Clause::from_valid(branch.literals.iter().copied());
            if !callback(&clause) {
                continue;
            }
            for var in branch.last + 1..=self.size {
                let lit = var as Lit;
                for child_lit in [lit, -lit] {
                    let mut literals = branch.literals.clone();
                    literals.push(child_lit);
                    next.push(Branch {
                        literals,
                        last: var,
                    });
                }
            }
        }
        self.frontier = next;
    }
}
