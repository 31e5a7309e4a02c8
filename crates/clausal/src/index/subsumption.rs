//! Predicate-abstraction index for subsumption candidate filtering.
//!
//! A clause C can only subsume D if C's predicate abstraction (sorted
//! `(negated, predicate)` pairs) is an order-preserving subsequence of D's.
//! Abstractions are kept in a list sorted by length, so each query only
//! scans the part of the list that can qualify.

use super::ClauseIndex;
use crate::logic::Clause;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Sorted `(negated, predicate)` pairs of a clause
pub type PredicateAbstraction = Vec<(bool, String)>;

/// Is `candidate` an order-preserving subsequence of `superseq`?
/// With both sorted this is multiset inclusion.
pub fn is_subsequence<T: PartialEq>(candidate: &[T], superseq: &[T]) -> bool {
    let mut rest = superseq.iter();
    candidate
        .iter()
        .all(|item| rest.by_ref().any(|other| other == item))
}

#[derive(Debug, Clone, Default)]
pub struct SubsumptionIndex {
    /// Clause names per abstraction
    by_abstraction: HashMap<PredicateAbstraction, IndexSet<String>>,
    /// Distinct abstractions, sorted by length
    sorted: Vec<PredicateAbstraction>,
}

impl SubsumptionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of stored clauses that might subsume `query`: abstraction no
    /// longer than the query's and a subsequence of it
    pub fn subsuming_candidates(&self, query: &Clause) -> Vec<String> {
        let pa = query.predicate_abstraction();
        let mut candidates = Vec::new();
        for abstraction in &self.sorted {
            if abstraction.len() > pa.len() {
                break;
            }
            if is_subsequence(abstraction, &pa) {
                self.collect(abstraction, &mut candidates);
            }
        }
        candidates
    }

    /// Names of stored clauses that `query` might subsume: abstraction at
    /// least as long as the query's, with the query's as a subsequence
    pub fn subsumed_candidates(&self, query: &Clause) -> Vec<String> {
        let pa = query.predicate_abstraction();
        let mut candidates = Vec::new();
        for abstraction in self.sorted.iter().rev() {
            if abstraction.len() < pa.len() {
                break;
            }
            if is_subsequence(&pa, abstraction) {
                self.collect(abstraction, &mut candidates);
            }
        }
        candidates
    }

    fn collect(&self, abstraction: &PredicateAbstraction, out: &mut Vec<String>) {
        if let Some(names) = self.by_abstraction.get(abstraction) {
            out.extend(names.iter().cloned());
        }
    }

    /// Number of distinct abstractions stored
    pub fn abstraction_count(&self) -> usize {
        self.sorted.len()
    }
}

impl ClauseIndex for SubsumptionIndex {
    fn insert(&mut self, clause: &Clause) {
        let pa = clause.predicate_abstraction();
        if let Some(names) = self.by_abstraction.get_mut(&pa) {
            names.insert(clause.name.clone());
            return;
        }
        let pos = self.sorted.partition_point(|other| other.len() < pa.len());
        self.sorted.insert(pos, pa.clone());
        let mut names = IndexSet::new();
        names.insert(clause.name.clone());
        self.by_abstraction.insert(pa, names);
    }

    fn remove(&mut self, clause: &Clause) {
        let pa = clause.predicate_abstraction();
        let now_empty = match self.by_abstraction.get_mut(&pa) {
            Some(names) => {
                names.shift_remove(&clause.name);
                names.is_empty()
            }
            None => return,
        };
        if now_empty {
            self.by_abstraction.remove(&pa);
            self.sorted.retain(|other| other != &pa);
        }
    }

    fn len(&self) -> usize {
        self.by_abstraction.values().map(IndexSet::len).sum()
    }
}
