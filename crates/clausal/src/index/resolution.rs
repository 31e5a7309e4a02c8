//! Top-symbol index of eligible literals for resolution partner lookup

use super::{ClauseIndex, LiteralRef};
use crate::logic::{Clause, Literal};
use indexmap::IndexSet;
use std::collections::HashMap;

/// Positive and negative eligible literals keyed by predicate symbol
#[derive(Debug, Clone, Default)]
pub struct ResolutionIndex {
    positive: HashMap<String, IndexSet<LiteralRef>>,
    negative: HashMap<String, IndexSet<LiteralRef>>,
}

impl ResolutionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored literals that could resolve with `lit`: opposite sign, same
    /// predicate symbol. Unifiability is not checked.
    pub fn resolution_literals(&self, lit: &Literal) -> Vec<LiteralRef> {
        let idx = if lit.is_positive() {
            &self.negative
        } else {
            &self.positive
        };
        idx.get(lit.predicate_symbol())
            .map(|refs| refs.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl ClauseIndex for ResolutionIndex {
    fn insert(&mut self, clause: &Clause) {
        for (i, lit) in clause.literals.iter().enumerate() {
            if !lit.inference_eligible {
                continue;
            }
            let idx = if lit.is_positive() {
                &mut self.positive
            } else {
                &mut self.negative
            };
            idx.entry(lit.predicate_symbol().to_string())
                .or_default()
                .insert((clause.name.clone(), i));
        }
    }

    fn remove(&mut self, clause: &Clause) {
        for (i, lit) in clause.literals.iter().enumerate() {
            let idx = if lit.is_positive() {
                &mut self.positive
            } else {
                &mut self.negative
            };
            let key = lit.predicate_symbol();
            if let Some(refs) = idx.get_mut(key) {
                refs.shift_remove(&(clause.name.clone(), i));
                if refs.is_empty() {
                    idx.remove(key);
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.positive.values().map(IndexSet::len).sum::<usize>()
            + self.negative.values().map(IndexSet::len).sum::<usize>()
    }
}
