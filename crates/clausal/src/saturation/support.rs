//! Parent protection for backward subsumption
//!
//! A clause that still has live descendants (clauses in the unprocessed or
//! processed set that were inferred from it) must stay available, otherwise
//! the proof of a later empty clause could not be reconstructed. The ledger
//! counts live children per parent name.

use crate::logic::Clause;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct SupportLedger {
    live_children: HashMap<String, usize>,
}

impl SupportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// `clause` became live: count it for each of its parents
    pub fn record(&mut self, clause: &Clause) {
        for parent in &clause.derivation.support {
            *self.live_children.entry(parent.clone()).or_insert(0) += 1;
        }
    }

    /// `clause` was discarded: its parents lose one live child each
    pub fn release(&mut self, clause: &Clause) {
        for parent in &clause.derivation.support {
            if let Some(count) = self.live_children.get_mut(parent) {
                *count -= 1;
                if *count == 0 {
                    self.live_children.remove(parent);
                }
            }
        }
    }

    pub fn is_protected(&self, name: &str) -> bool {
        self.live_children.contains_key(name)
    }

    pub fn live_children(&self, name: &str) -> usize {
        self.live_children.get(name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{Derivation, Rationale};

    fn child(parents: &[&str]) -> Clause {
        let mut c = Clause::new(vec![]);
        c.derivation = Derivation::inference(
            Rationale::Resolution,
            parents.iter().map(|p| p.to_string()).collect(),
        );
        c
    }

    #[test]
    fn test_protection_follows_live_children() {
        let mut ledger = SupportLedger::new();
        let a = child(&["p1", "p2"]);
        let b = child(&["p1"]);
        ledger.record(&a);
        ledger.record(&b);
        assert_eq!(ledger.live_children("p1"), 2);
        assert!(ledger.is_protected("p2"));

        ledger.release(&a);
        assert!(ledger.is_protected("p1"));
        assert!(!ledger.is_protected("p2"));

        ledger.release(&b);
        assert!(!ledger.is_protected("p1"));
        // Releasing again does not underflow
        ledger.release(&b);
        assert_eq!(ledger.live_children("p1"), 0);
    }
}
