//! Subsumption for redundancy elimination
//!
//! A clause C subsumes D if some substitution σ maps every literal of C onto
//! a distinct literal of D. The check is an exhaustive backtracking search:
//! the first remaining literal of C is tried against every unused literal of
//! D, and the search continues with the rest of C under the extended
//! substitution. Bindings are undone through a [`BacktrackSubstitution`].

use crate::logic::{BacktrackSubstitution, Clause, Literal};
use crate::saturation::{ProcessedClauses, SupportLedger};
use log::debug;

/// Does `subsumer` subsume `subsumed`?
pub fn subsumes(subsumer: &Clause, subsumed: &Clause) -> bool {
    if subsumer.len() > subsumed.len() {
        return false;
    }
    let mut subst = BacktrackSubstitution::new();
    let mut used = vec![false; subsumed.len()];
    subsume_literals(&subsumer.literals, &subsumed.literals, &mut used, &mut subst)
}

fn subsume_literals(
    subsumer: &[Literal],
    subsumed: &[Literal],
    used: &mut [bool],
    subst: &mut BacktrackSubstitution,
) -> bool {
    let Some((first, rest)) = subsumer.split_first() else {
        return true;
    };

    for (i, target) in subsumed.iter().enumerate() {
        if used[i] {
            continue;
        }
        let mark = subst.mark();
        if first.matches(target, subst) {
            used[i] = true;
            if subsume_literals(rest, subsumed, used, subst) {
                return true;
            }
            used[i] = false;
        }
        subst.backtrack_to(mark);
    }

    false
}

/// Is `clause` subsumed by some clause of `processed`?
pub fn forward_subsumption(processed: &dyn ProcessedClauses, clause: &Clause) -> bool {
    processed
        .subsuming_candidates(clause)
        .into_iter()
        .any(|candidate| subsumes(candidate, clause))
}

/// Remove from `processed` every clause subsumed by `clause`, except those
/// the ledger protects. Returns the number of clauses removed.
pub fn backward_subsumption(
    clause: &Clause,
    processed: &mut dyn ProcessedClauses,
    ledger: &mut SupportLedger,
) -> usize {
    let subsumed: Vec<String> = processed
        .subsumed_candidates(clause)
        .into_iter()
        .filter(|name| !ledger.is_protected(name))
        .filter(|name| {
            processed
                .get(name)
                .is_some_and(|candidate| subsumes(clause, candidate))
        })
        .collect();

    let mut removed = 0;
    for name in subsumed {
        if let Some(victim) = processed.remove(&name) {
            debug!("backward subsumed {} by {}", victim, clause.name);
            ledger.release(&victim);
            removed += 1;
        }
    }
    removed
}
