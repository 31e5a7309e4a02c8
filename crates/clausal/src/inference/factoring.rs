//! Factoring inference rule

use super::common::{instantiate_except, unify_literal_atoms};
use super::derivation::Rationale;
use crate::logic::Clause;

/// Factor `clause` on the literals at `idx1` and `idx2`: same sign and
/// unifiable atoms. The factor is the whole clause instantiated by the
/// unifier, with duplicate literals removed.
pub fn factor(clause: &Clause, idx1: usize, idx2: usize) -> Option<Clause> {
    if idx1 == idx2 {
        return None;
    }
    let lit1 = clause.literals.get(idx1)?;
    let lit2 = clause.literals.get(idx2)?;

    if lit1.negated != lit2.negated {
        return None;
    }

    let sigma = unify_literal_atoms(lit1, lit2)?;
    let literals = instantiate_except(clause, None, &sigma).collect();

    Some(Clause::inferred(
        literals,
        Rationale::Factoring,
        &[clause],
        sigma,
    ))
}

/// All factors over literal pairs `i < j` where at least one of the two is
/// inference-eligible
pub fn compute_all_factors(clause: &Clause) -> Vec<Clause> {
    let mut factors = Vec::new();
    let n = clause.literals.len();

    for i in 0..n {
        for j in (i + 1)..n {
            if !clause.literals[i].inference_eligible && !clause.literals[j].inference_eligible {
                continue;
            }
            if let Some(f) = factor(clause, i, j) {
                factors.push(f);
            }
        }
    }

    factors
}
