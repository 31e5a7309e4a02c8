//! Binary resolution inference rule

use super::common::{instantiate_except, unify_literal_atoms};
use super::derivation::Rationale;
use crate::logic::Clause;
use crate::saturation::ProcessedClauses;

/// Resolve literal `idx1` of `clause1` against literal `idx2` of `clause2`.
///
/// Both literals must be inference-eligible, of opposite sign, with
/// unifiable atoms. The clauses are assumed to be variable-disjoint.
pub fn resolution(clause1: &Clause, idx1: usize, clause2: &Clause, idx2: usize) -> Option<Clause> {
    let lit1 = clause1.literals.get(idx1)?;
    let lit2 = clause2.literals.get(idx2)?;

    if !lit1.inference_eligible || !lit2.inference_eligible {
        return None;
    }
    if lit1.negated == lit2.negated {
        return None;
    }

    let sigma = unify_literal_atoms(lit1, lit2)?;

    let literals = instantiate_except(clause1, Some(idx1), &sigma)
        .chain(instantiate_except(clause2, Some(idx2), &sigma))
        .collect();

    Some(Clause::inferred(
        literals,
        Rationale::Resolution,
        &[clause1, clause2],
        sigma,
    ))
}

/// All resolvents between the eligible literals of `clause` and the
/// candidate literals the processed set offers for them
pub fn compute_all_resolvents(clause: &Clause, processed: &dyn ProcessedClauses) -> Vec<Clause> {
    let mut resolvents = Vec::new();

    for (idx, lit) in clause.literals.iter().enumerate() {
        if !lit.inference_eligible {
            continue;
        }
        for (partner, partner_idx) in processed.resolution_candidates(lit) {
            if let Some(resolvent) = resolution(clause, idx, partner, partner_idx) {
                resolvents.push(resolvent);
            }
        }
    }

    resolvents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Rationale;
    use crate::logic::{Literal, Term};
    use crate::saturation::ClauseSet;

    fn x() -> Term {
        Term::var("X")
    }

    fn a() -> Term {
        Term::constant("a")
    }

    fn lit(pred: &str, args: Vec<Term>, negated: bool) -> Literal {
        Literal::predicate(pred, args, negated)
    }

    #[test]
    fn test_resolution_instantiates_remaining_literals() {
        // p(X) | q(X)  and  ~p(a) | r(Y)  give  q(a) | r(Y)
        let c1 = Clause::new(vec![lit("p", vec![x()], false), lit("q", vec![x()], false)])
            .named("c1");
        let c2 = Clause::new(vec![
            lit("p", vec![a()], true),
            lit("r", vec![Term::var("Y")], false),
        ])
        .named("c2");

        let resolvent = resolution(&c1, 0, &c2, 0).expect("literals should resolve");
        assert_eq!(resolvent.literals_string(), "q(a)|r(Y)");
        assert_eq!(resolvent.derivation.rationale, Rationale::Resolution);
        assert_eq!(resolvent.derivation.support, vec!["c1", "c2"]);
        assert_eq!(resolvent.depth, 1);
    }

    #[test]
    fn test_resolution_requires_opposite_signs() {
        let c1 = Clause::new(vec![lit("p", vec![x()], false)]);
        let c2 = Clause::new(vec![lit("p", vec![a()], false)]);
        assert!(resolution(&c1, 0, &c2, 0).is_none());
    }

    #[test]
    fn test_resolution_requires_eligible_literals() {
        let c1 = Clause::new(vec![lit("p", vec![x()], false)]);
        let mut c2 = Clause::new(vec![lit("p", vec![a()], true), lit("q", vec![], true)]);
        c2.literals[0].inference_eligible = false;
        assert!(resolution(&c1, 0, &c2, 0).is_none());
    }

    #[test]
    fn test_resolution_of_units_gives_empty_clause() {
        let c1 = Clause::new(vec![lit("a", vec![], false)]);
        let c2 = Clause::new(vec![lit("a", vec![], true)]);
        let resolvent = resolution(&c1, 0, &c2, 0).expect("units should resolve");
        assert!(resolvent.is_empty());
    }

    #[test]
    fn test_resolvent_is_deduplicated() {
        // q(a) | p(X)  and  ~p(a) | q(a)
        let c1 = Clause::new(vec![lit("q", vec![a()], false), lit("p", vec![x()], false)]);
        let c2 = Clause::new(vec![lit("p", vec![a()], true), lit("q", vec![a()], false)]);
        let resolvent = resolution(&c1, 1, &c2, 0).expect("literals should resolve");
        assert_eq!(resolvent.literals_string(), "q(a)");
    }

    #[test]
    fn test_compute_all_resolvents_against_set() {
        let mut processed = ClauseSet::new();
        processed.add(Clause::new(vec![lit("p", vec![a()], true)]).named("n1"));
        processed.add(Clause::new(vec![lit("p", vec![Term::constant("b")], true)]).named("n2"));
        processed.add(Clause::new(vec![lit("q", vec![], true)]).named("n3"));

        let given = Clause::new(vec![lit("p", vec![x()], false), lit("q", vec![], false)])
            .named("g");
        let resolvents = compute_all_resolvents(&given, &processed);
        let mut printed: Vec<_> = resolvents.iter().map(|c| c.literals_string()).collect();
        printed.sort();
        assert_eq!(printed, vec!["p(X)", "q", "q"]);
    }
}
