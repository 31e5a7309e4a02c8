//! Small CNF: clausification with truth-constant simplification, polarity
//! aware negation normal form and miniscoping.
//!
//! Quantifiers are pushed as far inwards as possible before skolemization,
//! so skolem functions only take the universal variables that really scope
//! over the existential. The remaining steps are shared with the prenex
//! pipeline.

use super::formula::{Connective, Formula, Quantifier};
use super::transform::{
    distribute_and_over_or, negate_literal, op_simplify, remove_universal_quantifiers,
    skolemize, standardize_variables, to_clauses,
};
use super::NamedFormula;
use crate::logic::{Clause, Variable};
use crate::session::Session;

/// Propagate `$true`/`$false`, collapse `A|A` and `A&A`, and drop
/// quantifiers whose variable does not occur in the body
pub fn simplify_truth_constants(f: &Formula) -> Formula {
    match f {
        Formula::Literal(_) => f.clone(),
        Formula::Not(g) => {
            let g = simplify_truth_constants(g);
            match g {
                Formula::Literal(lit) => Formula::Literal(negate_literal(&lit, true)),
                Formula::Not(inner) => *inner,
                g => Formula::negation(g),
            }
        }
        Formula::Binary(op, l, r) => {
            simplify_binary(*op, simplify_truth_constants(l), simplify_truth_constants(r))
        }
        Formula::Quantified(q, var, body) => {
            let body = simplify_truth_constants(body);
            if body.has_free(var) {
                Formula::quantified(*q, var.clone(), body)
            } else {
                body
            }
        }
    }
}

fn simplify_binary(op: Connective, l: Formula, r: Formula) -> Formula {
    let not = |f: Formula| simplify_truth_constants(&Formula::negation(f));
    match op {
        Connective::And => {
            if l.is_false() || r.is_false() {
                Formula::truth(false)
            } else if l.is_true() {
                r
            } else if r.is_true() || l == r {
                l
            } else {
                Formula::and(l, r)
            }
        }
        Connective::Or => {
            if l.is_true() || r.is_true() {
                Formula::truth(true)
            } else if l.is_false() {
                r
            } else if r.is_false() || l == r {
                l
            } else {
                Formula::or(l, r)
            }
        }
        Connective::Implies => {
            if l.is_false() || r.is_true() {
                Formula::truth(true)
            } else if l.is_true() {
                r
            } else if r.is_false() {
                not(l)
            } else if l == r {
                Formula::truth(true)
            } else {
                Formula::binary(op, l, r)
            }
        }
        Connective::Equiv => {
            if l.is_true() {
                r
            } else if r.is_true() {
                l
            } else if l.is_false() {
                not(r)
            } else if r.is_false() {
                not(l)
            } else if l == r {
                Formula::truth(true)
            } else {
                Formula::binary(op, l, r)
            }
        }
        // Not produced by op_simplify; normalize and retry
        _ => simplify_truth_constants(&op_simplify(&Formula::binary(op, l, r))),
    }
}

/// Negation normal form where `<=>` is expanded according to the polarity
/// of its occurrence, always into a conjunction of two disjunctions
pub fn polarity_nnf(f: &Formula) -> Formula {
    pnnf(f, false)
}

fn pnnf(f: &Formula, negate: bool) -> Formula {
    match f {
        Formula::Literal(lit) => Formula::Literal(negate_literal(lit, negate)),
        Formula::Not(g) => pnnf(g, !negate),
        Formula::Binary(Connective::And, l, r) if negate => {
            Formula::or(pnnf(l, true), pnnf(r, true))
        }
        Formula::Binary(Connective::Or, l, r) if negate => {
            Formula::and(pnnf(l, true), pnnf(r, true))
        }
        Formula::Binary(op @ (Connective::And | Connective::Or), l, r) => {
            Formula::binary(*op, pnnf(l, false), pnnf(r, false))
        }
        Formula::Binary(Connective::Implies, l, r) => {
            if negate {
                Formula::and(pnnf(l, false), pnnf(r, true))
            } else {
                Formula::or(pnnf(l, true), pnnf(r, false))
            }
        }
        Formula::Binary(Connective::Equiv, l, r) => {
            if negate {
                // (l | r) & (~l | ~r)
                Formula::and(
                    Formula::or(pnnf(l, false), pnnf(r, false)),
                    Formula::or(pnnf(l, true), pnnf(r, true)),
                )
            } else {
                // (~l | r) & (l | ~r)
                Formula::and(
                    Formula::or(pnnf(l, true), pnnf(r, false)),
                    Formula::or(pnnf(l, false), pnnf(r, true)),
                )
            }
        }
        Formula::Binary(..) => pnnf(&op_simplify(f), negate),
        Formula::Quantified(q, var, body) => {
            let q = if negate { q.dual() } else { *q };
            Formula::quantified(q, var.clone(), pnnf(body, negate))
        }
    }
}

/// Push quantifiers inwards: `!` distributes over `&`, `?` over `|`, and a
/// quantifier moves onto the only side of a connective that uses its
/// variable. Expects negation normal form.
pub fn miniscope(f: &Formula) -> Formula {
    match f {
        Formula::Literal(_) => f.clone(),
        Formula::Not(g) => Formula::negation(miniscope(g)),
        Formula::Binary(op, l, r) => Formula::binary(*op, miniscope(l), miniscope(r)),
        Formula::Quantified(q, var, body) => push_quantifier(*q, var, miniscope(body)),
    }
}

fn push_quantifier(q: Quantifier, var: &Variable, body: Formula) -> Formula {
    if !body.has_free(var) {
        return body;
    }
    match body {
        Formula::Binary(op, l, r) => {
            let splits = matches!(
                (q, op),
                (Quantifier::Forall, Connective::And) | (Quantifier::Exists, Connective::Or)
            );
            if splits {
                Formula::binary(op, push_quantifier(q, var, *l), push_quantifier(q, var, *r))
            } else if !l.has_free(var) {
                Formula::binary(op, *l, push_quantifier(q, var, *r))
            } else if !r.has_free(var) {
                Formula::binary(op, push_quantifier(q, var, *l), *r)
            } else {
                Formula::quantified(q, var.clone(), Formula::Binary(op, l, r))
            }
        }
        body => Formula::quantified(q, var.clone(), body),
    }
}

/// Clausify one formula with the small CNF pipeline
pub fn small_cnf(nf: &NamedFormula, session: &mut Session) -> Vec<Clause> {
    let f = op_simplify(&nf.formula);
    let f = simplify_truth_constants(&f);
    let f = polarity_nnf(&f);
    let f = miniscope(&f);
    let f = standardize_variables(&f, session);
    let f = skolemize(&f, session);
    let f = remove_universal_quantifiers(&f);
    let f = distribute_and_over_or(&f);
    to_clauses(&f, nf.role, session)
}
