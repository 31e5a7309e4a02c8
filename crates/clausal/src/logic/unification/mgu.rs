//! Most general unifiers
//!
//! The algorithm keeps two parallel work-lists of terms still to be made
//! equal. Every new binding is composed into the result and immediately
//! applied to the pending pairs, so the result stays fully expanded and the
//! loop never recurses on term depth.

use crate::logic::substitution::{substitute_one, Substitution};
use crate::logic::term::Term;
use std::collections::VecDeque;

/// Most general unifier of two terms, `None` if they do not unify
pub fn mgu(t1: &Term, t2: &Term) -> Option<Substitution> {
    mgu_lists(std::slice::from_ref(t1), std::slice::from_ref(t2))
}

/// Simultaneous most general unifier of two term lists of equal length
pub fn mgu_lists(l1: &[Term], l2: &[Term]) -> Option<Substitution> {
    if l1.len() != l2.len() {
        return None;
    }

    let mut left: VecDeque<Term> = l1.iter().cloned().collect();
    let mut right: VecDeque<Term> = l2.iter().cloned().collect();
    let mut subst = Substitution::new();

    while let (Some(s), Some(t)) = (left.pop_front(), right.pop_front()) {
        match (s, t) {
            (Term::Variable(x), t) | (t, Term::Variable(x)) => {
                if t.as_variable() == Some(&x) {
                    continue;
                }
                if t.occurs(&x) {
                    return None;
                }
                for pending in left.iter_mut().chain(right.iter_mut()) {
                    *pending = substitute_one(pending, &x, &t);
                }
                subst.compose_binding(x, t);
            }
            (Term::Compound(f, fargs), Term::Compound(g, gargs)) => {
                if f != g || fargs.len() != gargs.len() {
                    return None;
                }
                left.extend(fargs);
                right.extend(gargs);
            }
        }
    }

    Some(subst)
}
