//! One-directional matching
//!
//! Find bindings for the matcher's variables that make it identical to the
//! target. Variables of the target are treated as constants.

use crate::logic::substitution::BacktrackSubstitution;
use crate::logic::term::Term;

/// Extend `subst` so that `subst(matcher) == target`.
///
/// On failure every binding made by this call is rolled back and the
/// substitution is left exactly as it was.
pub fn match_term(matcher: &Term, target: &Term, subst: &mut BacktrackSubstitution) -> bool {
    match_lists(
        std::slice::from_ref(matcher),
        std::slice::from_ref(target),
        subst,
    )
}

/// Match two term lists pairwise under a shared substitution
pub fn match_lists(
    matchers: &[Term],
    targets: &[Term],
    subst: &mut BacktrackSubstitution,
) -> bool {
    if matchers.len() != targets.len() {
        return false;
    }

    let mark = subst.mark();
    let mut work: Vec<(&Term, &Term)> = matchers.iter().zip(targets.iter()).collect();

    while let Some((m, t)) = work.pop() {
        let ok = match m {
            Term::Variable(v) => match subst.value(v) {
                Some(bound) => bound == t,
                None => {
                    subst.add_binding(v.clone(), t.clone());
                    true
                }
            },
            Term::Compound(f, margs) => match t {
                Term::Compound(g, targs) if f == g && margs.len() == targs.len() => {
                    work.extend(margs.iter().zip(targs.iter()));
                    true
                }
                _ => false,
            },
        };
        if !ok {
            subst.backtrack_to(mark);
            return false;
        }
    }

    true
}
