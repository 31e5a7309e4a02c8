//! Helpers shared by the generating inference rules

use crate::logic::{mgu, Clause, Literal, Substitution};

/// Unify the atoms of two literals, ignoring their signs
pub fn unify_literal_atoms(lit1: &Literal, lit2: &Literal) -> Option<Substitution> {
    if lit1.predicate_symbol() != lit2.predicate_symbol() || lit1.arity() != lit2.arity() {
        return None;
    }
    mgu(&lit1.atom, &lit2.atom)
}

/// Instances of all literals of `clause` except the one at `skip`
pub fn instantiate_except<'a>(
    clause: &'a Clause,
    skip: Option<usize>,
    subst: &'a Substitution,
) -> impl Iterator<Item = Literal> + 'a {
    let subst = subst.clone();
    clause
        .literals
        .iter()
        .enumerate()
        .filter(move |(k, _)| Some(*k) != skip)
        .map(move |(_, lit)| lit.instantiate(&subst))
}
