//! Equality axioms
//!
//! The prover has no built-in equality reasoning. Problems that use `=` get
//! the axioms of an equivalence relation plus one congruence axiom per
//! function and predicate symbol of positive arity.

use crate::inference::Derivation;
use crate::logic::{Clause, ClauseType, Literal, Signature, Term, EQUALITY};
use crate::saturation::ClauseSet;
use crate::session::Session;
use log::debug;

fn axiom(name: impl Into<String>, literals: Vec<Literal>) -> Clause {
    let mut clause = Clause::with_type(literals, ClauseType::Axiom).named(name);
    clause.derivation = Derivation::eq_axiom();
    clause
}

fn eq(lhs: &Term, rhs: &Term) -> Literal {
    Literal::equation(lhs.clone(), rhs.clone(), false)
}

fn neq(lhs: &Term, rhs: &Term) -> Literal {
    Literal::equation(lhs.clone(), rhs.clone(), true)
}

/// Reflexivity, symmetry and transitivity
pub fn generate_equiv_axioms() -> Vec<Clause> {
    let x = Term::var("X");
    let y = Term::var("Y");
    let z = Term::var("Z");
    vec![
        axiom("reflexivity", vec![eq(&x, &x)]),
        axiom("symmetry", vec![neq(&x, &y), eq(&y, &x)]),
        axiom("transitivity", vec![neq(&x, &y), neq(&y, &z), eq(&x, &z)]),
    ]
}

/// `X1, .., Xn` and `Y1, .., Yn`
fn argument_vectors(arity: usize) -> (Vec<Term>, Vec<Term>) {
    (1..=arity)
        .map(|i| (Term::var(format!("X{}", i)), Term::var(format!("Y{}", i))))
        .unzip()
}

fn pairwise_disequations(xs: &[Term], ys: &[Term]) -> Vec<Literal> {
    xs.iter().zip(ys).map(|(x, y)| neq(x, y)).collect()
}

/// `X1!=Y1 | .. | Xn!=Yn | f(X1,..,Xn)=f(Y1,..,Yn)`
fn function_congruence(symbol: &str, arity: usize) -> Clause {
    let (xs, ys) = argument_vectors(arity);
    let mut literals = pairwise_disequations(&xs, &ys);
    literals.push(eq(
        &Term::compound(symbol, xs),
        &Term::compound(symbol, ys),
    ));
    axiom(format!("funcompat_{}", symbol), literals)
}

/// `X1!=Y1 | .. | Xn!=Yn | ~p(X1,..,Xn) | p(Y1,..,Yn)`
fn predicate_congruence(symbol: &str, arity: usize) -> Clause {
    let (xs, ys) = argument_vectors(arity);
    let mut literals = pairwise_disequations(&xs, &ys);
    literals.push(Literal::predicate(symbol, xs, true));
    literals.push(Literal::predicate(symbol, ys, false));
    axiom(format!("predcompat_{}", symbol), literals)
}

/// One congruence axiom per function and predicate symbol of positive arity.
/// Equality itself is covered by symmetry and transitivity.
pub fn generate_compat_axioms(signature: &Signature) -> Vec<Clause> {
    let functions = signature
        .functions
        .iter()
        .filter(|&(_, &arity)| arity > 0)
        .map(|(symbol, &arity)| function_congruence(symbol, arity));
    let predicates = signature
        .predicates
        .iter()
        .filter(|&(symbol, &arity)| arity > 0 && symbol.as_str() != EQUALITY)
        .map(|(symbol, &arity)| predicate_congruence(symbol, arity));
    functions.chain(predicates).collect()
}

/// Add the equality axioms to `clauses` if any clause uses `=`. Returns the
/// number of axioms added; names already taken are replaced by fresh ones.
pub fn add_equality_axioms(clauses: &mut ClauseSet, session: &mut Session) -> usize {
    let signature = clauses.signature();
    if !signature.is_equational() {
        return 0;
    }
    let axioms: Vec<Clause> = generate_equiv_axioms()
        .into_iter()
        .chain(generate_compat_axioms(&signature))
        .collect();
    let added = axioms.len();
    for clause in axioms {
        clauses.add_unique(clause, session);
    }
    debug!("added {} equality axioms", added);
    added
}
