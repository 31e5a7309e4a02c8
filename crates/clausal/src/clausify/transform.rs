//! Formula transformations of the prenex clausification pipeline.
//!
//! Each pass accepts any formula. Passes that expect an earlier pass to have
//! run first normalize the connectives they do not handle themselves.

use super::formula::{skolem_term, Connective, Formula, Quantifier};
use crate::logic::{Clause, ClauseType, Literal, Substitution, Term, Variable};
use crate::session::Session;
use indexmap::IndexSet;

/// Rewrite `<=`, `~|`, `~&` and `<~>` in terms of the other connectives
pub fn op_simplify(f: &Formula) -> Formula {
    match f {
        Formula::Literal(_) => f.clone(),
        Formula::Not(g) => Formula::negation(op_simplify(g)),
        Formula::Binary(op, l, r) => {
            let l = op_simplify(l);
            let r = op_simplify(r);
            match op {
                Connective::ReverseImplies => Formula::binary(Connective::Implies, r, l),
                Connective::Nor => Formula::negation(Formula::or(l, r)),
                Connective::Nand => Formula::negation(Formula::and(l, r)),
                Connective::Xor => Formula::negation(Formula::binary(Connective::Equiv, l, r)),
                _ => Formula::binary(*op, l, r),
            }
        }
        Formula::Quantified(q, var, body) => {
            Formula::quantified(*q, var.clone(), op_simplify(body))
        }
    }
}

/// Rewrite `=>` and `<=>` (and the connectives [`op_simplify`] removes)
/// with `&`, `|` and `~`
pub fn remove_imp_eq(f: &Formula) -> Formula {
    match f {
        Formula::Literal(_) => f.clone(),
        Formula::Not(g) => Formula::negation(remove_imp_eq(g)),
        Formula::Binary(op, l, r) => {
            let l = remove_imp_eq(l);
            let r = remove_imp_eq(r);
            let not = Formula::negation;
            match op {
                Connective::And | Connective::Or => Formula::binary(*op, l, r),
                Connective::Implies => Formula::or(not(l), r),
                Connective::ReverseImplies => Formula::or(l, not(r)),
                Connective::Equiv => Formula::and(
                    Formula::or(not(l.clone()), r.clone()),
                    Formula::or(l, not(r)),
                ),
                Connective::Xor => Formula::and(
                    Formula::or(l.clone(), r.clone()),
                    Formula::or(not(l), not(r)),
                ),
                Connective::Nor => not(Formula::or(l, r)),
                Connective::Nand => not(Formula::and(l, r)),
            }
        }
        Formula::Quantified(q, var, body) => {
            Formula::quantified(*q, var.clone(), remove_imp_eq(body))
        }
    }
}

/// Negation normal form: push negations down to the literals with De Morgan
/// and quantifier duality. The result has no `Not` node and only `&`/`|`.
/// Negated truth constants are flipped to the opposite constant.
pub fn move_negation_in(f: &Formula) -> Formula {
    nnf(f, false)
}

fn nnf(f: &Formula, negate: bool) -> Formula {
    match f {
        Formula::Literal(lit) => Formula::Literal(negate_literal(lit, negate)),
        Formula::Not(g) => nnf(g, !negate),
        Formula::Binary(op @ (Connective::And | Connective::Or), l, r) => {
            let op = match (op, negate) {
                (Connective::And, true) => Connective::Or,
                (Connective::Or, true) => Connective::And,
                (op, _) => *op,
            };
            Formula::binary(op, nnf(l, negate), nnf(r, negate))
        }
        Formula::Binary(..) => nnf(&remove_imp_eq(f), negate),
        Formula::Quantified(q, var, body) => {
            let q = if negate { q.dual() } else { *q };
            Formula::quantified(q, var.clone(), nnf(body, negate))
        }
    }
}

/// Sign flip that keeps truth constants positive
pub(crate) fn negate_literal(lit: &Literal, negate: bool) -> Literal {
    let flipped = if negate { lit.negate() } else { lit.clone() };
    if flipped.is_true_constant() {
        return Literal::predicate(crate::logic::TRUE_SYMBOL, vec![], false);
    }
    if flipped.is_false_constant() {
        return Literal::predicate(crate::logic::FALSE_SYMBOL, vec![], false);
    }
    flipped
}

/// Rename every bound variable to a fresh session variable, so that no two
/// quantifiers bind the same name and no bound name is also free
pub fn standardize_variables(f: &Formula, session: &mut Session) -> Formula {
    let taken = f.variables();
    standardize(f, &taken, session)
}

/// Next session variable whose name does not already occur in the input
fn fresh_avoiding(taken: &IndexSet<Variable>, session: &mut Session) -> Variable {
    loop {
        let var = session.fresh_variable();
        if !taken.contains(&var) {
            return var;
        }
    }
}

fn standardize(f: &Formula, taken: &IndexSet<Variable>, session: &mut Session) -> Formula {
    match f {
        Formula::Literal(_) => f.clone(),
        Formula::Not(g) => Formula::negation(standardize(g, taken, session)),
        Formula::Binary(op, l, r) => {
            let l = standardize(l, taken, session);
            let r = standardize(r, taken, session);
            Formula::binary(*op, l, r)
        }
        Formula::Quantified(q, var, body) => {
            let fresh = fresh_avoiding(taken, session);
            let renamed = body.substitute(&Substitution::singleton(
                var.clone(),
                Term::Variable(fresh.clone()),
            ));
            Formula::quantified(*q, fresh, standardize(&renamed, taken, session))
        }
    }
}

/// Prenex form: hoist quantifiers above `&` and `|` until none is below a
/// connective. Expects negation normal form with standardized variables.
pub fn move_quantifiers_left(f: &Formula) -> Formula {
    match f {
        Formula::Literal(_) => f.clone(),
        Formula::Not(g) => Formula::negation(move_quantifiers_left(g)),
        Formula::Quantified(q, var, body) => {
            Formula::quantified(*q, var.clone(), move_quantifiers_left(body))
        }
        Formula::Binary(op, l, r) => {
            hoist(*op, move_quantifiers_left(l), move_quantifiers_left(r))
        }
    }
}

fn hoist(op: Connective, l: Formula, r: Formula) -> Formula {
    match (l, r) {
        (Formula::Quantified(q, var, body), r) => {
            Formula::quantified(q, var, hoist(op, *body, r))
        }
        (l, Formula::Quantified(q, var, body)) => {
            Formula::quantified(q, var, hoist(op, l, *body))
        }
        (l, r) => Formula::binary(op, l, r),
    }
}

/// Replace existentially quantified variables by skolem terms over the
/// universally quantified variables in scope. Expects negation normal form
/// with standardized variables.
pub fn skolemize(f: &Formula, session: &mut Session) -> Formula {
    skolemize_in(f, &mut Vec::new(), session)
}

fn skolemize_in(
    f: &Formula,
    universals: &mut Vec<Variable>,
    session: &mut Session,
) -> Formula {
    match f {
        Formula::Literal(_) => f.clone(),
        Formula::Not(g) => Formula::negation(skolemize_in(g, universals, session)),
        Formula::Binary(op, l, r) => {
            let l = skolemize_in(l, universals, session);
            let r = skolemize_in(r, universals, session);
            Formula::binary(*op, l, r)
        }
        Formula::Quantified(Quantifier::Forall, var, body) => {
            universals.push(var.clone());
            let body = skolemize_in(body, universals, session);
            universals.pop();
            Formula::forall(var.clone(), body)
        }
        Formula::Quantified(Quantifier::Exists, var, body) => {
            let term = skolem_term(session.next_skolem_symbol(), &universals[..]);
            let body = body.substitute(&Substitution::singleton(var.clone(), term));
            skolemize_in(&body, universals, session)
        }
    }
}

/// Drop universal quantifiers; their variables become free
pub fn remove_universal_quantifiers(f: &Formula) -> Formula {
    match f {
        Formula::Literal(_) => f.clone(),
        Formula::Not(g) => Formula::negation(remove_universal_quantifiers(g)),
        Formula::Binary(op, l, r) => Formula::binary(
            *op,
            remove_universal_quantifiers(l),
            remove_universal_quantifiers(r),
        ),
        Formula::Quantified(Quantifier::Forall, _, body) => remove_universal_quantifiers(body),
        Formula::Quantified(q, var, body) => {
            Formula::quantified(*q, var.clone(), remove_universal_quantifiers(body))
        }
    }
}

/// Is `f` a conjunction of disjunctions of literals?
pub fn is_cnf(f: &Formula) -> bool {
    match f {
        Formula::Binary(Connective::And, l, r) => is_cnf(l) && is_cnf(r),
        _ => is_clause(f),
    }
}

fn is_clause(f: &Formula) -> bool {
    match f {
        Formula::Literal(_) => true,
        Formula::Binary(Connective::Or, l, r) => is_clause(l) && is_clause(r),
        _ => false,
    }
}

/// Distribute `|` over `&` until the formula is in conjunctive normal form.
/// Expects a quantifier-free formula in negation normal form.
pub fn distribute_and_over_or(f: &Formula) -> Formula {
    let mut current = distribute(f);
    while !is_cnf(&current) {
        let next = distribute(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn distribute(f: &Formula) -> Formula {
    match f {
        Formula::Binary(Connective::And, l, r) => Formula::and(distribute(l), distribute(r)),
        Formula::Binary(Connective::Or, l, r) => distribute_or(distribute(l), distribute(r)),
        _ => f.clone(),
    }
}

/// `l | r` for `l` and `r` in CNF
fn distribute_or(l: Formula, r: Formula) -> Formula {
    match (l, r) {
        (Formula::Binary(Connective::And, a, b), r) => {
            Formula::and(distribute_or(*a, r.clone()), distribute_or(*b, r))
        }
        (l, Formula::Binary(Connective::And, a, b)) => {
            Formula::and(distribute_or(l.clone(), *a), distribute_or(l, *b))
        }
        (l, r) => Formula::or(l, r),
    }
}

/// The conjuncts of a top-level conjunction, left to right
pub fn separate_conjunctions(f: &Formula) -> Vec<&Formula> {
    let mut out = Vec::new();
    let mut stack = vec![f];
    while let Some(g) = stack.pop() {
        match g {
            Formula::Binary(Connective::And, l, r) => {
                stack.push(r);
                stack.push(l);
            }
            _ => out.push(g),
        }
    }
    out
}

/// Literals of a disjunction as a clause: `$false` literals are removed and
/// duplicates dropped. Returns `None` when the disjunction contains `$true`.
pub fn flatten(f: &Formula, clause_type: ClauseType) -> Option<Clause> {
    let mut literals: IndexSet<Literal> = IndexSet::new();
    for lit in f.literals() {
        if lit.is_true_constant() {
            return None;
        }
        if !lit.is_false_constant() {
            literals.insert(lit.clone());
        }
    }
    Some(Clause::with_type(literals.into_iter().collect(), clause_type))
}

/// Split a CNF formula into named clauses
pub fn to_clauses(f: &Formula, clause_type: ClauseType, session: &mut Session) -> Vec<Clause> {
    separate_conjunctions(f)
        .into_iter()
        .filter_map(|conjunct| flatten(conjunct, clause_type))
        .map(|clause| clause.named(session.next_clause_name()))
        .collect()
}
