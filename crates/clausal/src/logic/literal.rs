//! Literals: signed atoms

use super::substitution::{BacktrackSubstitution, Substitution};
use super::term::{Term, Variable};
use super::unification::match_term;
use indexmap::IndexSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Predicate symbol of equality atoms
pub const EQUALITY: &str = "=";

/// Propositional constants
pub const TRUE_SYMBOL: &str = "$true";
pub const FALSE_SYMBOL: &str = "$false";

/// A literal is an atom, possibly negated.
///
/// The atom is a compound term whose top symbol is the predicate. The
/// `inference_eligible` flag is set by literal selection; it does not take
/// part in equality or hashing.
#[derive(Debug, Clone)]
pub struct Literal {
    pub atom: Term,
    pub negated: bool,
    pub inference_eligible: bool,
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.negated == other.negated && self.atom == other.atom
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negated.hash(state);
        self.atom.hash(state);
    }
}

impl Literal {
    pub fn new(atom: Term, negated: bool) -> Self {
        Literal {
            atom,
            negated,
            inference_eligible: true,
        }
    }

    pub fn positive(atom: Term) -> Self {
        Literal::new(atom, false)
    }

    pub fn negative(atom: Term) -> Self {
        Literal::new(atom, true)
    }

    /// Build `p(args)` or `~p(args)`
    pub fn predicate(symbol: impl Into<String>, args: Vec<Term>, negated: bool) -> Self {
        Literal::new(Term::Compound(symbol.into(), args), negated)
    }

    /// Build `s=t` or `s!=t`
    pub fn equation(lhs: Term, rhs: Term, negated: bool) -> Self {
        Literal::new(Term::Compound(EQUALITY.to_string(), vec![lhs, rhs]), negated)
    }

    pub fn is_positive(&self) -> bool {
        !self.negated
    }

    pub fn is_negative(&self) -> bool {
        self.negated
    }

    /// Predicate symbol (top symbol of the atom)
    pub fn predicate_symbol(&self) -> &str {
        match &self.atom {
            Term::Compound(p, _) => p,
            // Atoms are never bare variables; fall back to the variable name
            Term::Variable(v) => &v.name,
        }
    }

    pub fn args(&self) -> &[Term] {
        self.atom.args()
    }

    pub fn arity(&self) -> usize {
        self.atom.arity()
    }

    pub fn is_equational(&self) -> bool {
        self.predicate_symbol() == EQUALITY && self.arity() == 2
    }

    /// `X=Y` or `X!=Y` with two variables
    pub fn is_pure_variable(&self) -> bool {
        self.is_equational() && self.args().iter().all(Term::is_variable)
    }

    /// Positive `$true` or negative `$false`
    pub fn is_true_constant(&self) -> bool {
        match (self.predicate_symbol(), self.negated) {
            (TRUE_SYMBOL, false) | (FALSE_SYMBOL, true) => self.arity() == 0,
            _ => false,
        }
    }

    /// Positive `$false` or negative `$true`
    pub fn is_false_constant(&self) -> bool {
        match (self.predicate_symbol(), self.negated) {
            (FALSE_SYMBOL, false) | (TRUE_SYMBOL, true) => self.arity() == 0,
            _ => false,
        }
    }

    /// Same atom, opposite sign
    pub fn is_opposite(&self, other: &Literal) -> bool {
        self.negated != other.negated && self.atom == other.atom
    }

    pub fn negate(&self) -> Literal {
        Literal::new(self.atom.clone(), !self.negated)
    }

    pub fn weight(&self, fweight: i64, vweight: i64) -> i64 {
        self.atom.weight(fweight, vweight)
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.atom.variables()
    }

    pub fn collect_variables(&self, vars: &mut IndexSet<Variable>) {
        self.atom.collect_variables(vars);
    }

    pub fn is_ground(&self) -> bool {
        self.atom.is_ground()
    }

    /// `(negated, predicate)`; the element of a clause's predicate abstraction
    pub fn predicate_abstraction(&self) -> (bool, String) {
        (self.negated, self.predicate_symbol().to_string())
    }

    /// Apply a substitution; the result is inference-eligible
    pub fn instantiate(&self, subst: &Substitution) -> Literal {
        Literal::new(subst.apply(&self.atom), self.negated)
    }

    /// Match this literal onto `target`: same sign and the atom matches
    pub fn matches(&self, target: &Literal, subst: &mut BacktrackSubstitution) -> bool {
        self.negated == target.negated && match_term(&self.atom, &target.atom, subst)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_equational() {
            let args = self.args();
            let op = if self.negated { "!=" } else { "=" };
            write!(f, "{}{}{}", args[0], op, args[1])
        } else if self.negated {
            write!(f, "~{}", self.atom)
        } else {
            write!(f, "{}", self.atom)
        }
    }
}
