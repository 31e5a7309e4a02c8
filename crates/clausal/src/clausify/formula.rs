//! First-order formulas over literals

use crate::logic::{ClauseType, Literal, Substitution, Term, Variable, FALSE_SYMBOL, TRUE_SYMBOL};
use indexmap::IndexSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Forall,
    Exists,
}

impl Quantifier {
    pub fn dual(self) -> Quantifier {
        match self {
            Quantifier::Forall => Quantifier::Exists,
            Quantifier::Exists => Quantifier::Forall,
        }
    }

    /// TPTP symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Quantifier::Forall => "!",
            Quantifier::Exists => "?",
        }
    }
}

/// Binary connectives of TPTP `fof`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
    Implies,
    ReverseImplies,
    Equiv,
    Xor,
    Nor,
    Nand,
}

impl Connective {
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&",
            Connective::Or => "|",
            Connective::Implies => "=>",
            Connective::ReverseImplies => "<=",
            Connective::Equiv => "<=>",
            Connective::Xor => "<~>",
            Connective::Nor => "~|",
            Connective::Nand => "~&",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Connective> {
        Some(match symbol {
            "&" => Connective::And,
            "|" => Connective::Or,
            "=>" => Connective::Implies,
            "<=" => Connective::ReverseImplies,
            "<=>" => Connective::Equiv,
            "<~>" => Connective::Xor,
            "~|" => Connective::Nor,
            "~&" => Connective::Nand,
            _ => return None,
        })
    }
}

/// A formula tree. Negation of atoms lives on [`Literal`]; `Not` covers
/// compound subformulas until negation normal form removes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Literal(Literal),
    Not(Box<Formula>),
    Binary(Connective, Box<Formula>, Box<Formula>),
    Quantified(Quantifier, Variable, Box<Formula>),
}

impl Formula {
    pub fn truth(value: bool) -> Formula {
        let symbol = if value { TRUE_SYMBOL } else { FALSE_SYMBOL };
        Formula::Literal(Literal::predicate(symbol, vec![], false))
    }

    pub fn negation(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    pub fn binary(op: Connective, lhs: Formula, rhs: Formula) -> Formula {
        Formula::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Formula, rhs: Formula) -> Formula {
        Formula::binary(Connective::And, lhs, rhs)
    }

    pub fn or(lhs: Formula, rhs: Formula) -> Formula {
        Formula::binary(Connective::Or, lhs, rhs)
    }

    pub fn quantified(q: Quantifier, var: Variable, body: Formula) -> Formula {
        Formula::Quantified(q, var, Box::new(body))
    }

    pub fn forall(var: Variable, body: Formula) -> Formula {
        Formula::quantified(Quantifier::Forall, var, body)
    }

    pub fn exists(var: Variable, body: Formula) -> Formula {
        Formula::quantified(Quantifier::Exists, var, body)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Formula::Literal(_))
    }

    pub fn is_quantified(&self) -> bool {
        matches!(self, Formula::Quantified(..))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Formula::Literal(l) if l.is_true_constant())
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Formula::Literal(l) if l.is_false_constant())
    }

    /// Free variables in order of first occurrence
    pub fn free_variables(&self) -> Vec<Variable> {
        let mut free = IndexSet::new();
        self.collect_free(&mut Vec::new(), &mut free);
        free.into_iter().collect()
    }

    fn collect_free(&self, bound: &mut Vec<Variable>, free: &mut IndexSet<Variable>) {
        match self {
            Formula::Literal(lit) => {
                for var in lit.variables() {
                    if !bound.contains(&var) {
                        free.insert(var);
                    }
                }
            }
            Formula::Not(f) => f.collect_free(bound, free),
            Formula::Binary(_, l, r) => {
                l.collect_free(bound, free);
                r.collect_free(bound, free);
            }
            Formula::Quantified(_, var, body) => {
                bound.push(var.clone());
                body.collect_free(bound, free);
                bound.pop();
            }
        }
    }

    /// Every variable that occurs in the formula, bound or free
    pub fn variables(&self) -> IndexSet<Variable> {
        let mut vars = IndexSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut IndexSet<Variable>) {
        match self {
            Formula::Literal(lit) => lit.collect_variables(vars),
            Formula::Not(f) => f.collect_variables(vars),
            Formula::Binary(_, l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
            Formula::Quantified(_, var, body) => {
                vars.insert(var.clone());
                body.collect_variables(vars);
            }
        }
    }

    pub fn has_free(&self, var: &Variable) -> bool {
        match self {
            Formula::Literal(lit) => lit.atom.occurs(var),
            Formula::Not(f) => f.has_free(var),
            Formula::Binary(_, l, r) => l.has_free(var) || r.has_free(var),
            Formula::Quantified(_, bound, body) => bound != var && body.has_free(var),
        }
    }

    /// Apply `subst` to the free variables. Bindings for a variable are
    /// dropped below a quantifier that binds it; the caller keeps the
    /// substituted terms free of bound variables.
    pub fn substitute(&self, subst: &Substitution) -> Formula {
        match self {
            Formula::Literal(lit) => Formula::Literal(lit.instantiate(subst)),
            Formula::Not(f) => Formula::negation(f.substitute(subst)),
            Formula::Binary(op, l, r) => {
                Formula::binary(*op, l.substitute(subst), r.substitute(subst))
            }
            Formula::Quantified(q, var, body) => {
                if subst.is_bound(var) {
                    let mut inner = Substitution::new();
                    for (v, t) in subst.iter().filter(|(v, _)| *v != var) {
                        inner.insert(v.clone(), t.clone());
                    }
                    Formula::quantified(*q, var.clone(), body.substitute(&inner))
                } else {
                    Formula::quantified(*q, var.clone(), body.substitute(subst))
                }
            }
        }
    }

    /// Bind every free variable universally
    pub fn universal_closure(self) -> Formula {
        let free = self.free_variables();
        free.into_iter()
            .rev()
            .fold(self, |body, var| Formula::forall(var, body))
    }

    /// Every literal of the formula, left to right
    pub fn literals(&self) -> Vec<&Literal> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(f) = stack.pop() {
            match f {
                Formula::Literal(lit) => out.push(lit),
                Formula::Not(g) | Formula::Quantified(_, _, g) => stack.push(g),
                Formula::Binary(_, l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
            }
        }
        out
    }

    /// Number of nodes
    pub fn size(&self) -> usize {
        match self {
            Formula::Literal(_) => 1,
            Formula::Not(f) | Formula::Quantified(_, _, f) => 1 + f.size(),
            Formula::Binary(_, l, r) => 1 + l.size() + r.size(),
        }
    }
}

impl From<Literal> for Formula {
    fn from(lit: Literal) -> Self {
        Formula::Literal(lit)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Literal(lit) => write!(f, "{}", lit),
            Formula::Not(g) => write!(f, "~({})", g),
            Formula::Binary(op, l, r) => write!(f, "({}{}{})", l, op.symbol(), r),
            Formula::Quantified(q, var, body) => {
                write!(f, "{}[{}]:{}", q.symbol(), var, body)
            }
        }
    }
}

/// A formula with its TPTP name and role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFormula {
    pub name: String,
    pub role: ClauseType,
    pub formula: Formula,
}

impl NamedFormula {
    pub fn new(name: impl Into<String>, role: ClauseType, formula: Formula) -> Self {
        NamedFormula {
            name: name.into(),
            role,
            formula,
        }
    }

    /// A conjecture is replaced by its negation, typed `negated_conjecture`
    pub fn prepare_for_refutation(self) -> NamedFormula {
        match self.role {
            ClauseType::Conjecture => NamedFormula {
                name: self.name,
                role: ClauseType::NegatedConjecture,
                formula: Formula::negation(self.formula.universal_closure()),
            },
            _ => self,
        }
    }
}

impl fmt::Display for NamedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fof({},{},{}).", self.name, self.role, self.formula)
    }
}

/// Term for `symbol` applied to `vars`, a constant when `vars` is empty
pub(crate) fn skolem_term(symbol: String, vars: &[Variable]) -> Term {
    Term::Compound(symbol, vars.iter().cloned().map(Term::Variable).collect())
}
