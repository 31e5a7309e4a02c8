//! Variable substitutions
//!
//! [`Substitution`] is the composable form built by unification: it is kept
//! fully expanded, so applying it once yields the final instance.
//! [`BacktrackSubstitution`] only supports direct bindings, but records them
//! in a log so a search can roll back to an earlier mark. Matching and
//! subsumption use it.

use super::term::{Term, Variable};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// A mapping from variables to terms; unbound variables map to themselves
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// A substitution with a single binding
    pub fn singleton(var: Variable, term: Term) -> Self {
        let mut map = IndexMap::new();
        map.insert(var, term);
        Substitution { map }
    }

    /// Plain insertion without normalization. Used to build renamings.
    pub fn insert(&mut self, var: Variable, term: Term) {
        self.map.insert(var, term);
    }

    /// Compose the binding `var <- term` into this substitution: rewrite every
    /// existing right-hand side with it, then add it unless `var` is bound.
    pub fn compose_binding(&mut self, var: Variable, term: Term) {
        for existing in self.map.values_mut() {
            *existing = substitute_one(existing, &var, &term);
        }
        self.map.entry(var).or_insert(term);
    }

    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    pub fn is_bound(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    /// Apply the substitution to every variable leaf of `term` in one pass
    pub fn apply(&self, term: &Term) -> Term {
        if self.map.is_empty() {
            return term.clone();
        }
        match term {
            Term::Variable(v) => self.map.get(v).cloned().unwrap_or_else(|| term.clone()),
            Term::Compound(f, args) => {
                Term::Compound(f.clone(), args.iter().map(|arg| self.apply(arg)).collect())
            }
        }
    }
}

/// Replace every occurrence of `var` in `term` by `value`
pub(crate) fn substitute_one(term: &Term, var: &Variable, value: &Term) -> Term {
    match term {
        Term::Variable(v) if v == var => value.clone(),
        Term::Variable(_) => term.clone(),
        Term::Compound(f, args) => Term::Compound(
            f.clone(),
            args.iter()
                .map(|arg| substitute_one(arg, var, value))
                .collect(),
        ),
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}<-{}", var, term)?;
        }
        write!(f, "}}")
    }
}

/// Mark into a [`BacktrackSubstitution`]: the length of its binding log
pub type BacktrackMark = usize;

/// Substitution with an undo log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BacktrackSubstitution {
    map: HashMap<Variable, Term>,
    log: Vec<Variable>,
}

impl BacktrackSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `var` directly to `term` and log the binding
    pub fn add_binding(&mut self, var: Variable, term: Term) {
        self.map.insert(var.clone(), term);
        self.log.push(var);
    }

    pub fn value(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    pub fn is_bound(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    /// Current mark, to pass to [`Self::backtrack_to`] later
    pub fn mark(&self) -> BacktrackMark {
        self.log.len()
    }

    /// Undo the most recent binding. Returns false if there was none.
    pub fn backtrack(&mut self) -> bool {
        match self.log.pop() {
            Some(var) => {
                self.map.remove(&var);
                true
            }
            None => false,
        }
    }

    /// Undo bindings until the log is back at `mark`; returns how many were undone
    pub fn backtrack_to(&mut self, mark: BacktrackMark) -> usize {
        let mut undone = 0;
        while self.log.len() > mark && self.backtrack() {
            undone += 1;
        }
        undone
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn apply(&self, term: &Term) -> Term {
        match term {
            Term::Variable(v) => self.map.get(v).cloned().unwrap_or_else(|| term.clone()),
            Term::Compound(f, args) => {
                Term::Compound(f.clone(), args.iter().map(|arg| self.apply(arg)).collect())
            }
        }
    }

    /// Snapshot as a plain substitution, bindings in log order
    pub fn to_substitution(&self) -> Substitution {
        let mut subst = Substitution::new();
        for var in &self.log {
            if let Some(term) = self.map.get(var) {
                subst.insert(var.clone(), term.clone());
            }
        }
        subst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Variable {
        Variable::new("X")
    }

    fn y() -> Variable {
        Variable::new("Y")
    }

    #[test]
    fn test_apply_leaves_unbound_variables() {
        let subst = Substitution::singleton(x(), Term::constant("a"));
        let t = Term::compound("f", vec![Term::var("X"), Term::var("Y")]);
        assert_eq!(subst.apply(&t).to_string(), "f(a,Y)");
    }

    #[test]
    fn test_compose_binding_rewrites_existing_bindings() {
        // {X <- f(Y)} then Y <- a gives {X <- f(a), Y <- a}
        let mut subst = Substitution::singleton(x(), Term::compound("f", vec![Term::var("Y")]));
        subst.compose_binding(y(), Term::constant("a"));

        assert_eq!(subst.get(&x()).map(|t| t.to_string()), Some("f(a)".into()));
        assert_eq!(subst.get(&y()), Some(&Term::constant("a")));
        // Fully expanded: one application suffices
        let t = Term::compound("g", vec![Term::var("X"), Term::var("Y")]);
        assert_eq!(subst.apply(&t).to_string(), "g(f(a),a)");
    }

    #[test]
    fn test_compose_binding_keeps_existing_binding_of_same_variable() {
        let mut subst = Substitution::singleton(x(), Term::constant("a"));
        subst.compose_binding(x(), Term::constant("b"));
        assert_eq!(subst.get(&x()), Some(&Term::constant("a")));
        assert_eq!(subst.len(), 1);
    }

    #[test]
    fn test_backtrack_to_mark_restores_state() {
        let mut subst = BacktrackSubstitution::new();
        subst.add_binding(x(), Term::constant("a"));
        let before = subst.clone();
        let mark = subst.mark();

        subst.add_binding(y(), Term::constant("b"));
        subst.add_binding(Variable::new("Z"), Term::var("X"));
        assert_eq!(subst.len(), 3);

        assert_eq!(subst.backtrack_to(mark), 2);
        assert_eq!(subst, before);
        assert!(subst.is_bound(&x()));
        assert!(!subst.is_bound(&y()));
    }

    #[test]
    fn test_backtrack_on_empty_log() {
        let mut subst = BacktrackSubstitution::new();
        assert!(!subst.backtrack());
        assert_eq!(subst.backtrack_to(0), 0);
    }

    #[test]
    fn test_to_substitution_preserves_log_order() {
        let mut subst = BacktrackSubstitution::new();
        subst.add_binding(y(), Term::constant("b"));
        subst.add_binding(x(), Term::constant("a"));
        assert_eq!(subst.to_substitution().to_string(), "{Y<-b, X<-a}");
    }
}
