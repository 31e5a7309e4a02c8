//! Symbol signatures

use super::clause::Clause;
use super::literal::EQUALITY;
use indexmap::IndexMap;

/// Function and predicate symbols of a clause set with their arities.
/// Constants are functions of arity 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub functions: IndexMap<String, usize>,
    pub predicates: IndexMap<String, usize>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_clauses<'a>(clauses: impl IntoIterator<Item = &'a Clause>) -> Self {
        let mut sig = Signature::new();
        for clause in clauses {
            sig.add_clause(clause);
        }
        sig
    }

    pub fn add_clause(&mut self, clause: &Clause) {
        clause.collect_predicates(&mut self.predicates);
        clause.collect_functions(&mut self.functions);
    }

    pub fn add_function(&mut self, name: impl Into<String>, arity: usize) {
        self.functions.insert(name.into(), arity);
    }

    pub fn add_predicate(&mut self, name: impl Into<String>, arity: usize) {
        self.predicates.insert(name.into(), arity);
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn is_predicate(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.functions
            .get(name)
            .or_else(|| self.predicates.get(name))
            .copied()
    }

    /// Does equality occur anywhere?
    pub fn is_equational(&self) -> bool {
        self.predicates.contains_key(EQUALITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Literal, Term};

    #[test]
    fn test_collects_functions_and_predicates() {
        let clause = Clause::new(vec![
            Literal::predicate(
                "p",
                vec![Term::compound("f", vec![Term::var("X"), Term::constant("a")])],
                false,
            ),
            Literal::predicate("q", vec![], true),
        ]);
        let sig = Signature::from_clauses([&clause]);

        assert_eq!(sig.arity("p"), Some(1));
        assert_eq!(sig.arity("q"), Some(0));
        assert_eq!(sig.arity("f"), Some(2));
        assert_eq!(sig.arity("a"), Some(0));
        assert!(sig.is_predicate("p"));
        assert!(!sig.is_function("p"));
        assert!(!sig.is_equational());
    }

    #[test]
    fn test_equational() {
        let clause = Clause::new(vec![Literal::equation(
            Term::constant("a"),
            Term::constant("b"),
            false,
        )]);
        assert!(Signature::from_clauses([&clause]).is_equational());
    }
}
