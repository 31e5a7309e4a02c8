//! Clauses: disjunctions of literals with provenance

use super::literal::Literal;
use super::substitution::Substitution;
use super::term::{Term, Variable};
use crate::inference::{Derivation, Rationale};
use crate::session::Session;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a clause, normalized from the TPTP role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    Axiom,
    NegatedConjecture,
    Conjecture,
    #[default]
    Plain,
}

impl ClauseType {
    /// Convert from a TPTP role string
    pub fn from_tptp_role(role: &str) -> Self {
        match role {
            "axiom" | "hypothesis" | "definition" | "assumption" | "lemma" | "theorem"
            | "corollary" => ClauseType::Axiom,
            "negated_conjecture" => ClauseType::NegatedConjecture,
            "conjecture" => ClauseType::Conjecture,
            _ => ClauseType::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseType::Axiom => "axiom",
            ClauseType::NegatedConjecture => "negated_conjecture",
            ClauseType::Conjecture => "conjecture",
            ClauseType::Plain => "plain",
        }
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A clause (disjunction of literals, multiset semantics)
#[derive(Debug, Clone)]
pub struct Clause {
    pub literals: Vec<Literal>,
    /// Unique within a session; empty until the clause enters a proof state
    pub name: String,
    pub clause_type: ClauseType,
    pub derivation: Derivation,
    /// 0 for input clauses, max parent depth + 1 for inferred ones
    pub depth: usize,
    /// Substitution used to produce this clause (unifier or renaming)
    pub subst: Substitution,
    /// Heuristic scores, parallel to the evaluation functions in use
    pub evaluation: Vec<i64>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause {
            literals,
            name: String::new(),
            clause_type: ClauseType::default(),
            derivation: Derivation::input(),
            depth: 0,
            subst: Substitution::new(),
            evaluation: Vec::new(),
        }
    }

    pub fn with_type(literals: Vec<Literal>, clause_type: ClauseType) -> Self {
        Clause {
            clause_type,
            ..Clause::new(literals)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// An inferred clause: plain, depth one more than the deepest parent
    pub fn inferred(
        literals: Vec<Literal>,
        rationale: Rationale,
        parents: &[&Clause],
        subst: Substitution,
    ) -> Self {
        let depth = parents.iter().map(|p| p.depth).max().unwrap_or(0) + 1;
        let support = parents.iter().map(|p| p.name.clone()).collect();
        let mut clause = Clause::new(literals);
        clause.derivation = Derivation::inference(rationale, support);
        clause.depth = depth;
        clause.subst = subst;
        clause.remove_duplicate_literals();
        clause
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The empty clause is a contradiction
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// At most one positive literal
    pub fn is_horn(&self) -> bool {
        self.literals.iter().filter(|l| l.is_positive()).count() <= 1
    }

    pub fn is_ground(&self) -> bool {
        self.literals.iter().all(Literal::is_ground)
    }

    /// Contains a complementary pair of literals
    pub fn is_tautology(&self) -> bool {
        if self.literals.len() < 2 {
            return false;
        }
        for i in 0..self.literals.len() {
            for j in (i + 1)..self.literals.len() {
                if self.literals[i].is_opposite(&self.literals[j]) {
                    return true;
                }
            }
        }
        false
    }

    pub fn positive_literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter().filter(|l| l.is_positive())
    }

    pub fn negative_literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter().filter(|l| l.is_negative())
    }

    /// Keep the first occurrence of each literal
    pub fn remove_duplicate_literals(&mut self) {
        let mut seen = IndexSet::new();
        self.literals.retain(|lit| seen.insert(lit.clone()));
    }

    pub fn weight(&self, fweight: i64, vweight: i64) -> i64 {
        self.literals
            .iter()
            .map(|lit| lit.weight(fweight, vweight))
            .sum()
    }

    /// Variables in order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = IndexSet::new();
        for lit in &self.literals {
            lit.collect_variables(&mut vars);
        }
        vars.into_iter().collect()
    }

    /// Sorted `(negated, predicate)` pairs; positive literals sort first
    pub fn predicate_abstraction(&self) -> Vec<(bool, String)> {
        let mut abstraction: Vec<_> = self
            .literals
            .iter()
            .map(Literal::predicate_abstraction)
            .collect();
        abstraction.sort();
        abstraction
    }

    /// Predicate symbols with arities
    pub fn collect_predicates(&self, preds: &mut IndexMap<String, usize>) {
        for lit in &self.literals {
            preds
                .entry(lit.predicate_symbol().to_string())
                .or_insert(lit.arity());
        }
    }

    /// Function symbols with arities, constants included
    pub fn collect_functions(&self, funcs: &mut IndexMap<String, usize>) {
        for lit in &self.literals {
            for arg in lit.args() {
                arg.collect_functions(funcs);
            }
        }
    }

    /// Apply a substitution to every literal. Metadata is kept, the
    /// substitution is recorded.
    pub fn instantiate(&self, subst: &Substitution) -> Clause {
        Clause {
            literals: self.literals.iter().map(|l| l.instantiate(subst)).collect(),
            subst: subst.clone(),
            ..self.clone()
        }
    }

    /// Copy with every variable renamed to a fresh session variable.
    /// Name, type and derivation are kept; the renaming is recorded.
    pub fn fresh_var_copy(&self, session: &mut Session) -> Clause {
        let mut renaming = Substitution::new();
        for var in self.variables() {
            renaming.insert(var, Term::Variable(session.fresh_variable()));
        }
        let mut copy = self.instantiate(&renaming);
        for (lit, original) in copy.literals.iter_mut().zip(&self.literals) {
            lit.inference_eligible = original.inference_eligible;
        }
        copy
    }

    /// Literal part in TPTP syntax; `$false` for the empty clause
    pub fn literals_string(&self) -> String {
        if self.literals.is_empty() {
            return "$false".to_string();
        }
        self.literals
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Structural equality on the literal lists only
impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        self.literals == other.literals
    }
}

impl Eq for Clause {}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cnf({},{},{}).",
            self.name,
            self.clause_type,
            self.literals_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(pred: &str, args: Vec<Term>, negated: bool) -> Literal {
        Literal::predicate(pred, args, negated)
    }

    fn x() -> Term {
        Term::var("X")
    }

    fn a() -> Term {
        Term::constant("a")
    }

    #[test]
    fn test_tautology() {
        let taut = Clause::new(vec![
            lit("p", vec![x()], false),
            lit("q", vec![], false),
            lit("p", vec![x()], true),
        ]);
        assert!(taut.is_tautology());

        let not_taut = Clause::new(vec![lit("p", vec![x()], false), lit("p", vec![a()], true)]);
        assert!(!not_taut.is_tautology());
        assert!(!Clause::new(vec![]).is_tautology());
    }

    #[test]
    fn test_horn() {
        let horn = Clause::new(vec![lit("p", vec![], false), lit("q", vec![], true)]);
        assert!(horn.is_horn());
        let non_horn = Clause::new(vec![lit("p", vec![], false), lit("q", vec![], false)]);
        assert!(!non_horn.is_horn());
    }

    #[test]
    fn test_predicate_abstraction_is_sorted() {
        let clause = Clause::new(vec![
            lit("q", vec![x()], true),
            lit("r", vec![], false),
            lit("p", vec![a()], false),
        ]);
        assert_eq!(
            clause.predicate_abstraction(),
            vec![
                (false, "p".to_string()),
                (false, "r".to_string()),
                (true, "q".to_string())
            ]
        );
    }

    #[test]
    fn test_weight() {
        // p(X) | ~q(f(a)) with fweight 2, vweight 1: (2+1) + (2+2+2)
        let clause = Clause::new(vec![
            lit("p", vec![x()], false),
            lit("q", vec![Term::compound("f", vec![a()])], true),
        ]);
        assert_eq!(clause.weight(2, 1), 9);
    }

    #[test]
    fn test_fresh_var_copy_renames_consistently() {
        let mut session = Session::new();
        let clause = Clause::new(vec![
            lit("p", vec![x(), Term::var("Y")], false),
            lit("q", vec![x()], true),
        ])
        .named("c7");

        let copy = clause.fresh_var_copy(&mut session);
        assert_eq!(copy.name, "c7");
        assert_eq!(copy.to_string(), "cnf(c7,plain,p(X_1,X_2)|~q(X_1)).");
        assert_eq!(copy.subst.len(), 2);
        assert!(copy
            .variables()
            .iter()
            .all(|v| !clause.variables().contains(v)));
    }

    #[test]
    fn test_remove_duplicates_keeps_order() {
        let mut clause = Clause::new(vec![
            lit("p", vec![a()], false),
            lit("q", vec![], false),
            lit("p", vec![a()], false),
        ]);
        clause.remove_duplicate_literals();
        assert_eq!(clause.literals_string(), "p(a)|q");
    }

    #[test]
    fn test_display_empty_clause() {
        let clause = Clause::with_type(vec![], ClauseType::NegatedConjecture).named("c3");
        assert_eq!(clause.to_string(), "cnf(c3,negated_conjecture,$false).");
    }

    #[test]
    fn test_inferred_depth_and_support() {
        let mut p1 = Clause::new(vec![]).named("a1");
        p1.depth = 2;
        let p2 = Clause::new(vec![]).named("a2");
        let child = Clause::inferred(vec![], Rationale::Resolution, &[&p1, &p2], Substitution::new());
        assert_eq!(child.depth, 3);
        assert_eq!(child.derivation.support, vec!["a1", "a2"]);
    }

    #[test]
    fn test_role_normalization() {
        assert_eq!(ClauseType::from_tptp_role("hypothesis"), ClauseType::Axiom);
        assert_eq!(ClauseType::from_tptp_role("conjecture"), ClauseType::Conjecture);
        assert_eq!(ClauseType::from_tptp_role("unknown"), ClauseType::Plain);
    }
}
