//! Conversion of first-order formulas into clause normal form
//!
//! Two pipelines are available. The standard one goes through prenex form:
//!
//! 1. [`op_simplify`]: remove `<=`, `~|`, `~&`, `<~>`
//! 2. [`remove_imp_eq`]: remove `=>` and `<=>`
//! 3. [`move_negation_in`]: negation normal form
//! 4. [`standardize_variables`]: rename bound variables apart
//! 5. [`move_quantifiers_left`]: prenex form
//! 6. [`skolemize`]
//! 7. [`remove_universal_quantifiers`]
//! 8. [`distribute_and_over_or`]
//! 9. [`separate_conjunctions`] and [`flatten`]: one clause per conjunct
//!
//! The small CNF pipeline ([`small_cnf`]) simplifies truth constants and
//! pushes quantifiers inwards instead, which yields smaller skolem terms.

pub mod formula;
pub mod small;
pub mod transform;

pub use formula::{Connective, Formula, NamedFormula, Quantifier};
pub use small::{miniscope, polarity_nnf, simplify_truth_constants, small_cnf};
pub use transform::{
    distribute_and_over_or, flatten, is_cnf, move_negation_in, move_quantifiers_left,
    op_simplify, remove_imp_eq, remove_universal_quantifiers, separate_conjunctions, skolemize,
    standardize_variables, to_clauses,
};

use crate::logic::Clause;
use crate::session::Session;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which clausification pipeline to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClausificationMode {
    #[default]
    Standard,
    Small,
}

impl ClausificationMode {
    pub fn name(&self) -> &'static str {
        match self {
            ClausificationMode::Standard => "standard",
            ClausificationMode::Small => "small",
        }
    }
}

impl fmt::Display for ClausificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ClausificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(ClausificationMode::Standard),
            "small" => Ok(ClausificationMode::Small),
            _ => Err(format!("unknown clausification mode '{}'", s)),
        }
    }
}

/// Clausify one formula with the prenex pipeline. Free variables are read
/// as universally quantified, and a conjecture is negated first.
pub fn standard_cnf(nf: &NamedFormula, session: &mut Session) -> Vec<Clause> {
    let f = op_simplify(&nf.formula);
    let f = remove_imp_eq(&f);
    let f = move_negation_in(&f);
    let f = standardize_variables(&f, session);
    let f = move_quantifiers_left(&f);
    let f = skolemize(&f, session);
    let f = remove_universal_quantifiers(&f);
    let f = distribute_and_over_or(&f);
    to_clauses(&f, nf.role, session)
}

/// Clausify a formula, negating it first if it is a conjecture
pub fn clausify(nf: NamedFormula, mode: ClausificationMode, session: &mut Session) -> Vec<Clause> {
    let nf = nf.prepare_for_refutation();
    let nf = NamedFormula {
        formula: nf.formula.universal_closure(),
        ..nf
    };
    let clauses = match mode {
        ClausificationMode::Standard => standard_cnf(&nf, session),
        ClausificationMode::Small => small_cnf(&nf, session),
    };
    trace!("clausified {} into {} clauses", nf.name, clauses.len());
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{ClauseType, Literal, Term, Variable};

    fn pred(name: &str, args: Vec<Term>) -> Formula {
        Literal::predicate(name, args, false).into()
    }

    fn all_modes() -> [ClausificationMode; 2] {
        [ClausificationMode::Standard, ClausificationMode::Small]
    }

    #[test]
    fn test_implication_becomes_one_clause() {
        // ![X]: (human(X) => mortal(X))
        let x = Variable::new("X");
        let f = Formula::forall(
            x.clone(),
            Formula::binary(
                Connective::Implies,
                pred("human", vec![Term::Variable(x.clone())]),
                pred("mortal", vec![Term::Variable(x)]),
            ),
        );
        for mode in all_modes() {
            let mut session = Session::new();
            let clauses = clausify(NamedFormula::new("ax", ClauseType::Axiom, f.clone()), mode, &mut session);
            assert_eq!(clauses.len(), 1);
            assert_eq!(clauses[0].literals_string(), "~human(X_1)|mortal(X_1)");
            assert_eq!(clauses[0].name, "c1");
        }
    }

    #[test]
    fn test_conjecture_is_negated() {
        let f = pred("mortal", vec![Term::constant("socrates")]);
        for mode in all_modes() {
            let mut session = Session::new();
            let clauses = clausify(NamedFormula::new("goal", ClauseType::Conjecture, f.clone()), mode, &mut session);
            assert_eq!(clauses.len(), 1);
            assert_eq!(clauses[0].literals_string(), "~mortal(socrates)");
            assert_eq!(clauses[0].clause_type, ClauseType::NegatedConjecture);
        }
    }

    #[test]
    fn test_existential_conjecture_needs_no_skolem() {
        // conjecture ?[X]: p(X) gives ~p(X)
        let x = Variable::new("X");
        let f = Formula::exists(x.clone(), pred("p", vec![Term::Variable(x)]));
        for mode in all_modes() {
            let mut session = Session::new();
            let clauses = clausify(NamedFormula::new("goal", ClauseType::Conjecture, f.clone()), mode, &mut session);
            assert_eq!(clauses.len(), 1);
            assert_eq!(clauses[0].literals_string(), "~p(X_1)");
            assert_eq!(session.skolems_issued(), 0);
        }
    }

    #[test]
    fn test_session_shaped_names_are_not_merged() {
        // ![X_2]: ![X_1]: r(X_2,X_1) keeps two distinct variables
        let (x2, x1) = (Variable::new("X_2"), Variable::new("X_1"));
        let f = Formula::forall(
            x2.clone(),
            Formula::forall(
                x1.clone(),
                pred("r", vec![Term::Variable(x2), Term::Variable(x1)]),
            ),
        );
        for mode in all_modes() {
            let mut session = Session::new();
            let clauses = clausify(NamedFormula::new("a", ClauseType::Axiom, f.clone()), mode, &mut session);
            assert_eq!(clauses.len(), 1);
            assert_eq!(clauses[0].variables().len(), 2, "{}: {}", mode, clauses[0].literals_string());
        }
    }

    #[test]
    fn test_tautological_input_yields_no_clause() {
        let f = Formula::or(pred("a", vec![]), Formula::truth(true));
        for mode in all_modes() {
            let mut session = Session::new();
            assert!(clausify(NamedFormula::new("t", ClauseType::Axiom, f.clone()), mode, &mut session).is_empty());
        }
    }

    #[test]
    fn test_equivalence_gives_two_clauses() {
        let f = Formula::binary(Connective::Equiv, pred("a", vec![]), pred("b", vec![]));
        for mode in all_modes() {
            let mut session = Session::new();
            let clauses = clausify(NamedFormula::new("e", ClauseType::Axiom, f.clone()), mode, &mut session);
            let rendered: Vec<String> = clauses.iter().map(|c| c.literals_string()).collect();
            assert_eq!(rendered, vec!["~a|b", "a|~b"]);
        }
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("small".parse::<ClausificationMode>(), Ok(ClausificationMode::Small));
        assert!("tiny".parse::<ClausificationMode>().is_err());
        assert_eq!(ClausificationMode::default().to_string(), "standard");
    }
}
