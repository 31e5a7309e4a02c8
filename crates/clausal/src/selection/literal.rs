//! Literal selection strategies
//!
//! A strategy picks one negative literal of a clause; only that literal stays
//! eligible for generating inferences. Clauses without negative literals keep
//! every literal eligible.
//!
//! Strategies:
//! - `First`: the first negative literal
//! - `Smallest` / `Largest`: by symbol count
//! - `VarSize`: fewest distinct variables, ties broken towards the larger literal
//! - `EqResVarSize`: pure variable (dis)equations first, then as `VarSize`

use crate::logic::{Clause, Literal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LitSelection {
    First,
    Smallest,
    Largest,
    VarSize,
    EqResVarSize,
}

impl LitSelection {
    pub const ALL: [LitSelection; 5] = [
        LitSelection::First,
        LitSelection::Smallest,
        LitSelection::Largest,
        LitSelection::VarSize,
        LitSelection::EqResVarSize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LitSelection::First => "first",
            LitSelection::Smallest => "smallest",
            LitSelection::Largest => "largest",
            LitSelection::VarSize => "varsize",
            LitSelection::EqResVarSize => "eqressize",
        }
    }

    /// Index into `candidates` of the chosen literal; the first of equally
    /// good literals wins
    pub fn choose(&self, candidates: &[&Literal]) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        let best = match self {
            LitSelection::First => 0,
            LitSelection::Smallest => argmin_by_key(candidates, |l| l.weight(1, 1)),
            LitSelection::Largest => argmin_by_key(candidates, |l| -l.weight(1, 1)),
            LitSelection::VarSize => argmin_by_key(candidates, var_size_key),
            LitSelection::EqResVarSize => {
                argmin_by_key(candidates, |l| (!l.is_pure_variable(), var_size_key(l)))
            }
        };
        Some(best)
    }

    /// Mark the inference-eligible literals of `clause`
    pub fn apply(&self, clause: &mut Clause) {
        let negative: Vec<usize> = clause
            .literals
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_negative())
            .map(|(i, _)| i)
            .collect();
        if negative.is_empty() {
            return;
        }

        let candidates: Vec<&Literal> = negative.iter().map(|&i| &clause.literals[i]).collect();
        let chosen = self.choose(&candidates).map(|k| negative[k]);

        for (i, lit) in clause.literals.iter_mut().enumerate() {
            lit.inference_eligible = Some(i) == chosen;
        }
    }
}

/// Fewer variables first, then larger literals
fn var_size_key(lit: &Literal) -> (usize, i64) {
    (lit.variables().len(), -lit.weight(1, 1))
}

fn argmin_by_key<K: Ord>(candidates: &[&Literal], key: impl Fn(&Literal) -> K) -> usize {
    let mut best = 0;
    let mut best_key = key(candidates[0]);
    for (i, lit) in candidates.iter().enumerate().skip(1) {
        let k = key(*lit);
        if k < best_key {
            best = i;
            best_key = k;
        }
    }
    best
}

impl fmt::Display for LitSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LitSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LitSelection::ALL
            .into_iter()
            .find(|sel| sel.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown literal selection '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Term;

    fn neg(pred: &str, args: Vec<Term>) -> Literal {
        Literal::predicate(pred, args, true)
    }

    fn eligible(clause: &Clause) -> Vec<usize> {
        clause
            .literals
            .iter()
            .enumerate()
            .filter(|(_, l)| l.inference_eligible)
            .map(|(i, _)| i)
            .collect()
    }

    fn sample() -> Clause {
        // p(a) | ~q(f(X),Y) | ~r(X) | ~s(f(g(a)))
        Clause::new(vec![
            Literal::predicate("p", vec![Term::constant("a")], false),
            neg("q", vec![Term::compound("f", vec![Term::var("X")]), Term::var("Y")]),
            neg("r", vec![Term::var("X")]),
            neg(
                "s",
                vec![Term::compound("f", vec![Term::compound("g", vec![Term::constant("a")])])],
            ),
        ])
    }

    #[test]
    fn test_first() {
        let mut clause = sample();
        LitSelection::First.apply(&mut clause);
        assert_eq!(eligible(&clause), vec![1]);
    }

    #[test]
    fn test_smallest_and_largest() {
        let mut clause = sample();
        LitSelection::Smallest.apply(&mut clause);
        assert_eq!(eligible(&clause), vec![2]);

        let mut clause = sample();
        LitSelection::Largest.apply(&mut clause);
        // ~q(f(X),Y) and ~s(f(g(a))) both weigh 4; the first wins
        assert_eq!(eligible(&clause), vec![1]);
    }

    #[test]
    fn test_var_size_prefers_ground() {
        let mut clause = sample();
        LitSelection::VarSize.apply(&mut clause);
        assert_eq!(eligible(&clause), vec![3]);
    }

    #[test]
    fn test_eq_res_prefers_pure_variable_literal() {
        let mut clause = sample();
        clause
            .literals
            .push(Literal::equation(Term::var("X"), Term::var("Y"), true));
        LitSelection::EqResVarSize.apply(&mut clause);
        assert_eq!(eligible(&clause), vec![4]);
    }

    #[test]
    fn test_no_negative_literals_keeps_all_eligible() {
        let mut clause = Clause::new(vec![
            Literal::predicate("p", vec![], false),
            Literal::predicate("q", vec![], false),
        ]);
        LitSelection::Smallest.apply(&mut clause);
        assert_eq!(eligible(&clause), vec![0, 1]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("varsize".parse::<LitSelection>(), Ok(LitSelection::VarSize));
        assert!("bogus".parse::<LitSelection>().is_err());
    }
}
