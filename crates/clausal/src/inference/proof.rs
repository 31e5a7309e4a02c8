//! Proof reconstruction
//!
//! Starting from the empty clause, follow support names back to the input
//! clauses, order the collected clauses so every parent precedes its
//! children, and renumber them from 1.

use super::derivation::Rationale;
use crate::json::ProofJson;
use crate::logic::Clause;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// How a proof step was obtained, with parents given by step number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Justification {
    Input,
    EqAxiom,
    Inference { rule: Rationale, parents: Vec<usize> },
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Justification::Input => write!(f, "input"),
            Justification::EqAxiom => write!(f, "eq_axiom"),
            Justification::Inference { rule, parents } => {
                let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
                write!(f, "{} {}", rule, parents.join(", "))
            }
        }
    }
}

/// A single numbered step of a refutation
#[derive(Debug, Clone)]
pub struct ProofStep {
    pub number: usize,
    pub clause: Clause,
    pub justification: Justification,
}

/// A refutation in topological order, ending with the empty clause
#[derive(Debug, Clone, Default)]
pub struct Proof {
    pub steps: Vec<ProofStep>,
}

impl Proof {
    /// Rebuild the derivation of `witness`. `lookup` resolves a clause name
    /// to the clause as it was created; parents it cannot resolve are left
    /// out of the proof.
    pub fn reconstruct<'a, F>(witness: &Clause, lookup: F) -> Proof
    where
        F: Fn(&str) -> Option<&'a Clause>,
    {
        // Iterative post-order walk: a node is emitted once all its parents are
        let mut order: Vec<Clause> = Vec::new();
        let mut done: HashSet<String> = HashSet::new();
        let mut visiting: HashSet<String> = HashSet::new();
        let mut stack: Vec<(Clause, bool)> = vec![(witness.clone(), false)];

        while let Some((clause, expanded)) = stack.pop() {
            if done.contains(&clause.name) {
                continue;
            }
            if expanded {
                done.insert(clause.name.clone());
                order.push(clause);
                continue;
            }
            let parents: Vec<Clause> = clause
                .derivation
                .support
                .iter()
                .filter(|name| !done.contains(*name) && !visiting.contains(*name))
                .filter_map(|name| lookup(name).cloned())
                .collect();
            visiting.insert(clause.name.clone());
            stack.push((clause, true));
            for parent in parents.into_iter().rev() {
                stack.push((parent, false));
            }
        }

        let numbers: HashMap<String, usize> = order
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i + 1))
            .collect();

        let steps = order
            .into_iter()
            .enumerate()
            .map(|(i, clause)| {
                let justification = match clause.derivation.rationale {
                    Rationale::Input => Justification::Input,
                    Rationale::EqAxiom => Justification::EqAxiom,
                    rule => Justification::Inference {
                        rule,
                        parents: clause
                            .derivation
                            .support
                            .iter()
                            .filter_map(|name| numbers.get(name).copied())
                            .collect(),
                    },
                };
                ProofStep {
                    number: i + 1,
                    clause,
                    justification,
                }
            })
            .collect();

        Proof { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps that are not input or axiom clauses
    pub fn inference_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.justification, Justification::Inference { .. }))
            .count()
    }

    /// One TPTP `cnf` line per step, inferences annotated with their parents
    pub fn to_tptp_lines(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| {
                let clause = &step.clause;
                match &clause.derivation.rationale {
                    Rationale::Input | Rationale::EqAxiom => format!(
                        "cnf({},{},{},{}).",
                        clause.name,
                        clause.clause_type,
                        clause.literals_string(),
                        clause.derivation.rationale
                    ),
                    rule => format!(
                        "cnf({},{},{},inference({},[status(thm)],[{}])).",
                        clause.name,
                        clause.clause_type,
                        clause.literals_string(),
                        rule,
                        clause.derivation.support.join(",")
                    ),
                }
            })
            .collect()
    }

    pub fn to_json(&self) -> ProofJson {
        self.into()
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(
                f,
                "{}. {} [{}]",
                step.number,
                step.clause.literals_string(),
                step.justification
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Derivation;
    use crate::logic::{Literal, Term};

    fn unit(name: &str, pred: &str, negated: bool) -> Clause {
        Clause::new(vec![Literal::predicate(pred, vec![Term::constant("a")], negated)])
            .named(name)
    }

    fn derived(name: &str, rule: Rationale, support: &[&str]) -> Clause {
        let mut c = Clause::new(vec![]).named(name);
        c.derivation = Derivation::inference(rule, support.iter().map(|s| s.to_string()).collect());
        c
    }

    #[test]
    fn test_reconstruct_orders_parents_first() {
        let mut archive = HashMap::new();
        archive.insert("in1".to_string(), unit("in1", "p", false));
        archive.insert("in2".to_string(), unit("in2", "p", true));
        archive.insert("unused".to_string(), unit("unused", "q", false));
        let witness = derived("c9", Rationale::Resolution, &["in1", "in2"]);

        let proof = Proof::reconstruct(&witness, |name| archive.get(name));
        assert_eq!(proof.len(), 3);
        assert_eq!(proof.steps[0].clause.name, "in1");
        assert_eq!(proof.steps[1].clause.name, "in2");
        assert_eq!(
            proof.steps[2].justification,
            Justification::Inference {
                rule: Rationale::Resolution,
                parents: vec![1, 2]
            }
        );
        assert_eq!(proof.inference_count(), 1);
    }

    #[test]
    fn test_shared_parent_appears_once() {
        let mut archive = HashMap::new();
        archive.insert("base".to_string(), unit("base", "p", false));
        archive.insert("f1".to_string(), derived("f1", Rationale::Factoring, &["base"]));
        let witness = derived("w", Rationale::Resolution, &["f1", "base"]);

        let proof = Proof::reconstruct(&witness, |name| archive.get(name));
        let names: Vec<_> = proof.steps.iter().map(|s| s.clause.name.as_str()).collect();
        assert_eq!(names, vec!["base", "f1", "w"]);
        assert_eq!(
            proof.steps[2].justification,
            Justification::Inference {
                rule: Rationale::Resolution,
                parents: vec![2, 1]
            }
        );
    }

    #[test]
    fn test_text_rendering() {
        let mut archive = HashMap::new();
        archive.insert("in1".to_string(), unit("in1", "p", false));
        archive.insert("in2".to_string(), unit("in2", "p", true));
        let witness = derived("c3", Rationale::Resolution, &["in1", "in2"]);
        let proof = Proof::reconstruct(&witness, |name| archive.get(name));

        let text = proof.to_string();
        assert!(text.contains("1. p(a) [input]"));
        assert!(text.contains("3. $false [resolution 1, 2]"));

        let lines = proof.to_tptp_lines();
        assert_eq!(
            lines[2],
            "cnf(c3,plain,$false,inference(resolution,[status(thm)],[in1,in2]))."
        );
    }
}
