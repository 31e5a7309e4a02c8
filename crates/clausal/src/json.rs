//! JSON serialization types for clauses, proofs and run results

use crate::inference::{Justification, Proof, ProofStep};
use crate::logic::{Clause, Literal, Term};
use crate::saturation::{ProofStatistics, SzsStatus};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable { name: String },
    Function { name: String, args: Vec<TermJson> },
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable {
                name: v.name.clone(),
            },
            Term::Compound(name, args) => TermJson::Function {
                name: name.clone(),
                args: args.iter().map(TermJson::from).collect(),
            },
        }
    }
}

/// JSON representation of a literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralJson {
    pub negated: bool,
    pub predicate: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub args: Vec<TermJson>,
}

impl From<&Literal> for LiteralJson {
    fn from(lit: &Literal) -> Self {
        LiteralJson {
            negated: lit.negated,
            predicate: lit.predicate_symbol().to_string(),
            args: lit.args().iter().map(TermJson::from).collect(),
        }
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseJson {
    pub name: String,
    #[serde(rename = "type")]
    pub clause_type: String,
    /// TPTP rendering of the literals
    pub text: String,
    pub literals: Vec<LiteralJson>,
}

impl From<&Clause> for ClauseJson {
    fn from(clause: &Clause) -> Self {
        ClauseJson {
            name: clause.name.clone(),
            clause_type: clause.clause_type.as_str().to_string(),
            text: clause.literals_string(),
            literals: clause.literals.iter().map(LiteralJson::from).collect(),
        }
    }
}

/// JSON representation of a proof step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofStepJson {
    pub number: usize,
    pub clause: ClauseJson,
    pub rule: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parents: Vec<usize>,
}

impl From<&ProofStep> for ProofStepJson {
    fn from(step: &ProofStep) -> Self {
        let (rule, parents) = match &step.justification {
            Justification::Input => ("input".to_string(), vec![]),
            Justification::EqAxiom => ("eq_axiom".to_string(), vec![]),
            Justification::Inference { rule, parents } => (rule.to_string(), parents.clone()),
        };
        ProofStepJson {
            number: step.number,
            clause: ClauseJson::from(&step.clause),
            rule,
            parents,
        }
    }
}

/// JSON representation of a proof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofJson {
    pub steps: Vec<ProofStepJson>,
}

impl From<&Proof> for ProofJson {
    fn from(proof: &Proof) -> Self {
        ProofJson {
            steps: proof.steps.iter().map(ProofStepJson::from).collect(),
        }
    }
}

/// JSON representation of one prover run
#[derive(Debug, Clone, Serialize)]
pub struct RunResultJson {
    pub problem: String,
    pub status: SzsStatus,
    /// Search options, e.g. `PickGiven5 t f b i sel=none`
    pub options: String,
    pub statistics: ProofStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<ProofJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Rationale;

    #[test]
    fn test_clause_json_shape() {
        let clause = Clause::new(vec![Literal::predicate(
            "p",
            vec![Term::var("X"), Term::compound("f", vec![Term::constant("a")])],
            true,
        )])
        .named("c1");
        let json = serde_json::to_value(ClauseJson::from(&clause)).unwrap();
        assert_eq!(json["name"], "c1");
        assert_eq!(json["type"], "plain");
        assert_eq!(json["text"], "~p(X,f(a))");
        assert_eq!(json["literals"][0]["negated"], true);
        assert_eq!(json["literals"][0]["args"][0]["type"], "Variable");
        assert_eq!(json["literals"][0]["args"][1]["args"][0]["name"], "a");
    }

    #[test]
    fn test_proof_step_json() {
        let step = ProofStep {
            number: 3,
            clause: Clause::new(vec![]).named("c9"),
            justification: Justification::Inference {
                rule: Rationale::Resolution,
                parents: vec![1, 2],
            },
        };
        let json = serde_json::to_value(ProofStepJson::from(&step)).unwrap();
        assert_eq!(json["rule"], "resolution");
        assert_eq!(json["parents"], serde_json::json!([1, 2]));
        assert_eq!(json["clause"]["text"], "$false");
    }
}
