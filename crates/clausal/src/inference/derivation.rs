//! Clause derivation tracking.
//!
//! Records how each clause came to be: its rationale and the names of the
//! clauses it was inferred from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a clause exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rationale {
    /// Read from the problem or produced by clausification
    Input,
    /// Generated equality axiom
    EqAxiom,
    Resolution,
    Factoring,
}

impl Rationale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rationale::Input => "input",
            Rationale::EqAxiom => "eq_axiom",
            Rationale::Resolution => "resolution",
            Rationale::Factoring => "factoring",
        }
    }

    /// Produced by a generating inference rather than supplied
    pub fn is_inference(&self) -> bool {
        matches!(self, Rationale::Resolution | Rationale::Factoring)
    }
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a clause was derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    pub rationale: Rationale,
    /// Names of the premise clauses, in inference order
    pub support: Vec<String>,
}

impl Derivation {
    pub fn input() -> Self {
        Derivation {
            rationale: Rationale::Input,
            support: vec![],
        }
    }

    pub fn eq_axiom() -> Self {
        Derivation {
            rationale: Rationale::EqAxiom,
            support: vec![],
        }
    }

    pub fn inference(rationale: Rationale, support: Vec<String>) -> Self {
        Derivation { rationale, support }
    }
}

impl Default for Derivation {
    fn default() -> Self {
        Derivation::input()
    }
}
