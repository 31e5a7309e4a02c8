//! Per-run symbol generation
//!
//! Every name the prover invents (fresh variables, clause names, skolem
//! symbols) comes from a [`Session`]. A proving run owns exactly one session,
//! so two runs in the same process never observe each other's counters.

use crate::logic::Variable;

/// Prefix of variables introduced by renaming. Parsed TPTP variables cannot
/// collide with it unless the input deliberately uses the same shape.
pub const FRESH_VARIABLE_PREFIX: &str = "X_";

/// Prefix of generated clause names
pub const CLAUSE_NAME_PREFIX: &str = "c";

/// Prefix of skolem function symbols
pub const SKOLEM_PREFIX: &str = "skolem";

#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: usize,
    clauses: usize,
    skolems: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A variable name never handed out before by this session
    pub fn fresh_variable(&mut self) -> Variable {
        self.variables += 1;
        Variable::new(format!("{}{}", FRESH_VARIABLE_PREFIX, self.variables))
    }

    pub fn next_clause_name(&mut self) -> String {
        self.clauses += 1;
        format!("{}{}", CLAUSE_NAME_PREFIX, self.clauses)
    }

    pub fn next_skolem_symbol(&mut self) -> String {
        self.skolems += 1;
        format!("{}{:04}", SKOLEM_PREFIX, self.skolems)
    }

    pub fn variables_issued(&self) -> usize {
        self.variables
    }

    pub fn clauses_named(&self) -> usize {
        self.clauses
    }

    pub fn skolems_issued(&self) -> usize {
        self.skolems
    }
}
