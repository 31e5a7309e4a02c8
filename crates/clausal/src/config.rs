//! Prover configuration types.
//!
//! Both structs deserialize from JSON with every field optional, so a
//! configuration file only needs to name what it changes.

use crate::clausify::ClausificationMode;
use crate::error::{ProverError, Result};
use crate::selection::{Heuristic, LitSelection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Switches of the given-clause loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub heuristics: Heuristic,
    pub delete_tautologies: bool,
    pub forward_subsumption: bool,
    pub backward_subsumption: bool,
    /// `None` keeps every literal eligible
    pub literal_selection: Option<LitSelection>,
    /// Use an indexed processed set instead of linear scans
    pub indexing: bool,
    /// Upper bound on unprocessed + processed clauses, 0 means no limit
    pub max_clauses: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            heuristics: Heuristic::PickGiven5,
            delete_tautologies: true,
            forward_subsumption: true,
            backward_subsumption: true,
            literal_selection: None,
            indexing: true,
            max_clauses: 0, // 0 means no limit
        }
    }
}

impl SearchParams {
    /// FIFO selection with every deletion strategy and indexing off
    pub fn minimal() -> Self {
        SearchParams {
            heuristics: Heuristic::Fifo,
            delete_tautologies: false,
            forward_subsumption: false,
            backward_subsumption: false,
            literal_selection: None,
            indexing: false,
            max_clauses: 0,
        }
    }

    /// The 16 combinations of tautology deletion, forward subsumption,
    /// backward subsumption and indexing, on top of `self`
    pub fn all_option_combinations(&self) -> Vec<SearchParams> {
        (0..16u8)
            .map(|bits| SearchParams {
                delete_tautologies: bits & 1 != 0,
                forward_subsumption: bits & 2 != 0,
                backward_subsumption: bits & 4 != 0,
                indexing: bits & 8 != 0,
                ..self.clone()
            })
            .collect()
    }

    /// Short description for logs, e.g. `PickGiven5 t f b i sel=first`
    pub fn summary(&self) -> String {
        let flag = |on: bool, c: &str| if on { c.to_string() } else { "-".to_string() };
        format!(
            "{} {} {} {} {} sel={}",
            self.heuristics,
            flag(self.delete_tautologies, "t"),
            flag(self.forward_subsumption, "f"),
            flag(self.backward_subsumption, "b"),
            flag(self.indexing, "i"),
            self.literal_selection
                .map(|s| s.name().to_string())
                .unwrap_or_else(|| "none".to_string())
        )
    }
}

/// Everything a single proof attempt needs besides the problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    pub search: SearchParams,
    /// Wall clock limit in seconds
    pub timeout_secs: f64,
    /// Directories searched for `include` files
    pub include_dirs: Vec<PathBuf>,
    /// Add equality axioms when the problem uses `=`
    pub equality_axioms: bool,
    pub clausification: ClausificationMode,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            search: SearchParams::default(),
            timeout_secs: 60.0,
            include_dirs: Vec::new(),
            equality_axioms: true,
            clausification: ClausificationMode::default(),
        }
    }
}

impl ProverConfig {
    /// The time limit; values beyond the range of `Duration` mean no limit
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs.max(0.0)).unwrap_or(Duration::MAX)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: ProverConfig =
            serde_json::from_str(text).map_err(|e| ProverError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|error| ProverError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.timeout_secs.is_finite() || self.timeout_secs < 0.0 {
            return Err(ProverError::Config(format!(
                "timeout must be a non-negative number of seconds, got {}",
                self.timeout_secs
            )));
        }
        Ok(())
    }
}
