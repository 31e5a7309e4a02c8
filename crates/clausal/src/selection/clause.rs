//! Clause evaluation and given-clause heuristics
//!
//! An [`EvalStructure`] combines several evaluation functions with integer
//! weights. Every clause entering the unprocessed set is scored by all of
//! them; each extraction then asks [`EvalStructure::next_eval`] which score
//! column to minimize. The columns are used in weighted round robin: with
//! `[(SymbolCount, 5), (Fifo, 1)]` five extractions pick the lightest clause
//! and one picks the oldest.

use crate::logic::Clause;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clause scoring function; lower scores are better
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseEvaluationFunction {
    /// Creation order, from a counter owned by this function
    Fifo { counter: i64 },
    /// Symbol-counting weight
    SymbolCount { fweight: i64, vweight: i64 },
}

impl ClauseEvaluationFunction {
    pub fn fifo() -> Self {
        ClauseEvaluationFunction::Fifo { counter: 0 }
    }

    pub fn symbol_count(fweight: i64, vweight: i64) -> Self {
        ClauseEvaluationFunction::SymbolCount { fweight, vweight }
    }

    /// Score a clause. Advances the FIFO counter.
    pub fn evaluate(&mut self, clause: &Clause) -> i64 {
        match self {
            ClauseEvaluationFunction::Fifo { counter } => {
                *counter += 1;
                *counter
            }
            ClauseEvaluationFunction::SymbolCount { fweight, vweight } => {
                clause.weight(*fweight, *vweight)
            }
        }
    }

    pub fn name(&self) -> String {
        match self {
            ClauseEvaluationFunction::Fifo { .. } => "FIFOEval".to_string(),
            ClauseEvaluationFunction::SymbolCount { fweight, vweight } => {
                format!("SymbolCountEval({},{})", fweight, vweight)
            }
        }
    }
}

/// Weighted round robin over evaluation functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalStructure {
    functions: Vec<ClauseEvaluationFunction>,
    weights: Vec<usize>,
    current: usize,
    remaining: usize,
}

impl EvalStructure {
    /// Build from `(function, weight)` pairs. Returns `None` for an empty
    /// descriptor or a zero weight.
    pub fn new(descriptor: Vec<(ClauseEvaluationFunction, usize)>) -> Option<Self> {
        if descriptor.is_empty() || descriptor.iter().any(|(_, w)| *w == 0) {
            return None;
        }
        Some(Self::from_descriptor(descriptor))
    }

    fn from_descriptor(descriptor: Vec<(ClauseEvaluationFunction, usize)>) -> Self {
        let (functions, weights): (Vec<_>, Vec<_>) = descriptor.into_iter().unzip();
        let remaining = weights.first().copied().unwrap_or(1);
        EvalStructure {
            functions,
            weights,
            current: 0,
            remaining,
        }
    }

    /// Score column to use for the next extraction
    pub fn next_eval(&mut self) -> usize {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.current = (self.current + 1) % self.weights.len();
            self.remaining = self.weights[self.current];
        }
        self.current
    }

    /// Scores of `clause` under every function, in descriptor order
    pub fn evaluate(&mut self, clause: &Clause) -> Vec<i64> {
        self.functions
            .iter_mut()
            .map(|f| f.evaluate(clause))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn functions(&self) -> impl Iterator<Item = (&ClauseEvaluationFunction, usize)> {
        self.functions.iter().zip(self.weights.iter().copied())
    }
}

impl fmt::Display for EvalStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .functions()
            .map(|(func, w)| format!("{}*{}", w, func.name()))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Named given-clause heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Heuristic {
    #[serde(rename = "FIFO")]
    Fifo,
    SymbolCount,
    #[default]
    PickGiven5,
    PickGiven2,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Fifo,
        Heuristic::SymbolCount,
        Heuristic::PickGiven5,
        Heuristic::PickGiven2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Fifo => "FIFO",
            Heuristic::SymbolCount => "SymbolCount",
            Heuristic::PickGiven5 => "PickGiven5",
            Heuristic::PickGiven2 => "PickGiven2",
        }
    }

    /// A fresh evaluation structure for this heuristic
    pub fn eval_structure(&self) -> EvalStructure {
        use ClauseEvaluationFunction as F;
        let descriptor = match self {
            Heuristic::Fifo => vec![(F::fifo(), 1)],
            Heuristic::SymbolCount => vec![(F::symbol_count(2, 1), 1)],
            Heuristic::PickGiven5 => vec![(F::symbol_count(2, 1), 5), (F::fifo(), 1)],
            Heuristic::PickGiven2 => vec![(F::symbol_count(2, 1), 2), (F::fifo(), 1)],
        };
        EvalStructure::from_descriptor(descriptor)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown heuristic '{}'", s))
    }
}
