//! Given-clause and literal selection

pub mod clause;
pub mod literal;

pub use clause::{ClauseEvaluationFunction, EvalStructure, Heuristic};
pub use literal::LitSelection;
