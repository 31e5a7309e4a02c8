//! Simplification: redundancy elimination by subsumption
//!
//! Tautology deletion lives on [`Clause::is_tautology`](crate::logic::Clause::is_tautology).

pub mod subsumption;

pub use subsumption::{backward_subsumption, forward_subsumption, subsumes};
