//! Saturation: clause containers, parent protection, statistics and the
//! given-clause proof state

pub mod clause_set;
pub mod state;
pub mod statistics;
pub mod support;

pub use clause_set::{ClauseSet, HeuristicClauseSet, IndexedClauseSet, ProcessedClauses};
pub use state::ProofState;
pub use statistics::{ProofStatistics, SzsStatus};
pub use support::SupportLedger;
