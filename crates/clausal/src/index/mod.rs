//! Clause indices for candidate retrieval.
//!
//! An [`IndexedClauseSet`](crate::saturation::IndexedClauseSet) owns one of
//! each index and routes every insertion and removal to all of them, so the
//! indices always describe exactly the clauses of the set.
//!
//! ## Index Types
//!
//! - [`ResolutionIndex`]: eligible literals by sign and predicate symbol
//! - [`SubsumptionIndex`]: clauses by predicate abstraction

pub mod resolution;
pub mod subsumption;

use crate::logic::Clause;

pub use resolution::ResolutionIndex;
pub use subsumption::{is_subsequence, SubsumptionIndex};

/// Reference to a literal of a stored clause: `(clause name, literal index)`
pub type LiteralRef = (String, usize);

/// Lifecycle hooks shared by all clause indices
pub trait ClauseIndex {
    /// Start tracking a clause. The clause must be named.
    fn insert(&mut self, clause: &Clause);

    /// Stop tracking a clause. Removing an untracked clause is a no-op.
    fn remove(&mut self, clause: &Clause);

    /// Number of tracked entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
