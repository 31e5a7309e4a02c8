//! Generating inferences, derivations and proofs

pub mod common;
pub mod derivation;
pub mod factoring;
pub mod proof;
pub mod resolution;

pub use derivation::{Derivation, Rationale};
pub use factoring::{compute_all_factors, factor};
pub use proof::{Justification, Proof, ProofStep};
pub use resolution::{compute_all_resolvents, resolution};
