//! clausal: a given-clause resolution theorem prover for first-order logic
//!
//! Problems in TPTP `cnf`/`fof` syntax are parsed, clausified and saturated
//! with binary resolution and factoring, using tautology deletion and
//! subsumption to keep the search space small. Refutations are returned as
//! proofs that can be printed as text, TPTP derivations or JSON.

pub mod clausify;
pub mod config;
pub mod equality;
pub mod error;
pub mod index;
pub mod inference;
pub mod json;
pub mod logic;
pub mod parser;
pub mod saturation;
pub mod selection;
pub mod session;
pub mod simplifying;

// Re-export commonly used types from logic
pub use logic::{
    match_term, mgu, BacktrackSubstitution, Clause, ClauseType, Literal, Signature, Substitution,
    Term, Variable,
};

// Re-export inference types
pub use inference::{factor, resolution, Derivation, Proof, ProofStep, Rationale};

pub use clausify::{clausify, ClausificationMode, Formula, NamedFormula};
pub use config::{ProverConfig, SearchParams};
pub use equality::add_equality_axioms;
pub use error::{ProverError, Result};
pub use parser::{load_clauses, parse_problem, parse_problem_file, Problem};
pub use saturation::{ClauseSet, ProofState, ProofStatistics, SzsStatus};
pub use selection::{EvalStructure, Heuristic, LitSelection};
pub use session::Session;
