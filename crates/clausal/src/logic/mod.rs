//! Logic core: terms, substitutions, unification, literals and clauses

pub mod clause;
pub mod literal;
pub mod signature;
pub mod substitution;
pub mod term;
pub mod unification;

pub use clause::{Clause, ClauseType};
pub use literal::{Literal, EQUALITY, FALSE_SYMBOL, TRUE_SYMBOL};
pub use signature::Signature;
pub use substitution::{BacktrackMark, BacktrackSubstitution, Substitution};
pub use term::{Term, Variable};
pub use unification::{match_lists, match_term, mgu, mgu_lists};
