//! Unification and matching for first-order terms

mod matching;
pub mod mgu;


pub use matching::{match_lists, match_term};
pub use mgu::{mgu, mgu_lists};
