//! Saturation statistics and SZS result status

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Outcome of a proof attempt, named after the SZS ontology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SzsStatus {
    /// Not yet run
    #[default]
    Unknown,
    /// Empty clause derived from a clause problem
    Unsatisfiable,
    /// Empty clause derived from a problem with a conjecture
    Theorem,
    /// Saturated with a complete strategy
    Satisfiable,
    /// Saturated with a complete strategy and a conjecture present
    CounterSatisfiable,
    /// Saturated, but the strategy was incomplete
    GaveUp,
    Timeout,
    ResourceOut,
}

impl SzsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SzsStatus::Unknown => "Unknown",
            SzsStatus::Unsatisfiable => "Unsatisfiable",
            SzsStatus::Theorem => "Theorem",
            SzsStatus::Satisfiable => "Satisfiable",
            SzsStatus::CounterSatisfiable => "CounterSatisfiable",
            SzsStatus::GaveUp => "GaveUp",
            SzsStatus::Timeout => "Timeout",
            SzsStatus::ResourceOut => "ResourceOut",
        }
    }

    /// A refutation was found
    pub fn is_proof(&self) -> bool {
        matches!(self, SzsStatus::Unsatisfiable | SzsStatus::Theorem)
    }
}

impl fmt::Display for SzsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counters collected by the given-clause loop.
///
/// `elapsed` is serialized as `f64` seconds.
#[derive(Debug, Clone, Default)]
pub struct ProofStatistics {
    pub initial_clauses: usize,
    pub processed_clauses: usize,
    pub factors: usize,
    pub resolvents: usize,
    pub tautologies_deleted: usize,
    pub forward_subsumed: usize,
    pub backward_subsumed: usize,
    /// Largest combined size of the unprocessed and processed sets
    pub max_clauses_held: usize,
    pub elapsed: Duration,
    pub status: SzsStatus,
}

impl Serialize for ProofStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ProofStatistics", 10)?;
        s.serialize_field("initial_clauses", &self.initial_clauses)?;
        s.serialize_field("processed_clauses", &self.processed_clauses)?;
        s.serialize_field("factors", &self.factors)?;
        s.serialize_field("resolvents", &self.resolvents)?;
        s.serialize_field("tautologies_deleted", &self.tautologies_deleted)?;
        s.serialize_field("forward_subsumed", &self.forward_subsumed)?;
        s.serialize_field("backward_subsumed", &self.backward_subsumed)?;
        s.serialize_field("max_clauses_held", &self.max_clauses_held)?;
        s.serialize_field("elapsed", &self.elapsed.as_secs_f64())?;
        s.serialize_field("status", &self.status)?;
        s.end()
    }
}

impl fmt::Display for ProofStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Initial clauses    : {}", self.initial_clauses)?;
        writeln!(f, "# Processed clauses  : {}", self.processed_clauses)?;
        writeln!(f, "# Factors computed   : {}", self.factors)?;
        writeln!(f, "# Resolvents computed: {}", self.resolvents)?;
        writeln!(f, "# Tautologies deleted: {}", self.tautologies_deleted)?;
        writeln!(f, "# Forward subsumed   : {}", self.forward_subsumed)?;
        writeln!(f, "# Backward subsumed  : {}", self.backward_subsumed)?;
        writeln!(f, "# Max clauses held   : {}", self.max_clauses_held)?;
        writeln!(f, "# Elapsed time       : {:.3}s", self.elapsed.as_secs_f64())?;
        write!(f, "# SZS status {}", self.status)
    }
}
