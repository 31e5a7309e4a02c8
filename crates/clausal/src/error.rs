//! Error types for the prover

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProverError {
    #[error("{source_name}:{line}: parse error: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("IO error on {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("Include file not found: {0}")]
    IncludeNotFound(String),

    #[error("Circular include detected: {0}")]
    CircularInclude(String),

    /// The clause store grew past the configured limit.
    #[error("Resource limit exceeded: {clauses} clauses held, limit is {limit}")]
    ResourceLimit { limit: usize, clauses: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ProverError {
    pub(crate) fn parse(source_name: &str, line: usize, message: impl Into<String>) -> Self {
        ProverError::Parse {
            source_name: source_name.to_string(),
            line,
            message: message.into(),
        }
    }

    /// SZS status reported by the driver when a run ends with this error
    pub fn szs_status(&self) -> &'static str {
        match self {
            ProverError::Parse { .. }
            | ProverError::IncludeNotFound(_)
            | ProverError::CircularInclude(_) => "InputError",
            ProverError::ResourceLimit { .. } => "ResourceOut",
            ProverError::Io { .. } | ProverError::Config(_) => "Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProverError>;
