use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two record sets a mapping or record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Primary dataset; each record is a query point.
    Government,
    /// Comparison dataset searched for proximity.
    Candidate,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Government => write!(f, "government"),
            Role::Candidate => write!(f, "candidate"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not identify {} column(s) in {role} data; available columns: {}", .missing.join(", "), .available.join(", "))]
    Mapping {
        role: Role,
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Aggregation invariant violated: {0}")]
    Aggregation(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Why a single record's coordinate could not be used.
///
/// Never fatal: the record is counted and skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordParseError {
    #[error("coordinate value is missing")]
    Missing,

    #[error("coordinate value {0:?} is not numeric")]
    NotNumeric(String),

    #[error("coordinate ({lat}, {lon}) is outside the valid range")]
    OutOfRange { lat: f64, lon: f64 },
}
