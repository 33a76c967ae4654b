//! Error types for the AIngle reasoning engines.

use thiserror::Error;

/// A specialized `Result` type for reasoning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Defines the errors that can occur while building inputs or running inference.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A literal or atom name is malformed (empty, contains whitespace, or
    /// carries a stray negation marker).
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// A cost assigned to an abducible is negative or not a number.
    #[error("Invalid cost {cost} for abducible '{atom}'")]
    InvalidCost { atom: String, cost: f64 },

    /// A ground example or background fact has an empty predicate or constant.
    #[error("Invalid example: {0}")]
    InvalidExample(String),

    /// Resolution saturation did not reach a fixpoint within the configured rounds.
    #[error("Max resolution rounds exceeded: {rounds}")]
    MaxRoundsExceeded { rounds: usize },

    /// The resolution working set grew past the configured clause limit.
    #[error("Clause limit exceeded: {limit}")]
    ClauseLimitExceeded { limit: usize },

    /// Abductive backward chaining recursed deeper than the configured depth.
    #[error("Max inference depth exceeded: {depth}")]
    MaxDepthExceeded { depth: usize },

    /// Rule induction produced more rules than the configured limit.
    #[error("Rule limit exceeded: {limit}")]
    RuleLimitExceeded { limit: usize },

    /// A configuration value is out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configuration file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// An error occurred during data serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
