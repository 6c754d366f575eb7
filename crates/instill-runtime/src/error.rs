//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Queried condition id is not registered
    #[error("Unknown condition '{0}'")]
    UnknownCondition(String),

    /// Nested/ref evaluation exceeded the recursion bound
    #[error("Reference depth exceeded while evaluating condition '{0}'")]
    ReferenceDepthExceeded(String),

    /// Invalid regex pattern in a contains condition
    #[error("Invalid regex in condition '{condition}': {source}")]
    InvalidRegex {
        condition: String,
        #[source]
        source: regex::Error,
    },

    /// File read failure (contains-against-file, config-file lookup)
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failure from an external reader (registry, archives)
    #[error("External read failed for variable '{variable}': {message}")]
    ExternalRead { variable: String, message: String },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
