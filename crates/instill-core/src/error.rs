//! Error types for Instill Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Condition '{id}' is invalid: {message}")]
    InvalidCondition { id: String, message: String },

    #[error("Variable '{name}' is invalid: {message}")]
    InvalidVariable { name: String, message: String },
}

impl CoreError {
    /// Build an `InvalidCondition` error for the named condition.
    pub fn invalid_condition(id: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::InvalidCondition {
            id: id.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
