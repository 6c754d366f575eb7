//! Parser error types

use instill_core::CoreError;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Missing required field on a condition
    #[error("Condition '{condition}' is missing required field '{field}'")]
    MissingField { condition: String, field: String },

    /// Unknown condition type tag
    #[error("Condition '{condition}' has unknown type '{kind}'")]
    UnknownConditionType { condition: String, kind: String },

    /// Two conditions share an id
    #[error("Duplicate condition id '{0}'")]
    DuplicateCondition(String),

    /// Invalid variable declaration
    #[error("Variable '{name}' is invalid: {message}")]
    InvalidVariable { name: String, message: String },

    /// Structural validation failure from core constructors (operand arity)
    #[error(transparent)]
    InvalidCondition(#[from] CoreError),
}

impl ParseError {
    pub fn missing_field(condition: impl Into<String>, field: impl Into<String>) -> Self {
        ParseError::MissingField {
            condition: condition.into(),
            field: field.into(),
        }
    }

    pub fn invalid_variable(name: impl Into<String>, message: impl Into<String>) -> Self {
        ParseError::InvalidVariable {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
