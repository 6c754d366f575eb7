//! Compiler error types

use thiserror::Error;

/// Compile-phase error
#[derive(Error, Debug)]
pub enum CompileError {
    /// Two conditions share an id
    #[error("Duplicate condition id '{0}'")]
    DuplicateCondition(String),

    /// A ref condition names an id that is not in the registry
    #[error("Condition '{condition}' references unknown condition '{target}'")]
    UnknownConditionRef { condition: String, target: String },

    /// A variable's guard condition id is not in the registry
    #[error("Variable '{variable}' is gated on unknown condition '{condition}'")]
    UnknownGuardCondition { variable: String, condition: String },
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
