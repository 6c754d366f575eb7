//! Instill Core - Core types for the Instill installer definition engine
//!
//! This crate provides the fundamental types shared across the Instill
//! workspace:
//! - The condition AST (boolean combinators and leaf predicates)
//! - The dynamic-variable model and its value sources
//! - The install context (variable table + platform descriptor)
//! - The variable-reference parser for `${name}` placeholders
//! - Error types

pub mod condition;
pub mod error;
pub mod install;
pub mod refs;
pub mod variable;

// Re-export commonly used types
pub use condition::{Condition, ConditionKind, ContainsSource, MatchMode};
pub use error::CoreError;
pub use install::{InstallData, OsKind, Platform};
pub use variable::{ArchiveKind, DynamicVariable, ValueSource};
