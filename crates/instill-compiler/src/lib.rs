//! Instill Compiler - compile-phase analysis for installer definitions
//!
//! Runs once per compile/pre-install phase, on one thread:
//! - `graph`: a generic dependency graph with a cycle-tolerant depth ordering
//! - `resolver`: computes the dynamic-variable computation order, so that a
//!   producer variable is resolved before any consumer that reads it
//! - `validator`: checks reference integrity (condition refs, variable
//!   guards) before anything is evaluated

pub mod error;
pub mod graph;
pub mod resolver;
pub mod validator;

pub use error::{CompileError, Result};
pub use graph::DependencyGraph;
pub use resolver::{condition_variable_refs, resolve_order};
pub use validator::validate_definition;
