//! Condition AST: boolean combinators and leaf predicates
//!
//! Conditions are compiled once from the installer definition and reused for
//! the lifetime of a run; their structure is immutable after construction.
//! The only mutable part is the lazily-attached evaluation context.

mod types;

pub use types::{Condition, ConditionKind, ContainsSource, MatchMode};
