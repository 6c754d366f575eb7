//! Instill Runtime - condition evaluation and variable computation
//!
//! The runtime half of the engine: a registry of named conditions queried
//! throughout an installation (`ConditionEngine`), and the value computation
//! that walks the compiler-ordered dynamic variables and fills the shared
//! variable table (`VariableComputer`).
//!
//! Everything here is synchronous and single-threaded; evaluation happens
//! during a discrete pre-install phase and condition queries afterwards read
//! the already-resolved state.

pub mod contains;
pub mod engine;
pub mod error;
pub mod values;

pub use engine::ConditionEngine;
pub use error::{Result, RuntimeError};
pub use values::{ArchiveReader, NoArchives, NoRegistry, RegistryReader, VariableComputer};
