//! Instill Parser - YAML front-end for installer definitions
//!
//! Parses a declarative installer definition (conditions keyed by id plus an
//! ordered dynamic-variable list) into `instill-core` objects. Structural
//! validation that can be done without the full registry - operand arity,
//! duplicate ids, exactly one value source per variable - happens here, so
//! malformed definitions fail at parse time with errors naming the offending
//! condition or variable.

pub mod condition;
pub mod document;
pub mod error;
pub mod variable;

pub use condition::ConditionParser;
pub use document::{DefinitionParser, InstallDefinition};
pub use error::{ParseError, Result};
pub use variable::VariableParser;
