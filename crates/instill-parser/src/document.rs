//! Installer definition document parser
//!
//! Top-level document shape:
//!
//! ```yaml
//! conditions:
//!   - id: install.full
//!     type: variable
//!     variable: install.type
//!     value: full
//! variables:
//!   - name: app.home
//!     value: "${user.home}/app"
//!     condition: install.full
//! ```

use crate::condition::{ConditionParser, ConditionSpec};
use crate::error::{ParseError, Result};
use crate::variable::{VariableParser, VariableSpec};
use instill_core::{Condition, DynamicVariable};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;

/// Raw document as deserialized from YAML.
#[derive(Debug, Clone, Deserialize, Default)]
struct DefinitionDoc {
    #[serde(default)]
    conditions: Vec<ConditionSpec>,
    #[serde(default)]
    variables: Vec<VariableSpec>,
}

/// A parsed installer definition: conditions keyed by id (uniqueness already
/// checked) and dynamic variables in declaration order.
#[derive(Debug, Clone, Default)]
pub struct InstallDefinition {
    pub conditions: Vec<Condition>,
    pub variables: Vec<DynamicVariable>,
}

/// Definition document parser
pub struct DefinitionParser;

impl DefinitionParser {
    /// Parse a full installer definition from a YAML string.
    pub fn parse(yaml_str: &str) -> Result<InstallDefinition> {
        let doc: DefinitionDoc = serde_yaml::from_str(yaml_str)?;

        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut conditions = Vec::with_capacity(doc.conditions.len());
        for spec in &doc.conditions {
            let condition = ConditionParser::from_spec(spec)?;
            if !seen_ids.insert(condition.id().to_string()) {
                return Err(ParseError::DuplicateCondition(condition.id().to_string()));
            }
            conditions.push(condition);
        }

        let variables = doc
            .variables
            .iter()
            .map(VariableParser::from_spec)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "parsed definition: {} conditions, {} variable declarations",
            conditions.len(),
            variables.len()
        );

        Ok(InstallDefinition {
            conditions,
            variables,
        })
    }
}
