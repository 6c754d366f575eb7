//! Condition parser
//!
//! Converts raw serde condition specs into validated `Condition` objects.
//! Nested operands may omit their id; they get one derived from the parent
//! (`parent#index`) so every error can still name a condition.

use crate::error::{ParseError, Result};
use instill_core::{Condition, ContainsSource, MatchMode, OsKind};
use serde::Deserialize;

/// Raw condition spec as it appears in the YAML document.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionSpec {
    /// Required on top-level conditions, optional on nested operands
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    /// Operands of not/and/or/xor
    #[serde(default)]
    pub operands: Vec<ConditionSpec>,
    /// Target id of a ref condition
    #[serde(rename = "ref", default)]
    pub target: Option<String>,
    /// Variable name (variable/exists conditions, contains variable source)
    #[serde(default)]
    pub variable: Option<String>,
    /// Expected value (variable conditions)
    #[serde(default)]
    pub value: Option<String>,
    /// OS family (platform conditions)
    #[serde(default)]
    pub os: Option<OsKind>,
    /// Literal source text (contains conditions)
    #[serde(default)]
    pub text: Option<String>,
    /// Source file path (contains conditions)
    #[serde(default)]
    pub file: Option<String>,
    /// Search pattern (contains conditions)
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub regex: bool,
    #[serde(rename = "case-insensitive", default)]
    pub case_insensitive: bool,
    #[serde(rename = "whole-line", default)]
    pub whole_line: bool,
    #[serde(default)]
    pub multiline: bool,
    #[serde(rename = "dot-all", default)]
    pub dot_all: bool,
}

/// Condition parser
pub struct ConditionParser;

impl ConditionParser {
    /// Parse a single top-level condition from a YAML string.
    pub fn parse(yaml_str: &str) -> Result<Condition> {
        let spec: ConditionSpec = serde_yaml::from_str(yaml_str)?;
        Self::from_spec(&spec)
    }

    /// Build a condition from a top-level spec (id required).
    pub fn from_spec(spec: &ConditionSpec) -> Result<Condition> {
        let id = spec
            .id
            .clone()
            .ok_or_else(|| ParseError::missing_field(format!("<{}>", spec.kind), "id"))?;
        Self::build(spec, &id)
    }

    fn build(spec: &ConditionSpec, id: &str) -> Result<Condition> {
        match spec.kind.as_str() {
            "not" => {
                let mut operands = Self::build_operands(spec, id)?;
                if operands.len() != 1 {
                    return Err(instill_core::CoreError::invalid_condition(
                        id,
                        format!("'not' takes exactly one operand, got {}", operands.len()),
                    )
                    .into());
                }
                Ok(Condition::not(id, operands.remove(0)))
            }
            "and" => Ok(Condition::and(id, Self::build_operands(spec, id)?)?),
            "or" => Ok(Condition::or(id, Self::build_operands(spec, id)?)?),
            "xor" => Ok(Condition::xor(id, Self::build_operands(spec, id)?)?),
            "ref" => {
                let target = spec
                    .target
                    .as_ref()
                    .ok_or_else(|| ParseError::missing_field(id, "ref"))?;
                Ok(Condition::reference(id, target))
            }
            "contains" => Self::build_contains(spec, id),
            "variable" => {
                let name = spec
                    .variable
                    .as_ref()
                    .ok_or_else(|| ParseError::missing_field(id, "variable"))?;
                let value = spec
                    .value
                    .as_ref()
                    .ok_or_else(|| ParseError::missing_field(id, "value"))?;
                Ok(Condition::variable(id, name, value))
            }
            "exists" => {
                let name = spec
                    .variable
                    .as_ref()
                    .ok_or_else(|| ParseError::missing_field(id, "variable"))?;
                Ok(Condition::exists(id, name))
            }
            "platform" => {
                let os = spec
                    .os
                    .ok_or_else(|| ParseError::missing_field(id, "os"))?;
                Ok(Condition::platform(id, os))
            }
            other => Err(ParseError::UnknownConditionType {
                condition: id.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    fn build_operands(spec: &ConditionSpec, parent_id: &str) -> Result<Vec<Condition>> {
        spec.operands
            .iter()
            .enumerate()
            .map(|(index, operand)| {
                let id = operand
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("{parent_id}#{index}"));
                Self::build(operand, &id)
            })
            .collect()
    }

    fn build_contains(spec: &ConditionSpec, id: &str) -> Result<Condition> {
        let source = match (&spec.text, &spec.file, &spec.variable) {
            (Some(text), None, None) => ContainsSource::Text(text.clone()),
            (None, Some(file), None) => ContainsSource::File(file.clone()),
            (None, None, Some(variable)) => ContainsSource::Variable(variable.clone()),
            _ => {
                return Err(ParseError::missing_field(
                    id,
                    "exactly one of text/file/variable",
                ))
            }
        };
        let pattern = spec
            .pattern
            .as_ref()
            .ok_or_else(|| ParseError::missing_field(id, "pattern"))?;
        let mode = if spec.regex {
            MatchMode::Regex {
                case_insensitive: spec.case_insensitive,
                whole_line: spec.whole_line,
                multiline: spec.multiline,
                dot_all: spec.dot_all,
            }
        } else {
            MatchMode::Substring {
                case_insensitive: spec.case_insensitive,
            }
        };
        Ok(Condition::contains(id, source, pattern, mode))
    }
}
