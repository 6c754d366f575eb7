//! Dynamic-variable parser

use crate::error::{ParseError, Result};
use instill_core::{ArchiveKind, DynamicVariable, ValueSource};
use serde::Deserialize;

/// Raw variable spec as it appears in the YAML document.
///
/// Exactly one of `value` / `environment` / `registry` / `config-file` must
/// be present.
#[derive(Debug, Clone, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub registry: Option<RegistrySpec>,
    #[serde(rename = "config-file", default)]
    pub config_file: Option<ConfigFileSpec>,
    /// Optional guard condition id
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySpec {
    pub key: String,
    #[serde(rename = "value")]
    pub value_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFileSpec {
    pub file: String,
    #[serde(default)]
    pub section: Option<String>,
    pub key: String,
    #[serde(rename = "zip-entry", default)]
    pub zip_entry: Option<String>,
    #[serde(rename = "jar-entry", default)]
    pub jar_entry: Option<String>,
}

/// Dynamic-variable parser
pub struct VariableParser;

impl VariableParser {
    /// Parse a single variable declaration from a YAML string.
    pub fn parse(yaml_str: &str) -> Result<DynamicVariable> {
        let spec: VariableSpec = serde_yaml::from_str(yaml_str)?;
        Self::from_spec(&spec)
    }

    /// Build a dynamic variable from a raw spec.
    pub fn from_spec(spec: &VariableSpec) -> Result<DynamicVariable> {
        let mut sources: Vec<ValueSource> = Vec::new();

        if let Some(value) = &spec.value {
            sources.push(ValueSource::Plain(value.clone()));
        }
        if let Some(environment) = &spec.environment {
            sources.push(ValueSource::Environment(environment.clone()));
        }
        if let Some(registry) = &spec.registry {
            sources.push(ValueSource::Registry {
                key: registry.key.clone(),
                value_name: registry.value_name.clone(),
            });
        }
        if let Some(config_file) = &spec.config_file {
            sources.push(Self::config_file_source(&spec.name, config_file)?);
        }

        if sources.len() != 1 {
            return Err(ParseError::invalid_variable(
                &spec.name,
                "expected exactly one of value/environment/registry/config-file",
            ));
        }

        let mut variable = DynamicVariable::new(&spec.name, sources.remove(0));
        if let Some(condition) = &spec.condition {
            variable = variable.with_condition(condition);
        }
        Ok(variable)
    }

    fn config_file_source(name: &str, spec: &ConfigFileSpec) -> Result<ValueSource> {
        let archive = match (&spec.zip_entry, &spec.jar_entry) {
            (None, None) => ArchiveKind::Plain,
            (Some(entry), None) => ArchiveKind::Zip {
                entry: entry.clone(),
            },
            (None, Some(entry)) => ArchiveKind::Jar {
                entry: entry.clone(),
            },
            (Some(_), Some(_)) => {
                return Err(ParseError::invalid_variable(
                    name,
                    "config-file takes at most one of zip-entry/jar-entry",
                ))
            }
        };
        Ok(ValueSource::ConfigFile {
            file: spec.file.clone(),
            section: spec.section.clone(),
            key: spec.key.clone(),
            archive,
        })
    }
}
