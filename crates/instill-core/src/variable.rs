//! Dynamic variables and their value sources

use crate::refs::extract_refs;
use serde::{Deserialize, Serialize};

/// How a configuration-file lookup locates its file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    /// A plain file on disk
    #[default]
    Plain,
    /// An entry inside a zip archive
    Zip { entry: String },
    /// An entry inside a jar archive
    Jar { entry: String },
}

/// The value-producing expression of a dynamic variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// Literal template text
    Plain(String),
    /// Value of an environment variable (the name itself is a template)
    Environment(String),
    /// A registry value, read through the embedding installer
    Registry { key: String, value_name: String },
    /// A key looked up in a configuration file (optionally inside an archive)
    ConfigFile {
        file: String,
        #[serde(default)]
        section: Option<String>,
        key: String,
        #[serde(default)]
        archive: ArchiveKind,
    },
}

impl ValueSource {
    /// The textual fields of this source, in a fixed order.
    ///
    /// Every one of them may carry `${name}` references, so dependency
    /// extraction must cover all of them.
    fn texts(&self) -> Vec<&str> {
        match self {
            ValueSource::Plain(text) => vec![text],
            ValueSource::Environment(name) => vec![name],
            ValueSource::Registry { key, value_name } => vec![key, value_name],
            ValueSource::ConfigFile {
                file,
                section,
                key,
                archive,
            } => {
                let mut texts = vec![file.as_str()];
                if let Some(section) = section {
                    texts.push(section);
                }
                texts.push(key);
                match archive {
                    ArchiveKind::Plain => {}
                    ArchiveKind::Zip { entry } | ArchiveKind::Jar { entry } => texts.push(entry),
                }
                texts
            }
        }
    }
}

/// One declared dynamic-variable definition.
///
/// Names are not unique across definitions: several entries for the same name
/// are alternative conditional definitions, tried in declaration order until
/// one's guard condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicVariable {
    pub name: String,
    pub value: ValueSource,
    /// Optional guard condition id gating this definition
    #[serde(default)]
    pub condition_id: Option<String>,
}

impl DynamicVariable {
    pub fn new(name: impl Into<String>, value: ValueSource) -> Self {
        Self {
            name: name.into(),
            value,
            condition_id: None,
        }
    }

    pub fn with_condition(mut self, condition_id: impl Into<String>) -> Self {
        self.condition_id = Some(condition_id.into());
        self
    }

    /// Distinct variable names referenced by this definition's value
    /// expression, in first-appearance order across its textual fields.
    ///
    /// Guard-condition dependencies are not included here; the ordering
    /// resolver folds those in with registry access.
    pub fn referenced_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for text in self.value.texts() {
            for name in extract_refs(text) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_refs() {
        let var = DynamicVariable::new("greeting", ValueSource::Plain("hi ${user.name}!".into()));
        assert_eq!(var.referenced_names(), vec!["user.name"]);
    }

    #[test]
    fn test_config_file_refs_cover_all_fields() {
        let var = DynamicVariable::new(
            "jdbc.url",
            ValueSource::ConfigFile {
                file: "${app.home}/db.ini".into(),
                section: Some("${db.profile}".into()),
                key: "url".into(),
                archive: ArchiveKind::Zip {
                    entry: "conf/${db.flavor}.ini".into(),
                },
            },
        );
        assert_eq!(
            var.referenced_names(),
            vec!["app.home", "db.profile", "db.flavor"]
        );
    }

    #[test]
    fn test_self_reference_is_extracted() {
        let var = DynamicVariable::new("path", ValueSource::Plain("${path}:/opt/bin".into()));
        assert_eq!(var.referenced_names(), vec!["path"]);
    }

    #[test]
    fn test_value_source_serde() {
        let source: ValueSource = serde_json::from_str(
            r#"{"configfile":{"file":"a.ini","key":"port"}}"#,
        )
        .unwrap();
        assert_eq!(
            source,
            ValueSource::ConfigFile {
                file: "a.ini".into(),
                section: None,
                key: "port".into(),
                archive: ArchiveKind::Plain,
            }
        );
    }
}
