//! Dynamic-variable value computation
//!
//! Walks the compiler-ordered variable names and fills the shared variable
//! table. For each name the declared entries are tried in declaration order
//! until one applies: its guard condition (if any) holds and its value
//! source yields a value. Registry and archive access is delegated to the
//! embedding installer through reader traits; the defaults are inert.

use crate::engine::ConditionEngine;
use crate::error::{Result, RuntimeError};
use instill_core::refs::substitute;
use instill_core::{ArchiveKind, DynamicVariable, InstallData, ValueSource};
use std::fs;
use tracing::{debug, warn};

/// Read access to the native registry, supplied by the embedding installer.
pub trait RegistryReader {
    /// The data of `value_name` under `key`, or `None` if absent.
    fn value(&self, key: &str, value_name: &str) -> Result<Option<String>>;
}

/// Default registry reader: nothing is ever found.
pub struct NoRegistry;

impl RegistryReader for NoRegistry {
    fn value(&self, key: &str, _value_name: &str) -> Result<Option<String>> {
        warn!(key, "registry lookup without a registry reader");
        Ok(None)
    }
}

/// Read access to zip/jar archive entries, supplied by the embedding
/// installer.
pub trait ArchiveReader {
    /// The contents of `entry` inside the archive at `path`, or `None` if
    /// absent.
    fn entry(&self, path: &str, entry: &str) -> Result<Option<String>>;
}

/// Default archive reader: nothing is ever found.
pub struct NoArchives;

impl ArchiveReader for NoArchives {
    fn entry(&self, path: &str, _entry: &str) -> Result<Option<String>> {
        warn!(path, "archive lookup without an archive reader");
        Ok(None)
    }
}

/// Computes dynamic-variable values in dependency order.
pub struct VariableComputer {
    registry: Box<dyn RegistryReader>,
    archives: Box<dyn ArchiveReader>,
}

impl VariableComputer {
    pub fn new() -> Self {
        Self {
            registry: Box::new(NoRegistry),
            archives: Box::new(NoArchives),
        }
    }

    pub fn with_registry(mut self, registry: impl RegistryReader + 'static) -> Self {
        self.registry = Box::new(registry);
        self
    }

    pub fn with_archives(mut self, archives: impl ArchiveReader + 'static) -> Self {
        self.archives = Box::new(archives);
        self
    }

    /// Compute every variable in `order`, writing results into the engine's
    /// install data as they resolve (so later variables see earlier values).
    ///
    /// A name is left unset when no entry applies: every guard failed, or
    /// the applying sources yielded nothing (unset environment variable,
    /// missing registry value, missing config key).
    pub fn compute(
        &self,
        variables: &[DynamicVariable],
        order: &[String],
        engine: &ConditionEngine,
    ) -> Result<()> {
        for name in order {
            for entry in variables.iter().filter(|v| &v.name == name) {
                if let Some(condition_id) = &entry.condition_id {
                    if !engine.is_condition_true(condition_id)? {
                        continue;
                    }
                }
                if let Some(value) = self.resolve_source(entry, engine.install())? {
                    debug!(variable = name.as_str(), "variable resolved");
                    engine.install().set_variable(name.clone(), value);
                    break;
                }
            }
        }
        Ok(())
    }

    fn resolve_source(
        &self,
        entry: &DynamicVariable,
        context: &InstallData,
    ) -> Result<Option<String>> {
        let lookup = |name: &str| context.variable(name);

        match &entry.value {
            ValueSource::Plain(text) => Ok(Some(substitute(text, lookup))),
            ValueSource::Environment(name) => Ok(std::env::var(substitute(name, lookup)).ok()),
            ValueSource::Registry { key, value_name } => self
                .registry
                .value(&substitute(key, lookup), &substitute(value_name, lookup)),
            ValueSource::ConfigFile {
                file,
                section,
                key,
                archive,
            } => {
                let path = substitute(file, lookup);
                let contents = match archive {
                    ArchiveKind::Plain => Some(fs::read_to_string(&path).map_err(|source| {
                        RuntimeError::FileRead { path, source }
                    })?),
                    ArchiveKind::Zip { entry: inner } | ArchiveKind::Jar { entry: inner } => {
                        self.archives.entry(&path, &substitute(inner, lookup))?
                    }
                };
                let section = section.as_ref().map(|s| substitute(s, lookup));
                Ok(contents.and_then(|c| {
                    config_lookup(&c, section.as_deref(), &substitute(key, lookup))
                }))
            }
        }
    }
}

impl Default for VariableComputer {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up `key` in INI-style `contents`.
///
/// With a section, only `key=value` lines under the matching `[section]`
/// header count. Without one, the file is treated as a flat properties file
/// and headers are ignored.
fn config_lookup(contents: &str, section: Option<&str>, key: &str) -> Option<String> {
    let mut current_section: Option<String> = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            current_section = Some(line[1..line.len() - 1].trim().to_string());
            continue;
        }
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };
        if k.trim() != key {
            continue;
        }
        match section {
            Some(wanted) if current_section.as_deref() != Some(wanted) => continue,
            _ => return Some(v.trim().to_string()),
        }
    }

    None
}
