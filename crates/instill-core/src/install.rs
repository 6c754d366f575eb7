//! Install-time context: the variable table and the platform descriptor

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

/// Operating-system family used by platform conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsKind {
    Windows,
    Macos,
    Linux,
    /// Any other unix-like system
    Unix,
}

/// Descriptor of the platform an installation runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: OsKind,
    pub arch: String,
    pub version: String,
}

impl Platform {
    pub fn new(os: OsKind, arch: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            os,
            arch: arch.into(),
            version: version.into(),
        }
    }

    /// Descriptor for the platform this process is running on.
    pub fn current() -> Self {
        let os = match std::env::consts::OS {
            "windows" => OsKind::Windows,
            "macos" => OsKind::Macos,
            "linux" => OsKind::Linux,
            _ => OsKind::Unix,
        };
        Self {
            os,
            arch: std::env::consts::ARCH.to_string(),
            version: String::new(),
        }
    }
}

/// Shared install-time state attached to conditions during evaluation.
///
/// The whole engine is single-threaded by design, so the variable table uses
/// interior mutability: conditions hold the same context the variable
/// computation phase writes into, and always read the current values.
#[derive(Debug, PartialEq, Eq)]
pub struct InstallData {
    variables: RefCell<HashMap<String, String>>,
    platform: Platform,
}

impl InstallData {
    pub fn new(platform: Platform) -> Self {
        Self {
            variables: RefCell::new(HashMap::new()),
            platform,
        }
    }

    pub fn with_variables(platform: Platform, variables: HashMap<String, String>) -> Self {
        Self {
            variables: RefCell::new(variables),
            platform,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Current value of a variable, if set.
    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables.borrow().get(name).cloned()
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.variables.borrow().contains_key(name)
    }

    pub fn set_variable(&self, name: impl Into<String>, value: impl Into<String>) {
        self.variables
            .borrow_mut()
            .insert(name.into(), value.into());
    }

    /// Snapshot of the current variable table.
    pub fn variables_snapshot(&self) -> HashMap<String, String> {
        self.variables.borrow().clone()
    }
}

impl Default for InstallData {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_table() {
        let data = InstallData::new(Platform::new(OsKind::Linux, "x86_64", "6.1"));
        assert!(!data.is_set("install.type"));

        data.set_variable("install.type", "full");
        assert_eq!(data.variable("install.type").as_deref(), Some("full"));
        assert!(data.is_set("install.type"));
    }

    #[test]
    fn test_os_kind_serde() {
        let os: OsKind = serde_json::from_str(r#""windows""#).unwrap();
        assert_eq!(os, OsKind::Windows);
    }
}
