//! Condition types and validating constructors

use crate::error::{CoreError, Result};
use crate::install::{InstallData, OsKind};
use crate::refs::extract_refs;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;

/// What a CONTAINS condition matches against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainsSource {
    /// A literal string
    Text(String),
    /// The full contents of the named file (path may reference variables)
    File(String),
    /// The current value of the named variable
    Variable(String),
}

/// How a CONTAINS condition matches its pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain substring search
    Substring {
        #[serde(default)]
        case_insensitive: bool,
    },
    /// Regular-expression search
    Regex {
        #[serde(default)]
        case_insensitive: bool,
        /// Anchor the pattern to whole lines instead of substrings
        #[serde(default)]
        whole_line: bool,
        #[serde(default)]
        multiline: bool,
        #[serde(default)]
        dot_all: bool,
    },
}

impl Default for MatchMode {
    fn default() -> Self {
        MatchMode::Substring {
            case_insensitive: false,
        }
    }
}

/// The closed set of condition variants.
///
/// Evaluation is a match over this tag (in `instill-runtime`), not dynamic
/// dispatch; the set is extended only by whoever owns the definition format.
#[derive(Debug, Clone)]
pub enum ConditionKind {
    /// Negation of a single operand
    Not(Box<Condition>),
    /// True when every operand is true
    And(Vec<Condition>),
    /// True when at least one operand is true
    Or(Vec<Condition>),
    /// Boolean XOR folded left-to-right over one or two operands
    Xor(Vec<Condition>),
    /// Delegates to another condition, looked up by id at evaluation time
    Ref { id: String },
    /// Pattern match against a string, file contents, or variable value
    Contains {
        source: ContainsSource,
        pattern: String,
        mode: MatchMode,
    },
    /// True when the variable equals the given value
    Variable { name: String, value: String },
    /// True when the variable is set
    Exists { name: String },
    /// True when running on the given OS family
    Platform { os: OsKind },
}

/// A named boolean predicate over install-time state.
///
/// Structure (id + kind + operands) is fixed at construction. The context is
/// attached lazily during evaluation and only once: a condition created
/// without a context inherits its parent evaluator's context the first time
/// it is evaluated, and that assignment is never overwritten.
#[derive(Debug, Clone)]
pub struct Condition {
    id: String,
    kind: ConditionKind,
    context: OnceCell<Arc<InstallData>>,
}

impl Condition {
    fn with_kind(id: impl Into<String>, kind: ConditionKind) -> Self {
        Self {
            id: id.into(),
            kind,
            context: OnceCell::new(),
        }
    }

    pub fn not(id: impl Into<String>, operand: Condition) -> Self {
        Self::with_kind(id, ConditionKind::Not(Box::new(operand)))
    }

    /// Build an AND condition. Fails if `operands` is empty.
    pub fn and(id: impl Into<String>, operands: Vec<Condition>) -> Result<Self> {
        let id = id.into();
        Self::require_operands(&id, &operands, "and")?;
        Ok(Self::with_kind(id, ConditionKind::And(operands)))
    }

    /// Build an OR condition. Fails if `operands` is empty.
    pub fn or(id: impl Into<String>, operands: Vec<Condition>) -> Result<Self> {
        let id = id.into();
        Self::require_operands(&id, &operands, "or")?;
        Ok(Self::with_kind(id, ConditionKind::Or(operands)))
    }

    /// Build an XOR condition. Fails on zero operands or more than two.
    pub fn xor(id: impl Into<String>, operands: Vec<Condition>) -> Result<Self> {
        let id = id.into();
        Self::require_operands(&id, &operands, "xor")?;
        if operands.len() > 2 {
            return Err(CoreError::invalid_condition(
                id,
                format!("'xor' takes at most two operands, got {}", operands.len()),
            ));
        }
        Ok(Self::with_kind(id, ConditionKind::Xor(operands)))
    }

    pub fn reference(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_kind(id, ConditionKind::Ref { id: target.into() })
    }

    pub fn contains(
        id: impl Into<String>,
        source: ContainsSource,
        pattern: impl Into<String>,
        mode: MatchMode,
    ) -> Self {
        Self::with_kind(
            id,
            ConditionKind::Contains {
                source,
                pattern: pattern.into(),
                mode,
            },
        )
    }

    pub fn variable(
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            id,
            ConditionKind::Variable {
                name: name.into(),
                value: value.into(),
            },
        )
    }

    pub fn exists(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_kind(id, ConditionKind::Exists { name: name.into() })
    }

    pub fn platform(id: impl Into<String>, os: OsKind) -> Self {
        Self::with_kind(id, ConditionKind::Platform { os })
    }

    fn require_operands(id: &str, operands: &[Condition], kind: &str) -> Result<()> {
        if operands.is_empty() {
            return Err(CoreError::invalid_condition(
                id,
                format!("'{kind}' requires at least one operand"),
            ));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &ConditionKind {
        &self.kind
    }

    /// The attached evaluation context, if one has been assigned.
    pub fn context(&self) -> Option<&Arc<InstallData>> {
        self.context.get()
    }

    /// Attach `context` unless a context is already set; returns the
    /// effective context. First assignment wins.
    pub fn attach_context<'a>(&'a self, context: &Arc<InstallData>) -> &'a Arc<InstallData> {
        self.context.get_or_init(|| Arc::clone(context))
    }

    /// Collect the variable names and condition ids this condition reads.
    ///
    /// Variable names come from the Variable/Exists/Contains leaves plus any
    /// `${name}` references inside their textual fields; `Ref` operands
    /// contribute the referenced condition id (resolution across the registry
    /// is the compiler's job).
    pub fn collect_dependencies(
        &self,
        variables: &mut BTreeSet<String>,
        condition_refs: &mut BTreeSet<String>,
    ) {
        match &self.kind {
            ConditionKind::Not(operand) => operand.collect_dependencies(variables, condition_refs),
            ConditionKind::And(operands)
            | ConditionKind::Or(operands)
            | ConditionKind::Xor(operands) => {
                for operand in operands {
                    operand.collect_dependencies(variables, condition_refs);
                }
            }
            ConditionKind::Ref { id } => {
                condition_refs.insert(id.clone());
            }
            ConditionKind::Contains {
                source, pattern, ..
            } => {
                match source {
                    ContainsSource::Text(text) => variables.extend(extract_refs(text)),
                    ContainsSource::File(path) => variables.extend(extract_refs(path)),
                    ContainsSource::Variable(name) => {
                        variables.insert(name.clone());
                    }
                }
                variables.extend(extract_refs(pattern));
            }
            ConditionKind::Variable { name, value } => {
                variables.insert(name.clone());
                variables.extend(extract_refs(value));
            }
            ConditionKind::Exists { name } => {
                variables.insert(name.clone());
            }
            ConditionKind::Platform { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> Condition {
        Condition::variable(id, "install.type", "full")
    }

    #[test]
    fn test_and_requires_operands() {
        let err = Condition::and("empty.and", vec![]).unwrap_err();
        assert!(err.to_string().contains("empty.and"));
        assert!(err.to_string().contains("at least one operand"));
    }

    #[test]
    fn test_xor_arity() {
        assert!(Condition::xor("x1", vec![leaf("a")]).is_ok());
        assert!(Condition::xor("x2", vec![leaf("a"), leaf("b")]).is_ok());

        let err = Condition::xor("x3", vec![leaf("a"), leaf("b"), leaf("c")]).unwrap_err();
        assert!(err.to_string().contains("x3"));
        assert!(err.to_string().contains("at most two"));
    }

    #[test]
    fn test_context_first_assignment_wins() {
        use crate::install::{InstallData, Platform};

        let cond = leaf("ctx");
        assert!(cond.context().is_none());

        let first = Arc::new(InstallData::new(Platform::new(OsKind::Linux, "x86_64", "")));
        let second = Arc::new(InstallData::new(Platform::new(OsKind::Windows, "x86_64", "")));

        cond.attach_context(&first);
        cond.attach_context(&second);

        assert!(Arc::ptr_eq(cond.context().unwrap(), &first));
    }

    #[test]
    fn test_collect_dependencies() {
        let inner = Condition::contains(
            "uses.file",
            ContainsSource::File("${app.home}/app.cfg".into()),
            "enabled",
            MatchMode::default(),
        );
        let cond = Condition::and(
            "root",
            vec![
                inner,
                Condition::reference("to.other", "other.condition"),
                Condition::exists("has.port", "db.port"),
            ],
        )
        .unwrap();

        let mut vars = BTreeSet::new();
        let mut refs = BTreeSet::new();
        cond.collect_dependencies(&mut vars, &mut refs);

        assert!(vars.contains("app.home"));
        assert!(vars.contains("db.port"));
        assert!(refs.contains("other.condition"));
    }

    #[test]
    fn test_match_mode_serde() {
        let mode: MatchMode =
            serde_json::from_str(r#"{"match":"regex","whole_line":true}"#).unwrap();
        assert_eq!(
            mode,
            MatchMode::Regex {
                case_insensitive: false,
                whole_line: true,
                multiline: false,
                dot_all: false,
            }
        );
    }
}
