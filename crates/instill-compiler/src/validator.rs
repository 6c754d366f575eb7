//! Definition validation
//!
//! Converts would-be evaluation-time failures into compile-time errors:
//! every ref target and every variable guard must name a registered
//! condition, and condition ids must be unique.

use crate::error::{CompileError, Result};
use instill_core::{Condition, DynamicVariable};
use std::collections::{BTreeSet, HashSet};

/// Validate reference integrity of a parsed definition.
///
/// `conditions` is the full top-level condition list (nested operands are
/// reached through their parents); `variables` the declared dynamic
/// variables. The first violation is returned, naming the offending id.
pub fn validate_definition(
    conditions: &[Condition],
    variables: &[DynamicVariable],
) -> Result<()> {
    let mut ids: HashSet<&str> = HashSet::new();
    for condition in conditions {
        if !ids.insert(condition.id()) {
            return Err(CompileError::DuplicateCondition(condition.id().to_string()));
        }
    }

    for condition in conditions {
        let mut variable_refs = BTreeSet::new();
        let mut condition_refs = BTreeSet::new();
        condition.collect_dependencies(&mut variable_refs, &mut condition_refs);
        for target in condition_refs {
            if !ids.contains(target.as_str()) {
                return Err(CompileError::UnknownConditionRef {
                    condition: condition.id().to_string(),
                    target,
                });
            }
        }
    }

    for variable in variables {
        if let Some(condition_id) = &variable.condition_id {
            if !ids.contains(condition_id.as_str()) {
                return Err(CompileError::UnknownGuardCondition {
                    variable: variable.name.clone(),
                    condition: condition_id.clone(),
                });
            }
        }
    }

    Ok(())
}
