//! The condition engine: registry and recursive evaluator
//!
//! Holds the named conditions of one installer run and answers
//! `is_condition_true(id)` queries throughout the installation. Evaluation
//! matches over the condition kind; nested operands inherit the parent's
//! context on first evaluation (first assignment wins) and keep it for the
//! rest of the run.

use crate::contains;
use crate::error::{Result, RuntimeError};
use instill_core::refs::substitute;
use instill_core::{Condition, ConditionKind, InstallData};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Bound on nested/ref evaluation depth, so a pathological mutual-reference
/// configuration errors out instead of overflowing the stack.
const MAX_EVAL_DEPTH: usize = 64;

/// Registry and evaluator for named conditions.
pub struct ConditionEngine {
    conditions: HashMap<String, Condition>,
    install: Arc<InstallData>,
}

impl ConditionEngine {
    pub fn new(install: Arc<InstallData>) -> Self {
        Self {
            conditions: HashMap::new(),
            install,
        }
    }

    /// Create an engine pre-populated with the given conditions.
    pub fn with_conditions(install: Arc<InstallData>, conditions: Vec<Condition>) -> Self {
        let mut engine = Self::new(install);
        for condition in conditions {
            engine.add_condition(condition);
        }
        engine
    }

    /// Register a condition under its id. A later registration with the same
    /// id replaces the earlier one.
    pub fn add_condition(&mut self, condition: Condition) {
        self.conditions.insert(condition.id().to_string(), condition);
    }

    /// The id -> condition registry (read by the compiler's resolver).
    pub fn conditions(&self) -> &HashMap<String, Condition> {
        &self.conditions
    }

    pub fn install(&self) -> &Arc<InstallData> {
        &self.install
    }

    /// Evaluate the named condition.
    ///
    /// An unknown id is an error, never silently false; call sites wanting a
    /// default must handle the error themselves.
    pub fn is_condition_true(&self, id: &str) -> Result<bool> {
        let condition = self
            .conditions
            .get(id)
            .ok_or_else(|| RuntimeError::UnknownCondition(id.to_string()))?;
        let result = self.evaluate(condition, &self.install, 0)?;
        trace!(condition = id, result, "condition evaluated");
        Ok(result)
    }

    /// Evaluate `condition` with `parent_context` as the fallback context.
    ///
    /// The condition's own context cell wins if already set; otherwise the
    /// parent context is attached now and used from here on.
    fn evaluate(
        &self,
        condition: &Condition,
        parent_context: &Arc<InstallData>,
        depth: usize,
    ) -> Result<bool> {
        if depth >= MAX_EVAL_DEPTH {
            return Err(RuntimeError::ReferenceDepthExceeded(
                condition.id().to_string(),
            ));
        }
        let context = Arc::clone(condition.attach_context(parent_context));

        match condition.kind() {
            ConditionKind::Not(operand) => {
                Ok(!self.evaluate(operand, &context, depth + 1)?)
            }
            ConditionKind::And(operands) => {
                for operand in operands {
                    if !self.evaluate(operand, &context, depth + 1)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            ConditionKind::Or(operands) => {
                // No short-circuit: every operand is evaluated (and thereby
                // gets its context assigned) exactly once per call.
                let mut result = false;
                for operand in operands {
                    result |= self.evaluate(operand, &context, depth + 1)?;
                }
                Ok(result)
            }
            ConditionKind::Xor(operands) => {
                let mut result = false;
                for operand in operands {
                    result ^= self.evaluate(operand, &context, depth + 1)?;
                }
                Ok(result)
            }
            ConditionKind::Ref { id } => {
                let target = self
                    .conditions
                    .get(id)
                    .ok_or_else(|| RuntimeError::UnknownCondition(id.clone()))?;
                self.evaluate(target, &context, depth + 1)
            }
            ConditionKind::Contains {
                source,
                pattern,
                mode,
            } => contains::matches(condition.id(), source, pattern, mode, &context),
            ConditionKind::Variable { name, value } => {
                let expected = substitute(value, |n| context.variable(n));
                Ok(context.variable(name).as_deref() == Some(expected.as_str()))
            }
            ConditionKind::Exists { name } => Ok(context.is_set(name)),
            ConditionKind::Platform { os } => Ok(context.platform().os == *os),
        }
    }
}
