//! Dynamic-variable ordering resolver
//!
//! Extracts the dependency graph of the declared dynamic variables: value
//! templates contribute their `${name}` references, and a guard condition
//! contributes the transitive variable reads of that condition. The graph's
//! depth ordering then becomes the variable computation order, producers
//! before consumers.

use crate::graph::DependencyGraph;
use instill_core::{Condition, DynamicVariable};
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};

/// All variable names the condition with id `condition_id` transitively
/// reads.
///
/// Ref conditions are followed through the registry with a visited-id set,
/// so self- and mutual references terminate. Unknown referenced ids are
/// skipped here (with a warning); reference integrity is the validator's
/// concern.
pub fn condition_variable_refs(
    condition_id: &str,
    registry: &HashMap<String, Condition>,
) -> BTreeSet<String> {
    let mut variables = BTreeSet::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();
    let mut pending: Vec<String> = vec![condition_id.to_string()];

    while let Some(id) = pending.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let Some(condition) = registry.get(&id) else {
            warn!("condition '{id}' not found while collecting variable refs");
            continue;
        };
        let mut refs = BTreeSet::new();
        condition.collect_dependencies(&mut variables, &mut refs);
        pending.extend(refs.into_iter().filter(|r| !visited.contains(r)));
    }

    variables
}

/// Compute the variable computation order for the declared dynamic
/// variables.
///
/// Returns the distinct variable names so that, for acyclic dependencies,
/// every producer precedes its consumers. Cyclic references (including a
/// variable referencing itself) still terminate and list each name exactly
/// once, in an order that merely approximates the dependencies.
pub fn resolve_order(
    variables: &[DynamicVariable],
    registry: &HashMap<String, Condition>,
) -> Vec<String> {
    let mut graph: DependencyGraph<String> = DependencyGraph::new();

    for variable in variables {
        graph.add_vertex(variable.name.clone());

        let mut dependencies: BTreeSet<String> = variable.referenced_names().into_iter().collect();
        if let Some(condition_id) = &variable.condition_id {
            dependencies.extend(condition_variable_refs(condition_id, registry));
        }

        // Edge dependent -> dependency: the walk pushes dependencies deeper,
        // and deeper sorts earlier.
        for dependency in dependencies {
            graph.add_edge(variable.name.clone(), dependency);
        }
    }

    let order = graph.ordered_list();
    debug!("resolved computation order for {} variables", order.len());
    order
}
