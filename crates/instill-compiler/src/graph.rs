//! Generic dependency graph with a cycle-tolerant depth ordering
//!
//! Vertices are stored in an arena with an index map, so the depth walk works
//! on plain indices and the "currently on this path" marking is a flag per
//! vertex rather than recursion-stack identity.
//!
//! A true topological order is only possible for acyclic graphs. The depth
//! walk instead guarantees termination on *any* graph: revisiting a vertex
//! that is already on the current path stops the descent instead of
//! recursing, so cyclic inputs still produce a total (if approximate) order.

use std::collections::HashMap;
use std::hash::Hash;

/// Directed graph over opaque vertex values.
///
/// Self-loops are permitted. Insertion order is preserved and used as the
/// tie-break between vertices of equal depth, so identical construction
/// order yields identical output.
#[derive(Debug, Clone)]
pub struct DependencyGraph<V> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    /// Outgoing neighbors per vertex, deduplicated, in insertion order
    adjacency: Vec<Vec<usize>>,
}

impl<V> DependencyGraph<V>
where
    V: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    /// Add a vertex. No-op if it is already present.
    pub fn add_vertex(&mut self, vertex: V) -> usize {
        if let Some(&index) = self.index.get(&vertex) {
            return index;
        }
        let index = self.vertices.len();
        self.vertices.push(vertex.clone());
        self.index.insert(vertex, index);
        self.adjacency.push(Vec::new());
        index
    }

    /// Record `to` as a neighbor of `from`, adding missing endpoints.
    ///
    /// `from == to` is allowed; the depth walk treats it like any other
    /// cycle.
    pub fn add_edge(&mut self, from: V, to: V) {
        let from_idx = self.add_vertex(from);
        let to_idx = self.add_vertex(to);
        if !self.adjacency[from_idx].contains(&to_idx) {
            self.adjacency[from_idx].push(to_idx);
        }
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices sorted by descending depth.
    ///
    /// Depth of a vertex is the longest walk reaching it from any start
    /// vertex, so "more depended-upon" vertices sort earlier. On acyclic
    /// graphs every edge direction is honored (a neighbor always ends up
    /// deeper than the vertex pointing at it); on cyclic graphs the result
    /// is still total and deterministic, with no such guarantee.
    pub fn ordered_list(&self) -> Vec<V> {
        let mut depths = vec![0usize; self.vertices.len()];
        let mut on_path = vec![false; self.vertices.len()];

        // Walk from every vertex, not just roots, so disconnected parts and
        // cycle members all receive a depth.
        for start in 0..self.vertices.len() {
            self.walk(start, 1, &mut depths, &mut on_path);
        }

        let mut order: Vec<usize> = (0..self.vertices.len()).collect();
        // Stable sort keeps insertion order among equal depths
        order.sort_by(|a, b| depths[*b].cmp(&depths[*a]));
        order.into_iter().map(|i| self.vertices[i].clone()).collect()
    }

    fn walk(&self, vertex: usize, depth: usize, depths: &mut [usize], on_path: &mut [bool]) {
        if on_path[vertex] {
            // Already on the current path: stop descending, never recurse
            return;
        }
        Self::ensure_depth(depths, vertex, depth);
        on_path[vertex] = true;
        for &neighbor in &self.adjacency[vertex] {
            self.walk(neighbor, depth + 1, depths, on_path);
        }
        on_path[vertex] = false;
    }

    /// Depths only ever increase.
    fn ensure_depth(depths: &mut [usize], vertex: usize, depth: usize) {
        if depth > depths[vertex] {
            depths[vertex] = depth;
        }
    }
}

impl<V> Default for DependencyGraph<V>
where
    V: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[&str], vertex: &str) -> usize {
        order.iter().position(|v| *v == vertex).unwrap()
    }

    fn ordered(graph: &DependencyGraph<&'static str>) -> Vec<&'static str> {
        graph.ordered_list()
    }

    #[test]
    fn test_empty_graph() {
        let graph: DependencyGraph<&str> = DependencyGraph::new();
        assert!(graph.is_empty());
        assert!(graph.ordered_list().is_empty());
    }

    #[test]
    fn test_add_vertex_idempotent() {
        let mut graph = DependencyGraph::new();
        graph.add_vertex("a");
        graph.add_vertex("a");
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_add_edge_adds_endpoints() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        assert!(graph.contains(&"a"));
        assert!(graph.contains(&"b"));
        assert_eq!(graph.edge_count(), 1);

        // Duplicate edges collapse
        graph.add_edge("a", "b");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_chain_orders_dependency_first() {
        let mut graph = DependencyGraph::new();
        // a reads b, b reads c
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");

        let order = ordered(&graph);
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_diamond() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "d");
        graph.add_edge("c", "d");

        let order = ordered(&graph);
        assert_eq!(order.len(), 4);
        assert!(position(&order, "d") < position(&order, "b"));
        assert!(position(&order, "d") < position(&order, "c"));
        assert!(position(&order, "b") < position(&order, "a"));
        assert!(position(&order, "c") < position(&order, "a"));
    }

    #[test]
    fn test_self_loop_terminates() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "a");

        let order = ordered(&graph);
        assert_eq!(order, vec!["a"]);
    }

    #[test]
    fn test_two_cycle_terminates_with_each_vertex_once() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");

        let order = ordered(&graph);
        assert_eq!(order.len(), 2);
        assert!(order.contains(&"a"));
        assert!(order.contains(&"b"));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut graph = DependencyGraph::new();
        graph.add_vertex("z");
        graph.add_vertex("m");
        graph.add_vertex("a");

        // All depth 1: insertion order is the tie-break
        assert_eq!(ordered(&graph), vec!["z", "m", "a"]);
    }

    #[test]
    fn test_deterministic_for_same_construction_order() {
        let build = || {
            let mut graph = DependencyGraph::new();
            graph.add_edge("a", "b");
            graph.add_edge("c", "b");
            graph.add_edge("b", "d");
            graph.add_edge("e", "a");
            graph.ordered_list()
        };
        assert_eq!(build(), build());
    }
}
