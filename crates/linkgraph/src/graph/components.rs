//! Strongly connected components with Kosaraju's algorithm.
//!
//! # Algorithm
//!
//! 1. Depth-first over out-links from every unvisited vertex in ascending id
//!    order, recording each vertex when all of its out-neighbors are done
//!    (finish order).
//! 2. Take vertices in reverse finish order. Each one still unassigned roots a
//!    depth-first search over in-links; every unassigned vertex it reaches
//!    joins the root's component.
//!
//! Both passes use explicit stacks, so deep graphs cannot overflow the call
//! stack, and each touches every vertex and edge once.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::model::Graph;
use crate::error::GraphError;
use crate::types::{IdKind, VertexId};

/// A partition of a graph's vertices into strongly connected components.
///
/// Each component is keyed by its representative, the vertex that rooted it in
/// the second pass. Members are sorted by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StronglyConnectedComponents {
    #[serde(skip)]
    representative: Vec<VertexId>,
    components: BTreeMap<VertexId, Vec<VertexId>>,
}

impl StronglyConnectedComponents {
    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// `true` only for the empty graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Representative of the component containing `vertex`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] for an unknown vertex id.
    pub fn component_of(&self, vertex: VertexId) -> Result<VertexId, GraphError> {
        self.representative
            .get(vertex.0)
            .copied()
            .ok_or(GraphError::OutOfRange {
                kind: IdKind::Vertex,
                id: vertex.0,
                count: self.representative.len(),
            })
    }

    /// `true` if each of `a` and `b` is reachable from the other.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] if either id is unknown.
    pub fn same_component(&self, a: VertexId, b: VertexId) -> Result<bool, GraphError> {
        Ok(self.component_of(a)? == self.component_of(b)?)
    }

    /// Members of the component represented by `representative`.
    #[must_use]
    pub fn members(&self, representative: VertexId) -> Option<&[VertexId]> {
        self.components.get(&representative).map(Vec::as_slice)
    }

    /// Components in representative order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &[VertexId])> {
        self.components
            .iter()
            .map(|(root, members)| (*root, members.as_slice()))
    }

    /// Number of single-vertex components.
    #[must_use]
    pub fn singleton_count(&self) -> usize {
        self.components.values().filter(|m| m.len() == 1).count()
    }

    /// The `limit` largest components, biggest first, ties by representative.
    #[must_use]
    pub fn largest(&self, limit: usize) -> Vec<(VertexId, &[VertexId])> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Consume the result, returning representative to members.
    #[must_use]
    pub fn into_map(self) -> BTreeMap<VertexId, Vec<VertexId>> {
        self.components
    }
}

impl Graph {
    /// Partition the vertices into strongly connected components.
    ///
    /// Two vertices share a component iff each is reachable from the other.
    /// A singleton component is a vertex on no cycle with any other vertex.
    #[must_use]
    pub fn strongly_connected_components(&self) -> StronglyConnectedComponents {
        let finish_order = self.finish_order();
        let components = self.assign_components(finish_order);
        debug!(
            vertices = self.vertex_count(),
            components = components.len(),
            "Computed strongly connected components"
        );
        components
    }

    /// First pass: vertices in the order their depth-first expansion completes.
    fn finish_order(&self) -> Vec<VertexId> {
        let count = self.vertex_count();
        let mut visited = vec![false; count];
        let mut finished = Vec::with_capacity(count);
        // (vertex, index of the next out-neighbor to look at)
        let mut stack: Vec<(VertexId, usize)> = Vec::new();

        for root in (0..count).map(VertexId) {
            if visited[root.0] {
                continue;
            }
            visited[root.0] = true;
            stack.push((root, 0));

            while let Some(top) = stack.last_mut() {
                let (vertex, cursor) = *top;
                if let Some(&next) = self.out_edges(vertex).get(cursor) {
                    top.1 += 1;
                    if !visited[next.0] {
                        visited[next.0] = true;
                        stack.push((next, 0));
                    }
                } else {
                    finished.push(vertex);
                    stack.pop();
                }
            }
        }

        finished
    }

    /// Second pass: flood the reverse graph from roots in reverse finish order.
    fn assign_components(&self, mut finish_order: Vec<VertexId>) -> StronglyConnectedComponents {
        let count = self.vertex_count();
        let mut assigned = vec![false; count];
        let mut representative: Vec<VertexId> = (0..count).map(VertexId).collect();
        let mut components = BTreeMap::new();
        let mut stack = Vec::new();

        while let Some(root) = finish_order.pop() {
            if assigned[root.0] {
                continue;
            }
            assigned[root.0] = true;
            representative[root.0] = root;
            let mut members = vec![root];
            stack.push(root);

            while let Some(vertex) = stack.pop() {
                for &previous in self.in_edges(vertex) {
                    if !assigned[previous.0] {
                        assigned[previous.0] = true;
                        representative[previous.0] = root;
                        members.push(previous);
                        stack.push(previous);
                    }
                }
            }

            members.sort_unstable();
            components.insert(root, members);
        }

        StronglyConnectedComponents {
            representative,
            components,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(count: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::build_from_streams(
            (0..count).map(|i| format!("v{i}")),
            edges.iter().copied(),
            Vec::<(String, Vec<usize>)>::new(),
        )
        .expect("valid test graph")
    }

    fn ids(raw: &[usize]) -> Vec<VertexId> {
        raw.iter().copied().map(VertexId).collect()
    }

    #[test]
    fn reference_scenario_components() {
        // A -> B -> C -> D -> B
        let sccs = graph(4, &[(0, 1), (1, 2), (2, 3), (3, 1)]).strongly_connected_components();

        assert_eq!(sccs.len(), 2);
        let loop_root = sccs.component_of(VertexId(1)).unwrap();
        assert_eq!(sccs.members(loop_root).unwrap(), ids(&[1, 2, 3]).as_slice());
        assert_eq!(sccs.members(VertexId(0)).unwrap(), ids(&[0]).as_slice());
        assert_eq!(sccs.singleton_count(), 1);
    }

    #[test]
    fn three_cycle_chain_and_isolated_vertex() {
        // 0 -> 1 -> 2 -> 0 (cycle), 2 -> 3 -> 4 (chain), 5 isolated
        let g = graph(6, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]);
        let sccs = g.strongly_connected_components();

        assert_eq!(sccs.len(), 4);
        assert!(sccs.same_component(VertexId(0), VertexId(2)).unwrap());
        assert!(!sccs.same_component(VertexId(2), VertexId(3)).unwrap());
        assert!(!sccs.same_component(VertexId(3), VertexId(4)).unwrap());
        assert_eq!(sccs.component_of(VertexId(5)).unwrap(), VertexId(5));
        assert_eq!(sccs.singleton_count(), 3);
    }

    #[test]
    fn every_vertex_is_assigned_once() {
        let g = graph(7, &[(0, 1), (1, 0), (2, 3), (3, 4), (4, 2), (5, 6), (1, 2)]);
        let sccs = g.strongly_connected_components();

        let mut seen: Vec<VertexId> = sccs.iter().flat_map(|(_, m)| m.iter().copied()).collect();
        seen.sort_unstable();
        assert_eq!(seen, ids(&[0, 1, 2, 3, 4, 5, 6]));

        for (root, members) in sccs.iter() {
            for &member in members {
                assert_eq!(sccs.component_of(member).unwrap(), root);
            }
        }
    }

    #[test]
    fn self_loop_stays_singleton() {
        let sccs = graph(2, &[(0, 0), (0, 1)]).strongly_connected_components();
        assert_eq!(sccs.len(), 2);
        assert_eq!(sccs.singleton_count(), 2);
    }

    #[test]
    fn largest_orders_by_size_then_representative() {
        let g = graph(6, &[(0, 1), (1, 0), (2, 3), (3, 4), (4, 2)]);
        let sccs = g.strongly_connected_components();

        let largest = sccs.largest(2);
        assert_eq!(largest.len(), 2);
        assert_eq!(largest[0].1, ids(&[2, 3, 4]).as_slice());
        assert_eq!(largest[1].1, ids(&[0, 1]).as_slice());
    }

    #[test]
    fn empty_graph_has_no_components() {
        let sccs = Graph::default().strongly_connected_components();
        assert!(sccs.is_empty());
        assert!(sccs.component_of(VertexId(0)).is_err());
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let count = 200_000;
        let edges: Vec<_> = (0..count - 1).map(|i| (i, i + 1)).chain([(count - 1, 0)]).collect();
        let sccs = graph(count, &edges).strongly_connected_components();
        assert_eq!(sccs.len(), 1);
    }
}
