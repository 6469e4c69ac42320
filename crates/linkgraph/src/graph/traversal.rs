//! Breadth-first queries: shortest paths, cycles and landmark routes.
//!
//! All three share [`Frontier`], a BFS queue that records for each discovered
//! vertex the vertex it was discovered from. Vertices are marked discovered
//! when enqueued, so each is enqueued at most once and the first discovery
//! is along a shortest route. Paths are rebuilt by walking predecessors back
//! from the end vertex.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use tracing::debug;

use super::model::Graph;
use crate::error::GraphError;
use crate::types::{Cycle, CycleOutcome, LandmarkPath, PathOutcome, VertexId, VertexPath};

/// Per-query BFS state over the out-links of a graph.
struct Frontier<'g> {
    graph: &'g Graph,
    queue: VecDeque<VertexId>,
    discovered: Vec<bool>,
    predecessor: Vec<Option<VertexId>>,
}

impl<'g> Frontier<'g> {
    /// A frontier holding only `root`, which starts out discovered.
    fn new(graph: &'g Graph, root: VertexId) -> Self {
        let count = graph.vertex_count();
        let mut discovered = vec![false; count];
        discovered[root.0] = true;
        Self {
            graph,
            queue: VecDeque::from([root]),
            discovered,
            predecessor: vec![None; count],
        }
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.queue.pop_front()
    }

    /// Visit the out-neighbors of `vertex` in edge order.
    ///
    /// `inspect` sees each neighbor together with whether it was already
    /// discovered, before it is discovered. Returning `Break` stops the
    /// expansion immediately; otherwise undiscovered neighbors are
    /// discovered and enqueued.
    fn expand<B>(
        &mut self,
        vertex: VertexId,
        mut inspect: impl FnMut(VertexId, bool) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let graph = self.graph;
        for &next in graph.out_edges(vertex) {
            let seen = self.discovered[next.0];
            if let ControlFlow::Break(value) = inspect(next, seen) {
                return ControlFlow::Break(value);
            }
            if !seen {
                self.discovered[next.0] = true;
                self.predecessor[next.0] = Some(vertex);
                self.queue.push_back(next);
            }
        }
        ControlFlow::Continue(())
    }

    /// The discovery route from the root to `vertex`, both inclusive.
    fn route_to(&self, vertex: VertexId) -> Vec<VertexId> {
        let mut route = vec![vertex];
        let mut current = vertex;
        while let Some(previous) = self.predecessor[current.0] {
            route.push(previous);
            current = previous;
        }
        route.reverse();
        route
    }
}

impl Graph {
    /// Find a shortest directed path from `start` to `target`.
    ///
    /// Only out-links are followed. Among several shortest paths, the one
    /// discovered first in edge insertion order wins. A vertex always reaches
    /// itself with the single-vertex path.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] if either id is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkgraph::{Graph, VertexId};
    ///
    /// let graph = Graph::build_from_streams(
    ///     ["A", "B", "C", "D"],
    ///     [(0, 1), (1, 2), (2, 3), (3, 1)],
    ///     Vec::<(String, Vec<usize>)>::new(),
    /// )?;
    /// let path = graph.shortest_path(VertexId(0), VertexId(3))?.into_path().unwrap();
    /// assert_eq!(path.len(), 3);
    /// # Ok::<(), linkgraph::GraphError>(())
    /// ```
    pub fn shortest_path(
        &self,
        start: VertexId,
        target: VertexId,
    ) -> Result<PathOutcome, GraphError> {
        self.vertex(start)?;
        self.vertex(target)?;
        if start == target {
            return Ok(PathOutcome::Found(VertexPath::single(start)));
        }

        let mut frontier = Frontier::new(self, start);
        while let Some(vertex) = frontier.pop() {
            let reached = frontier.expand(vertex, |next, seen| {
                if !seen && next == target {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            if reached.is_break() {
                let mut route = frontier.route_to(vertex);
                route.push(target);
                debug!(%start, %target, length = route.len() - 1, "Found shortest path");
                return Ok(VertexPath::new(route).map_or(PathOutcome::NotFound, PathOutcome::Found));
            }
        }

        debug!(%start, %target, "Target unreachable");
        Ok(PathOutcome::NotFound)
    }

    /// Find the shortest cycle through `start`.
    ///
    /// The cycle is reported as the vertex sequence beginning and ending at
    /// `start`. A self-loop on `start` is a cycle of length 1.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] if `start` is unknown.
    pub fn find_cycle_from(&self, start: VertexId) -> Result<CycleOutcome, GraphError> {
        self.vertex(start)?;

        let mut frontier = Frontier::new(self, start);
        while let Some(vertex) = frontier.pop() {
            let closed = frontier.expand(vertex, |next, _| {
                if next == start {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            if closed.is_break() {
                let mut route = frontier.route_to(vertex);
                route.push(start);
                debug!(%start, length = route.len() - 1, "Found cycle");
                return Ok(Cycle::new(route).map_or(CycleOutcome::NoCycle, CycleOutcome::Found));
            }
        }

        debug!(%start, "No cycle through vertex");
        Ok(CycleOutcome::NoCycle)
    }

    /// Route from `start` to `target` through `landmark`.
    ///
    /// Each leg is a shortest path on its own; the combined route need not be
    /// a shortest walk overall. Returns `None` if either leg is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] if any id is unknown.
    pub fn landmark_path(
        &self,
        start: VertexId,
        landmark: VertexId,
        target: VertexId,
    ) -> Result<Option<LandmarkPath>, GraphError> {
        self.vertex(target)?;
        let Some(to_landmark) = self.shortest_path(start, landmark)?.into_path() else {
            return Ok(None);
        };
        let Some(from_landmark) = self.shortest_path(landmark, target)?.into_path() else {
            return Ok(None);
        };
        Ok(Some(LandmarkPath {
            to_landmark,
            from_landmark,
        }))
    }
}
