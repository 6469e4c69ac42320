//! Vertex, category and graph tables.

use std::collections::HashSet;

use linkgraph_records::RecordKind;
use tracing::debug;

use crate::error::GraphError;
use crate::types::{CategoryId, GraphStats, IdKind, VertexId};

/// An article in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    id: VertexId,
    name: String,
    out_neighbors: Vec<VertexId>,
    in_neighbors: Vec<VertexId>,
    categories: Vec<CategoryId>,
}

impl Vertex {
    /// The vertex id, equal to its position in the graph.
    #[must_use]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertices this vertex links to, in edge insertion order.
    #[must_use]
    pub fn out_neighbors(&self) -> &[VertexId] {
        &self.out_neighbors
    }

    /// Vertices linking to this vertex, in edge insertion order.
    #[must_use]
    pub fn in_neighbors(&self) -> &[VertexId] {
        &self.in_neighbors
    }

    /// Categories this vertex belongs to, in the order they were assigned.
    #[must_use]
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }
}

/// A named group of vertices. Membership is stored on the vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
}

impl Category {
    /// The 1-based category id.
    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Category label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A directed article graph with categories.
///
/// Invariants, upheld by [`GraphBuilder`]:
/// - vertex ids are exactly `0..vertex_count()`
/// - `b` is an out-neighbor of `a` iff `a` is an in-neighbor of `b`
/// - every stored category id resolves
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    categories: Vec<Category>,
    edge_count: usize,
    membership_count: usize,
}

impl Graph {
    /// Start building a graph.
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Build a graph from three ordered record streams.
    ///
    /// - `vertices`: display names; a name's position is its vertex id
    /// - `edges`: `(tail, head)` pairs of vertex ids
    /// - `categories`: `(name, members)`; a category's id is `1 +` its position
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnresolvedReference`] for the first edge or
    /// membership naming a vertex id not introduced by `vertices`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkgraph::{Graph, VertexId};
    ///
    /// let graph = Graph::build_from_streams(
    ///     ["A", "B"],
    ///     [(0, 1)],
    ///     [("Letters", vec![0, 1])],
    /// )?;
    /// assert_eq!(graph.neighbors_of(VertexId(0))?, &[VertexId(1)]);
    /// # Ok::<(), linkgraph::GraphError>(())
    /// ```
    pub fn build_from_streams<V, E, C, N, M>(
        vertices: V,
        edges: E,
        categories: C,
    ) -> Result<Self, GraphError>
    where
        V: IntoIterator,
        V::Item: Into<String>,
        E: IntoIterator<Item = (usize, usize)>,
        C: IntoIterator<Item = (N, M)>,
        N: Into<String>,
        M: IntoIterator<Item = usize>,
    {
        let mut builder = GraphBuilder::new();
        for name in vertices {
            builder.add_vertex(name);
        }
        for (position, (tail, head)) in edges.into_iter().enumerate() {
            builder.push_edge_record(position, tail, head)?;
        }
        for (position, (name, members)) in categories.into_iter().enumerate() {
            builder.push_category_record(position, name, members)?;
        }
        Ok(builder.build())
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of categories, not counting the reserved id 0.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Size summary.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertices: self.vertices.len(),
            edges: self.edge_count,
            categories: self.categories.len(),
            memberships: self.membership_count,
        }
    }

    /// Look up a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] if `id` is not in `[0, vertex_count())`.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex, GraphError> {
        self.vertices.get(id.0).ok_or(GraphError::OutOfRange {
            kind: IdKind::Vertex,
            id: id.0,
            count: self.vertices.len(),
        })
    }

    /// Display name of a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] for an unknown vertex id.
    pub fn name(&self, id: VertexId) -> Result<&str, GraphError> {
        self.vertex(id).map(Vertex::name)
    }

    /// Out-neighbors of a vertex, in edge insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] for an unknown vertex id.
    pub fn neighbors_of(&self, id: VertexId) -> Result<&[VertexId], GraphError> {
        self.vertex(id).map(Vertex::out_neighbors)
    }

    /// In-neighbors of a vertex, in edge insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] for an unknown vertex id.
    pub fn in_neighbors_of(&self, id: VertexId) -> Result<&[VertexId], GraphError> {
        self.vertex(id).map(Vertex::in_neighbors)
    }

    /// Categories of a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] for an unknown vertex id.
    pub fn categories_of(&self, id: VertexId) -> Result<&[CategoryId], GraphError> {
        self.vertex(id).map(Vertex::categories)
    }

    /// Look up a category.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] if `id` is 0 or greater than
    /// `category_count()`.
    pub fn category(&self, id: CategoryId) -> Result<&Category, GraphError> {
        id.0.checked_sub(1)
            .and_then(|index| self.categories.get(index))
            .ok_or(GraphError::OutOfRange {
                kind: IdKind::Category,
                id: id.0,
                count: self.categories.len(),
            })
    }

    /// Label of a category.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] for an unknown category id.
    pub fn category_name(&self, id: CategoryId) -> Result<&str, GraphError> {
        self.category(id).map(Category::name)
    }

    /// All vertices in id order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// All categories in id order.
    pub fn categories(&self) -> impl ExactSizeIterator<Item = &Category> {
        self.categories.iter()
    }

    /// The lowest-id vertex whose name is exactly `name`.
    #[must_use]
    pub fn find_vertex_by_name(&self, name: &str) -> Option<VertexId> {
        self.vertices.iter().find(|v| v.name == name).map(|v| v.id)
    }

    /// Out-neighbors of an id already known to be in range.
    pub(crate) fn out_edges(&self, id: VertexId) -> &[VertexId] {
        &self.vertices[id.0].out_neighbors
    }

    /// In-neighbors of an id already known to be in range.
    pub(crate) fn in_edges(&self, id: VertexId) -> &[VertexId] {
        &self.vertices[id.0].in_neighbors
    }
}

/// Incremental construction of a [`Graph`].
///
/// Vertices must be added before the edges and memberships that reference
/// them. Duplicate edges and duplicate memberships are ignored, so the built
/// graph is never a multigraph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    edges: HashSet<(VertexId, VertexId)>,
}

impl GraphBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices added so far.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.vertices.len()
    }

    /// Add a vertex and return its id, the next sequential one.
    pub fn add_vertex(&mut self, name: impl Into<String>) -> VertexId {
        let id = VertexId(self.graph.vertices.len());
        self.graph.vertices.push(Vertex {
            id,
            name: name.into(),
            out_neighbors: Vec::new(),
            in_neighbors: Vec::new(),
            categories: Vec::new(),
        });
        id
    }

    /// Add the directed edge `tail -> head`.
    ///
    /// Returns `false` if the edge already existed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] if either endpoint is unknown.
    pub fn add_edge(&mut self, tail: VertexId, head: VertexId) -> Result<bool, GraphError> {
        self.graph.vertex(tail)?;
        self.graph.vertex(head)?;
        if !self.edges.insert((tail, head)) {
            return Ok(false);
        }
        self.graph.vertices[tail.0].out_neighbors.push(head);
        self.graph.vertices[head.0].in_neighbors.push(tail);
        self.graph.edge_count += 1;
        Ok(true)
    }

    /// Add a category and return its id, the next sequential one from 1.
    pub fn add_category(&mut self, name: impl Into<String>) -> CategoryId {
        let id = CategoryId(self.graph.categories.len() + 1);
        self.graph.categories.push(Category {
            id,
            name: name.into(),
        });
        id
    }

    /// Record that `vertex` belongs to `category`.
    ///
    /// Returns `false` if the membership already existed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] if either id is unknown.
    pub fn add_category_membership(
        &mut self,
        vertex: VertexId,
        category: CategoryId,
    ) -> Result<bool, GraphError> {
        self.graph.category(category)?;
        self.graph.vertex(vertex)?;
        let categories = &mut self.graph.vertices[vertex.0].categories;
        if categories.contains(&category) {
            return Ok(false);
        }
        categories.push(category);
        self.graph.membership_count += 1;
        Ok(true)
    }

    /// Add the edge from the `position`-th edge record.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnresolvedReference`] if either id has not been
    /// introduced by a vertex record.
    pub fn push_edge_record(
        &mut self,
        position: usize,
        tail: usize,
        head: usize,
    ) -> Result<bool, GraphError> {
        for id in [tail, head] {
            self.resolve_vertex(RecordKind::Edge, position, id)?;
        }
        let added = self.add_edge(VertexId(tail), VertexId(head))?;
        if !added {
            debug!(position, tail, head, "Ignoring duplicate edge");
        }
        Ok(added)
    }

    /// Add the category from the `position`-th category record, with its
    /// members.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnresolvedReference`] for the first member id
    /// not introduced by a vertex record.
    pub fn push_category_record(
        &mut self,
        position: usize,
        name: impl Into<String>,
        members: impl IntoIterator<Item = usize>,
    ) -> Result<CategoryId, GraphError> {
        let category = self.add_category(name);
        for member in members {
            self.resolve_vertex(RecordKind::Category, position, member)?;
            self.add_category_membership(VertexId(member), category)?;
        }
        Ok(category)
    }

    fn resolve_vertex(
        &self,
        record: RecordKind,
        position: usize,
        id: usize,
    ) -> Result<(), GraphError> {
        if id < self.graph.vertices.len() {
            return Ok(());
        }
        Err(GraphError::UnresolvedReference {
            record,
            position,
            kind: IdKind::Vertex,
            id,
        })
    }

    /// Finish construction.
    #[must_use]
    pub fn build(self) -> Graph {
        let graph = self.graph;
        debug!(
            vertices = graph.vertices.len(),
            edges = graph.edge_count,
            categories = graph.categories.len(),
            "Built graph"
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Graph {
        Graph::build_from_streams(
            ["A", "B", "C", "D"],
            [(0, 1), (1, 2), (2, 3), (3, 1)],
            [("Letters", vec![0, 1, 2, 3]), ("Cycle", vec![1, 2, 3])],
        )
        .expect("valid streams")
    }

    #[test]
    fn ids_follow_stream_order() {
        let graph = abcd();
        assert_eq!(graph.vertex_count(), 4);
        for (index, vertex) in graph.vertices().enumerate() {
            assert_eq!(vertex.id(), VertexId(index));
        }
        assert_eq!(graph.name(VertexId(2)).unwrap(), "C");
    }

    #[test]
    fn edges_are_mirrored() {
        let graph = abcd();
        assert_eq!(graph.neighbors_of(VertexId(3)).unwrap(), &[VertexId(1)]);
        assert_eq!(
            graph.in_neighbors_of(VertexId(1)).unwrap(),
            &[VertexId(0), VertexId(3)]
        );
        assert!(graph.in_neighbors_of(VertexId(0)).unwrap().is_empty());
    }

    #[test]
    fn categories_are_one_based() {
        let graph = abcd();
        assert_eq!(graph.category_count(), 2);
        assert_eq!(graph.category_name(CategoryId(1)).unwrap(), "Letters");
        assert_eq!(graph.category_name(CategoryId(2)).unwrap(), "Cycle");
        assert_eq!(
            graph.categories_of(VertexId(2)).unwrap(),
            &[CategoryId(1), CategoryId(2)]
        );
        assert_eq!(graph.categories_of(VertexId(0)).unwrap(), &[CategoryId(1)]);
    }

    #[test]
    fn reserved_category_never_resolves() {
        let graph = abcd();
        assert_eq!(
            graph.category_name(CategoryId::NULL),
            Err(GraphError::OutOfRange {
                kind: IdKind::Category,
                id: 0,
                count: 2,
            })
        );
        assert!(graph.category(CategoryId(3)).is_err());
    }

    #[test]
    fn accessors_reject_unknown_vertices() {
        let graph = abcd();
        let expected = GraphError::OutOfRange {
            kind: IdKind::Vertex,
            id: 4,
            count: 4,
        };
        assert_eq!(graph.name(VertexId(4)), Err(expected.clone()));
        assert_eq!(graph.neighbors_of(VertexId(4)), Err(expected.clone()));
        assert_eq!(graph.in_neighbors_of(VertexId(4)), Err(expected.clone()));
        assert_eq!(graph.categories_of(VertexId(4)), Err(expected));
    }

    #[test]
    fn builder_add_edge_rejects_unknown_endpoints() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_vertex("A");
        let err = builder.add_edge(a, VertexId(1)).unwrap_err();
        assert!(matches!(err, GraphError::OutOfRange { id: 1, .. }));
    }

    #[test]
    fn builder_ignores_duplicates() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_vertex("A");
        let b = builder.add_vertex("B");
        let cat = builder.add_category("Pair");

        assert!(builder.add_edge(a, b).unwrap());
        assert!(!builder.add_edge(a, b).unwrap());
        assert!(builder.add_category_membership(a, cat).unwrap());
        assert!(!builder.add_category_membership(a, cat).unwrap());

        let graph = builder.build();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors_of(a).unwrap(), &[b]);
        assert_eq!(graph.stats().memberships, 1);
    }

    #[test]
    fn membership_requires_existing_category() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_vertex("A");
        let err = builder.add_category_membership(a, CategoryId(1)).unwrap_err();
        assert!(matches!(
            err,
            GraphError::OutOfRange {
                kind: IdKind::Category,
                ..
            }
        ));
    }

    #[test]
    fn edge_record_with_unknown_vertex_is_unresolved() {
        let err = Graph::build_from_streams(
            ["A", "B"],
            [(0, 1), (1, 5)],
            Vec::<(String, Vec<usize>)>::new(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            GraphError::UnresolvedReference {
                record: RecordKind::Edge,
                position: 1,
                kind: IdKind::Vertex,
                id: 5,
            }
        );
    }

    #[test]
    fn category_record_with_unknown_member_is_unresolved() {
        let err = Graph::build_from_streams(
            ["A"],
            Vec::new(),
            [("Ok", vec![0]), ("Broken", vec![0, 3])],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GraphError::UnresolvedReference {
                record: RecordKind::Category,
                position: 1,
                id: 3,
                ..
            }
        ));
    }

    #[test]
    fn self_loops_are_kept() {
        let graph =
            Graph::build_from_streams(["A"], [(0, 0)], Vec::<(String, Vec<usize>)>::new())
                .unwrap();
        assert_eq!(graph.neighbors_of(VertexId(0)).unwrap(), &[VertexId(0)]);
        assert_eq!(graph.in_neighbors_of(VertexId(0)).unwrap(), &[VertexId(0)]);
    }

    #[test]
    fn find_vertex_by_name_returns_first_match() {
        let graph = Graph::build_from_streams(
            ["Twin", "Other", "Twin"],
            Vec::new(),
            Vec::<(String, Vec<usize>)>::new(),
        )
        .unwrap();
        assert_eq!(graph.find_vertex_by_name("Twin"), Some(VertexId(0)));
        assert_eq!(graph.find_vertex_by_name("Missing"), None);
    }
}
