//! Domain types for link graph queries.
//!
//! - **Identifiers**: `VertexId`, `CategoryId`, `IdKind`
//! - **Results**: `VertexPath`, `PathOutcome`, `Cycle`, `CycleOutcome`,
//!   `LandmarkPath`, `GraphStats`
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Ids | `usize` newtypes | Dense ids double as table indices |
//! | Missing path | `PathOutcome::NotFound` | No sentinel vertex values |
//! | Path length | Edge count | `[a]` has length 0, `[a, b]` has length 1 |

use serde::Serialize;
use std::fmt;

// ============================================================================
// Strongly-typed ID wrappers
// ============================================================================

/// A dense, 0-based vertex id. It is also the vertex's index in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Extract the raw index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 1-based category id. Id 0 is reserved and never resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryId(pub usize);

impl CategoryId {
    /// The reserved id that never names a category.
    pub const NULL: Self = Self(0);

    /// Extract the raw id.
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for CategoryId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which id space an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// Vertex ids, `[0, N)`.
    Vertex,
    /// Category ids, `[1, C]`.
    Category,
}

impl IdKind {
    /// Plural noun for messages.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Vertex => "vertices",
            Self::Category => "categories",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Category => write!(f, "category"),
        }
    }
}

// ============================================================================
// Query results
// ============================================================================

/// A directed walk through the graph, from its first vertex to its last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexPath {
    vertices: Vec<VertexId>,
}

impl VertexPath {
    /// Create a path, returning `None` if `vertices` is empty.
    #[must_use]
    pub fn new(vertices: Vec<VertexId>) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }
        Some(Self { vertices })
    }

    /// A trivial path consisting of one vertex.
    #[must_use]
    pub fn single(vertex: VertexId) -> Self {
        Self {
            vertices: vec![vertex],
        }
    }

    /// The vertices in walk order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of edges walked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len() - 1
    }

    /// `true` for a single-vertex path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First vertex.
    #[must_use]
    pub fn start(&self) -> VertexId {
        self.vertices[0]
    }

    /// Last vertex.
    #[must_use]
    pub fn end(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }

    /// Consume the path and return its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<VertexId> {
        self.vertices
    }
}

/// Result of a shortest path query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum PathOutcome {
    /// A shortest path from start to target, both inclusive.
    Found(VertexPath),
    /// The target cannot be reached from the start.
    NotFound,
}

impl PathOutcome {
    /// `true` if a path was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Borrow the path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&VertexPath> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }

    /// Take the path, if any.
    #[must_use]
    pub fn into_path(self) -> Option<VertexPath> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }
}

/// A closed walk that begins and ends at the same vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    vertices: Vec<VertexId>,
}

impl Cycle {
    /// Create a cycle, validating invariants.
    ///
    /// Returns `None` if fewer than two vertices are given or the first and
    /// last vertex differ.
    #[must_use]
    pub fn new(vertices: Vec<VertexId>) -> Option<Self> {
        if vertices.len() < 2 || vertices.first() != vertices.last() {
            return None;
        }
        Some(Self { vertices })
    }

    /// The vertices in walk order, first and last equal.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// The vertex the cycle starts and ends at.
    #[must_use]
    pub fn start(&self) -> VertexId {
        self.vertices[0]
    }

    /// Number of edges in the cycle. A self-loop has length 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Always `false`: a cycle has at least one edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Result of a cycle search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "cycle", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// The shortest cycle through the start vertex.
    Found(Cycle),
    /// No walk leads back to the start vertex.
    NoCycle,
}

impl CycleOutcome {
    /// Borrow the cycle, if any.
    #[must_use]
    pub fn cycle(&self) -> Option<&Cycle> {
        match self {
            Self::Found(cycle) => Some(cycle),
            Self::NoCycle => None,
        }
    }
}

/// A route from a start vertex to a target that passes through a landmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandmarkPath {
    /// Shortest path from the start to the landmark.
    pub to_landmark: VertexPath,
    /// Shortest path from the landmark to the target.
    pub from_landmark: VertexPath,
}

impl LandmarkPath {
    /// Total number of edges over both legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_landmark.len() + self.from_landmark.len()
    }

    /// `true` when start, landmark and target are the same vertex.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both legs joined into one path, with the landmark appearing once.
    #[must_use]
    pub fn combined(&self) -> VertexPath {
        let mut vertices = self.to_landmark.vertices().to_vec();
        vertices.extend_from_slice(&self.from_landmark.vertices()[1..]);
        VertexPath { vertices }
    }
}

/// Size summary of a loaded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GraphStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of distinct directed edges.
    pub edges: usize,
    /// Number of categories (excluding the reserved id 0).
    pub categories: usize,
    /// Number of (vertex, category) memberships.
    pub memberships: usize,
}
