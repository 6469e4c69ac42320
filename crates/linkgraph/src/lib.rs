//! # Linkgraph: Article Link Graph Queries
//!
//! Linkgraph loads a directed graph of articles, the links between them and
//! the categories they belong to, then answers structural questions about it:
//! shortest paths, cycles through an article, and strongly connected
//! components.
//!
//! ## Design Philosophy
//!
//! - **Load once, query many** - The graph is immutable after construction
//! - **Dense ids** - Vertex ids are positions in the vertex file, category ids
//!   start at 1
//! - **Explicit outcomes** - "no path" and "no cycle" are values, bad ids are errors
//! - **Library first, CLI second**
//!
//! ## Quick Start
//!
//! ```
//! use linkgraph::{Graph, VertexId};
//!
//! let graph = Graph::build_from_streams(
//!     ["A", "B", "C", "D"],
//!     [(0, 1), (1, 2), (2, 3), (3, 1)],
//!     [("Loop", vec![1, 2, 3])],
//! )?;
//!
//! let path = graph.shortest_path(VertexId(0), VertexId(3))?;
//! assert_eq!(path.path().map(|p| p.len()), Some(3));
//!
//! let cycle = graph.find_cycle_from(VertexId(1))?;
//! assert_eq!(cycle.cycle().map(|c| c.len()), Some(3));
//!
//! let components = graph.strongly_connected_components();
//! assert_eq!(components.len(), 2);
//! # Ok::<(), linkgraph::GraphError>(())
//! ```
//!
//! Loading from files goes through [`ingest::load_graph`]; see [`config`] for
//! the `linkgraph.yaml` format.

pub mod config;
mod error;
mod graph;
pub mod ingest;
pub mod output;
pub mod shell;
mod types;

pub use error::{Error, GraphError, Result};
pub use graph::{Category, Graph, GraphBuilder, StronglyConnectedComponents, Vertex};
pub use types::{
    CategoryId, Cycle, CycleOutcome, GraphStats, IdKind, LandmarkPath, PathOutcome, VertexId,
    VertexPath,
};
