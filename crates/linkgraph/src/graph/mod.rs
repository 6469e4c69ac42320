//! The in-memory link graph and its query engines.
//!
//! The graph is built once, through [`GraphBuilder`] or
//! [`Graph::build_from_streams`], and is read-only afterwards. Every query
//! allocates its own scratch state (visited flags, predecessor maps,
//! component assignments), so a `&Graph` can be shared freely between
//! callers and threads.
//!
//! ## Operations
//!
//! | Operation | Algorithm |
//! |-----------|-----------|
//! | Shortest path | BFS over out-links with a predecessor map |
//! | Cycle through a vertex | BFS from the vertex until an edge leads back to it |
//! | Landmark path | Two shortest paths joined at the landmark |
//! | Strongly connected components | Kosaraju, iterative DFS in both passes |

mod components;
mod model;
mod traversal;

pub use components::StronglyConnectedComponents;
pub use model::{Category, Graph, GraphBuilder, Vertex};
