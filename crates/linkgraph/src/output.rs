//! Text and JSON rendering of query results.
//!
//! Renderers write to any [`Write`] so the one-shot CLI commands and the
//! interactive shell share them.
//!
//! Semantic Color Theme:
//!   - Success:   green   (found paths and cycles)
//!   - Warning:   yellow  (nothing found, skipped lines)
//!   - Error:     red     (rejected ids)
//!   - Reference: cyan    (vertex and category ids)
//!   - Muted:     dimmed  (bullets, arrows, truncation notes)
//!   - Emphasis:  bold    (section headers)

use std::env;
use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;

use crate::config::{DEFAULT_MAX_ITEMS, OutputSettings};
use crate::graph::{Graph, StronglyConnectedComponents};
use crate::types::{CategoryId, GraphStats, LandmarkPath, VertexId, VertexPath};

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
    /// Number of list items shown before truncating.
    pub max_items: usize,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(use_colors: bool, max_items: usize) -> Self {
        Self {
            use_colors,
            max_items,
        }
    }

    /// Build from the configuration file's output section, honoring the
    /// `NO_COLOR` convention (<https://no-color.org/>).
    #[must_use]
    pub fn from_settings(settings: &OutputSettings) -> Self {
        Self {
            use_colors: settings.color && env::var_os("NO_COLOR").is_none(),
            max_items: settings.max_items,
        }
    }

    /// Plain output, no colors.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(false, DEFAULT_MAX_ITEMS)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(true, DEFAULT_MAX_ITEMS)
    }
}

// ============================================================================
// Color helpers
// ============================================================================

/// Apply semantic "success" color (green) to text.
#[must_use]
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
#[must_use]
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
#[must_use]
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
#[must_use]
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

// ============================================================================
// Text renderers
// ============================================================================

/// `[id] Name` for a vertex known to be in range.
fn vertex_label(graph: &Graph, id: VertexId, config: &OutputConfig) -> String {
    let name = graph.name(id).unwrap_or("?");
    format!("{} {name}", info(&format!("[{id}]"), config))
}

fn category_label(graph: &Graph, id: CategoryId, config: &OutputConfig) -> String {
    let name = graph.category_name(id).unwrap_or("?");
    format!("{} {name}", info(&format!("[{id}]"), config))
}

/// Bulleted list with "... and N more" past `max_items`.
fn write_list<W: Write>(
    w: &mut W,
    items: impl ExactSizeIterator<Item = String>,
    empty_message: &str,
    config: &OutputConfig,
) -> io::Result<()> {
    let total = items.len();
    if total == 0 {
        return writeln!(w, "  {}", dimmed(empty_message, config));
    }
    let bullet = dimmed("•", config);
    for item in items.take(config.max_items) {
        writeln!(w, "  {bullet} {item}")?;
    }
    if total > config.max_items {
        writeln!(
            w,
            "  {bullet} {}",
            dimmed(&format!("... and {} more", total - config.max_items), config)
        )?;
    }
    Ok(())
}

/// Print a vertex's name.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_name<W: Write>(
    w: &mut W,
    graph: &Graph,
    id: VertexId,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", vertex_label(graph, id, config))
}

/// Print a list of vertices under a header.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_vertices<W: Write>(
    w: &mut W,
    graph: &Graph,
    header: &str,
    ids: &[VertexId],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} ({})", bold(header, config), ids.len())?;
    write_list(
        w,
        ids.iter().map(|&id| vertex_label(graph, id, config)),
        "(none)",
        config,
    )
}

/// Print a list of categories under a header.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_categories<W: Write>(
    w: &mut W,
    graph: &Graph,
    header: &str,
    ids: &[CategoryId],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{} ({})", bold(header, config), ids.len())?;
    write_list(
        w,
        ids.iter().map(|&id| category_label(graph, id, config)),
        "(none)",
        config,
    )
}

fn joined_path(graph: &Graph, vertices: &[VertexId], config: &OutputConfig) -> String {
    let arrow = format!(" {} ", dimmed("->", config));
    vertices
        .iter()
        .map(|&id| vertex_label(graph, id, config))
        .collect::<Vec<_>>()
        .join(&arrow)
}

fn links(count: usize) -> String {
    if count == 1 {
        "1 link".to_string()
    } else {
        format!("{count} links")
    }
}

/// Print a shortest path, or a note that the target is unreachable.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_path<W: Write>(
    w: &mut W,
    graph: &Graph,
    path: Option<&VertexPath>,
    config: &OutputConfig,
) -> io::Result<()> {
    match path {
        Some(path) => {
            writeln!(
                w,
                "{} ({})",
                success("Shortest path", config),
                links(path.len())
            )?;
            writeln!(w, "  {}", joined_path(graph, path.vertices(), config))
        }
        None => writeln!(w, "{}", warning("No path found", config)),
    }
}

/// Print a route through a landmark, or a note that a leg is unreachable.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_landmark<W: Write>(
    w: &mut W,
    graph: &Graph,
    route: Option<&LandmarkPath>,
    config: &OutputConfig,
) -> io::Result<()> {
    let Some(route) = route else {
        return writeln!(w, "{}", warning("No path through the landmark", config));
    };
    writeln!(
        w,
        "{} ({})",
        success("Path through landmark", config),
        links(route.len())
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("to landmark:  ", config),
        joined_path(graph, route.to_landmark.vertices(), config)
    )?;
    writeln!(
        w,
        "  {} {}",
        dimmed("from landmark:", config),
        joined_path(graph, route.from_landmark.vertices(), config)
    )
}

/// Print a cycle, or a note that none passes through the vertex.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_cycle<W: Write>(
    w: &mut W,
    graph: &Graph,
    cycle: Option<&[VertexId]>,
    config: &OutputConfig,
) -> io::Result<()> {
    match cycle {
        Some(vertices) => {
            let length = vertices.len().saturating_sub(1);
            writeln!(w, "{} ({})", success("Cycle", config), links(length))?;
            writeln!(w, "  {}", joined_path(graph, vertices, config))
        }
        None => writeln!(w, "{}", warning("No cycle through this vertex", config)),
    }
}

/// Print a component summary: totals and the `list` largest components.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_components<W: Write>(
    w: &mut W,
    graph: &Graph,
    components: &StronglyConnectedComponents,
    list: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", bold("Strongly connected components", config))?;
    writeln!(w, "  components: {}", components.len())?;
    writeln!(w, "  singletons: {}", components.singleton_count())?;
    for (rank, (root, members)) in components.largest(list).into_iter().enumerate() {
        writeln!(
            w,
            "  {}. {} {}",
            rank + 1,
            vertex_label(graph, root, config),
            dimmed(&format!("({} vertices)", members.len()), config)
        )?;
    }
    Ok(())
}

/// Print graph size totals.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_stats<W: Write>(w: &mut W, stats: &GraphStats, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "{}", bold("Graph", config))?;
    writeln!(w, "  vertices:    {}", stats.vertices)?;
    writeln!(w, "  edges:       {}", stats.edges)?;
    writeln!(w, "  categories:  {}", stats.categories)?;
    writeln!(w, "  memberships: {}", stats.memberships)
}

/// Print any serializable value as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)
}
