//! Loading a [`Graph`] from its three record files.
//!
//! Files are read in a fixed order: vertices first, so that every id an edge
//! or category line mentions can be checked as it arrives, then edges, then
//! categories.
//!
//! Vertex and category ids are line positions: a blank or tolerated malformed
//! line in those files still uses up its id as an empty placeholder, so edges
//! and memberships always attach to the article on the referenced line. Edge
//! positions in error messages count parsed edge records only.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use linkgraph_records::{
    CategoryRecord, EdgeRecord, Progress, ReadOptions, Record, RecordKind, RecordStream,
    VertexRecord, Warning, WarningCollector, count_lines,
};
use tracing::{debug, info};

use crate::config::DataConfig;
use crate::error::{Error, Result};
use crate::graph::{Graph, GraphBuilder};

/// Paths of the three record files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSources {
    /// Vertex (article name) file
    pub vertices: PathBuf,
    /// Edge (link) file
    pub edges: PathBuf,
    /// Category file
    pub categories: PathBuf,
}

impl GraphSources {
    /// Sources with all three paths given.
    pub fn new(
        vertices: impl Into<PathBuf>,
        edges: impl Into<PathBuf>,
        categories: impl Into<PathBuf>,
    ) -> Self {
        Self {
            vertices: vertices.into(),
            edges: edges.into(),
            categories: categories.into(),
        }
    }

    /// Sources from a configuration's data section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first file that is not configured.
    pub fn from_config(data: &DataConfig) -> Result<Self> {
        let require = |path: &Option<PathBuf>, kind: RecordKind| {
            path.clone()
                .ok_or_else(|| Error::Config(format!("no {} file configured", kind.plural())))
        };
        Ok(Self {
            vertices: require(&data.vertices, RecordKind::Vertex)?,
            edges: require(&data.edges, RecordKind::Edge)?,
            categories: require(&data.categories, RecordKind::Category)?,
        })
    }

    fn path(&self, kind: RecordKind) -> &Path {
        match kind {
            RecordKind::Vertex => &self.vertices,
            RecordKind::Edge => &self.edges,
            RecordKind::Category => &self.categories,
        }
    }
}

/// How record files are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail on the first malformed line instead of skipping it.
    pub strict: bool,
}

impl LoadOptions {
    fn read_options(self) -> ReadOptions {
        ReadOptions {
            strict: self.strict,
            ..ReadOptions::default()
        }
    }
}

/// A loaded graph together with the problems tolerated while loading it.
#[derive(Debug)]
pub struct LoadReport {
    /// The built graph.
    pub graph: Graph,
    /// Blank and malformed lines, tagged with the file they came from.
    pub warnings: Vec<(RecordKind, Warning)>,
}

impl LoadReport {
    /// Number of blank or malformed lines tolerated across all three files.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Load a graph from files.
///
/// # Errors
///
/// Returns [`Error::Records`] if a file is missing or, in strict mode,
/// contains a malformed line, and [`Error::Graph`] if an edge or category
/// references an unknown vertex.
pub fn load_graph(sources: &GraphSources, options: LoadOptions) -> Result<LoadReport> {
    load_files(sources, options, None::<fn(Progress)>)
}

/// Load a graph from files, reporting parse progress to `reporter`.
///
/// Each file's lines are counted before it is parsed; `reporter` is called
/// whenever the whole percentage of that file changes.
///
/// # Errors
///
/// Same as [`load_graph`].
pub fn load_graph_with_progress<F>(
    sources: &GraphSources,
    options: LoadOptions,
    reporter: F,
) -> Result<LoadReport>
where
    F: Fn(Progress) + Clone + 'static,
{
    load_files(sources, options, Some(reporter))
}

fn load_files<F>(sources: &GraphSources, options: LoadOptions, reporter: Option<F>) -> Result<LoadReport>
where
    F: Fn(Progress) + Clone + 'static,
{
    let vertices = open::<VertexRecord, F>(sources, options, reporter.as_ref())?;
    let edges = open::<EdgeRecord, F>(sources, options, reporter.as_ref())?;
    let categories = open::<CategoryRecord, F>(sources, options, reporter.as_ref())?;
    build(vertices, edges, categories)
}

fn open<T, F>(
    sources: &GraphSources,
    options: LoadOptions,
    reporter: Option<&F>,
) -> Result<RecordStream<File, T>>
where
    T: Record,
    F: Fn(Progress) + Clone + 'static,
{
    let path = sources.path(T::KIND);
    let stream = RecordStream::open(path, &options.read_options())?;
    let Some(reporter) = reporter else {
        return Ok(stream);
    };
    let total = count_lines(path)?;
    debug!(path = %path.display(), lines = total, "Counted record lines");
    Ok(stream.with_progress(total, reporter.clone()))
}

/// Load a graph from three in-memory or already-open readers.
///
/// # Errors
///
/// Same as [`load_graph`], minus missing files.
pub fn load_from_readers<V, E, C>(
    vertices: V,
    edges: E,
    categories: C,
    options: LoadOptions,
) -> Result<LoadReport>
where
    V: Read,
    E: Read,
    C: Read,
{
    let read_options = options.read_options();
    build(
        RecordStream::new(vertices, &read_options),
        RecordStream::new(edges, &read_options),
        RecordStream::new(categories, &read_options),
    )
}

fn build<V, E, C>(
    vertices: RecordStream<V, VertexRecord>,
    edges: RecordStream<E, EdgeRecord>,
    categories: RecordStream<C, CategoryRecord>,
) -> Result<LoadReport>
where
    V: Read,
    E: Read,
    C: Read,
{
    let collectors: [(RecordKind, WarningCollector); 3] = [
        (RecordKind::Vertex, vertices.warnings().clone()),
        (RecordKind::Edge, edges.warnings().clone()),
        (RecordKind::Category, categories.warnings().clone()),
    ];
    let mut builder = GraphBuilder::new();

    for record in vertices {
        let (_, vertex) = record?;
        builder.add_vertex(vertex.name);
    }
    debug!(vertices = builder.vertex_count(), "Parsed vertices");

    let mut edge_count = 0;
    for (position, record) in edges.enumerate() {
        let (_, edge) = record?;
        builder.push_edge_record(position, edge.tail, edge.head)?;
        edge_count = position + 1;
    }
    debug!(edges = edge_count, "Parsed edges");

    let mut category_count = 0;
    for (position, record) in categories.enumerate() {
        let (_, category) = record?;
        builder.push_category_record(position, category.name, category.members)?;
        category_count = position + 1;
    }
    debug!(categories = category_count, "Parsed categories");

    let graph = builder.build();
    let warnings: Vec<_> = collectors
        .into_iter()
        .flat_map(|(kind, collector)| {
            collector
                .into_warnings()
                .into_iter()
                .map(move |warning| (kind, warning))
        })
        .collect();

    let stats = graph.stats();
    info!(
        vertices = stats.vertices,
        edges = stats.edges,
        categories = stats.categories,
        warnings = warnings.len(),
        "Loaded graph"
    );
    Ok(LoadReport { graph, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::types::{CategoryId, VertexId};
    use std::io::Cursor;

    const VERTICES: &str = "0 A\n1 B\n2 C\n3 D\n";
    const EDGES: &str = "0 1\n1 2\n2 3\n3 1\n";
    const CATEGORIES: &str = "Category:Letters; 0 1 2 3\nCategory:Loop; 1, 2, 3\n";

    fn load(vertices: &str, edges: &str, categories: &str, strict: bool) -> Result<LoadReport> {
        load_from_readers(
            Cursor::new(vertices.to_owned()),
            Cursor::new(edges.to_owned()),
            Cursor::new(categories.to_owned()),
            LoadOptions { strict },
        )
    }

    #[test]
    fn loads_reference_scenario() {
        let report = load(VERTICES, EDGES, CATEGORIES, false).unwrap();
        let graph = &report.graph;

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.name(VertexId(3)).unwrap(), "D");
        assert_eq!(graph.category_name(CategoryId(2)).unwrap(), "Loop");
        assert_eq!(
            graph.categories_of(VertexId(1)).unwrap(),
            &[CategoryId(1), CategoryId(2)]
        );
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn lenient_mode_tags_warnings_with_their_file() {
        let report = load(VERTICES, "0 1\nbogus\n\n1 2\n", CATEGORIES, false).unwrap();

        assert_eq!(report.graph.edge_count(), 2);
        assert_eq!(report.warning_count(), 2);
        assert!(report.warnings.iter().all(|(kind, _)| *kind == RecordKind::Edge));
        assert_eq!(report.warnings[0].1.line_number(), 2);
        assert_eq!(report.warnings[1].1.kind(), "skipped_line");
    }

    #[test]
    fn strict_mode_fails_on_malformed_line() {
        let err = load(VERTICES, "0 1\n0 x\n", CATEGORIES, true).unwrap_err();
        assert!(matches!(
            err,
            Error::Records(linkgraph_records::Error::Malformed {
                kind: RecordKind::Edge,
                line_number: 2,
                ..
            })
        ));
    }

    #[test]
    fn dangling_edge_reports_record_position() {
        // The malformed second line is skipped, so the dangling edge is record #1.
        let err = load(VERTICES, "0 1\nnope\n2 9\n", CATEGORIES, false).unwrap_err();
        let Error::Graph(GraphError::UnresolvedReference {
            record, position, id, ..
        }) = err
        else {
            panic!("expected unresolved reference, got {err:?}");
        };
        assert_eq!(record, RecordKind::Edge);
        assert_eq!(position, 1);
        assert_eq!(id, 9);
    }

    #[test]
    fn blank_vertex_line_keeps_later_ids_in_place() {
        for strict in [false, true] {
            let report = load("0 A\n\n2 C\n", "0 2\n", "Category:Cs; 2\n", strict).unwrap();
            let graph = &report.graph;

            assert_eq!(graph.vertex_count(), 3);
            assert_eq!(graph.name(VertexId(1)).unwrap(), "");
            assert_eq!(graph.name(VertexId(2)).unwrap(), "C");
            assert_eq!(graph.neighbors_of(VertexId(0)).unwrap(), &[VertexId(2)]);
            assert_eq!(graph.categories_of(VertexId(2)).unwrap(), &[CategoryId(1)]);
            assert_eq!(report.warnings.len(), 1);
            assert_eq!(report.warnings[0].0, RecordKind::Vertex);
        }
    }

    #[test]
    fn nameless_vertex_line_is_an_empty_name() {
        let report = load("0 A\n1 \n2 C\n", "1 2\n", "", true).unwrap();
        assert_eq!(report.graph.name(VertexId(1)).unwrap(), "");
        assert_eq!(report.graph.neighbors_of(VertexId(1)).unwrap(), &[VertexId(2)]);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn blank_category_line_keeps_later_ids_in_place() {
        let report = load(VERTICES, EDGES, "Category:X; 0\n\nCategory:Z; 0\n", false).unwrap();
        let graph = &report.graph;

        assert_eq!(graph.category_count(), 3);
        assert_eq!(graph.category_name(CategoryId(2)).unwrap(), "");
        assert_eq!(graph.category_name(CategoryId(3)).unwrap(), "Z");
        assert_eq!(
            graph.categories_of(VertexId(0)).unwrap(),
            &[CategoryId(1), CategoryId(3)]
        );
    }

    #[test]
    fn malformed_category_line_is_a_placeholder_or_fatal() {
        let categories = "Category:X; 0\nbroken line\nCategory:Z; 3\n";

        let report = load(VERTICES, EDGES, categories, false).unwrap();
        assert_eq!(report.graph.category_name(CategoryId(3)).unwrap(), "Z");
        assert_eq!(report.graph.categories_of(VertexId(3)).unwrap(), &[CategoryId(3)]);
        assert_eq!(report.warnings[0].0, RecordKind::Category);

        let err = load(VERTICES, EDGES, categories, true).unwrap_err();
        assert!(matches!(
            err,
            Error::Records(linkgraph_records::Error::Malformed {
                kind: RecordKind::Category,
                line_number: 2,
                ..
            })
        ));
    }

    #[test]
    fn missing_configured_file_is_config_error() {
        let data = DataConfig {
            vertices: Some(PathBuf::from("v.txt")),
            edges: None,
            categories: Some(PathBuf::from("c.txt")),
        };
        let err = GraphSources::from_config(&data).unwrap_err();
        assert_eq!(err.to_string(), "configuration error: no edges file configured");
    }
}
