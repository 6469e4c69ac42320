//! File-based loading tests: record files and `linkgraph.yaml` together.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use linkgraph::config::{CONFIG_FILE_NAME, LinkgraphConfig};
use linkgraph::ingest::{GraphSources, LoadOptions, load_graph, load_graph_with_progress};
use linkgraph::{CategoryId, Error, GraphError, VertexId};
use linkgraph_records::RecordKind;
use tempfile::TempDir;

const VERTICES: &str = "\
0 Beetle
1 Buprestoidea
2 Jewel beetle
3 Agrilus
";
const EDGES: &str = "\
0 1
1 2
2 3
3 1
";
const CATEGORIES: &str = "\
Category:Insects; 0 1 2 3
Category:Buprestidae; 2, 3
";

/// A temp directory holding the three record files.
fn dataset(vertices: &str, edges: &str, categories: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("vertices.txt"), vertices).unwrap();
    fs::write(dir.path().join("edges.txt"), edges).unwrap();
    fs::write(dir.path().join("categories.txt"), categories).unwrap();
    dir
}

fn sources(dir: &Path) -> GraphSources {
    GraphSources::new(
        dir.join("vertices.txt"),
        dir.join("edges.txt"),
        dir.join("categories.txt"),
    )
}

#[test]
fn loads_all_three_files() {
    let dir = dataset(VERTICES, EDGES, CATEGORIES);
    let report = load_graph(&sources(dir.path()), LoadOptions::default()).unwrap();
    let graph = report.graph;

    assert_eq!(graph.name(VertexId(2)).unwrap(), "Jewel beetle");
    assert_eq!(graph.category_name(CategoryId(2)).unwrap(), "Buprestidae");
    assert_eq!(graph.categories_of(VertexId(3)).unwrap(), &[CategoryId(1), CategoryId(2)]);
    let path = graph.shortest_path(VertexId(0), VertexId(3)).unwrap();
    assert_eq!(path.path().map(|p| p.len()), Some(3));
    assert!(report.warnings.is_empty());
}

#[test]
fn missing_file_is_reported() {
    let dir = dataset(VERTICES, EDGES, CATEGORIES);
    fs::remove_file(dir.path().join("edges.txt")).unwrap();

    let err = load_graph(&sources(dir.path()), LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Records(linkgraph_records::Error::Io(_))));
}

#[test]
fn lenient_and_strict_loading_differ_on_bad_lines() {
    let dir = dataset(VERTICES, "0 1\n1 two\n\n2 3\n", CATEGORIES);
    let sources = sources(dir.path());

    let report = load_graph(&sources, LoadOptions { strict: false }).unwrap();
    assert_eq!(report.graph.edge_count(), 2);
    assert_eq!(report.warning_count(), 2);
    assert_eq!(report.warnings[0].0, RecordKind::Edge);
    assert_eq!(report.warnings[0].1.line_number(), 2);

    let err = load_graph(&sources, LoadOptions { strict: true }).unwrap_err();
    assert!(err.to_string().contains("line 2"), "unexpected message: {err}");
}

#[test]
fn category_member_beyond_vertices_is_unresolved() {
    let dir = dataset(VERTICES, EDGES, "Category:Insects; 0 1\nCategory:Broken; 2 40\n");

    let err = load_graph(&sources(dir.path()), LoadOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        GraphError::UnresolvedReference {
            record: RecordKind::Category,
            position: 1,
            kind: linkgraph::IdKind::Vertex,
            id: 40,
        }
        .to_string()
    );
}

#[test]
fn duplicate_edges_are_loaded_once() {
    let dir = dataset(VERTICES, "0 1\n0 1\n1 0\n", CATEGORIES);
    let graph = load_graph(&sources(dir.path()), LoadOptions::default())
        .unwrap()
        .graph;
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.neighbors_of(VertexId(0)).unwrap(), &[VertexId(1)]);
}

#[test]
fn blank_lines_in_vertex_and_category_files_keep_ids() {
    let dir = dataset(
        "0 Beetle\n\n2 Jewel beetle\n3 Agrilus\n",
        "0 2\n2 3\n",
        "Category:Insects; 0 2 3\n\nCategory:Buprestidae; 2, 3\n",
    );
    let report = load_graph(&sources(dir.path()), LoadOptions::default()).unwrap();
    let graph = report.graph;

    assert_eq!(graph.name(VertexId(2)).unwrap(), "Jewel beetle");
    assert_eq!(graph.name(VertexId(3)).unwrap(), "Agrilus");
    assert_eq!(graph.neighbors_of(VertexId(2)).unwrap(), &[VertexId(3)]);
    assert_eq!(graph.category_name(CategoryId(3)).unwrap(), "Buprestidae");
    assert_eq!(graph.categories_of(VertexId(3)).unwrap(), &[CategoryId(1), CategoryId(3)]);
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn progress_is_reported_per_file() {
    let dir = dataset(VERTICES, EDGES, CATEGORIES);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    load_graph_with_progress(&sources(dir.path()), LoadOptions::default(), move |p| {
        sink.lock().unwrap().push((p.kind, p.percent));
    })
    .unwrap();

    let seen = seen.lock().unwrap();
    for kind in [RecordKind::Vertex, RecordKind::Edge, RecordKind::Category] {
        assert!(
            seen.contains(&(kind, 100)),
            "{kind} file never reached 100%: {seen:?}"
        );
    }
}

#[test]
fn config_file_locates_data_relative_to_itself() {
    let dir = dataset(VERTICES, EDGES, CATEGORIES);
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "data:\n  vertices: vertices.txt\n  edges: edges.txt\n  categories: categories.txt\ningest:\n  strict: true\n",
    )
    .unwrap();
    let nested = dir.path().join("work").join("deeper");
    fs::create_dir_all(&nested).unwrap();

    let config = LinkgraphConfig::discover(&nested).unwrap();
    assert!(config.ingest.strict);

    let sources = GraphSources::from_config(&config.data).unwrap();
    let report = load_graph(
        &sources,
        LoadOptions {
            strict: config.ingest.strict,
        },
    )
    .unwrap();
    assert_eq!(report.graph.vertex_count(), 4);
}
