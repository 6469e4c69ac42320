//! CLI command implementations.

pub mod components;
pub mod lookup;
pub mod paths;
pub mod shell;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use linkgraph::config::LinkgraphConfig;
use linkgraph::ingest::{self, GraphSources, LoadOptions, LoadReport};
use linkgraph::output::OutputConfig;
use linkgraph::{Graph, VertexId};
use linkgraph_records::Progress;
use serde::Serialize;

/// Number of warnings listed individually after a load.
const MAX_LISTED_WARNINGS: usize = 5;

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub vertices: Option<PathBuf>,
    pub edges: Option<PathBuf>,
    pub categories: Option<PathBuf>,
    pub strict: bool,
    pub no_progress: bool,
    pub no_color: bool,
    pub json: bool,
}

/// Settings shared by every command: the effective configuration and how to
/// print.
#[derive(Debug)]
pub struct Session {
    pub config: LinkgraphConfig,
    pub output: OutputConfig,
    pub json: bool,
}

impl Session {
    /// Resolve the effective configuration: an explicit `--config` file, else
    /// one discovered from `cwd`, with command-line flags applied on top.
    pub fn resolve(overrides: Overrides, cwd: &Path) -> Result<Self> {
        let mut config = match &overrides.config {
            Some(path) => LinkgraphConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => LinkgraphConfig::discover(cwd).context("failed to load linkgraph.yaml")?,
        };

        let data = &mut config.data;
        for (slot, flag) in [
            (&mut data.vertices, overrides.vertices),
            (&mut data.edges, overrides.edges),
            (&mut data.categories, overrides.categories),
        ] {
            if flag.is_some() {
                *slot = flag;
            }
        }
        config.ingest.strict |= overrides.strict;
        if overrides.no_progress || overrides.json {
            config.ingest.progress = false;
        }
        if overrides.no_color {
            config.output.color = false;
        }

        let output = OutputConfig::from_settings(&config.output);
        Ok(Self {
            config,
            output,
            json: overrides.json,
        })
    }

    /// Load the graph from the configured data files.
    pub fn load_configured(&self) -> Result<Graph> {
        let sources = GraphSources::from_config(&self.config.data).context(
            "data files are not configured; pass --vertices, --edges and --categories \
             or set them in linkgraph.yaml",
        )?;
        self.load(&sources)
    }

    /// Load the graph from `sources`, reporting progress and skipped lines on
    /// stderr.
    pub fn load(&self, sources: &GraphSources) -> Result<Graph> {
        let options = LoadOptions {
            strict: self.config.ingest.strict,
        };
        let report = if self.config.ingest.progress {
            ingest::load_graph_with_progress(sources, options, render_progress)
        } else {
            ingest::load_graph(sources, options)
        }
        .with_context(|| format!("failed to load graph from {}", sources.vertices.display()))?;

        self.report_warnings(&report);
        Ok(report.graph)
    }

    fn report_warnings(&self, report: &LoadReport) {
        if report.warnings.is_empty() {
            return;
        }
        let label = if self.output.use_colors {
            "warning".yellow().bold().to_string()
        } else {
            "warning".to_string()
        };
        eprintln!(
            "{label}: {} blank or malformed line(s) while loading",
            report.warning_count()
        );
        for (kind, warning) in report.warnings.iter().take(MAX_LISTED_WARNINGS) {
            eprintln!("  {kind} file: {warning}");
        }
        if report.warning_count() > MAX_LISTED_WARNINGS {
            eprintln!("  ... and {} more", report.warning_count() - MAX_LISTED_WARNINGS);
        }
    }
}

fn render_progress(progress: Progress) {
    eprint!("\r{progress}");
    if progress.percent == 100 {
        eprintln!();
    }
}

/// A vertex as printed in JSON output.
#[derive(Debug, Serialize)]
pub struct VertexJson<'g> {
    pub id: VertexId,
    pub name: &'g str,
}

impl<'g> VertexJson<'g> {
    pub fn new(graph: &'g Graph, id: VertexId) -> Result<Self> {
        Ok(Self {
            id,
            name: graph.name(id)?,
        })
    }

    pub fn many(graph: &'g Graph, ids: &[VertexId]) -> Result<Vec<Self>> {
        ids.iter().map(|&id| Self::new(graph, id)).collect()
    }
}
