//! Linkgraph CLI - Article link graph queries from the command line.
//!
//! Loads an article graph from its vertex, edge and category files and
//! answers name, neighbor, shortest path, cycle and component queries, either
//! one at a time or from an interactive shell.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use linkgraph::shell::DEFAULT_COMPONENT_LIST;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Overrides, Session};

/// Linkgraph: shortest paths, cycles and components over article link graphs.
#[derive(Parser)]
#[command(name = "linkgraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Vertex file, one `<token> <name>` line per article
    #[arg(long, global = true, value_name = "FILE")]
    vertices: Option<PathBuf>,

    /// Edge file, one `<tail> <head>` line per link
    #[arg(long, global = true, value_name = "FILE")]
    edges: Option<PathBuf>,

    /// Category file, one `Category:<name>; <ids>` line per category
    #[arg(long, global = true, value_name = "FILE")]
    categories: Option<PathBuf>,

    /// Configuration file (defaults to the nearest linkgraph.yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail on the first malformed line instead of skipping it
    #[arg(long, global = true)]
    strict: bool,

    /// Do not print parse progress
    #[arg(long, global = true)]
    no_progress: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an article's name
    Name {
        /// Article id
        id: usize,
    },

    /// List the articles an article links to
    Neighbors {
        /// Article id
        id: usize,
    },

    /// List the categories an article belongs to
    Categories {
        /// Article id
        id: usize,
    },

    /// Find a shortest path between two articles
    Path {
        /// Starting article id
        from: usize,
        /// Target article id
        to: usize,
    },

    /// Find a shortest path that passes through a landmark article
    Landmark {
        /// Starting article id
        from: usize,
        /// Landmark article id
        via: usize,
        /// Target article id
        to: usize,
    },

    /// Find the shortest cycle through an article
    Cycle {
        /// Article id
        id: usize,
    },

    /// Summarize strongly connected components
    Scc {
        /// Number of largest components to list
        #[arg(short, long, default_value_t = DEFAULT_COMPONENT_LIST)]
        list: usize,
    },

    /// Show graph statistics
    Stats,

    /// Start the interactive shell (default)
    Shell,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| anyhow::anyhow!("failed to get current directory: {e}"))?;
    let overrides = Overrides {
        config: cli.config,
        vertices: cli.vertices,
        edges: cli.edges,
        categories: cli.categories,
        strict: cli.strict,
        no_progress: cli.no_progress,
        no_color: cli.no_color,
        json: cli.json,
    };
    let session = Session::resolve(overrides, &cwd)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Name { id } => cli::lookup::name(&session, id),
        Commands::Neighbors { id } => cli::lookup::neighbors(&session, id),
        Commands::Categories { id } => cli::lookup::categories(&session, id),
        Commands::Path { from, to } => cli::paths::path(&session, from, to),
        Commands::Landmark { from, via, to } => cli::paths::landmark(&session, from, via, to),
        Commands::Cycle { id } => cli::paths::cycle(&session, id),
        Commands::Scc { list } => cli::components::run(&session, list),
        Commands::Stats => cli::stats::run(&session),
        Commands::Shell => cli::shell::run(&session),
    }
}
