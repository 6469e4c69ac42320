//! Interactive query shell.
//!
//! The shell reads whitespace-separated tokens, so a command's arguments can
//! follow it on the same line (`bfs 0 3`) or be typed at the prompts that
//! appear when they are missing. Rejected ids and unparsable numbers are
//! reported and the loop carries on; only end of input, `end` or `q` stop it.
//!
//! | Command | Action |
//! |---------|--------|
//! | `pn` | Print an article's name |
//! | `pN` | Print an article's out-links |
//! | `pc` | Print an article's categories |
//! | `bfs` | Shortest path between two articles |
//! | `cd` | Shortest cycle through an article |
//! | `l` | Shortest path through a landmark article |
//! | `scc` | Strongly connected component summary |
//! | `stats` | Graph size totals |
//! | `help` | List commands |
//! | `end`, `q` | Leave the shell |

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use crate::config::DataConfig;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::ingest::GraphSources;
use crate::output::{self, OutputConfig};
use crate::types::VertexId;

/// Number of components listed by `scc` unless configured otherwise.
pub const DEFAULT_COMPONENT_LIST: usize = 5;

const HELP: &[(&str, &str)] = &[
    ("pn", "Print name"),
    ("pN", "Print neighbors"),
    ("pc", "Print categories"),
    ("bfs", "Breadth first search (shortest path)"),
    ("cd", "Cycle detection"),
    ("l", "Landmark path"),
    ("scc", "Strongly connected component enumeration"),
    ("stats", "Graph statistics"),
    ("end/q", "Terminate program"),
    ("help", "Display help"),
];

// ============================================================================
// Token input
// ============================================================================

/// Reads whitespace-separated tokens from line-oriented input.
#[derive(Debug)]
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// `true` if tokens from the current line are still waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The next token, reading more lines as needed. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying reader.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    /// Show `prompt` unless a token is already waiting, then read one token.
    ///
    /// # Errors
    ///
    /// Returns any error from the reader or writer.
    pub fn prompt<W: Write>(&mut self, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
        if !self.has_pending() {
            write!(out, "{prompt}")?;
            out.flush()?;
        }
        self.next_token()
    }
}

/// Ask for every data file `known` does not already name.
///
/// Returns `None` if input ends before all three paths are known.
///
/// # Errors
///
/// Returns any error from the reader or writer.
pub fn prompt_for_sources<R: BufRead, W: Write>(
    tokens: &mut TokenReader<R>,
    out: &mut W,
    known: &DataConfig,
) -> io::Result<Option<GraphSources>> {
    let mut ask = |path: &Option<PathBuf>, label: &str| -> io::Result<Option<PathBuf>> {
        if let Some(path) = path {
            return Ok(Some(path.clone()));
        }
        Ok(tokens
            .prompt(out, &format!("Please enter the {label} file:\n"))?
            .map(PathBuf::from))
    };

    let Some(vertices) = ask(&known.vertices, "vertices")? else {
        return Ok(None);
    };
    let Some(edges) = ask(&known.edges, "edges")? else {
        return Ok(None);
    };
    let Some(categories) = ask(&known.categories, "categories")? else {
        return Ok(None);
    };
    Ok(Some(GraphSources {
        vertices,
        edges,
        categories,
    }))
}

// ============================================================================
// Commands
// ============================================================================

/// A shell command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `pn`
    PrintName,
    /// `pN`
    PrintNeighbors,
    /// `pc`
    PrintCategories,
    /// `bfs`
    ShortestPath,
    /// `cd`
    CycleDetection,
    /// `l`
    Landmark,
    /// `scc`
    Components,
    /// `stats`
    Stats,
    /// `help`
    Help,
    /// `end` or `q`
    End,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pn" => Ok(Self::PrintName),
            "pN" => Ok(Self::PrintNeighbors),
            "pc" => Ok(Self::PrintCategories),
            "bfs" => Ok(Self::ShortestPath),
            "cd" => Ok(Self::CycleDetection),
            "l" => Ok(Self::Landmark),
            "scc" => Ok(Self::Components),
            "stats" => Ok(Self::Stats),
            "help" => Ok(Self::Help),
            "end" | "q" => Ok(Self::End),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

impl Command {
    fn title(self) -> &'static str {
        match self {
            Self::PrintName => "Print Name",
            Self::PrintNeighbors => "Print Neighbors",
            Self::PrintCategories => "Print Categories",
            Self::ShortestPath => "BFS",
            Self::CycleDetection => "Cycle Detection",
            Self::Landmark => "Landmark",
            Self::Components => "Enumerate strongly connected components",
            Self::Stats => "Graph Statistics",
            Self::Help | Self::End => "",
        }
    }
}

/// Whether the loop should keep going after a command.
enum Flow {
    Continue,
    Quit,
}

// ============================================================================
// Shell
// ============================================================================

/// The interactive loop over one loaded graph.
pub struct Shell<'g, R, W> {
    graph: &'g Graph,
    tokens: TokenReader<R>,
    out: W,
    config: OutputConfig,
}

impl<'g, R: BufRead, W: Write> Shell<'g, R, W> {
    /// A shell reading commands from `tokens` and writing to `out`.
    pub fn new(graph: &'g Graph, tokens: TokenReader<R>, out: W, config: OutputConfig) -> Self {
        Self {
            graph,
            tokens,
            out,
            config,
        }
    }

    /// Run until `end`, `q` or end of input. Returns the number of commands run.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<usize> {
        let mut executed = 0;
        loop {
            let Some(token) = self
                .tokens
                .prompt(&mut self.out, "What would you like to do next?\n")?
            else {
                break;
            };
            let command = match token.parse::<Command>() {
                Ok(command) => command,
                Err(_) => {
                    let message = "input not recognized, please try again - or type 'help' for help";
                    writeln!(self.out, "{}", output::warning(message, &self.config))?;
                    continue;
                }
            };
            debug!(?command, "Running shell command");
            executed += 1;
            if let Flow::Quit = self.execute(command)? {
                break;
            }
        }
        self.out.flush()?;
        Ok(executed)
    }

    /// Consume the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    fn execute(&mut self, command: Command) -> io::Result<Flow> {
        if !command.title().is_empty() {
            writeln!(self.out)?;
            writeln!(self.out, "{}", command.title())?;
            writeln!(self.out, "====================")?;
        }
        let graph = self.graph;
        let config = self.config;

        match command {
            Command::PrintName => {
                let Some(id) = self.read_vertex("ID of article: ")? else {
                    return Ok(Flow::Quit);
                };
                if self.check(graph.vertex(id))?.is_some() {
                    output::write_name(&mut self.out, graph, id, &config)?;
                }
            }
            Command::PrintNeighbors => {
                let Some(id) = self.read_vertex("ID of article: ")? else {
                    return Ok(Flow::Quit);
                };
                if let Some(neighbors) = self.check(graph.neighbors_of(id))? {
                    output::write_name(&mut self.out, graph, id, &config)?;
                    output::write_vertices(&mut self.out, graph, "Neighbors", neighbors, &config)?;
                }
            }
            Command::PrintCategories => {
                let Some(id) = self.read_vertex("ID of article: ")? else {
                    return Ok(Flow::Quit);
                };
                if let Some(categories) = self.check(graph.categories_of(id))? {
                    output::write_name(&mut self.out, graph, id, &config)?;
                    output::write_categories(&mut self.out, graph, "Categories", categories, &config)?;
                }
            }
            Command::ShortestPath => {
                let Some([from, to]) = self.read_vertices(["ID of first article: ", "ID of second article: "])?
                else {
                    return Ok(Flow::Quit);
                };
                if let Some(outcome) = self.check(graph.shortest_path(from, to))? {
                    output::write_path(&mut self.out, graph, outcome.path(), &config)?;
                }
            }
            Command::CycleDetection => {
                let Some(id) = self.read_vertex("ID of article: ")? else {
                    return Ok(Flow::Quit);
                };
                if let Some(outcome) = self.check(graph.find_cycle_from(id))? {
                    let cycle = outcome.cycle().map(|c| c.vertices());
                    output::write_cycle(&mut self.out, graph, cycle, &config)?;
                }
            }
            Command::Landmark => {
                let Some([from, via, to]) = self.read_vertices([
                    "ID of first article: ",
                    "ID of landmark article: ",
                    "ID of last article: ",
                ])?
                else {
                    return Ok(Flow::Quit);
                };
                if let Some(route) = self.check(graph.landmark_path(from, via, to))? {
                    output::write_landmark(&mut self.out, graph, route.as_ref(), &config)?;
                }
            }
            Command::Components => {
                let components = graph.strongly_connected_components();
                let list = DEFAULT_COMPONENT_LIST.min(config.max_items);
                output::write_components(&mut self.out, graph, &components, list, &config)?;
            }
            Command::Stats => output::write_stats(&mut self.out, &graph.stats(), &config)?,
            Command::Help => {
                for (name, description) in HELP {
                    writeln!(self.out, "{} - {description}", output::info(name, &config))?;
                }
            }
            Command::End => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Read one vertex id, re-prompting until a number is entered.
    ///
    /// Returns `None` at end of input.
    fn read_vertex(&mut self, prompt: &str) -> io::Result<Option<VertexId>> {
        loop {
            let Some(token) = self.tokens.prompt(&mut self.out, prompt)? else {
                return Ok(None);
            };
            match token.parse::<usize>() {
                Ok(id) => return Ok(Some(VertexId(id))),
                Err(_) => {
                    let message = format!("not an article id: {token}");
                    writeln!(self.out, "{}", output::error(&message, &self.config))?;
                }
            }
        }
    }

    fn read_vertices<const N: usize>(&mut self, prompts: [&str; N]) -> io::Result<Option<[VertexId; N]>> {
        let mut ids = [VertexId(0); N];
        for (slot, prompt) in ids.iter_mut().zip(prompts) {
            let Some(id) = self.read_vertex(prompt)? else {
                return Ok(None);
            };
            *slot = id;
        }
        Ok(Some(ids))
    }

    /// Print a rejected id and yield `None`, or pass the value through.
    fn check<T>(&mut self, result: Result<T, GraphError>) -> io::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                writeln!(self.out, "{}", output::error(&e.to_string(), &self.config))?;
                Ok(None)
            }
        }
    }
}
