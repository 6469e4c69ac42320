//! Configuration loaded from `linkgraph.yaml`.
//!
//! ```yaml
//! data:
//!   vertices: data/articles.txt
//!   edges: data/links.txt
//!   categories: data/categories.txt
//! ingest:
//!   strict: false
//!   progress: true
//! output:
//!   color: true
//!   max-items: 25
//! ```
//!
//! Every field is optional. Relative data paths are resolved against the
//! directory holding the configuration file, so a config can live next to
//! its data and be used from anywhere below it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "linkgraph.yaml";

/// Maximum directory depth to traverse when searching for a configuration file
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Default number of items listed before output is truncated
pub const DEFAULT_MAX_ITEMS: usize = 25;

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LinkgraphConfig {
    /// Locations of the three record files
    pub data: DataConfig,

    /// How record files are parsed
    pub ingest: IngestConfig,

    /// How results are printed
    pub output: OutputSettings,
}

/// Data file section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Vertex (article name) file
    pub vertices: Option<PathBuf>,

    /// Edge (link) file
    pub edges: Option<PathBuf>,

    /// Category file
    pub categories: Option<PathBuf>,
}

/// Ingestion section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Fail on the first malformed line instead of skipping it
    pub strict: bool,

    /// Print parse progress to stderr
    pub progress: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            strict: false,
            progress: true,
        }
    }
}

/// Output section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct OutputSettings {
    /// Colorize terminal output
    pub color: bool,

    /// Number of list items shown before truncating
    pub max_items: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl LinkgraphConfig {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not a valid configuration.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file, resolving relative data paths against
    /// the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        if let Some(base) = path.parent() {
            config.data.resolve_against(base);
        }
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize configuration to YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))
    }

    /// Load the configuration found by [`find_config_file`] from `start_dir`,
    /// or the defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be loaded.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        match find_config_file(start_dir) {
            Some(path) => Self::load(&path),
            None => {
                debug!(start = %start_dir.display(), "No configuration file found");
                Ok(Self::default())
            }
        }
    }
}

impl DataConfig {
    fn resolve_against(&mut self, base: &Path) {
        for path in [&mut self.vertices, &mut self.edges, &mut self.categories]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Search `start_dir` and its ancestors for [`CONFIG_FILE_NAME`].
///
/// Returns `None` if no configuration file exists within
/// [`MAX_TRAVERSAL_DEPTH`] levels.
#[must_use]
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn empty_file_yields_defaults() {
        let config = LinkgraphConfig::from_yaml("").unwrap();
        assert_eq!(config, LinkgraphConfig::default());
        assert!(config.ingest.progress);
        assert!(!config.ingest.strict);
        assert_eq!(config.output.max_items, DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = LinkgraphConfig::from_yaml("ingest:\n  strict: true\noutput:\n  max-items: 5\n")
            .unwrap();
        assert!(config.ingest.strict);
        assert!(config.ingest.progress);
        assert_eq!(config.output.max_items, 5);
        assert!(config.output.color);
        assert_eq!(config.data, DataConfig::default());
    }

    #[rstest]
    #[case::not_a_mapping("- one\n- two\n")]
    #[case::unknown_section("cache:\n  size: 3\n")]
    #[case::wrong_type("ingest:\n  strict: maybe\n")]
    #[case::snake_case_key("output:\n  max_items: 3\n")]
    fn invalid_yaml_is_config_error(#[case] yaml: &str) {
        let err = LinkgraphConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }

    #[test]
    fn load_resolves_relative_paths_against_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "data:\n  vertices: names.txt\n  edges: /abs/links.txt\n",
        )
        .unwrap();

        let config = LinkgraphConfig::load(&path).unwrap();
        assert_eq!(
            config.data.vertices,
            Some(temp_dir.path().join("names.txt"))
        );
        assert_eq!(config.data.edges, Some(PathBuf::from("/abs/links.txt")));
        assert_eq!(config.data.categories, None);
    }

    #[test]
    fn load_names_the_file_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "data: [").unwrap();

        let err = LinkgraphConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn find_config_file_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(temp_dir.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn discover_without_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("empty");
        fs::create_dir_all(&nested).unwrap();

        // An ancestor of the temp dir could hold a config; only check when none does.
        if find_config_file(&nested).is_none() {
            assert_eq!(
                LinkgraphConfig::discover(&nested).unwrap(),
                LinkgraphConfig::default()
            );
        }
    }

    #[test]
    fn yaml_round_trip_uses_kebab_case() {
        let yaml = LinkgraphConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("max-items"));
        assert_eq!(LinkgraphConfig::from_yaml(&yaml).unwrap(), LinkgraphConfig::default());
    }
}
