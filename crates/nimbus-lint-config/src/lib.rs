#![doc = include_str!("../README.md")]

use std::path::{Path, PathBuf};

use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

pub const CONFIG_FILENAME: &str = "nimbus-lint.toml";

fn example_schema() -> PathBuf {
    PathBuf::from("schemas/feature.json")
}

/// How diagnostics are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReporterKind {
    /// One `error: path:line:col: message` line per diagnostic.
    #[default]
    Text,
    /// A JSON array of diagnostics on stdout.
    Json,
    /// Source excerpts with the offending span underlined.
    Pretty,
}

impl core::str::FromStr for ReporterKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(format!(
                "unknown reporter '{s}', expected: text, json, pretty"
            )),
        }
    }
}

impl core::fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration file for the nimbus feature value linter.
///
/// Place `nimbus-lint.toml` at your project root (or any subdirectory that
/// needs different settings). Files found further up the tree fill in the
/// settings a closer file leaves out, until one with `root = true` is reached.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(title = "nimbus-lint.toml")]
pub struct Config {
    /// Mark this configuration file as the project root.
    ///
    /// When `true`, no `nimbus-lint.toml` from a parent directory is read.
    #[serde(default)]
    pub root: bool,

    /// JSON Schema used when `--schema` is not passed.
    ///
    /// Relative paths are resolved against the directory containing the
    /// `nimbus-lint.toml` that sets them.
    #[schemars(title = "Schema", example = example_schema())]
    #[serde(default)]
    pub schema: Option<PathBuf>,

    /// Reporter used when `--reporter` is not passed.
    #[schemars(title = "Reporter")]
    #[serde(default)]
    pub reporter: Option<ReporterKind>,

    /// Report diagnostics ordered by their position in the file instead of
    /// the order the linter produced them.
    #[schemars(title = "Sort Diagnostics")]
    #[serde(default)]
    pub sort: Option<bool>,
}

impl Config {
    /// Fill unset values from a parent config. `root` is not inherited.
    fn merge_parent(&mut self, parent: Config) {
        self.schema = self.schema.take().or(parent.schema);
        self.reporter = self.reporter.or(parent.reporter);
        self.sort = self.sort.or(parent.sort);
    }

    /// Make `schema` absolute with respect to `config_dir`.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(schema) = &self.schema
            && schema.is_relative()
        {
            self.schema = Some(config_dir.join(schema));
        }
    }

    pub fn reporter(&self) -> ReporterKind {
        self.reporter.unwrap_or_default()
    }

    pub fn sort(&self) -> bool {
        self.sort.unwrap_or(false)
    }
}

/// Generate the JSON Schema for `nimbus-lint.toml`.
pub fn schema() -> Value {
    schema_for!(Config).to_value()
}

/// Find the nearest `nimbus-lint.toml` starting from `start_dir`, walking
/// upward.
pub fn find_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Parse a single config file, resolving its paths against its directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid config.
pub fn load_file(path: &Path) -> Result<Config, anyhow::Error> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let mut cfg: Config = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    if let Some(dir) = path.parent() {
        cfg.resolve_paths(dir);
    }
    Ok(cfg)
}

/// Search for `nimbus-lint.toml` files starting from `start_dir`, walking up.
/// Merges all configs found until one with `root = true` is hit (inclusive).
/// Returns the merged config, or `None` if no config file was found.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn find_and_load(start_dir: &Path) -> Result<Option<Config>, anyhow::Error> {
    let mut configs: Vec<Config> = Vec::new();
    let mut dir = start_dir.to_path_buf();

    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            let cfg = load_file(&candidate)?;
            let is_root = cfg.root;
            configs.push(cfg);
            if is_root {
                break;
            }
        }
        if !dir.pop() {
            break;
        }
    }

    let mut configs = configs.into_iter();
    let Some(mut merged) = configs.next() else {
        return Ok(None);
    };
    for parent in configs {
        merged.merge_parent(parent);
    }
    Ok(Some(merged))
}

/// Load config from the current working directory (walking upward).
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load() -> Result<Config, anyhow::Error> {
    let cwd = std::env::current_dir()?;
    Ok(find_and_load(&cwd)?.unwrap_or_default())
}
