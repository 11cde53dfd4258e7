//! Configuration file loader for docfront front ends.
//!
//! Files are looked up with the precedence stack
//! git root → working directory → override path, later layers winning. Each
//! file is TOML whose top-level tables are sections; scalar values are kept
//! as raw strings and every key is normalized so that file settings share the
//! namespace of command-line destinations.
//!
//! Section names are normalized as well: `[html4css1_writer]`,
//! `[HTML4CSS1-Writer]` and the quoted `["html4css1 writer"]` all name the
//! same section.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docfront_options::normalize_key;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "docfront.toml";

/// All configuration layers found for one invocation.
#[derive(Clone, Debug)]
pub struct ConfigFile {
    layers: Vec<ConfigLayer>,
    pub sources: ConfigSources,
}

/// Sections read from a single file.
#[derive(Clone, Debug)]
pub struct ConfigLayer {
    pub source: ConfigSource,
    pub sections: Vec<ConfigSection>,
}

impl ConfigLayer {
    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        let name = normalize_section(name);
        self.sections.iter().find(|section| section.name == name)
    }
}

/// Lowercases a section name and maps dashes and spaces to underscores.
pub fn normalize_section(name: &str) -> String {
    normalize_key(name.trim()).replace(' ', "_")
}

/// One `[section]` table with normalized keys and raw string values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl ConfigSection {
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Provenance information for the loaded layers.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific file contributing configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: PathBuf,
}

impl ConfigSource {
    fn new(kind: ConfigSourceKind, path: PathBuf) -> Self {
        ConfigSource { kind, path }
    }

    fn describe(&self) -> String {
        format!("{} at {}", self.kind, self.path.display())
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl ConfigFile {
    /// Loads every configuration layer using the precedence rules.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let mut candidates = Vec::new();
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);
        if let Some(root) = find_git_root(&working_dir) {
            let path = root.join(CONFIG_FILE_NAME);
            if path.exists() && Some(&path) != override_path.as_ref() && path != local_config_path
            {
                candidates.push(ConfigSource::new(ConfigSourceKind::GitRoot, path));
            }
        }
        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            candidates.push(ConfigSource::new(ConfigSourceKind::Local, local_config_path));
        }
        if let Some(path) = override_path {
            candidates.push(ConfigSource::new(ConfigSourceKind::Override, path));
        }

        let mut layers = Vec::with_capacity(candidates.len());
        let mut errors = Vec::new();
        for source in candidates {
            debug!(source = %source.describe(), "reading configuration layer");
            match load_layer(source)? {
                Ok(layer) => layers.push(layer),
                Err(layer_errors) => errors.extend(layer_errors),
            }
        }
        if !errors.is_empty() {
            return Err(ConfigError::Validation(ConfigValidationErrors(errors)));
        }

        let sources = ConfigSources {
            working_directory: working_dir,
            layers: layers.iter().map(|layer| layer.source.clone()).collect(),
        };
        Ok(ConfigFile { layers, sources })
    }

    /// Configuration with no layers, as when no file exists.
    pub fn empty(working_directory: PathBuf) -> Self {
        ConfigFile {
            layers: Vec::new(),
            sources: ConfigSources {
                working_directory,
                layers: Vec::new(),
            },
        }
    }

    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Flattens the requested sections into ordered key/value pairs.
    ///
    /// Pairs are listed layer by layer in precedence order and, within a
    /// layer, section by section in the order requested; applying them in
    /// sequence lets later layers and sections override earlier ones.
    pub fn settings_for<S: AsRef<str>>(&self, sections: &[S]) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for layer in &self.layers {
            for name in sections {
                if let Some(section) = layer.section(name.as_ref()) {
                    pairs.extend(section.entries.iter().cloned());
                }
            }
        }
        pairs
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

type LayerResult = Result<ConfigLayer, Vec<ConfigValidationError>>;

fn load_layer(source: ConfigSource) -> Result<LayerResult, ConfigError> {
    let contents = fs::read_to_string(&source.path).map_err(|err| ConfigError::Io {
        path: source.path.clone(),
        source: err,
    })?;
    let path = source.path.clone();
    parse_layer(&contents, source).map_err(|err| match err {
        LayerParseError::Parse { source } => ConfigError::Parse { path, source },
    })
}

#[derive(Debug)]
enum LayerParseError {
    Parse { source: toml::de::Error },
}

fn parse_layer(contents: &str, source: ConfigSource) -> Result<LayerResult, LayerParseError> {
    let raw: BTreeMap<String, toml::Value> =
        toml::from_str(contents).map_err(|source| LayerParseError::Parse { source })?;

    let mut errors = Vec::new();
    let mut sections: Vec<ConfigSection> = Vec::new();
    for (name, value) in raw {
        let toml::Value::Table(table) = value else {
            errors.push(ConfigValidationError::new(
                source.clone(),
                format!("key '{name}' must be inside a [section]"),
            ));
            continue;
        };

        let mut entries = Vec::with_capacity(table.len());
        for (key, value) in table {
            match raw_scalar(value) {
                Some(raw) => entries.push((normalize_key(&key), raw)),
                None => errors.push(
                    ConfigValidationError::new(
                        source.clone(),
                        format!("'{key}' must be a string, number or boolean"),
                    )
                    .with_context(name.clone()),
                ),
            }
        }
        let name = normalize_section(&name);
        match sections
            .iter_mut()
            .find(|section| section.name == name)
        {
            Some(section) => section.entries.extend(entries),
            None => sections.push(ConfigSection { name, entries }),
        }
    }

    if !errors.is_empty() {
        return Ok(Err(errors));
    }
    Ok(Ok(ConfigLayer { source, sections }))
}

fn raw_scalar(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(value) => Some(value),
        toml::Value::Integer(value) => Some(value.to_string()),
        toml::Value::Float(value) => Some(value.to_string()),
        toml::Value::Boolean(value) => Some(value.to_string()),
        toml::Value::Datetime(value) => Some(value.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {error}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: ConfigSource,
    pub context: Option<String>,
    pub message: String,
}

impl ConfigValidationError {
    fn new(source: ConfigSource, message: String) -> Self {
        ConfigValidationError {
            source,
            context: None,
            message,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "[{}] {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        write!(f, " ({})", self.source.describe())
    }
}
