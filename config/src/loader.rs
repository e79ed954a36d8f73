//! Config file loading and section resolution.
//!
//! A config file is a single JSON object. Three kinds of top-level keys are
//! recognized: `main`, `global`, and the name of a subcommand. Every other
//! key is ignored.
//!
//! ```json
//! {
//!   "main":        { "main_config1": "from main" },
//!   "global":      { "global_config1": "from global" },
//!   "subcommand1": { "sub1_config1": "from subcommand1" }
//! }
//! ```
//!
//! Resolving for an active subcommand merges `main`, then `global`, then the
//! subcommand's section, each overriding keys set by the previous one.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use argconfig_core::{ConfigMap, merge_sections};
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigFileError, Result};

/// Section holding values for the main command's options.
pub const MAIN_SECTION: &str = "main";

/// Section holding values for the global options.
pub const GLOBAL_SECTION: &str = "global";

/// A parsed config file.
///
/// # Examples
///
/// ```no_run
/// use argconfig_config::ConfigFile;
///
/// let file = ConfigFile::load("config.json").unwrap();
/// let config = file.resolve(Some("subcommand1")).unwrap();
/// println!("{} resolved keys", config.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    document: ConfigMap,
}

impl ConfigFile {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::Io`] if the file cannot be opened,
    /// [`ConfigFileError::Json`] if it is not valid JSON, or
    /// [`ConfigFileError::Shape`] if the top level is not an object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let document: Value =
            serde_json::from_reader(reader).map_err(|source| ConfigFileError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_value(path, document)
    }

    /// Wraps an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::Shape`] if `document` is not an object.
    pub fn from_value(path: impl Into<PathBuf>, document: Value) -> Result<Self> {
        let path = path.into();
        match document {
            Value::Object(document) => {
                debug!(path = %path.display(), keys = document.len(), "Loaded config file");
                Ok(Self { path, document })
            }
            other => Err(ConfigFileError::Shape {
                path,
                detail: format!("expected a JSON object at top level, found {}", kind(&other)),
            }),
        }
    }

    /// Path the file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a section by name, or `None` if the file has no such key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::Shape`] if the key exists but does not hold
    /// an object.
    pub fn section(&self, name: &str) -> Result<Option<&ConfigMap>> {
        match self.document.get(name) {
            None => Ok(None),
            Some(Value::Object(section)) => Ok(Some(section)),
            Some(other) => Err(ConfigFileError::Shape {
                path: self.path.clone(),
                detail: format!("section '{name}' must be an object, found {}", kind(other)),
            }),
        }
    }

    /// Merges `main`, `global` and the `active` subcommand's section.
    ///
    /// An empty map is returned when none of those sections exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::Shape`] if a merged section is not an
    /// object.
    pub fn resolve(&self, active: Option<&str>) -> Result<ConfigMap> {
        let main = self.section(MAIN_SECTION)?;
        let global = self.section(GLOBAL_SECTION)?;
        let sub = match active {
            Some(name) => self.section(name)?,
            None => None,
        };

        let merged = merge_sections([main, global, sub]);
        debug!(
            path = %self.path.display(),
            subcommand = active.unwrap_or("-"),
            keys = merged.len(),
            "Resolved config sections"
        );
        Ok(merged)
    }
}

/// Loads `path` and resolves it for `active` in one step.
///
/// # Errors
///
/// Returns any error from [`ConfigFile::load`] or [`ConfigFile::resolve`].
pub fn load_config(path: impl AsRef<Path>, active: Option<&str>) -> Result<ConfigMap> {
    ConfigFile::load(path)?.resolve(active)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
