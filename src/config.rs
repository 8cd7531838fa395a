//! `schema-tsd.json` project configuration. Every field is optional and the
//! matching command-line flag wins when both are given.
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "schema-tsd.json";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Prefixed onto every `$ref` location.
    pub root_dir: Option<PathBuf>,
    /// Paths or glob patterns of root schemas.
    pub inputs: Vec<String>,
    /// Declarations file to write (stdout if absent).
    pub out: Option<PathBuf>,
    pub json_pointer: Option<String>,
    pub jq_expr: Option<String>,
}

impl Config {
    pub fn from_json(src: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&src).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load `path` if given, else `schema-tsd.json` in the working directory if it exists.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(Path::new(DEFAULT_CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }
}
