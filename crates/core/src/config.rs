use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{TrapDetector, DEFAULT_TRAP_SYMBOL};
use crate::listing::{ParseOptions, DEFAULT_HEADER_MARKER};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unsupported config format for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

/// Serializable tool configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrapviewConfig {
    /// Prefix of block header lines in the listing.
    pub header_marker: String,
    /// Routines whose calls count as bounds-check traps.
    pub trap_symbols: Vec<String>,
    /// Explicit path to the `go` binary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_bin: Option<PathBuf>,
    /// Directory that relative source paths are resolved against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<PathBuf>,
}

impl Default for TrapviewConfig {
    fn default() -> Self {
        Self {
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
            trap_symbols: vec![DEFAULT_TRAP_SYMBOL.to_string()],
            go_bin: None,
            source_root: None,
        }
    }
}

impl TrapviewConfig {
    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let body = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&body)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&body)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map(Self::load).transpose().map(Option::unwrap_or_default)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions { header_marker: self.header_marker.clone() }
    }

    pub fn trap_detector(&self) -> TrapDetector {
        TrapDetector::new(self.trap_symbols.iter().cloned())
    }
}
