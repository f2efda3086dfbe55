//! Access to the source files a listing refers to.
//!
//! Source trees often move after a binary is built, so renderers treat an
//! unreadable file as a per-group condition rather than a failure.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("couldn't read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies source text, split into lines, for a path named in the listing.
pub trait SourceProvider {
    fn read_lines(&self, path: &str) -> Result<Vec<String>, SourceError>;
}

/// Reads sources from disk, optionally resolving relative paths against a root.
#[derive(Debug, Clone, Default)]
pub struct FileSystemSources {
    pub root: Option<PathBuf>,
}

impl FileSystemSources {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl SourceProvider for FileSystemSources {
    fn read_lines(&self, path: &str) -> Result<Vec<String>, SourceError> {
        let resolved = self.resolve(path);
        let body = fs::read_to_string(&resolved)
            .map_err(|source| SourceError::Unreadable { path: resolved.clone(), source })?;
        Ok(body.lines().map(str::to_string).collect())
    }
}

/// In-memory sources keyed by the path as written in the listing.
impl SourceProvider for HashMap<String, String> {
    fn read_lines(&self, path: &str) -> Result<Vec<String>, SourceError> {
        self.get(path).map(|body| body.lines().map(str::to_string).collect()).ok_or_else(|| {
            SourceError::Unreadable {
                path: PathBuf::from(path),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not in memory"),
            }
        })
    }
}
