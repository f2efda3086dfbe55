pub mod commands;

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Initialize `env_logger` on stderr. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // A second initialization (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

/// Read a captured listing from a file, or from stdin when the path is `-`.
pub fn read_listing_file(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body).context("Failed to read listing from stdin")?;
        return Ok(body);
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read listing at {}", path.display()))
}

/// Default output binary: named after the current directory, created inside it.
pub fn default_binary_path() -> Result<PathBuf> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(infer_binary_name(&cwd)))
}

/// Infer a binary name from a directory path.
///
/// If the path has no final component (e.g., `/`), fall back to `a.out`.
pub fn infer_binary_name(dir: &Path) -> String {
    dir.file_name().and_then(|os_str| os_str.to_str()).unwrap_or("a.out").to_string()
}
