//! Adapter for the external build toolchain and disassembler.
//!
//! The engine only consumes the disassembler's text; this module shells out to
//! `go build` and `go tool objdump` to produce it.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed { command: String, status: String, stderr: String },
}

/// Resolve the `go` binary: `TRAPVIEW_GO` if set, else `go` from `PATH`.
pub fn resolve_go_path() -> PathBuf {
    std::env::var_os("TRAPVIEW_GO").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("go"))
}

/// Thin wrapper around the Go toolchain.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    pub go_bin: PathBuf,
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self { go_bin: resolve_go_path() }
    }
}

impl GoToolchain {
    pub fn new(go_bin: Option<PathBuf>) -> Self {
        Self { go_bin: go_bin.unwrap_or_else(resolve_go_path) }
    }

    /// `go build -o <bin> <pkg>`.
    pub fn build(&self, pkg: &str, bin: &Path) -> Result<(), ToolchainError> {
        let mut cmd = Command::new(&self.go_bin);
        cmd.arg("build").arg("-o").arg(bin).arg(pkg);
        self.run(cmd).map(|_| ())
    }

    /// `go tool objdump [-s <symbol_regex>] <bin>`, returning stdout.
    pub fn objdump(&self, bin: &Path, symbol_regex: Option<&str>) -> Result<String, ToolchainError> {
        let mut cmd = Command::new(&self.go_bin);
        cmd.args(["tool", "objdump"]);
        if let Some(regex) = symbol_regex {
            cmd.arg("-s").arg(regex);
        }
        cmd.arg(bin);
        self.run(cmd)
    }

    /// Build `pkg` into `bin`, then disassemble it.
    pub fn build_and_disassemble(
        &self,
        pkg: &str,
        bin: &Path,
        symbol_regex: Option<&str>,
    ) -> Result<String, ToolchainError> {
        self.build(pkg, bin)?;
        self.objdump(bin, symbol_regex)
    }

    fn run(&self, mut cmd: Command) -> Result<String, ToolchainError> {
        let rendered = format!("{cmd:?}");
        debug!("running {rendered}");
        let output = cmd.output().map_err(|source| ToolchainError::Spawn {
            program: self.go_bin.display().to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(ToolchainError::Failed {
                command: rendered,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
