use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use trapview_core::config::TrapviewConfig;
use trapview_core::listing::{parse_listing, Listing};
use trapview_core::sources::FileSystemSources;
use trapview_core::toolchain::GoToolchain;

use crate::{default_binary_path, read_listing_file};

/// Where the listing comes from and which part of it to show.
#[derive(Args, Debug, Clone, Default)]
pub struct ListingArgs {
    /// Package to build, preferably an executable.
    #[arg(long, default_value = ".")]
    pub pkg: String,

    /// Binary to generate. Defaults to the current directory's name.
    #[arg(long)]
    pub bin: Option<PathBuf>,

    /// Symbol filter passed to the disassembler.
    #[arg(short = 'f', long = "filter")]
    pub filter: Option<String>,

    /// Only show results for this source file (base name, e.g. util.go).
    #[arg(long)]
    pub file: Option<String>,

    /// Read a captured `go tool objdump` listing instead of building ("-" for stdin).
    #[arg(long)]
    pub listing: Option<PathBuf>,

    /// Directory relative source paths are resolved against.
    #[arg(long)]
    pub source_root: Option<PathBuf>,
}

/// Load the config file if one was given.
pub fn load_config(path: Option<&Path>) -> Result<TrapviewConfig> {
    TrapviewConfig::load_or_default(path).context("Failed to load trapview config")
}

/// Produce the listing text, either from `--listing` or by building and disassembling.
pub fn load_listing_text(
    config: &TrapviewConfig,
    input: &ListingArgs,
    symbol_regex: Option<&str>,
) -> Result<String> {
    if let Some(path) = &input.listing {
        info!("reading listing from {}", path.display());
        return read_listing_file(path);
    }

    let bin = match &input.bin {
        Some(bin) => bin.clone(),
        None => default_binary_path()?,
    };
    info!("building {} into {}", input.pkg, bin.display());
    GoToolchain::new(config.go_bin.clone())
        .build_and_disassemble(&input.pkg, &bin, symbol_regex)
        .with_context(|| format!("Failed to build and disassemble {}", input.pkg))
}

/// Parse and resolve the listing. Parse errors are fatal.
pub fn load_listing(
    config: &TrapviewConfig,
    input: &ListingArgs,
    symbol_regex: Option<&str>,
) -> Result<Listing> {
    let text = load_listing_text(config, input, symbol_regex)?;
    let listing =
        parse_listing(&text, &config.parse_options()).context("Failed to parse disassembly")?;
    Ok(listing.resolve_targets())
}

/// Source reader honouring `--source-root`, then the config's `source_root`.
pub fn source_reader(config: &TrapviewConfig, input: &ListingArgs) -> FileSystemSources {
    FileSystemSources::new(input.source_root.clone().or_else(|| config.source_root.clone()))
}
