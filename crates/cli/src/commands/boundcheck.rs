use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use trapview_core::analysis::filter_locations;
use trapview_core::config::TrapviewConfig;
use trapview_core::render::{render_context, render_json, render_raw, render_terse, Palette};

use crate::commands::{load_listing, source_reader, ListingArgs};

/// Output views of `boundcheck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BoundcheckView {
    /// Trap lines with surrounding source, brackets highlighted.
    #[default]
    Context,
    /// One `file:line` per trap site.
    Raw,
    /// One line per file listing all trap lines.
    Terse,
    /// JSON array of trap sites.
    Json,
}

/// Symbol regex restricting objdump to one package: `<pkg>\.`.
pub fn package_symbol_regex(filter: Option<&str>) -> Option<String> {
    filter.map(|f| format!("{f}\\."))
}

/// Print every line where the compiler inserted a bounds-check trap.
pub fn boundcheck_command<W: Write>(
    w: &mut W,
    config: &TrapviewConfig,
    input: &ListingArgs,
    view: BoundcheckView,
    palette: Palette,
) -> Result<()> {
    let regex = package_symbol_regex(input.filter.as_deref());
    let listing = load_listing(config, input, regex.as_deref())?;
    let locs = config.trap_detector().locations(&listing.blocks);
    let locs = filter_locations(locs, input.file.as_deref());

    match view {
        BoundcheckView::Raw => render_raw(w, &locs)?,
        BoundcheckView::Terse => render_terse(w, &locs)?,
        BoundcheckView::Json => render_json(w, &locs)?,
        BoundcheckView::Context => {
            let sources = source_reader(config, input);
            render_context(w, &locs, &sources, &palette)?
        }
    }
    Ok(())
}
