use std::io::Write;

use anyhow::Result;
use trapview_core::config::TrapviewConfig;
use trapview_core::render::{render_annotated, Palette};

use crate::commands::{load_listing, source_reader, ListingArgs};

/// Legend printed in `disfunc --help`.
pub const COLOR_LEGEND: &str = "Colors:
- Green:  calls/returns
- Red:    panic() due to bound checking and traps
- Blue:   jumps (both conditional and unconditional)
- Violet: padding and noops
- Yellow: source code; bound check highlighted red";

/// Print an annotated disassembly of the selected functions.
pub fn disfunc_command<W: Write>(
    w: &mut W,
    config: &TrapviewConfig,
    input: &ListingArgs,
    palette: Palette,
) -> Result<()> {
    let listing = load_listing(config, input, input.filter.as_deref())?
        .retain_file(input.file.as_deref());
    let sources = source_reader(config, input);
    render_annotated(w, &listing, &config.trap_detector(), &sources, &palette)?;
    Ok(())
}
