use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::model::LocationRecord;

/// One `file:line` per location, in the order given (already sorted by the detector).
pub fn render_raw<W: Write>(w: &mut W, locs: &[LocationRecord]) -> io::Result<()> {
    for loc in locs {
        writeln!(w, "{}:{}", loc.source_file, loc.source_line)?;
    }
    Ok(())
}

/// One line per file, files sorted: `util.go: 10, 12, 12`.
pub fn render_terse<W: Write>(w: &mut W, locs: &[LocationRecord]) -> io::Result<()> {
    let mut by_file: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for loc in locs {
        by_file.entry(loc.source_file.as_str()).or_default().push(loc.source_line);
    }
    for (file, mut lines) in by_file {
        lines.sort_unstable();
        let joined = lines.iter().map(u32::to_string).collect::<Vec<_>>().join(", ");
        writeln!(w, "{file}: {joined}")?;
    }
    Ok(())
}

/// Pretty JSON array of locations.
pub fn render_json<W: Write>(w: &mut W, locs: &[LocationRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, locs)?;
    writeln!(w)
}
