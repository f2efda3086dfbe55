use std::collections::BTreeMap;
use std::io::{self, Write};

use log::warn;

use super::{highlight_brackets, shorten, Palette};
use crate::model::LocationRecord;
use crate::sources::SourceProvider;

/// Print each trap line between its neighbours, grouped by source file.
///
/// ```text
/// util.go
///    9   x := a[i]
///   10   y := b[j]      <- brackets highlighted
///   11   return x + y
/// ```
///
/// Files that cannot be read are reported and skipped.
pub fn render_context<W: Write>(
    w: &mut W,
    locs: &[LocationRecord],
    sources: &dyn SourceProvider,
    palette: &Palette,
) -> io::Result<()> {
    let mut by_path: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for loc in locs {
        by_path.entry(loc.source_path.as_str()).or_default().push(loc.source_line);
    }

    for (path, mut trap_lines) in by_path {
        let lines = match sources.read_lines(path) {
            Ok(lines) => lines,
            Err(err) => {
                warn!("{err}");
                writeln!(w, "couldn't read {path:?}, skipping")?;
                continue;
            }
        };
        trap_lines.sort_unstable();
        writeln!(w, "{path}")?;
        for (i, line) in trap_lines.iter().enumerate() {
            if i != 0 {
                writeln!(w)?;
            }
            let line = *line as usize;
            for n in line.saturating_sub(1)..=line + 1 {
                let Some(text) = n.checked_sub(1).and_then(|idx| lines.get(idx)) else {
                    continue;
                };
                let text = shorten(text);
                if n == line {
                    writeln!(w, "{n:5} {}", highlight_brackets(&text, palette))?;
                } else {
                    writeln!(w, "{n:5} {text}")?;
                }
            }
        }
    }
    Ok(())
}
