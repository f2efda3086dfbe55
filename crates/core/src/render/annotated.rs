use std::io::{self, Write};

use log::warn;

use super::{highlight_brackets, shorten, Palette, Role};
use crate::analysis::TrapDetector;
use crate::listing::Listing;
use crate::model::{InstructionClass, InstructionRecord, SymbolBlock};
use crate::sources::SourceProvider;

/// Print every block as source lines interleaved with their instructions.
///
/// Blocks are ordered by `(source_file, symbol_name)`. Within a block the
/// instructions are shown ordered by `(source_line, index)`; the listing itself
/// is not reordered. Blocks whose source cannot be read are reported and skipped.
pub fn render_annotated<W: Write>(
    w: &mut W,
    listing: &Listing,
    detector: &TrapDetector,
    sources: &dyn SourceProvider,
    palette: &Palette,
) -> io::Result<()> {
    let mut blocks: Vec<&SymbolBlock> = listing.blocks.iter().collect();
    blocks.sort_by(|a, b| {
        a.source_file.cmp(&b.source_file).then_with(|| a.symbol_name.cmp(&b.symbol_name))
    });

    for block in blocks {
        let lines = match sources.read_lines(&block.source_file) {
            Ok(lines) => lines,
            Err(err) => {
                warn!("{err}");
                writeln!(w, "couldn't read {:?}, skipping", block.source_file)?;
                continue;
            }
        };
        writeln!(w, "{}", palette.paint(Role::Symbol, &block.symbol_name))?;
        render_block(w, block, &lines, detector, palette)?;
    }
    Ok(())
}

fn render_block<W: Write>(
    w: &mut W,
    block: &SymbolBlock,
    lines: &[String],
    detector: &TrapDetector,
    palette: &Palette,
) -> io::Result<()> {
    let mut ordered: Vec<&InstructionRecord> = block.instructions.iter().collect();
    ordered.sort_by_key(|i| (i.source_line, i.index));

    let mut last_line = None;
    for (pos, instr) in ordered.iter().enumerate() {
        if last_line != Some(instr.source_line) {
            last_line = Some(instr.source_line);
            let same_line =
                ordered[pos..].iter().copied().take_while(|i| i.source_line == instr.source_line);
            let flagged = detector.line_has_trap(same_line, instr.source_line);

            let mut text = (instr.source_line as usize)
                .checked_sub(1)
                .and_then(|idx| lines.get(idx))
                .map(|l| shorten(l))
                .unwrap_or_default();
            if flagged {
                text = highlight_brackets(&text, palette);
            }
            writeln!(w, "{}  {}", instr.source_line, palette.paint(Role::Source, &text))?;
        }

        let body = match instr.display_argument() {
            "" => instr.mnemonic.clone(),
            arg => format!("{:<5} {}", instr.mnemonic, arg),
        };
        let body = match instruction_role(instr, detector) {
            Some(role) => palette.paint(role, &body),
            None => body,
        };
        writeln!(w, " {:4} {}", instr.index, body)?;

        if detector.ends_basic_block(instr) {
            writeln!(w)?;
        }
    }
    Ok(())
}

fn instruction_role(instr: &InstructionRecord, detector: &TrapDetector) -> Option<Role> {
    match instr.class() {
        InstructionClass::Call if detector.is_trap(instr) => Some(Role::TrapCall),
        InstructionClass::Call => Some(Role::Call),
        InstructionClass::Jump => Some(Role::Jump),
        InstructionClass::Trap => Some(Role::Trap),
        InstructionClass::Padding => Some(Role::Padding),
        InstructionClass::Other => None,
    }
}
