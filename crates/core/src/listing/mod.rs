//! Listing parser: turns the disassembler's text output into symbol blocks.
//!
//! The expected input is the line format of `go tool objdump`:
//!
//! ```text
//! TEXT github.com/maruel/nin.CanonicalizePath(SB) /home/maruel/src/nin/util.go
//!   util.go:65		0x505dc0		4c8da42420feffff	LEAQ 0xfffffe20(SP), R12
//! ```
//!
//! Parsing is a single forward pass. Every instruction is recorded in the
//! `AddressIndex` as it is seen, so target resolution (a second pass) sees the
//! complete address space. Filtering by file is applied afterwards and never
//! touches the index.

mod index;

pub use index::{AddressIndex, IndexTarget};

use log::debug;
use thiserror::Error;

use crate::model::{InstructionRecord, SymbolBlock};

/// Header marker emitted by `go tool objdump` before each routine.
pub const DEFAULT_HEADER_MARKER: &str = "TEXT ";

/// A malformed listing line. Always fatal: a single bad line would leave the
/// address index incomplete.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("error decoding line {line_number} ({reason}): {line:?}")]
pub struct ParseError {
    /// 1-based line number in the input.
    pub line_number: usize,
    /// The offending line, verbatim.
    pub line: String,
    pub reason: String,
}

/// Knobs for the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Prefix identifying a block header line.
    pub header_marker: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { header_marker: DEFAULT_HEADER_MARKER.to_string() }
    }
}

/// Parsed listing: blocks in emission order plus the address index over all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub blocks: Vec<SymbolBlock>,
    pub index: AddressIndex,
}

/// Parse a whole listing.
pub fn parse_listing(text: &str, options: &ParseOptions) -> Result<Listing, ParseError> {
    let mut blocks: Vec<SymbolBlock> = Vec::new();
    let mut index = AddressIndex::default();
    // Local scan state: whether a block is open, and the next instruction index.
    let mut open = false;
    let mut next_index = 0usize;

    for (i, line) in text.lines().enumerate() {
        let line_number = i + 1;
        let fail = |reason: &str| ParseError {
            line_number,
            line: line.to_string(),
            reason: reason.to_string(),
        };

        if line.trim().is_empty() {
            open = false;
            next_index = 0;
            continue;
        }

        if let Some(header) = line.strip_prefix(options.header_marker.as_str()) {
            // TEXT pkg.Symbol(SB) /path/to/file.go
            let (symbol, file) =
                header.split_once(' ').ok_or_else(|| fail("header without source file"))?;
            blocks.push(SymbolBlock::new(symbol, file.trim()));
            open = true;
            next_index = 0;
            continue;
        }

        let block = match blocks.last_mut() {
            Some(block) if open => block,
            _ => return Err(fail("instruction outside of a symbol block")),
        };
        let fields = split_instruction(line).map_err(|reason| fail(reason))?;
        if block.instructions.is_empty() {
            block.start_offset = fields.binary_offset;
        }

        let (mnemonic, argument) = match fields.decoded.split_once(' ') {
            Some((m, a)) => (m.to_string(), a.to_string()),
            None => (fields.decoded.to_string(), String::new()),
        };
        let record = InstructionRecord {
            index: next_index,
            source_file: fields.source_file.to_string(),
            source_line: fields.source_line,
            binary_offset: fields.binary_offset,
            symbol_offset: fields.binary_offset.wrapping_sub(block.start_offset),
            raw_bytes: fields.raw_bytes.to_string(),
            decoded: fields.decoded.to_string(),
            mnemonic,
            argument,
            resolved_alias: None,
        };
        index.insert(&record, &block.symbol_name);
        block.instructions.push(record);
        next_index += 1;
    }

    debug!(
        "parsed {} symbol blocks, {} indexed addresses",
        blocks.len(),
        index.len()
    );
    Ok(Listing { blocks, index })
}

impl Listing {
    /// Parse with default options.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse_listing(text, &ParseOptions::default())
    }

    /// Keep only blocks whose declared source file has the given base name.
    ///
    /// `None` keeps everything. Order is preserved and the address index is not
    /// modified, so aliases pointing into removed blocks stay meaningful.
    pub fn retain_file(mut self, file: Option<&str>) -> Self {
        if let Some(file) = file {
            let before = self.blocks.len();
            self.blocks.retain(|b| b.file_name() == file);
            debug!("file filter {file:?} kept {} of {before} blocks", self.blocks.len());
        }
        self
    }

    /// Iterate over every instruction of every block, in emission order.
    pub fn instructions(&self) -> impl Iterator<Item = (&SymbolBlock, &InstructionRecord)> {
        self.blocks.iter().flat_map(|b| b.instructions.iter().map(move |i| (b, i)))
    }
}

struct InstructionFields<'a> {
    source_file: &'a str,
    source_line: u32,
    binary_offset: u64,
    raw_bytes: &'a str,
    decoded: &'a str,
}

/// Split `  file.go:12<TAB>0x1234<TAB>rawbytes<TAB>DECODED TEXT`.
fn split_instruction(line: &str) -> Result<InstructionFields<'_>, &'static str> {
    let rest = line.trim_start();
    let (location, rest) = rest.split_once('\t').ok_or("missing offset column")?;
    let (source_file, source_line) =
        location.trim_end().rsplit_once(':').ok_or("missing line number")?;
    let source_line = source_line.parse::<u32>().map_err(|_| "invalid line number")?;

    let rest = rest.trim_start();
    let (offset, rest) = rest.split_once('\t').ok_or("missing raw bytes column")?;
    let binary_offset = parse_int(offset.trim()).ok_or("invalid offset")?;

    let rest = rest.trim_start();
    let (raw_bytes, decoded) = rest.split_once('\t').ok_or("missing instruction column")?;
    let decoded = decoded.trim();
    if decoded.is_empty() {
        return Err("missing instruction column");
    }

    Ok(InstructionFields {
        source_file,
        source_line,
        binary_offset,
        raw_bytes: raw_bytes.trim(),
        decoded,
    })
}

/// Parse an unsigned integer in decimal or `0x`, `0o`, `0b` prefixed notation.
pub fn parse_int(text: &str) -> Option<u64> {
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (oct, 8)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin, 2)
    } else {
        (lower.as_str(), 10)
    };
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}
