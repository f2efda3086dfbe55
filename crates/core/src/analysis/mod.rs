//! Bounds-check trap detection.
//!
//! A trap site is a call into the runtime routine the compiler inserts to abort
//! on an out-of-range index, e.g. `CALL runtime.panicIndex(SB)`.

use log::debug;

use crate::model::{base_name, InstructionClass, InstructionRecord, LocationRecord, SymbolBlock};

/// Trap routine called by Go's bounds checks.
pub const DEFAULT_TRAP_SYMBOL: &str = "runtime.panicIndex";

/// Predicate over instructions, parameterized by the trap routine names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapDetector {
    symbols: Vec<String>,
}

impl Default for TrapDetector {
    fn default() -> Self {
        Self { symbols: vec![DEFAULT_TRAP_SYMBOL.to_string()] }
    }
}

impl TrapDetector {
    /// Build a detector matching calls whose argument starts with any of `symbols`.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { symbols: symbols.into_iter().map(Into::into).collect() }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// True iff `instr` is a call/return whose argument names a trap routine.
    pub fn is_trap(&self, instr: &InstructionRecord) -> bool {
        instr.class() == InstructionClass::Call
            && self.symbols.iter().any(|s| instr.argument.starts_with(s.as_str()))
    }

    /// True if any instruction attributed to `line` is a trap.
    pub fn line_has_trap<'a, I>(&self, instructions: I, line: u32) -> bool
    where
        I: IntoIterator<Item = &'a InstructionRecord>,
    {
        instructions.into_iter().any(|i| i.source_line == line && self.is_trap(i))
    }

    /// True when control never falls through `instr`.
    pub fn ends_basic_block(&self, instr: &InstructionRecord) -> bool {
        instr.is_unconditional_transfer() || self.is_trap(instr)
    }

    /// Collect every trap site, sorted by `(file, line)`.
    pub fn locations(&self, blocks: &[SymbolBlock]) -> Vec<LocationRecord> {
        let mut locs: Vec<LocationRecord> = Vec::new();
        for block in blocks {
            for instr in block.instructions.iter().filter(|i| self.is_trap(i)) {
                let source_path = if block.file_name() == base_name(&instr.source_file) {
                    block.source_file.clone()
                } else {
                    instr.source_file.clone()
                };
                locs.push(LocationRecord {
                    symbol_name: block.symbol_name.clone(),
                    source_file: instr.source_file.clone(),
                    source_line: instr.source_line,
                    source_path,
                });
            }
        }
        locs.sort_by(|a, b| {
            a.source_file.cmp(&b.source_file).then(a.source_line.cmp(&b.source_line))
        });
        debug!("found {} trap sites", locs.len());
        locs
    }
}

/// Keep locations whose file base name equals `file`; `None` keeps everything.
pub fn filter_locations(locs: Vec<LocationRecord>, file: Option<&str>) -> Vec<LocationRecord> {
    match file {
        Some(file) => locs.into_iter().filter(|l| base_name(&l.source_file) == file).collect(),
        None => locs,
    }
}
