//! Core data model for parsed disassembly listings.
//!
//! - `InstructionRecord`: one decoded instruction with its source correlation.
//! - `SymbolBlock`: the instructions of one routine, in emission order.
//! - `LocationRecord`: the trap-only projection used by `boundcheck`.
//! - `InstructionClass`: the coarse mnemonic classification that drives
//!   coloring and basic-block separation.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A single instruction line of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    /// Position within the owning block, starting at 0.
    pub index: usize,
    /// Source file as attributed by the disassembler (usually a base name).
    pub source_file: String,
    pub source_line: u32,
    /// Absolute address in the binary.
    pub binary_offset: u64,
    /// Offset relative to the owning block's first instruction.
    pub symbol_offset: u64,
    pub raw_bytes: String,
    /// Full decoded instruction text, e.g. `LEAQ 0xfffffe20(SP), R12`.
    pub decoded: String,
    pub mnemonic: String,
    /// Everything after the first space of `decoded`; empty when absent.
    pub argument: String,
    /// Human-readable jump target, filled by target resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_alias: Option<String>,
}

impl InstructionRecord {
    /// `file:line` as printed by the disassembler.
    pub fn location(&self) -> String {
        format!("{}:{}", self.source_file, self.source_line)
    }

    pub fn class(&self) -> InstructionClass {
        InstructionClass::of(&self.mnemonic)
    }

    /// Argument to display: the resolved alias when known, the raw argument otherwise.
    pub fn display_argument(&self) -> &str {
        self.resolved_alias.as_deref().unwrap_or(&self.argument)
    }

    /// True for instructions after which control never falls through: JMP, RET and UD2.
    ///
    /// Trap calls also end a basic block, but detecting them needs a `TrapDetector`.
    pub fn is_unconditional_transfer(&self) -> bool {
        ["JMP", "RET", "UD2"].iter().any(|m| self.mnemonic.eq_ignore_ascii_case(m))
    }
}

/// All instructions of one routine, delimited by a header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolBlock {
    /// Declared source path from the header line.
    pub source_file: String,
    pub symbol_name: String,
    /// Offset of the first instruction; 0 while the block is empty.
    pub start_offset: u64,
    pub instructions: Vec<InstructionRecord>,
}

impl SymbolBlock {
    pub fn new(symbol_name: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            symbol_name: symbol_name.into(),
            start_offset: 0,
            instructions: Vec::new(),
        }
    }

    /// Base name of the declared source path.
    pub fn file_name(&self) -> &str {
        base_name(&self.source_file)
    }
}

/// One detected trap call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub symbol_name: String,
    pub source_file: String,
    pub source_line: u32,
    /// Best-known readable path for the source: the block's declared path when
    /// it names the same file, the instruction's file otherwise.
    pub source_path: String,
}

/// Coarse mnemonic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionClass {
    /// CALL and RET.
    Call,
    /// Any mnemonic starting with `J`.
    Jump,
    /// The undefined-instruction sentinel (UD2).
    Trap,
    /// INT and NOP variants.
    Padding,
    Other,
}

impl InstructionClass {
    pub fn of(mnemonic: &str) -> Self {
        let upper = mnemonic.to_ascii_uppercase();
        if upper == "CALL" || upper == "RET" {
            InstructionClass::Call
        } else if upper.starts_with('J') {
            InstructionClass::Jump
        } else if upper == "UD2" {
            InstructionClass::Trap
        } else if upper == "INT" || upper.starts_with("NOP") {
            // Technically only INT 3 is padding.
            InstructionClass::Padding
        } else {
            InstructionClass::Other
        }
    }
}

/// Final path component, or the whole string when there is none.
pub fn base_name(path: &str) -> &str {
    Path::new(path).file_name().and_then(|os| os.to_str()).unwrap_or(path)
}
