use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{parse_int, Listing};
use crate::model::{InstructionClass, InstructionRecord};

/// What a jump can land on: enough of the destination record to describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTarget {
    pub symbol_name: String,
    pub source_file: String,
    pub source_line: u32,
    pub index: usize,
}

impl IndexTarget {
    /// `file:line (index)`, the form substituted for a jump's numeric argument.
    pub fn alias(&self) -> String {
        format!("{}:{} ({})", self.source_file, self.source_line, self.index)
    }
}

/// Map from absolute binary offset to the instruction found there.
///
/// Built over the whole listing, before any filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressIndex {
    targets: BTreeMap<u64, IndexTarget>,
}

impl AddressIndex {
    /// Record an instruction. A later record at the same offset replaces the earlier one.
    pub fn insert(&mut self, record: &InstructionRecord, symbol_name: &str) {
        self.targets.insert(
            record.binary_offset,
            IndexTarget {
                symbol_name: symbol_name.to_string(),
                source_file: record.source_file.clone(),
                source_line: record.source_line,
                index: record.index,
            },
        );
    }

    pub fn get(&self, offset: u64) -> Option<&IndexTarget> {
        self.targets.get(&offset)
    }

    /// Resolve a jump argument such as `0x505e5a`. Indirect or out-of-range
    /// targets yield `None`.
    pub fn lookup_argument(&self, argument: &str) -> Option<&IndexTarget> {
        parse_int(argument.trim()).and_then(|offset| self.get(offset))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Listing {
    /// Fill `resolved_alias` on every jump-family instruction whose target is indexed.
    pub fn resolve_targets(mut self) -> Self {
        let mut resolved = 0usize;
        let mut unresolved = 0usize;
        for block in &mut self.blocks {
            for instr in &mut block.instructions {
                if instr.class() != InstructionClass::Jump {
                    continue;
                }
                match self.index.lookup_argument(&instr.argument) {
                    Some(target) => {
                        instr.resolved_alias = Some(target.alias());
                        resolved += 1;
                    }
                    None => unresolved += 1,
                }
            }
        }
        debug!("resolved {resolved} jump targets, {unresolved} left as-is");
        self
    }
}
