//! IR module definition

use super::instruction::{Inst, Op, RawInst};
use super::word::WordSize;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete IR module: instruction stream plus initial memory image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Instructions grouped by block; blocks may appear in any pc order
    pub text: Vec<Inst>,
    /// Initial memory words from address 0; everything beyond is zero
    pub data: Vec<i64>,
}

/// Serialized module with undecoded opcodes
#[derive(Debug, Deserialize)]
struct RawModule {
    #[serde(default)]
    text: Vec<RawInst>,
    #[serde(default)]
    data: Vec<i64>,
}

impl Module {
    /// Create a module from its instruction stream and data segment
    pub fn new(text: Vec<Inst>, data: Vec<i64>) -> Self {
        Self { text, data }
    }

    /// Decode a module from its JSON interchange form.
    ///
    /// Opcode codes outside the IR's closed set fail with
    /// [`Error::UnknownOperation`].
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawModule =
            serde_json::from_str(json).map_err(|e| Error::InvalidModule(e.to_string()))?;
        let text = raw
            .text
            .into_iter()
            .map(Inst::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            text,
            data: raw.data,
        })
    }

    /// Encode the module as JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidModule(e.to_string()))
    }

    /// Check the block layout contract the code generator relies on
    pub fn validate(&self, word: WordSize) -> Result<()> {
        if self.data.len() as u64 > word.capacity() {
            return Err(Error::DataSegmentTooLarge {
                len: self.data.len(),
                capacity: word.capacity(),
            });
        }

        if !self.text.is_empty() && !self.text.iter().any(|inst| inst.pc == 0) {
            return Err(Error::EntryBlockMissing);
        }

        // Each pc opens exactly one `run` alternative.
        let mut seen = HashSet::new();
        let mut prev = None;
        for inst in &self.text {
            if prev != Some(inst.pc) {
                if !seen.insert(inst.pc) {
                    return Err(Error::BlockReopened { pc: inst.pc });
                }
                prev = Some(inst.pc);
            }
        }

        // A jump ends its block; only DUMP may trail it.
        let mut jumped = None;
        for inst in &self.text {
            if jumped != Some(inst.pc) {
                jumped = None;
            }
            if jumped.is_some() && inst.op != Op::Dump {
                return Err(Error::InstructionAfterJump {
                    pc: inst.pc,
                    op: inst.op,
                });
            }
            if inst.op.is_jump() {
                jumped = Some(inst.pc);
            }
        }

        Ok(())
    }

    /// Number of distinct blocks
    pub fn block_count(&self) -> usize {
        let mut count = 0;
        let mut prev = None;
        for inst in &self.text {
            if prev != Some(inst.pc) {
                count += 1;
                prev = Some(inst.pc);
            }
        }
        count
    }
}
