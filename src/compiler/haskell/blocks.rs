//! Block emitter
//!
//! Every block becomes one alternative of the `run` dispatch function,
//! pattern-matched on its pc. Control flow between blocks is a tail call to
//! `run` carrying the current version of every register.

use super::lower::lower_inst;
use super::registers::RegisterVersions;
use crate::compiler::ir::{Inst, WordSize};
use crate::compiler::writer::CodeWriter;
use crate::Result;

/// Tracks the block being emitted and whether it still needs a fallthrough
#[derive(Debug, Default)]
pub struct BlockEmitter {
    regs: RegisterVersions,
    open_pc: Option<u32>,
    pending_fallthrough: bool,
    fallthroughs: usize,
}

impl BlockEmitter {
    /// Creates an emitter with no block open
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the current block, if any, and opens the alternative for `pc`
    pub fn open(&mut self, pc: u32, out: &mut CodeWriter) {
        self.close(out);
        self.regs.reset();

        out.emit_line("");
        out.emit_line(&format!("run pc@{} {} mem = do", pc, self.regs.vector()));
        out.inc_indent();

        self.open_pc = Some(pc);
        self.pending_fallthrough = true;
        tracing::trace!(pc, "opened block");
    }

    /// Lowers one instruction of the open block, returning its statement
    pub fn lower(&mut self, inst: &Inst, word: WordSize) -> Result<Option<String>> {
        let regs = std::mem::take(&mut self.regs);
        let lowered = lower_inst(inst, regs, word)?;
        self.regs = lowered.regs;

        if lowered.transfers_control {
            self.pending_fallthrough = false;
        } else if lowered.stmt.is_some() {
            // Module::validate keeps statements from following a jump.
            self.pending_fallthrough = true;
        }
        Ok(lowered.stmt)
    }

    /// Closes the last block and emits the catch-all alternative
    pub fn finish(&mut self, out: &mut CodeWriter) {
        self.close(out);
        out.emit_line("");
        out.emit_line("run _ _ _ _ _ _ _ _ = return ()");
    }

    /// Register state of the open block
    pub fn registers(&self) -> &RegisterVersions {
        &self.regs
    }

    /// pc of the open block
    pub fn open_pc(&self) -> Option<u32> {
        self.open_pc
    }

    /// Whether the open block would fall through if closed now
    pub fn pending_fallthrough(&self) -> bool {
        self.pending_fallthrough
    }

    /// Number of fallthrough dispatches emitted so far
    pub fn fallthroughs(&self) -> usize {
        self.fallthroughs
    }

    fn close(&mut self, out: &mut CodeWriter) {
        if self.open_pc.take().is_none() {
            return;
        }
        if self.pending_fallthrough {
            out.emit_line(&format!("run (succ pc) {} mem", self.regs.vector()));
            self.fallthroughs += 1;
        }
        self.pending_fallthrough = false;
        out.dec_indent();
    }
}
