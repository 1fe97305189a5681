//! # Haskell Backend
//!
//! Emits a Haskell program that simulates the IR. Registers become
//! immutable, versioned bindings threaded through a recursive `run`
//! function with one alternative per block; memory is an `IOUArray`
//! updated in place.
//!
//! ```text
//! run pc@3 a b c d bp sp mem = do
//!  let a1 = a `add` 1
//!  b1 <- A.readArray mem a1
//!  run (if b1 == 0 then 7 else succ pc) a1 b1 c d bp sp mem
//! ```

pub mod blocks;
pub mod bootstrap;
pub mod lower;
pub mod registers;

pub use blocks::BlockEmitter;
pub use lower::{lower_inst, Lowered};
pub use registers::RegisterVersions;

use super::driver::Backend;
use super::ir::{Inst, Module, WordSize};
use super::writer::CodeWriter;
use crate::Result;

/// Haskell target
#[derive(Debug)]
pub struct HaskellBackend {
    word: WordSize,
    data_row_width: usize,
    annotate: bool,
    blocks: BlockEmitter,
    lowered: usize,
}

impl HaskellBackend {
    /// Creates a backend for the given word size
    pub fn new(word: WordSize, data_row_width: usize, annotate: bool) -> Self {
        Self {
            word,
            data_row_width,
            annotate,
            blocks: BlockEmitter::new(),
            lowered: 0,
        }
    }

    /// Statements emitted inside block alternatives, fallthroughs included
    pub fn statement_count(&self) -> usize {
        self.lowered + self.blocks.fallthroughs()
    }
}

impl Backend for HaskellBackend {
    fn emit_header(&mut self, module: &Module, out: &mut CodeWriter) -> Result<()> {
        bootstrap::emit_bootstrap(&module.data, self.word, self.data_row_width, out);
        Ok(())
    }

    fn emit_pc_change(&mut self, pc: u32, out: &mut CodeWriter) -> Result<()> {
        self.blocks.open(pc, out);
        Ok(())
    }

    fn emit_inst(&mut self, inst: &Inst, out: &mut CodeWriter) -> Result<()> {
        let stmt = self.blocks.lower(inst, self.word)?;
        if self.annotate {
            out.emit_line(&format!("-- pc {}: {}", inst.pc, inst));
        }
        if let Some(stmt) = stmt {
            out.emit_line(&stmt);
            self.lowered += 1;
        }
        Ok(())
    }

    fn emit_footer(&mut self, out: &mut CodeWriter) -> Result<()> {
        self.blocks.finish(out);
        Ok(())
    }
}
