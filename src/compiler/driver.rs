//! Block driver
//!
//! Walks the instruction stream in program order and notifies a [`Backend`]
//! at every block boundary and for every instruction.

use super::ir::{Inst, Module};
use super::writer::CodeWriter;
use crate::Result;

/// Callbacks a target implements to turn a module into text
pub trait Backend {
    /// Emits everything that precedes the first block
    fn emit_header(&mut self, module: &Module, out: &mut CodeWriter) -> Result<()>;

    /// Called when the instruction stream enters the block at `pc`
    fn emit_pc_change(&mut self, pc: u32, out: &mut CodeWriter) -> Result<()>;

    /// Called once per instruction, after its block has been entered
    fn emit_inst(&mut self, inst: &Inst, out: &mut CodeWriter) -> Result<()>;

    /// Emits everything that follows the last block
    fn emit_footer(&mut self, out: &mut CodeWriter) -> Result<()>;
}

/// Feeds `text` to `backend`, returning the number of blocks entered
pub fn emit_main_loop(
    text: &[Inst],
    backend: &mut dyn Backend,
    out: &mut CodeWriter,
) -> Result<usize> {
    let mut prev_pc = None;
    let mut blocks = 0;

    for inst in text {
        if prev_pc != Some(inst.pc) {
            backend.emit_pc_change(inst.pc, out)?;
            prev_pc = Some(inst.pc);
            blocks += 1;
        }
        backend.emit_inst(inst, out)?;
    }

    Ok(blocks)
}
