//! # Intermediate Representation (IR)
//!
//! The register-machine IR consumed by the code generator: six word-sized
//! registers, one flat word-addressed memory, byte I/O and pc-addressed
//! blocks.
//!
//! ## Module Structure
//!
//! ```text
//! ir/
//! ├── mod.rs          # This file - module definition and re-exports
//! ├── instruction.rs  # Op, Reg, Value, Inst
//! ├── program.rs      # Module (text + data) and its layout checks
//! ├── cond.rs         # Relation, normalize_cond
//! └── word.rs         # WordSize (wraparound and address space)
//! ```

mod cond;
mod instruction;
mod program;
mod word;

pub use cond::{normalize_cond, Relation};
pub use instruction::{Inst, Op, Reg, Value};
pub use program::Module;
pub use word::WordSize;
