//! # hsgen - Register-Machine IR to Haskell
//!
//! Lowers a small register-machine IR (six word registers, flat word
//! memory, byte I/O, pc-addressed blocks) into a Haskell program with no
//! mutable variables. Every register write becomes a fresh, versioned
//! binding; every block becomes one alternative of a recursive `run`
//! function that threads the register vector forward.
//!
//! ## Quick Start
//!
//! ```rust
//! use hsgen::{Compiler, Inst, Module, Op, Reg};
//!
//! # fn main() -> hsgen::Result<()> {
//! // A = 5; A += 3; putc A
//! let module = Module::new(
//!     vec![
//!         Inst::new(0, Op::Mov, Reg::A, 5),
//!         Inst::new(0, Op::Add, Reg::A, 3),
//!         Inst::new(0, Op::Putc, Reg::A, Reg::A),
//!     ],
//!     vec![],
//! );
//!
//! let result = Compiler::default().compile(&module)?;
//! assert!(result.source.contains("let a1 = 5 `add` 3"));
//! assert!(result.source.contains("putc a1"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Module → validate → prelude + data → driver ─┬─ pc change → BlockEmitter
//!                                              └─ inst      → lower_inst
//! ```
//!
//! ### Main Components
//!
//! - [`Module`] - Instruction stream plus initial memory image
//! - [`Compiler`] - Validates a module and drives the Haskell backend
//! - [`compiler::haskell::RegisterVersions`] - Per-block register versioning
//! - [`compiler::haskell::lower_inst`] - One lowering rule per opcode
//! - [`compiler::haskell::BlockEmitter`] - Block alternatives and fallthrough
//!
//! ## Error Handling
//!
//! Malformed input is always fatal and never yields partial output:
//!
//! ```rust
//! use hsgen::{Error, Module};
//!
//! let json = r#"{"text": [{"pc": 0, "op": 99}]}"#;
//! assert_eq!(
//!     Module::from_json(json).unwrap_err(),
//!     Error::UnknownOperation { code: 99 }
//! );
//! ```

/// Version of the hsgen crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod compiler;
pub mod error;

// Re-export main types
pub use compiler::ir::{normalize_cond, Relation};
pub use compiler::{CompileOptions, CompileResult, Compiler, Inst, Module, Op, Reg, Value, WordSize};
pub use error::{Error, Result};
