//! # IR to Haskell Compiler
//!
//! Lowers a register-machine IR module into a Haskell program that
//! reproduces its behavior bit for bit: wraparound arithmetic, word-addressed
//! memory and byte I/O.
//!
//! ## Architecture
//!
//! ```text
//! Module → validate → bootstrap (prelude, data) → blocks (driver) → catch-all
//! ```
//!
//! ## Usage
//!
//! ```
//! use hsgen::compiler::{CompileOptions, Compiler};
//! use hsgen::compiler::ir::{Inst, Module, Op, Reg};
//!
//! let module = Module::new(
//!     vec![
//!         Inst::new(0, Op::Mov, Reg::A, 72),
//!         Inst::new(0, Op::Putc, Reg::A, Reg::A),
//!         Inst::bare(0, Op::Exit),
//!     ],
//!     vec![],
//! );
//! let result = Compiler::new(CompileOptions::default()).compile(&module)?;
//! assert!(result.source.contains("putc 72"));
//! # Ok::<(), hsgen::Error>(())
//! ```

pub mod driver;
pub mod haskell;
pub mod ir;
pub mod writer;

pub use driver::{emit_main_loop, Backend};
pub use haskell::HaskellBackend;
pub use ir::{Inst, Module, Op, Reg, Value, WordSize};
pub use writer::CodeWriter;

use crate::{Error, Result};

/// Compilation options
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Machine word width in bits (1-32)
    pub word_bits: u32,
    /// Data words per line of the memory literal
    pub data_row_width: usize,
    /// Emit a `-- pc N: <inst>` comment for every instruction
    pub annotate: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            word_bits: 24,
            data_row_width: 10,
            annotate: false,
        }
    }
}

impl CompileOptions {
    /// Validated word size
    pub fn word_size(&self) -> Result<WordSize> {
        WordSize::new(self.word_bits).ok_or_else(|| {
            Error::options(format!(
                "word_bits must be between 1 and {}, got {}",
                WordSize::MAX_BITS,
                self.word_bits
            ))
        })
    }

    /// Check every option is in range
    pub fn validate(&self) -> Result<()> {
        self.word_size()?;
        if self.data_row_width == 0 {
            return Err(Error::options("data_row_width must be at least 1"));
        }
        Ok(())
    }
}

/// Compilation result with metadata
#[derive(Debug, Clone)]
pub struct CompileResult {
    /// Generated Haskell source
    pub source: String,
    /// Number of dispatch alternatives emitted (catch-all excluded)
    pub block_count: usize,
    /// Number of IR instructions consumed
    pub instruction_count: usize,
    /// Statements emitted inside block alternatives
    pub statement_count: usize,
}

/// IR to Haskell compiler
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Create a new compiler with options
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Options this compiler was built with
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile a module to Haskell source.
    ///
    /// Nothing is returned on failure: the source only exists once every
    /// block has been lowered.
    pub fn compile(&self, module: &Module) -> Result<CompileResult> {
        self.options.validate()?;
        let word = self.options.word_size()?;

        // Phase 1: Check block layout before producing any text
        module.validate(word)?;

        tracing::debug!(
            blocks = module.block_count(),
            instructions = module.text.len(),
            data_words = module.data.len(),
            word_bits = word.bits(),
            "compiling module"
        );

        let mut out = CodeWriter::new();
        let mut backend =
            HaskellBackend::new(word, self.options.data_row_width, self.options.annotate);

        // Phase 2: Prelude, memory image, entry call
        backend.emit_header(module, &mut out)?;

        // Phase 3: One alternative per block
        let block_count = emit_main_loop(&module.text, &mut backend, &mut out)?;

        // Phase 4: Close the last block and the dispatch function
        backend.emit_footer(&mut out)?;

        let statement_count = backend.statement_count();
        tracing::debug!(
            blocks = block_count,
            statements = statement_count,
            lines = out.line_count(),
            "module compiled"
        );

        Ok(CompileResult {
            source: out.finish(),
            block_count,
            instruction_count: module.text.len(),
            statement_count,
        })
    }

    /// Decode a JSON module and compile it
    pub fn compile_json(&self, json: &str) -> Result<CompileResult> {
        let module = Module::from_json(json)?;
        self.compile(&module)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}
