//! Error types for the hsgen backend

use crate::compiler::ir::Op;
use thiserror::Error;

/// Code generation errors
///
/// Every variant is fatal: malformed input to the backend is a contract
/// violation by the IR producer, never a condition to recover from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Opcode value outside the closed set of IR operations
    ///
    /// **Triggered by:** Decoding a raw opcode code that names no operation
    /// **Example:** code `15` (the gap between `JMP` and `EQ`) or `99`
    #[error("Unknown operation: {code}")]
    UnknownOperation {
        /// Raw opcode code
        code: u8,
    },

    /// A relation was requested for an opcode that is neither a comparison
    /// nor a conditional branch
    #[error("Not a comparison or branch: {op:?}")]
    NotAComparison {
        /// Offending operation
        op: Op,
    },

    /// The serialized module could not be decoded
    #[error("Invalid module: {0}")]
    InvalidModule(String),

    /// The module has instructions but none at pc 0
    #[error("Entry block missing: no instruction at pc 0")]
    EntryBlockMissing,

    /// A block's instructions are split by another block
    ///
    /// **Triggered by:** pc 3, then pc 5, then pc 3 again
    #[error("Block {pc} reappears after another block: its instructions must be contiguous")]
    BlockReopened {
        /// pc of the split block
        pc: u32,
    },

    /// A jump was followed by another instruction in the same block
    #[error("Instruction {op:?} follows a jump inside block {pc}")]
    InstructionAfterJump {
        /// Block containing the jump
        pc: u32,
        /// Operation found after the jump
        op: Op,
    },

    /// The initial memory image does not fit the address space
    #[error("Data segment of {len} words exceeds address space of {capacity} words")]
    DataSegmentTooLarge {
        /// Number of data words
        len: usize,
        /// Number of addressable words
        capacity: u64,
    },

    /// Compile options out of range
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Create an invalid-options error with a message
    pub fn options(msg: impl Into<String>) -> Self {
        Error::InvalidOptions(msg.into())
    }
}

/// Result type for hsgen operations
pub type Result<T> = std::result::Result<T, Error>;
