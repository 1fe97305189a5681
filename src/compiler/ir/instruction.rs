//! IR instruction definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR operation
///
/// Discriminants are the IR's numeric opcode codes. Code 15 is unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
#[repr(u8)]
pub enum Op {
    // Register and memory
    /// Copy: dst = src
    Mov = 0,
    /// Addition with wraparound: dst = dst + src
    Add = 1,
    /// Subtraction with wraparound: dst = dst - src
    Sub = 2,
    /// Load word: dst = mem[src]
    Load = 3,
    /// Store word: mem[src] = dst
    Store = 4,

    // I/O
    /// Write the low 8 bits of src as one byte
    Putc = 5,
    /// Read one byte into dst (0 at end of input)
    Getc = 6,
    /// Terminate the program
    Exit = 7,

    // Control flow
    /// Jump if dst == src
    Jeq = 8,
    /// Jump if dst != src
    Jne = 9,
    /// Jump if dst < src
    Jlt = 10,
    /// Jump if dst > src
    Jgt = 11,
    /// Jump if dst <= src
    Jle = 12,
    /// Jump if dst >= src
    Jge = 13,
    /// Unconditional jump
    Jmp = 14,

    // Comparison (dst = dst op src, result is 0 or 1)
    /// Equality
    Eq = 16,
    /// Not equal
    Ne = 17,
    /// Less than
    Lt = 18,
    /// Greater than
    Gt = 19,
    /// Less than or equal
    Le = 20,
    /// Greater than or equal
    Ge = 21,

    // Debug
    /// Diagnostic dump, ignored by code generation
    Dump = 22,
}

impl Op {
    /// All operations in opcode order
    pub const ALL: [Op; 22] = [
        Op::Mov,
        Op::Add,
        Op::Sub,
        Op::Load,
        Op::Store,
        Op::Putc,
        Op::Getc,
        Op::Exit,
        Op::Jeq,
        Op::Jne,
        Op::Jlt,
        Op::Jgt,
        Op::Jle,
        Op::Jge,
        Op::Jmp,
        Op::Eq,
        Op::Ne,
        Op::Lt,
        Op::Gt,
        Op::Le,
        Op::Ge,
        Op::Dump,
    ];

    /// Numeric opcode code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for conditional jumps and `JMP`
    pub fn is_jump(self) -> bool {
        matches!(
            self,
            Op::Jeq | Op::Jne | Op::Jlt | Op::Jgt | Op::Jle | Op::Jge | Op::Jmp
        )
    }

    /// True for the six conditional jumps
    pub fn is_conditional_jump(self) -> bool {
        self.is_jump() && self != Op::Jmp
    }

    /// True for the six value-producing comparisons
    pub fn is_comparison(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Lt | Op::Gt | Op::Le | Op::Ge)
    }

    /// Assembly mnemonic
    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Mov => "mov",
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Load => "load",
            Op::Store => "store",
            Op::Putc => "putc",
            Op::Getc => "getc",
            Op::Exit => "exit",
            Op::Jeq => "jeq",
            Op::Jne => "jne",
            Op::Jlt => "jlt",
            Op::Jgt => "jgt",
            Op::Jle => "jle",
            Op::Jge => "jge",
            Op::Jmp => "jmp",
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Lt => "lt",
            Op::Gt => "gt",
            Op::Le => "le",
            Op::Ge => "ge",
            Op::Dump => "dump",
        }
    }
}

impl TryFrom<u8> for Op {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Op::ALL
            .iter()
            .copied()
            .find(|op| op.code() == code)
            .ok_or(Error::UnknownOperation { code })
    }
}

impl From<Op> for u8 {
    fn from(op: Op) -> u8 {
        op.code()
    }
}

/// Machine register slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reg {
    /// Accumulator
    #[default]
    A,
    /// General purpose
    B,
    /// General purpose
    C,
    /// General purpose
    D,
    /// Base pointer
    Bp,
    /// Stack pointer
    Sp,
}

impl Reg {
    /// Number of register slots
    pub const COUNT: usize = 6;

    /// All slots in machine order
    pub const ALL: [Reg; Reg::COUNT] = [Reg::A, Reg::B, Reg::C, Reg::D, Reg::Bp, Reg::Sp];

    /// Position in the register vector
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase slot name
    pub fn name(self) -> &'static str {
        match self {
            Reg::A => "a",
            Reg::B => "b",
            Reg::C => "c",
            Reg::D => "d",
            Reg::Bp => "bp",
            Reg::Sp => "sp",
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instruction operand: register reference or immediate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    /// Register reference
    Reg(Reg),
    /// Immediate value (also used for jump targets)
    Imm(i64),
}

impl Default for Value {
    fn default() -> Self {
        Value::Imm(0)
    }
}

impl From<Reg> for Value {
    fn from(reg: Reg) -> Self {
        Value::Reg(reg)
    }
}

impl From<i64> for Value {
    fn from(imm: i64) -> Self {
        Value::Imm(imm)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Reg(reg) => write!(f, "{}", reg),
            Value::Imm(imm) => write!(f, "{}", imm),
        }
    }
}

/// A single IR instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inst {
    /// Block (program counter) this instruction belongs to
    pub pc: u32,
    /// Operation
    pub op: Op,
    /// Destination register (first operand)
    pub dst: Reg,
    /// Source operand
    pub src: Value,
    /// Jump target (jumps only)
    pub jmp: Value,
}

impl Inst {
    /// Creates a non-jump instruction
    pub fn new(pc: u32, op: Op, dst: Reg, src: impl Into<Value>) -> Self {
        Self {
            pc,
            op,
            dst,
            src: src.into(),
            jmp: Value::default(),
        }
    }

    /// Creates a conditional jump comparing `dst` with `src`
    pub fn branch(pc: u32, op: Op, dst: Reg, src: impl Into<Value>, target: impl Into<Value>) -> Self {
        Self {
            pc,
            op,
            dst,
            src: src.into(),
            jmp: target.into(),
        }
    }

    /// Creates an unconditional jump
    pub fn jmp(pc: u32, target: impl Into<Value>) -> Self {
        Self {
            pc,
            op: Op::Jmp,
            dst: Reg::A,
            src: Value::default(),
            jmp: target.into(),
        }
    }

    /// Creates an operand-less instruction (`EXIT`, `DUMP`)
    pub fn bare(pc: u32, op: Op) -> Self {
        Self::new(pc, op, Reg::A, 0)
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.op.mnemonic();
        match self.op {
            Op::Exit | Op::Dump => f.write_str(m),
            Op::Putc => write!(f, "{} {}", m, self.src),
            Op::Getc => write!(f, "{} {}", m, self.dst),
            Op::Jmp => write!(f, "{} {}", m, self.jmp),
            op if op.is_conditional_jump() => {
                write!(f, "{} {}, {}, {}", m, self.jmp, self.dst, self.src)
            }
            _ => write!(f, "{} {}, {}", m, self.dst, self.src),
        }
    }
}

/// Serialized instruction with an undecoded opcode
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawInst {
    pub pc: u32,
    pub op: u8,
    #[serde(default)]
    pub dst: Reg,
    #[serde(default)]
    pub src: Value,
    #[serde(default)]
    pub jmp: Value,
}

impl TryFrom<RawInst> for Inst {
    type Error = Error;

    fn try_from(raw: RawInst) -> Result<Self> {
        Ok(Inst {
            pc: raw.pc,
            op: Op::try_from(raw.op)?,
            dst: raw.dst,
            src: raw.src,
            jmp: raw.jmp,
        })
    }
}
