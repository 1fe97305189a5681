//! Canonical relations for comparison and branch opcodes

use super::instruction::Op;
use crate::{Error, Result};

/// One of the six canonical relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl Relation {
    /// The complementary relation (`a R b` is false exactly when `a R' b` holds)
    pub fn negate(self) -> Self {
        match self {
            Relation::Eq => Relation::Ne,
            Relation::Ne => Relation::Eq,
            Relation::Lt => Relation::Ge,
            Relation::Gt => Relation::Le,
            Relation::Le => Relation::Gt,
            Relation::Ge => Relation::Lt,
        }
    }

    /// Evaluates the relation on two words
    pub fn holds(self, lhs: u64, rhs: u64) -> bool {
        match self {
            Relation::Eq => lhs == rhs,
            Relation::Ne => lhs != rhs,
            Relation::Lt => lhs < rhs,
            Relation::Gt => lhs > rhs,
            Relation::Le => lhs <= rhs,
            Relation::Ge => lhs >= rhs,
        }
    }
}

/// Maps a comparison or conditional-branch opcode to its canonical relation.
///
/// `EQ..GE` and `JEQ..JGE` share relations; `negate` flips the result.
pub fn normalize_cond(op: Op, negate: bool) -> Result<Relation> {
    let rel = match op {
        Op::Jeq | Op::Eq => Relation::Eq,
        Op::Jne | Op::Ne => Relation::Ne,
        Op::Jlt | Op::Lt => Relation::Lt,
        Op::Jgt | Op::Gt => Relation::Gt,
        Op::Jle | Op::Le => Relation::Le,
        Op::Jge | Op::Ge => Relation::Ge,
        op => return Err(Error::NotAComparison { op }),
    };
    Ok(if negate { rel.negate() } else { rel })
}
