//! Instruction lowering table
//!
//! One rule per opcode. Each rule takes the register state by value and
//! hands it back with the statement it produced, so the table holds no state
//! of its own.

use super::registers::RegisterVersions;
use crate::compiler::ir::{normalize_cond, Inst, Op, Relation, Value, WordSize};
use crate::Result;

/// Result of lowering one instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lowered {
    /// Register state after the instruction
    pub regs: RegisterVersions,
    /// Emitted statement, if any (`MOV` and `DUMP` emit nothing)
    pub stmt: Option<String>,
    /// The statement already dispatches to the next block
    pub transfers_control: bool,
}

/// Haskell spelling of a relation
pub fn relation_str(rel: Relation) -> &'static str {
    match rel {
        Relation::Eq => "==",
        Relation::Ne => "/=",
        Relation::Lt => "<",
        Relation::Gt => ">",
        Relation::Le => "<=",
        Relation::Ge => ">=",
    }
}

fn cmp_op_str(op: Op) -> Result<&'static str> {
    Ok(relation_str(normalize_cond(op, false)?))
}

/// Renders an operand: a register's current name or a wrapped immediate
pub fn operand(value: &Value, regs: &RegisterVersions, word: WordSize) -> String {
    match value {
        Value::Reg(reg) => regs.current(*reg).to_string(),
        Value::Imm(imm) => word.wrap(*imm).to_string(),
    }
}

/// Lowers one instruction against the current register state
pub fn lower_inst(inst: &Inst, mut regs: RegisterVersions, word: WordSize) -> Result<Lowered> {
    let src = operand(&inst.src, &regs, word);
    let mut transfers_control = false;

    let stmt = match inst.op {
        Op::Mov => {
            regs.alias(inst.dst, src);
            None
        }

        Op::Add | Op::Sub => {
            let func = if inst.op == Op::Add { "add" } else { "sub" };
            let dst = regs.current(inst.dst).to_string();
            let new = regs.rebind(inst.dst);
            Some(format!("let {} = {} `{}` {}", new, dst, func, src))
        }

        Op::Load => {
            let new = regs.rebind(inst.dst);
            Some(format!("{} <- A.readArray mem {}", new, src))
        }

        Op::Store => Some(format!(
            "A.writeArray mem {} {}",
            src,
            regs.current(inst.dst)
        )),

        Op::Putc => Some(format!("putc {}", src)),

        Op::Getc => {
            let new = regs.rebind(inst.dst);
            Some(format!("{} <- getc", new))
        }

        Op::Exit => Some("exitSuccess".to_string()),

        Op::Dump => None,

        Op::Eq | Op::Ne | Op::Lt | Op::Gt | Op::Le | Op::Ge => {
            let rel = cmp_op_str(inst.op)?;
            let dst = regs.current(inst.dst).to_string();
            let new = regs.rebind(inst.dst);
            Some(format!("let {} = fromEnum $ {} {} {}", new, dst, rel, src))
        }

        Op::Jeq | Op::Jne | Op::Jlt | Op::Jgt | Op::Jle | Op::Jge => {
            transfers_control = true;
            Some(format!(
                "run (if {} {} {} then {} else succ pc) {} mem",
                regs.current(inst.dst),
                cmp_op_str(inst.op)?,
                src,
                operand(&inst.jmp, &regs, word),
                regs.vector()
            ))
        }

        Op::Jmp => {
            transfers_control = true;
            Some(format!(
                "run {} {} mem",
                operand(&inst.jmp, &regs, word),
                regs.vector()
            ))
        }
    };

    Ok(Lowered {
        regs,
        stmt,
        transfers_control,
    })
}
