//! Shared helpers for integration tests
//!
//! `HsSim` executes the restricted Haskell dialect the backend emits, so
//! tests can check what a generated program computes rather than only how
//! it reads. `reference_run` interprets the IR directly for comparison.

#![allow(dead_code)]

use hsgen::{Inst, Module, Op, Reg, Value};
use std::collections::HashMap;

const STEP_LIMIT: usize = 100_000;

/// Observable end state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Bytes written by `putc`
    pub output: Vec<u8>,
    /// Register vector passed to the final `run` call (`None` after `exit`)
    pub regs: Option<[u64; 6]>,
    /// Memory words written or initialized to non-zero values
    pub mem: HashMap<u64, u64>,
}

struct Block {
    params: Vec<String>,
    body: Vec<String>,
}

/// Interpreter for generated Haskell source
pub struct HsSim {
    mask: u64,
    data: Vec<u64>,
    blocks: HashMap<u64, Block>,
}

impl HsSim {
    pub fn parse(source: &str) -> Self {
        let mut mask = 0;
        let mut data = Vec::new();
        let mut blocks = HashMap::new();
        let mut in_data = false;
        let mut current: Option<u64> = None;

        for line in source.lines() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix("mem <- A.newListArray (0, ") {
                mask = rest.split(')').next().unwrap().parse().unwrap();
                in_data = true;
                continue;
            }
            if in_data {
                if trimmed.starts_with(']') {
                    in_data = false;
                } else {
                    data.extend(
                        trimmed
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(|s| s.parse::<u64>().unwrap()),
                    );
                }
                continue;
            }
            if let Some(rest) = line.strip_prefix("run pc@") {
                let mut words = rest.split_whitespace();
                let pc = words.next().unwrap().parse().unwrap();
                let params: Vec<String> = words.take(6).map(String::from).collect();
                blocks.insert(pc, Block { params, body: Vec::new() });
                current = Some(pc);
                continue;
            }
            if line.starts_with("run ") || line.is_empty() {
                current = None;
                continue;
            }
            if let Some(pc) = current {
                if !trimmed.starts_with("--") {
                    blocks.get_mut(&pc).unwrap().body.push(trimmed.to_string());
                }
            }
        }

        Self { mask, data, blocks }
    }

    pub fn run(&self, input: &[u8]) -> Outcome {
        let mut mem: HashMap<u64, u64> = self
            .data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| (i as u64, v))
            .collect();
        let mut input = input.iter().copied();
        let mut output = Vec::new();
        let mut pc = 0u64;
        let mut regs = [0u64; 6];

        for _ in 0..STEP_LIMIT {
            let Some(block) = self.blocks.get(&pc) else {
                return Outcome { output, regs: Some(regs), mem };
            };
            let mut env: HashMap<String, u64> = block
                .params
                .iter()
                .cloned()
                .zip(regs.iter().copied())
                .collect();
            env.insert("pc".into(), pc);

            let mut next = None;
            for stmt in &block.body {
                let t: Vec<&str> = stmt.split_whitespace().collect();
                let val = |env: &HashMap<String, u64>, tok: &str| -> u64 {
                    tok.parse().unwrap_or_else(|_| env[tok])
                };
                match t.as_slice() {
                    ["let", x, "=", "fromEnum", "$", l, op, r] => {
                        let v = cmp(op, val(&env, l), val(&env, r)) as u64;
                        env.insert(x.to_string(), v);
                    }
                    ["let", x, "=", l, "`add`", r] => {
                        let v = val(&env, l).wrapping_add(val(&env, r)) & self.mask;
                        env.insert(x.to_string(), v);
                    }
                    ["let", x, "=", l, "`sub`", r] => {
                        let v = val(&env, l).wrapping_sub(val(&env, r)) & self.mask;
                        env.insert(x.to_string(), v);
                    }
                    [x, "<-", "A.readArray", "mem", a] => {
                        let v = mem.get(&val(&env, a)).copied().unwrap_or(0);
                        env.insert(x.to_string(), v);
                    }
                    [x, "<-", "getc"] => {
                        let v = input.next().map(u64::from).unwrap_or(0);
                        env.insert(x.to_string(), v);
                    }
                    ["A.writeArray", "mem", a, v] => {
                        mem.insert(val(&env, a), val(&env, v));
                    }
                    ["putc", v] => output.push((val(&env, v) % 256) as u8),
                    ["exitSuccess"] => return Outcome { output, regs: None, mem },
                    ["run", "(if", l, op, r, "then", target, "else", "succ", "pc)", rest @ ..] => {
                        let to = if cmp(op, val(&env, l), val(&env, r)) {
                            val(&env, target)
                        } else {
                            pc + 1
                        };
                        next = Some((to, reg_args(&env, rest, val)));
                        break;
                    }
                    ["run", "(succ", "pc)", rest @ ..] => {
                        next = Some((pc + 1, reg_args(&env, rest, val)));
                        break;
                    }
                    ["run", target, rest @ ..] => {
                        next = Some((val(&env, target), reg_args(&env, rest, val)));
                        break;
                    }
                    other => panic!("unrecognized statement: {:?}", other),
                }
            }

            let (to, args) = next.expect("block ended without dispatch");
            pc = to;
            regs = args;
        }
        panic!("step limit exceeded");
    }
}

fn reg_args(
    env: &HashMap<String, u64>,
    rest: &[&str],
    val: impl Fn(&HashMap<String, u64>, &str) -> u64,
) -> [u64; 6] {
    assert_eq!(rest.len(), 7, "expected six registers and mem: {:?}", rest);
    assert_eq!(rest[6], "mem");
    let mut regs = [0; 6];
    for (slot, tok) in regs.iter_mut().zip(rest) {
        *slot = val(env, tok);
    }
    regs
}

fn cmp(op: &str, l: u64, r: u64) -> bool {
    match op {
        "==" => l == r,
        "/=" => l != r,
        "<" => l < r,
        ">" => l > r,
        "<=" => l <= r,
        ">=" => l >= r,
        other => panic!("unknown relation {}", other),
    }
}

/// Direct IR interpreter with 24-bit words
pub fn reference_run(module: &Module, input: &[u8]) -> Outcome {
    let mask = (1u64 << 24) - 1;
    let mut mem: HashMap<u64, u64> = module
        .data
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v != 0)
        .map(|(i, &v)| (i as u64, (v as u64) & mask))
        .collect();
    let mut input = input.iter().copied();
    let mut output = Vec::new();
    let mut regs = [0u64; 6];

    let mut starts: HashMap<u32, usize> = HashMap::new();
    for (i, inst) in module.text.iter().enumerate() {
        starts.entry(inst.pc).or_insert(i);
    }

    let get = |regs: &[u64; 6], v: &Value| match v {
        Value::Reg(r) => regs[r.index()],
        Value::Imm(i) => (*i as u64) & mask,
    };

    let mut pc = 0u64;
    for _ in 0..STEP_LIMIT {
        let Some(&start) = u32::try_from(pc).ok().and_then(|pc| starts.get(&pc)) else {
            return Outcome { output, regs: Some(regs), mem };
        };
        let mut next = pc + 1;
        for inst in module.text[start..].iter().take_while(|i| i.pc as u64 == pc) {
            let src = get(&regs, &inst.src);
            let dst = regs[inst.dst.index()];
            let d = inst.dst.index();
            match inst.op {
                Op::Mov => regs[d] = src,
                Op::Add => regs[d] = dst.wrapping_add(src) & mask,
                Op::Sub => regs[d] = dst.wrapping_sub(src) & mask,
                Op::Load => regs[d] = mem.get(&src).copied().unwrap_or(0),
                Op::Store => {
                    mem.insert(src, dst);
                }
                Op::Putc => output.push((src % 256) as u8),
                Op::Getc => regs[d] = input.next().map(u64::from).unwrap_or(0),
                Op::Exit => return Outcome { output, regs: None, mem },
                Op::Dump => {}
                Op::Jmp => {
                    next = get(&regs, &inst.jmp);
                    break;
                }
                op => {
                    let rel = hsgen::normalize_cond(op, false).unwrap();
                    let holds = rel.holds(dst, src);
                    if op.is_comparison() {
                        regs[d] = holds as u64;
                    } else {
                        if holds {
                            next = get(&regs, &inst.jmp);
                        }
                        break;
                    }
                }
            }
        }
        pc = next;
    }
    panic!("step limit exceeded");
}

/// Shorthand for building a block of instructions at one pc
pub fn at(pc: u32, ops: &[(Op, Reg, Value)]) -> Vec<Inst> {
    ops.iter()
        .map(|&(op, dst, src)| Inst::new(pc, op, dst, src))
        .collect()
}
