//! Basic Blocks and Control Flow
//!
//! Basic blocks are sequences of instructions with a single entry point
//! and a single exit point (the terminator).

use super::instr::{Instruction, InstructionId};
use super::value::Identifier;
use std::fmt;

/// Basic block identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub u32);

impl BlockId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// A basic block: sequence of instructions with single entry and exit
#[derive(Debug, Clone)]
pub struct BasicBlock {
    /// Unique identifier for this block
    pub id: BlockId,
    /// Optional label for debugging
    pub label: Option<String>,
    /// Instructions in this block (excluding terminator)
    pub instructions: Vec<Instruction>,
    /// How this block exits
    pub terminator: Terminator,
    /// Position of the terminator in program order
    pub terminator_id: InstructionId,
}

impl BasicBlock {
    /// Create a new empty basic block
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            label: None,
            instructions: Vec::new(),
            terminator: Terminator::Unreachable,
            terminator_id: InstructionId::default(),
        }
    }

    /// Add an instruction to this block
    pub fn add_instr(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    /// Set the terminator for this block
    pub fn set_terminator(&mut self, term: Terminator) {
        self.terminator = term;
    }

    /// Get the successor blocks
    pub fn successors(&self) -> Vec<BlockId> {
        self.terminator.successors()
    }

    /// Check if this block is terminated (not unreachable)
    pub fn is_terminated(&self) -> bool {
        !matches!(self.terminator, Terminator::Unreachable)
    }

    /// Get the number of instructions (excluding terminator)
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if this block has no instructions
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// One arm of a switch; `test: None` is the default arm
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Identifier>,
    pub block: BlockId,
}

/// Control flow terminator (ends a basic block)
#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    /// Unconditional jump to target block
    Goto(BlockId),

    /// Source-level `if`, joining at `fallthrough`
    If {
        test: Identifier,
        consequent: BlockId,
        alternate: BlockId,
        fallthrough: BlockId,
    },

    /// Conditional branch produced by logical and ternary expressions
    Branch {
        test: Identifier,
        consequent: BlockId,
        alternate: BlockId,
    },

    /// Return from function
    Return { value: Identifier },

    /// Throw an exception
    Throw { value: Identifier },

    /// Switch on a value
    Switch {
        test: Identifier,
        cases: Vec<SwitchCase>,
        fallthrough: BlockId,
    },

    /// Unreachable (placeholder before terminator is set)
    Unreachable,
}

impl Terminator {
    /// Identifiers read by this terminator, in operand order
    pub fn operands(&self) -> Vec<&Identifier> {
        match self {
            Terminator::If { test, .. } | Terminator::Branch { test, .. } => vec![test],
            Terminator::Return { value } | Terminator::Throw { value } => vec![value],
            Terminator::Switch { test, cases, .. } => {
                let mut operands = vec![test];
                operands.extend(cases.iter().filter_map(|case| case.test.as_ref()));
                operands
            }
            Terminator::Goto(_) | Terminator::Unreachable => vec![],
        }
    }

    /// Get all successor blocks
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            Terminator::Goto(target) => vec![*target],
            Terminator::If {
                consequent,
                alternate,
                ..
            }
            | Terminator::Branch {
                consequent,
                alternate,
                ..
            } => vec![*consequent, *alternate],
            Terminator::Switch { cases, .. } => cases.iter().map(|case| case.block).collect(),
            Terminator::Return { .. } | Terminator::Throw { .. } | Terminator::Unreachable => {
                vec![]
            }
        }
    }

    /// Join block of a structured `if` or `switch`
    pub fn fallthrough(&self) -> Option<BlockId> {
        match self {
            Terminator::If { fallthrough, .. } | Terminator::Switch { fallthrough, .. } => {
                Some(*fallthrough)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Goto(target) => write!(f, "goto {}", target),
            Terminator::If {
                test,
                consequent,
                alternate,
                fallthrough,
            } => write!(
                f,
                "if {} ? {} : {} fallthrough={}",
                test, consequent, alternate, fallthrough
            ),
            Terminator::Branch {
                test,
                consequent,
                alternate,
            } => write!(f, "branch {} ? {} : {}", test, consequent, alternate),
            Terminator::Return { value } => write!(f, "return {}", value),
            Terminator::Throw { value } => write!(f, "throw {}", value),
            Terminator::Switch {
                test,
                cases,
                fallthrough,
            } => {
                write!(f, "switch {} [", test)?;
                for (i, case) in cases.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match &case.test {
                        Some(test) => write!(f, "{} => {}", test, case.block)?,
                        None => write!(f, "_ => {}", case.block)?,
                    }
                }
                write!(f, "] fallthrough={}", fallthrough)
            }
            Terminator::Unreachable => write!(f, "unreachable"),
        }
    }
}
