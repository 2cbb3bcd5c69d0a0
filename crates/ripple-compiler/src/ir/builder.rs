//! IR builder helpers
//!
//! Utilities for constructing IR functions block by block.

use super::block::{BasicBlock, BlockId, Terminator};
use super::function::IrFunction;
use super::instr::{InstrValue, Instruction, InstructionKind, LValue};
use super::value::{Identifier, IdentifierId, IrConstant};

/// Builder that simplifies IR function construction
///
/// Blocks are stored in creation order; `bb0` is the entry block.
pub struct FunctionBuilder {
    name: String,
    params: Vec<Identifier>,
    blocks: Vec<BasicBlock>,
    current_block: BlockId,
    next_identifier: u32,
}

impl FunctionBuilder {
    /// Create a builder with an empty entry block
    pub fn new(name: impl Into<String>) -> Self {
        FunctionBuilder {
            name: name.into(),
            params: Vec::new(),
            blocks: vec![BasicBlock::new(BlockId(0))],
            current_block: BlockId(0),
            next_identifier: 0,
        }
    }

    /// Declare a named parameter
    pub fn param(&mut self, name: &str) -> Identifier {
        let param = self.variable(name);
        self.params.push(param.clone());
        param
    }

    /// Create a new basic block
    pub fn create_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock::new(id));
        id
    }

    /// Switch to emitting into a different block
    pub fn switch_to_block(&mut self, block: BlockId) {
        self.current_block = block;
    }

    /// Get the current block ID
    pub fn current_block(&self) -> BlockId {
        self.current_block
    }

    /// Allocate a fresh anonymous temporary
    pub fn alloc_temp(&mut self) -> Identifier {
        Identifier::temporary(self.alloc_id())
    }

    /// Allocate a source variable; every reference to it should reuse the result
    pub fn variable(&mut self, name: &str) -> Identifier {
        Identifier::named(self.alloc_id(), name)
    }

    /// Emit a value into the current block and return its result temporary
    pub fn emit(&mut self, value: InstrValue) -> Identifier {
        let lvalue = self.alloc_temp();
        self.push(Instruction::new(lvalue.clone(), value));
        lvalue
    }

    /// Append a prebuilt instruction to the current block
    pub fn push(&mut self, instr: Instruction) {
        self.blocks[self.current_block.0 as usize].add_instr(instr);
    }

    /// Set the terminator for the current block
    pub fn terminate(&mut self, term: Terminator) {
        self.blocks[self.current_block.0 as usize].set_terminator(term);
    }

    /// Emit a literal constant
    pub fn primitive(&mut self, value: IrConstant) -> Identifier {
        self.emit(InstrValue::Primitive { value })
    }

    /// Emit a read of a global binding
    pub fn load_global(&mut self, name: &str) -> Identifier {
        self.emit(InstrValue::LoadGlobal {
            name: name.to_string(),
        })
    }

    /// Emit a function call
    pub fn call(&mut self, callee: &Identifier, args: &[Identifier]) -> Identifier {
        self.emit(InstrValue::CallExpression {
            callee: callee.clone(),
            args: args.to_vec(),
        })
    }

    /// Emit a read of a local variable
    pub fn load_local(&mut self, variable: &Identifier) -> Identifier {
        self.emit(InstrValue::LoadLocal {
            place: variable.clone(),
        })
    }

    /// Emit a write of a local variable
    pub fn store_local(
        &mut self,
        variable: &Identifier,
        value: &Identifier,
        kind: InstructionKind,
    ) -> Identifier {
        self.emit(InstrValue::StoreLocal {
            lvalue: LValue {
                place: variable.clone(),
                kind,
            },
            value: value.clone(),
        })
    }

    /// Emit an array literal
    pub fn array(&mut self, elements: &[Identifier]) -> Identifier {
        self.emit(InstrValue::ArrayExpression {
            elements: elements.to_vec(),
        })
    }

    /// Emit a destructuring bind into the given pattern slots
    pub fn destructure(&mut self, pattern: &[Identifier], value: &Identifier) -> Identifier {
        self.emit(InstrValue::Destructure {
            kind: InstructionKind::Const,
            pattern: pattern.to_vec(),
            value: value.clone(),
        })
    }

    /// Finish construction
    pub fn finish(self) -> IrFunction {
        let mut func = IrFunction::new(self.name, self.params);
        for block in self.blocks {
            func.add_block(block);
        }
        func
    }

    fn alloc_id(&mut self) -> IdentifierId {
        let id = IdentifierId::new(self.next_identifier);
        self.next_identifier += 1;
        id
    }
}
