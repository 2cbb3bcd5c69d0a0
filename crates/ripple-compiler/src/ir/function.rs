//! IR Functions
//!
//! Functions in the IR contain parameters and an ordered list of basic blocks.

use super::block::{BasicBlock, BlockId};
use super::value::Identifier;
use crate::error::{CompileError, CompileResult};
use rustc_hash::{FxHashMap, FxHashSet};

/// An IR function
#[derive(Debug, Clone)]
pub struct IrFunction {
    /// Function name
    pub name: String,
    /// Parameter identifiers
    pub params: Vec<Identifier>,
    /// Basic blocks (in order)
    pub blocks: Vec<BasicBlock>,
    /// Entry block ID
    pub entry_block: BlockId,
    /// Block lookup map for fast access
    block_map: FxHashMap<BlockId, usize>,
}

impl IrFunction {
    /// Create a new function
    pub fn new(name: impl Into<String>, params: Vec<Identifier>) -> Self {
        Self {
            name: name.into(),
            params,
            blocks: Vec::new(),
            entry_block: BlockId(0),
            block_map: FxHashMap::default(),
        }
    }

    /// Add a basic block and return its ID
    pub fn add_block(&mut self, block: BasicBlock) -> BlockId {
        let id = block.id;
        let index = self.blocks.len();
        self.block_map.insert(id, index);
        self.blocks.push(block);
        id
    }

    /// Get a block by ID
    pub fn get_block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.block_map
            .get(&id)
            .and_then(|&idx| self.blocks.get(idx))
            .filter(|block| block.id == id)
    }

    /// Get the entry block
    pub fn entry(&self) -> Option<&BasicBlock> {
        self.get_block(self.entry_block)
    }

    /// Get the number of blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Iterate over all blocks
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.iter()
    }

    /// Iterate over all blocks mutably
    pub fn blocks_mut(&mut self) -> impl Iterator<Item = &mut BasicBlock> {
        self.blocks.iter_mut()
    }

    /// Compute the total number of instructions across all blocks
    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(|b| b.len()).sum()
    }

    /// Validate the function structure
    pub fn validate(&self) -> CompileResult<()> {
        if self.blocks.is_empty() {
            return Err(CompileError::InvalidIr {
                function: self.name.clone(),
                message: "function has no blocks".to_string(),
            });
        }

        if self.get_block(self.entry_block).is_none() {
            return Err(CompileError::InvalidIr {
                function: self.name.clone(),
                message: format!("entry block {} does not exist", self.entry_block),
            });
        }

        let mut defined = FxHashSet::default();
        for block in &self.blocks {
            if !block.is_terminated() {
                return Err(CompileError::UnterminatedBlock { block: block.id });
            }

            let targets = block
                .successors()
                .into_iter()
                .chain(block.terminator.fallthrough());
            for succ in targets {
                if self.get_block(succ).is_none() {
                    return Err(CompileError::MissingSuccessor {
                        block: block.id,
                        successor: succ,
                    });
                }
            }

            for instr in &block.instructions {
                if !defined.insert(instr.lvalue.id) {
                    return Err(CompileError::DuplicateDefinition {
                        id: instr.lvalue.id,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::block::Terminator;
    use crate::ir::instr::{InstrValue, Instruction};
    use crate::ir::value::{IdentifierId, IrConstant};

    fn temp(id: u32) -> Identifier {
        Identifier::temporary(IdentifierId::new(id))
    }

    fn primitive(id: u32) -> Instruction {
        Instruction::new(
            temp(id),
            InstrValue::Primitive {
                value: IrConstant::Number(id as f64),
            },
        )
    }

    #[test]
    fn test_function_new() {
        let func = IrFunction::new("test", vec![]);
        assert_eq!(func.name, "test");
        assert!(func.params.is_empty());
        assert_eq!(func.block_count(), 0);
    }

    #[test]
    fn test_function_add_block() {
        let mut func = IrFunction::new("test", vec![]);
        let mut block = BasicBlock::new(BlockId(0));
        block.add_instr(primitive(0));
        block.set_terminator(Terminator::Return { value: temp(0) });
        func.add_block(block);

        assert_eq!(func.block_count(), 1);
        assert_eq!(func.instruction_count(), 1);
        assert!(func.get_block(BlockId(0)).is_some());
        assert!(func.entry().is_some());
    }

    #[test]
    fn test_function_validate() {
        let mut func = IrFunction::new("test", vec![]);
        assert!(matches!(
            func.validate(),
            Err(CompileError::InvalidIr { .. })
        ));

        let mut block = BasicBlock::new(BlockId(0));
        block.set_terminator(Terminator::Return { value: temp(0) });
        func.add_block(block);
        assert!(func.validate().is_ok());
    }

    #[test]
    fn test_function_validate_missing_successor() {
        let mut func = IrFunction::new("test", vec![]);
        let mut block = BasicBlock::new(BlockId(0));
        block.set_terminator(Terminator::Goto(BlockId(999)));
        func.add_block(block);

        assert!(matches!(
            func.validate(),
            Err(CompileError::MissingSuccessor { .. })
        ));
    }

    #[test]
    fn test_function_validate_missing_fallthrough() {
        let mut func = IrFunction::new("test", vec![]);
        let mut entry = BasicBlock::new(BlockId(0));
        entry.set_terminator(Terminator::If {
            test: temp(0),
            consequent: BlockId(1),
            alternate: BlockId(1),
            fallthrough: BlockId(7),
        });
        func.add_block(entry);
        let mut then_block = BasicBlock::new(BlockId(1));
        then_block.set_terminator(Terminator::Return { value: temp(0) });
        func.add_block(then_block);

        assert!(matches!(
            func.validate(),
            Err(CompileError::MissingSuccessor { block, successor })
                if block == BlockId(0) && successor == BlockId(7)
        ));
    }

    #[test]
    fn test_get_block_after_direct_edit() {
        let mut func = IrFunction::new("test", vec![]);
        for id in 0..2 {
            let mut block = BasicBlock::new(BlockId(id));
            block.set_terminator(Terminator::Return { value: temp(0) });
            func.add_block(block);
        }

        func.blocks.remove(0);
        assert!(func.get_block(BlockId(0)).is_none());
        assert!(func.get_block(BlockId(1)).is_none());

        func.blocks.clear();
        assert!(func.get_block(BlockId(1)).is_none());
        assert!(matches!(
            func.validate(),
            Err(CompileError::InvalidIr { .. })
        ));
    }

    #[test]
    fn test_function_validate_unterminated() {
        let mut func = IrFunction::new("test", vec![]);
        func.add_block(BasicBlock::new(BlockId(0)));

        assert!(matches!(
            func.validate(),
            Err(CompileError::UnterminatedBlock { block }) if block == BlockId(0)
        ));
    }

    #[test]
    fn test_function_validate_duplicate_definition() {
        let mut func = IrFunction::new("test", vec![]);
        let mut block = BasicBlock::new(BlockId(0));
        block.add_instr(primitive(1));
        block.add_instr(primitive(1));
        block.set_terminator(Terminator::Return { value: temp(1) });
        func.add_block(block);

        assert!(matches!(
            func.validate(),
            Err(CompileError::DuplicateDefinition { id }) if id == IdentifierId(1)
        ));
    }
}
