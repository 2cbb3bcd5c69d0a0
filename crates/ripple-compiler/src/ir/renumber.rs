//! Instruction renumbering
//!
//! Passes that move instructions leave their `InstructionId`s out of program
//! order. Renumbering walks the blocks in storage order and assigns fresh,
//! strictly increasing ids to every instruction and terminator.

use super::function::IrFunction;
use super::instr::InstructionId;

/// Assign sequential instruction ids (starting at 1) in final program order
pub fn renumber_instructions(func: &mut IrFunction) {
    let mut next = 0u32;
    for block in func.blocks_mut() {
        for instr in &mut block.instructions {
            next += 1;
            instr.id = InstructionId::new(next);
        }
        next += 1;
        block.terminator_id = InstructionId::new(next);
    }
}
