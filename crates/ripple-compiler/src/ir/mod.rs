//! Intermediate Representation (IR) for Ripple
//!
//! A block-structured IR: each function is an ordered list of basic blocks,
//! each block a sequence of instructions closed by a terminator.
//!
//! # Structure
//!
//! - `IrModule` - Top-level container for a compiled module
//! - `IrFunction` - A function with parameters and basic blocks
//! - `BasicBlock` - A sequence of instructions with a single entry and exit
//! - `Instruction` - One primary result identifier computed from an `InstrValue`
//! - `Identifier` - Value identifier with an optional source-level name

pub mod block;
pub mod builder;
pub mod function;
pub mod instr;
pub mod module;
pub mod pretty;
pub mod renumber;
pub mod value;

pub use block::{BasicBlock, BlockId, SwitchCase, Terminator};
pub use builder::FunctionBuilder;
pub use function::IrFunction;
pub use instr::{
    BinaryOp, InstrValue, Instruction, InstructionId, InstructionKind, JsxAttribute, JsxTag,
    LValue, UnaryOp,
};
pub use module::IrModule;
pub use pretty::PrettyPrint;
pub use renumber::renumber_instructions;
pub use value::{Identifier, IdentifierId, IdentifierName, IrConstant};
