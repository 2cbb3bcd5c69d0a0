//! Ripple Compiler - IR and Optimization Passes
//!
//! This crate holds the block-structured IR used by the Ripple compiler and the
//! optimization passes that run over it before code generation.
//!
//! - **IR** (`ir` module): identifiers, instructions, basic blocks, functions,
//!   plus the operand visitors, renumbering and pretty-printing services
//! - **Optimizer** (`optimize` module): pass driver and the instruction
//!   reordering pass
//!
//! # Example
//!
//! ```rust,ignore
//! use ripple_compiler::ir::{FunctionBuilder, IrConstant, Terminator};
//! use ripple_compiler::optimize::InstructionReordering;
//!
//! let mut builder = FunctionBuilder::new("main");
//! let x = builder.primitive(IrConstant::Number(1.0));
//! builder.terminate(Terminator::Return { value: x });
//! let mut func = builder.finish();
//!
//! InstructionReordering::default().run(&mut func)?;
//! ```

#![warn(rust_2018_idioms)]

pub mod error;
pub mod ir;
pub mod optimize;

pub use error::{CompileError, CompileResult};
pub use optimize::{
    InstructionReordering, OptLevel, OptStats, Optimizer, OptimizerConfig, ReorderConfig,
    ReorderStats,
};
