//! Instruction Reordering
//!
//! Regroups instructions so that values are computed close to where they are
//! used, without changing any observable ordering.
//!
//! Each block is processed once, in storage order:
//! 1. build a dependency graph over the block's instructions
//! 2. emit depth-first from the terminator's operands, then sweep the rest
//!
//! Constant-like (`Global`) values that a block does not need are parked in a
//! store shared by the whole function and materialized in the first later block
//! that demands them. Ones no block demands are dropped. Everything else stays
//! in its own block.

mod classify;
mod graph;
mod schedule;
mod store;

pub use classify::{classify, Reorderability};
pub use graph::{build_dependencies, DependencyGraph, DependencyGraphBuilder, Node, NodeKind};
pub use schedule::{ScheduledBlock, Scheduler};
pub use store::GlobalStore;

use crate::error::CompileResult;
use crate::ir::{renumber_instructions, IrFunction, IrModule};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use tracing::{debug, trace};

/// Configuration for the reordering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Run the pass at all
    pub enabled: bool,
    /// Chain every non-reorderable instruction to the previous one so their
    /// relative order is kept. When off, such instructions are only ordered by
    /// their operands and by shared variable names.
    pub serialize_side_effects: bool,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            serialize_side_effects: true,
        }
    }
}

/// Counters reported by one run of the pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReorderStats {
    /// Number of blocks processed
    pub blocks: usize,
    /// Instructions before reordering
    pub instructions_before: usize,
    /// Instructions after reordering
    pub instructions_after: usize,
    /// Instructions parked for a later block
    pub deferred: usize,
    /// Parked instructions materialized in a later block
    pub hoisted: usize,
    /// Parked instructions no block ever demanded
    pub eliminated: usize,
}

impl AddAssign for ReorderStats {
    fn add_assign(&mut self, other: Self) {
        self.blocks += other.blocks;
        self.instructions_before += other.instructions_before;
        self.instructions_after += other.instructions_after;
        self.deferred += other.deferred;
        self.hoisted += other.hoisted;
        self.eliminated += other.eliminated;
    }
}

/// The instruction reordering pass
#[derive(Debug, Clone, Default)]
pub struct InstructionReordering {
    config: ReorderConfig,
}

impl InstructionReordering {
    /// Create a new reordering pass
    pub fn new(config: ReorderConfig) -> Self {
        Self { config }
    }

    /// Reorder every function in a module
    pub fn run_module(&self, module: &mut IrModule) -> CompileResult<ReorderStats> {
        let mut stats = ReorderStats::default();
        for func in &mut module.functions {
            stats += self.run(func)?;
        }
        Ok(stats)
    }

    /// Reorder a function's instructions, then renumber them
    pub fn run(&self, func: &mut IrFunction) -> CompileResult<ReorderStats> {
        func.validate()?;

        let mut stats = ReorderStats {
            blocks: func.block_count(),
            instructions_before: func.instruction_count(),
            ..ReorderStats::default()
        };
        let mut global = GlobalStore::new();

        for block in func.blocks_mut() {
            let instructions = std::mem::take(&mut block.instructions);
            let graph = build_dependencies(instructions, &global, &self.config);
            trace!(block = %block.id, "dependency graph:\n{}", graph);

            let scheduled = Scheduler::new(graph, &mut global).schedule(&block.terminator);
            stats.deferred += scheduled.deferred;
            stats.hoisted += scheduled.hoisted;
            block.instructions = scheduled.instructions;
        }

        let unused = global.drain_unused();
        for instr in &unused {
            trace!(function = %func.name, "never demanded: {}", instr);
        }
        stats.eliminated = unused.len();
        stats.instructions_after = func.instruction_count();

        renumber_instructions(func);

        debug!(
            function = %func.name,
            blocks = stats.blocks,
            deferred = stats.deferred,
            hoisted = stats.hoisted,
            eliminated = stats.eliminated,
            "reordered instructions"
        );
        Ok(stats)
    }
}
