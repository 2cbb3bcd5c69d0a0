//! IR Optimization Passes
//!
//! Provides optimizations on the IR before code generation.

mod reorder;

pub use reorder::{
    build_dependencies, classify, DependencyGraph, DependencyGraphBuilder, GlobalStore,
    InstructionReordering, Node, NodeKind, ReorderConfig, ReorderStats, Reorderability,
    ScheduledBlock, Scheduler,
};

use crate::error::CompileResult;
use crate::ir::IrModule;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optimization level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptLevel {
    /// No optimizations
    None,
    /// Basic optimizations (instruction reordering)
    #[default]
    Basic,
    /// Full optimizations
    Full,
}

/// Optimizer configuration, loadable from JSON
///
/// ```json
/// { "level": "basic", "reorder": { "serialize_side_effects": false } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub level: OptLevel,
    pub reorder: ReorderConfig,
}

impl OptimizerConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(source: &str) -> CompileResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Optimizer that runs multiple passes over the IR
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Create a new optimizer with the given configuration
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Create an optimizer with basic optimizations
    pub fn basic() -> Self {
        Self::new(OptimizerConfig::default())
    }

    /// Create an optimizer with no optimizations
    pub fn none() -> Self {
        Self::new(OptimizerConfig {
            level: OptLevel::None,
            ..OptimizerConfig::default()
        })
    }

    /// The active optimization level
    pub fn level(&self) -> OptLevel {
        self.config.level
    }

    /// Run all optimization passes on the module
    pub fn optimize(&self, module: &mut IrModule) -> CompileResult<OptStats> {
        let mut stats = OptStats::default();
        if self.config.level == OptLevel::None {
            return Ok(stats);
        }

        if self.config.reorder.enabled {
            let pass = InstructionReordering::new(self.config.reorder);
            stats.reorder = pass.run_module(module)?;
        }

        debug!(module = %module.name, level = ?self.config.level, "optimized module");
        Ok(stats)
    }
}

/// Statistics about optimizations performed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptStats {
    /// Instruction reordering counters
    pub reorder: ReorderStats,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::basic()
    }
}
