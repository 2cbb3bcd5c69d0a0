//! Demand-driven emission for one block
//!
//! Emission starts from the terminator's operands and pulls in every dependency
//! depth-first, so each value lands right after the values it needs. Whatever the
//! terminator does not reach is swept afterwards: `Global` values are parked in
//! the [`GlobalStore`] for a later block, everything else is emitted in place.

use super::classify::Reorderability;
use super::graph::{DependencyGraph, Node};
use super::store::GlobalStore;
use crate::ir::{IdentifierId, Instruction, Terminator};

/// Result of scheduling one block
#[derive(Debug, Default)]
pub struct ScheduledBlock {
    /// New instruction order for the block
    pub instructions: Vec<Instruction>,
    /// Instructions parked in the global store by this block
    pub deferred: usize,
    /// Instructions taken from the global store by this block
    pub hoisted: usize,
}

struct Frame {
    node: Node,
    next: usize,
}

pub struct Scheduler<'a> {
    graph: DependencyGraph,
    global: &'a mut GlobalStore,
    scheduled: ScheduledBlock,
}

impl<'a> Scheduler<'a> {
    pub fn new(graph: DependencyGraph, global: &'a mut GlobalStore) -> Self {
        Self {
            graph,
            global,
            scheduled: ScheduledBlock::default(),
        }
    }

    /// Produce the new instruction order for a block ending in `terminator`
    pub fn schedule(mut self, terminator: &Terminator) -> ScheduledBlock {
        for operand in terminator.operands() {
            self.emit(operand.id);
        }

        for id in self.graph.remaining_in_reverse() {
            let Some(node) = self.graph.get(id) else {
                continue;
            };
            if node.reorderability() == Some(Reorderability::Global) {
                if let Some(node) = self.graph.take(id) {
                    self.global.defer(id, node);
                    self.scheduled.deferred += 1;
                }
            } else {
                self.emit(id);
            }
        }

        self.scheduled
    }

    /// Emit `id` after all of its dependencies
    ///
    /// Ids that are unknown or already emitted are ignored. Uses an explicit
    /// stack; the order matches a recursive pre-order walk over dependencies.
    pub fn emit(&mut self, id: IdentifierId) {
        let Some(node) = self.take(id) else {
            return;
        };
        let mut stack = vec![Frame { node, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            if let Some(&dep) = frame.node.dependencies.get(frame.next) {
                frame.next += 1;
                if let Some(node) = self.take(dep) {
                    stack.push(Frame { node, next: 0 });
                }
            } else if let Some(frame) = stack.pop() {
                if let Some(instr) = frame.node.into_instruction() {
                    self.scheduled.instructions.push(instr);
                }
            }
        }
    }

    /// Remove `id` from both the block graph and the global store
    fn take(&mut self, id: IdentifierId) -> Option<Node> {
        let local = self.graph.take(id);
        let global = self.global.take(id);
        match (local, global) {
            (Some(node), _) => Some(node),
            (None, Some(node)) => {
                if node.instruction().is_some() {
                    self.scheduled.hoisted += 1;
                }
                Some(node)
            }
            (None, None) => None,
        }
    }
}
