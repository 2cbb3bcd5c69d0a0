//! Cross-block store for globally reorderable values
//!
//! One store lives for a single function-level run. A block that does not need
//! one of its `Global` values parks the node here; any later block whose
//! emission walk demands the value takes it back out.

use super::graph::Node;
use crate::ir::{IdentifierId, Instruction};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct GlobalStore {
    nodes: FxHashMap<IdentifierId, Node>,
}

impl GlobalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a node its originating block did not emit
    pub fn defer(&mut self, id: IdentifierId, node: Node) {
        self.nodes.insert(id, node);
    }

    /// Remove and return a parked node
    pub fn take(&mut self, id: IdentifierId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    pub fn contains(&self, id: IdentifierId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Empty the store, returning the instructions no block ever demanded,
    /// ordered by result identifier
    pub fn drain_unused(&mut self) -> Vec<Instruction> {
        let mut unused: Vec<Instruction> = self
            .nodes
            .drain()
            .filter_map(|(_, node)| node.into_instruction())
            .collect();
        unused.sort_by_key(|instr| instr.lvalue.id);
        unused
    }
}
