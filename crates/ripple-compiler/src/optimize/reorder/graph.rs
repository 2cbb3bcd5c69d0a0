//! Per-block dependency graph
//!
//! Maps every identifier defined in a block (instruction results and the
//! secondary bindings of stores and destructuring) to the identifiers that must
//! be emitted before it.

use super::classify::{classify, Reorderability};
use super::store::GlobalStore;
use super::ReorderConfig;
use crate::ir::{IdentifierId, Instruction};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::fmt;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// What a graph node contributes to the output when emitted
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Primary result of an instruction
    Owned(Instruction),
    /// Secondary binding produced as a side artifact of another instruction
    Virtual,
}

/// A value and the identifiers it depends on
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// May contain duplicates
    pub dependencies: Vec<IdentifierId>,
}

impl Node {
    fn virtual_node() -> Self {
        Node {
            kind: NodeKind::Virtual,
            dependencies: Vec::new(),
        }
    }

    /// The owning instruction, if any
    pub fn instruction(&self) -> Option<&Instruction> {
        match &self.kind {
            NodeKind::Owned(instr) => Some(instr),
            NodeKind::Virtual => None,
        }
    }

    pub fn into_instruction(self) -> Option<Instruction> {
        match self.kind {
            NodeKind::Owned(instr) => Some(instr),
            NodeKind::Virtual => None,
        }
    }

    /// Tier of the owning instruction; virtual nodes have none
    pub fn reorderability(&self) -> Option<Reorderability> {
        self.instruction().map(classify)
    }
}

/// Dependency map for one block, iterable in first-insertion order
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: FxIndexMap<IdentifierId, Node>,
}

impl DependencyGraph {
    pub fn get(&self, id: IdentifierId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: IdentifierId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Remove a node, keeping the insertion order of the rest intact
    pub fn take(&mut self, id: IdentifierId) -> Option<Node> {
        self.nodes.shift_remove(&id)
    }

    /// Ids still in the graph, most recently inserted first
    pub fn remaining_in_reverse(&self) -> Vec<IdentifierId> {
        self.nodes.keys().rev().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, node) in &self.nodes {
            let deps: Vec<String> = node.dependencies.iter().map(|d| d.to_string()).collect();
            match &node.kind {
                NodeKind::Owned(instr) => {
                    writeln!(f, "{} <- [{}] {}", id, deps.join(", "), instr)?
                }
                NodeKind::Virtual => writeln!(f, "{} <- [{}] <virtual>", id, deps.join(", "))?,
            }
        }
        Ok(())
    }
}

/// Build the dependency graph of one block's instructions
pub fn build_dependencies(
    instructions: Vec<Instruction>,
    global: &GlobalStore,
    config: &ReorderConfig,
) -> DependencyGraph {
    DependencyGraphBuilder::new(global, config.serialize_side_effects).build(instructions)
}

/// Builds the dependency graph of one block
///
/// Instructions must be added in their original order. Three kinds of edges are
/// recorded:
/// - every `None`-tier instruction depends on the previous one (when
///   `serialize_side_effects` is set)
/// - every reference to a named variable depends on the previous reference to
///   that name in this block
/// - every operand already defined in this block, or parked in the global store,
///   is a dependency of its consumer
pub struct DependencyGraphBuilder<'a> {
    graph: DependencyGraph,
    global: &'a GlobalStore,
    serialize_side_effects: bool,
    last_effect: Option<IdentifierId>,
    last_reference: FxHashMap<String, IdentifierId>,
}

impl<'a> DependencyGraphBuilder<'a> {
    pub fn new(global: &'a GlobalStore, serialize_side_effects: bool) -> Self {
        Self {
            graph: DependencyGraph::default(),
            global,
            serialize_side_effects,
            last_effect: None,
            last_reference: FxHashMap::default(),
        }
    }

    /// Build the graph for a whole instruction sequence
    pub fn build(mut self, instructions: Vec<Instruction>) -> DependencyGraph {
        for instr in instructions {
            self.add_instruction(instr);
        }
        self.graph
    }

    pub fn add_instruction(&mut self, instr: Instruction) {
        let id = instr.lvalue.id;
        let mut dependencies = Vec::new();

        if classify(&instr) == Reorderability::None {
            if let Some(previous) = self.last_effect {
                dependencies.push(previous);
                self.last_effect = Some(id);
            } else if self.serialize_side_effects {
                self.last_effect = Some(id);
            }
        }

        for operand in instr.value.operands() {
            if let Some(name) = operand.variable_name() {
                match self.last_reference.insert(name.to_string(), id) {
                    Some(previous) if previous != id => dependencies.push(previous),
                    Some(_) => {}
                    None => {
                        if self.is_known(operand.id) {
                            dependencies.push(operand.id);
                        }
                    }
                }
            } else if self.is_known(operand.id) {
                dependencies.push(operand.id);
            }
        }

        // Named targets must stay behind earlier references to the same name.
        let mut shadowed = Vec::new();
        let targets: Vec<_> = instr
            .value
            .lvalues()
            .into_iter()
            .map(|target| (target.id, target.variable_name().map(str::to_string)))
            .collect();

        let node = self
            .graph
            .nodes
            .entry(id)
            .or_insert_with(Node::virtual_node);
        node.kind = NodeKind::Owned(instr);
        node.dependencies.extend(dependencies);

        for (target, name) in targets {
            self.graph
                .nodes
                .entry(target)
                .or_insert_with(Node::virtual_node)
                .dependencies
                .push(id);

            if let Some(name) = name {
                if let Some(previous) = self.last_reference.insert(name, id) {
                    if previous != id {
                        shadowed.push(previous);
                    }
                }
            }
        }

        if let Some(node) = self.graph.nodes.get_mut(&id) {
            node.dependencies.extend(shadowed);
        }
    }

    fn is_known(&self, id: IdentifierId) -> bool {
        self.graph.contains(id) || self.global.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Identifier, InstrValue, InstructionKind, IrConstant, LValue};

    fn temp(id: u32) -> Identifier {
        Identifier::temporary(IdentifierId::new(id))
    }

    fn var(id: u32, name: &str) -> Identifier {
        Identifier::named(IdentifierId::new(id), name)
    }

    fn instr(lvalue: u32, value: InstrValue) -> Instruction {
        Instruction::new(temp(lvalue), value)
    }

    fn primitive(lvalue: u32) -> Instruction {
        instr(
            lvalue,
            InstrValue::Primitive {
                value: IrConstant::Number(lvalue as f64),
            },
        )
    }

    fn call(lvalue: u32, callee: u32, args: &[u32]) -> Instruction {
        instr(
            lvalue,
            InstrValue::CallExpression {
                callee: temp(callee),
                args: args.iter().map(|&a| temp(a)).collect(),
            },
        )
    }

    fn deps(graph: &DependencyGraph, id: u32) -> Vec<u32> {
        graph
            .get(IdentifierId::new(id))
            .map(|node| node.dependencies.iter().map(|d| d.as_u32()).collect())
            .unwrap_or_default()
    }

    fn build(instructions: Vec<Instruction>, serialize: bool) -> DependencyGraph {
        let global = GlobalStore::new();
        DependencyGraphBuilder::new(&global, serialize).build(instructions)
    }

    #[test]
    fn test_operand_edges_to_local_temporaries() {
        let graph = build(vec![primitive(0), primitive(1), call(2, 0, &[1])], true);
        assert_eq!(deps(&graph, 0), Vec::<u32>::new());
        assert_eq!(deps(&graph, 2), vec![0, 1]);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_external_operands_are_unconstrained() {
        // $50 was defined in an earlier block
        let graph = build(vec![call(1, 50, &[])], true);
        assert!(deps(&graph, 1).is_empty());
        assert!(!graph.contains(IdentifierId::new(50)));
    }

    #[test]
    fn test_operands_parked_in_global_store_are_dependencies() {
        let mut global = GlobalStore::new();
        global.defer(
            IdentifierId::new(7),
            Node {
                kind: NodeKind::Owned(primitive(7)),
                dependencies: vec![],
            },
        );
        let graph = DependencyGraphBuilder::new(&global, true).build(vec![call(8, 7, &[])]);
        assert_eq!(deps(&graph, 8), vec![7]);
    }

    #[test]
    fn test_side_effects_serialized() {
        let graph = build(
            vec![
                call(0, 100, &[]),
                primitive(1),
                call(2, 100, &[]),
                call(3, 100, &[]),
            ],
            true,
        );
        assert!(deps(&graph, 0).is_empty());
        assert_eq!(deps(&graph, 2), vec![0]);
        assert_eq!(deps(&graph, 3), vec![2]);
    }

    #[test]
    fn test_literal_cursor_never_records_side_effect_edges() {
        let graph = build(vec![call(0, 100, &[]), call(1, 100, &[])], false);
        assert!(deps(&graph, 0).is_empty());
        assert!(deps(&graph, 1).is_empty());
    }

    #[test]
    fn test_same_variable_references_are_chained() {
        let v = var(10, "v");
        let graph = build(
            vec![
                instr(0, InstrValue::LoadLocal { place: v.clone() }),
                primitive(1),
                instr(
                    2,
                    InstrValue::StoreLocal {
                        lvalue: LValue {
                            place: v.clone(),
                            kind: InstructionKind::Reassign,
                        },
                        value: temp(1),
                    },
                ),
                instr(3, InstrValue::LoadLocal { place: v }),
            ],
            true,
        );
        assert!(deps(&graph, 0).is_empty());
        assert_eq!(deps(&graph, 2), vec![1, 0]);
        assert_eq!(deps(&graph, 3), vec![2]);
        // The store target is a virtual node pointing back at the store
        let target = graph.get(IdentifierId::new(10)).unwrap();
        assert_eq!(target.kind, NodeKind::Virtual);
        assert_eq!(target.dependencies, vec![IdentifierId::new(2)]);
    }

    #[test]
    fn test_destructure_targets_are_virtual_nodes() {
        let graph = build(
            vec![
                primitive(0),
                instr(1, InstrValue::ArrayExpression { elements: vec![temp(0)] }),
                instr(
                    2,
                    InstrValue::Destructure {
                        kind: InstructionKind::Const,
                        pattern: vec![temp(3), temp(4)],
                        value: temp(1),
                    },
                ),
                call(5, 100, &[3]),
            ],
            true,
        );
        assert_eq!(deps(&graph, 3), vec![2]);
        assert_eq!(deps(&graph, 4), vec![2]);
        assert_eq!(deps(&graph, 5), vec![3]);
        assert!(graph.get(IdentifierId::new(4)).unwrap().instruction().is_none());
    }

    #[test]
    fn test_shadowing_declaration_waits_for_earlier_read() {
        let x = var(20, "x");
        let graph = build(
            vec![
                instr(0, InstrValue::LoadLocal { place: x.clone() }),
                instr(
                    1,
                    InstrValue::Destructure {
                        kind: InstructionKind::Const,
                        pattern: vec![x],
                        value: temp(50),
                    },
                ),
            ],
            true,
        );
        // The edge lives on the instruction, not on the binding
        assert_eq!(deps(&graph, 1), vec![0]);
        assert_eq!(deps(&graph, 20), vec![1]);
    }

    #[test]
    fn test_insertion_order_and_take() {
        let mut graph = build(vec![primitive(0), primitive(1), primitive(2)], true);
        assert_eq!(
            graph.remaining_in_reverse(),
            vec![IdentifierId(2), IdentifierId(1), IdentifierId(0)]
        );
        assert!(graph.take(IdentifierId(1)).is_some());
        assert!(graph.take(IdentifierId(1)).is_none());
        assert_eq!(
            graph.remaining_in_reverse(),
            vec![IdentifierId(2), IdentifierId(0)]
        );
    }

    #[test]
    fn test_display_dump() {
        let graph = build(vec![primitive(0), call(1, 0, &[])], true);
        let dump = graph.to_string();
        assert!(dump.contains("$1 <- [$0]"));
        assert!(dump.contains("Primitive 0"));
    }
}
