//! Reorderability classification
//!
//! Maps an instruction's value kind to how far the scheduler may move it.

use crate::ir::{InstrValue, Instruction};

/// Mobility tier of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reorderability {
    /// Must keep its order relative to every other `None` instruction of its block
    None,
    /// May move within its own block
    Local,
    /// Side-effect free and input independent; may be emitted at its first use
    /// anywhere later in the function
    Global,
}

/// Classify an instruction by its value kind
pub fn classify(instr: &Instruction) -> Reorderability {
    match &instr.value {
        InstrValue::Primitive { .. }
        | InstrValue::JsxText { .. }
        | InstrValue::JsxExpression { .. }
        | InstrValue::JsxFragment { .. }
        | InstrValue::TemplateLiteral { .. }
        | InstrValue::LoadGlobal { .. } => Reorderability::Global,

        InstrValue::ArrayExpression { .. }
        | InstrValue::ObjectExpression { .. }
        | InstrValue::LoadLocal { .. }
        | InstrValue::StoreLocal { .. }
        | InstrValue::Destructure { .. } => Reorderability::Local,

        InstrValue::StoreGlobal { .. }
        | InstrValue::DeclareLocal { .. }
        | InstrValue::LoadContext { .. }
        | InstrValue::StoreContext { .. }
        | InstrValue::CallExpression { .. }
        | InstrValue::MethodCall { .. }
        | InstrValue::BinaryExpression { .. }
        | InstrValue::UnaryExpression { .. }
        | InstrValue::PropertyLoad { .. }
        | InstrValue::PropertyStore { .. } => Reorderability::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Identifier, IdentifierId, InstructionKind, IrConstant, LValue};

    fn temp(id: u32) -> Identifier {
        Identifier::temporary(IdentifierId::new(id))
    }

    fn classify_value(value: InstrValue) -> Reorderability {
        classify(&Instruction::new(temp(100), value))
    }

    #[test]
    fn test_constant_like_values_are_global() {
        assert_eq!(
            classify_value(InstrValue::Primitive {
                value: IrConstant::Number(1.0)
            }),
            Reorderability::Global
        );
        assert_eq!(
            classify_value(InstrValue::LoadGlobal {
                name: "Math".to_string()
            }),
            Reorderability::Global
        );
        assert_eq!(
            classify_value(InstrValue::TemplateLiteral {
                quasis: vec!["a".to_string()],
                subexprs: vec![],
            }),
            Reorderability::Global
        );
        assert_eq!(
            classify_value(InstrValue::JsxFragment { children: vec![] }),
            Reorderability::Global
        );
    }

    #[test]
    fn test_variable_bindings_are_local() {
        let v = Identifier::named(IdentifierId::new(1), "v");
        assert_eq!(
            classify_value(InstrValue::LoadLocal { place: v.clone() }),
            Reorderability::Local
        );
        assert_eq!(
            classify_value(InstrValue::StoreLocal {
                lvalue: LValue {
                    place: v.clone(),
                    kind: InstructionKind::Reassign,
                },
                value: temp(2),
            }),
            Reorderability::Local
        );
        assert_eq!(
            classify_value(InstrValue::Destructure {
                kind: InstructionKind::Const,
                pattern: vec![v],
                value: temp(2),
            }),
            Reorderability::Local
        );
        assert_eq!(
            classify_value(InstrValue::ArrayExpression { elements: vec![] }),
            Reorderability::Local
        );
    }

    #[test]
    fn test_effects_are_not_reorderable() {
        assert_eq!(
            classify_value(InstrValue::CallExpression {
                callee: temp(0),
                args: vec![],
            }),
            Reorderability::None
        );
        assert_eq!(
            classify_value(InstrValue::LoadContext { place: temp(0) }),
            Reorderability::None
        );
        assert_eq!(
            classify_value(InstrValue::StoreGlobal {
                name: "g".to_string(),
                value: temp(0),
            }),
            Reorderability::None
        );
    }
}
