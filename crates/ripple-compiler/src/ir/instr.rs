//! IR Instructions
//!
//! Every instruction produces one primary value (its `lvalue`) from an
//! `InstrValue`. Some values also bind secondary identifiers, such as the target
//! variable of a store or the slots of a destructuring pattern.

use super::value::{Identifier, IrConstant};
use std::fmt;

/// Position of an instruction in program order, assigned by renumbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct InstructionId(pub u32);

impl InstructionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// An instruction: `lvalue = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub id: InstructionId,
    pub lvalue: Identifier,
    pub value: InstrValue,
}

impl Instruction {
    /// Create an instruction with an unassigned position
    pub fn new(lvalue: Identifier, value: InstrValue) -> Self {
        Self {
            id: InstructionId::default(),
            lvalue,
            value,
        }
    }
}

/// How a variable binding is introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    Const,
    Let,
    Reassign,
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstructionKind::Const => "const",
            InstructionKind::Let => "let",
            InstructionKind::Reassign => "reassign",
        };
        write!(f, "{}", s)
    }
}

/// Target of a variable store or declaration
#[derive(Debug, Clone, PartialEq)]
pub struct LValue {
    pub place: Identifier,
    pub kind: InstructionKind,
}

/// Tag of a markup element
#[derive(Debug, Clone, PartialEq)]
pub enum JsxTag {
    /// Host element such as `div`
    BuiltIn(String),
    /// Component referenced through a value
    Component(Identifier),
}

/// A markup attribute: `name={place}`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxAttribute {
    pub name: String,
    pub place: Identifier,
}

/// The value kind computed by an instruction
#[derive(Debug, Clone, PartialEq)]
pub enum InstrValue {
    /// Literal constant
    Primitive { value: IrConstant },

    /// Raw text inside markup
    JsxText { value: String },

    /// Markup element: `<tag props...>children</tag>`
    JsxExpression {
        tag: JsxTag,
        props: Vec<JsxAttribute>,
        children: Option<Vec<Identifier>>,
    },

    /// Markup fragment: `<>children</>`
    JsxFragment { children: Vec<Identifier> },

    /// Template string: `quasis[0] ${subexprs[0]} quasis[1] ...`
    TemplateLiteral {
        quasis: Vec<String>,
        subexprs: Vec<Identifier>,
    },

    /// Read of a module-level or global binding
    LoadGlobal { name: String },

    /// Write of a module-level or global binding
    StoreGlobal { name: String, value: Identifier },

    /// Array literal: `[elements...]`
    ArrayExpression { elements: Vec<Identifier> },

    /// Object literal: `{ key: value, ... }`
    ObjectExpression { properties: Vec<(String, Identifier)> },

    /// Read of a local variable
    LoadLocal { place: Identifier },

    /// Write of a local variable: `lvalue = value`
    StoreLocal { lvalue: LValue, value: Identifier },

    /// Declaration of a local variable without an initializer
    DeclareLocal { lvalue: LValue },

    /// Destructuring bind: `[pattern...] = value`
    Destructure {
        kind: InstructionKind,
        pattern: Vec<Identifier>,
        value: Identifier,
    },

    /// Read of a variable captured by a closure
    LoadContext { place: Identifier },

    /// Write of a variable captured by a closure
    StoreContext { lvalue: LValue, value: Identifier },

    /// Function call: `callee(args)`
    CallExpression {
        callee: Identifier,
        args: Vec<Identifier>,
    },

    /// Method call: `receiver.property(args)`
    MethodCall {
        receiver: Identifier,
        property: String,
        args: Vec<Identifier>,
    },

    /// Binary operation: `left op right`
    BinaryExpression {
        op: BinaryOp,
        left: Identifier,
        right: Identifier,
    },

    /// Unary operation: `op operand`
    UnaryExpression { op: UnaryOp, operand: Identifier },

    /// Property read: `object.property`
    PropertyLoad { object: Identifier, property: String },

    /// Property write: `object.property = value`
    PropertyStore {
        object: Identifier,
        property: String,
        value: Identifier,
    },
}

impl InstrValue {
    /// Identifiers consumed by this value, in field order
    pub fn operands(&self) -> Vec<&Identifier> {
        match self {
            InstrValue::Primitive { .. }
            | InstrValue::JsxText { .. }
            | InstrValue::LoadGlobal { .. }
            | InstrValue::DeclareLocal { .. } => vec![],
            InstrValue::JsxExpression {
                tag,
                props,
                children,
            } => {
                let mut operands = Vec::new();
                if let JsxTag::Component(component) = tag {
                    operands.push(component);
                }
                operands.extend(props.iter().map(|attr| &attr.place));
                if let Some(children) = children {
                    operands.extend(children.iter());
                }
                operands
            }
            InstrValue::JsxFragment { children } => children.iter().collect(),
            InstrValue::TemplateLiteral { subexprs, .. } => subexprs.iter().collect(),
            InstrValue::StoreGlobal { value, .. } => vec![value],
            InstrValue::ArrayExpression { elements } => elements.iter().collect(),
            InstrValue::ObjectExpression { properties } => {
                properties.iter().map(|(_, value)| value).collect()
            }
            InstrValue::LoadLocal { place } | InstrValue::LoadContext { place } => vec![place],
            InstrValue::StoreLocal { value, .. }
            | InstrValue::StoreContext { value, .. }
            | InstrValue::Destructure { value, .. } => vec![value],
            InstrValue::CallExpression { callee, args } => {
                let mut operands = vec![callee];
                operands.extend(args.iter());
                operands
            }
            InstrValue::MethodCall { receiver, args, .. } => {
                let mut operands = vec![receiver];
                operands.extend(args.iter());
                operands
            }
            InstrValue::BinaryExpression { left, right, .. } => vec![left, right],
            InstrValue::UnaryExpression { operand, .. } => vec![operand],
            InstrValue::PropertyLoad { object, .. } => vec![object],
            InstrValue::PropertyStore { object, value, .. } => vec![object, value],
        }
    }

    /// Secondary identifiers bound by this value (store targets, pattern slots)
    pub fn lvalues(&self) -> Vec<&Identifier> {
        match self {
            InstrValue::StoreLocal { lvalue, .. }
            | InstrValue::DeclareLocal { lvalue }
            | InstrValue::StoreContext { lvalue, .. } => vec![&lvalue.place],
            InstrValue::Destructure { pattern, .. } => pattern.iter().collect(),
            _ => vec![],
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    StrictEqual,
    StrictNotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::StrictEqual => "===",
            BinaryOp::StrictNotEqual => "!==",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
        };
        write!(f, "{}", s)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Numeric negation (-)
    Neg,
    /// Logical not (!)
    Not,
    /// Bitwise not (~)
    BitNot,
    /// typeof
    Typeof,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Typeof => "typeof ",
        };
        write!(f, "{}", s)
    }
}
