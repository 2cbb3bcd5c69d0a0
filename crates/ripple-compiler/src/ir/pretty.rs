//! Pretty-printing for IR
//!
//! Provides human-readable output for debugging IR structures.

use super::block::BasicBlock;
use super::function::IrFunction;
use super::instr::{InstrValue, Instruction, JsxTag};
use super::module::IrModule;
use super::value::Identifier;
use std::fmt::{self, Write};

/// Trait for pretty-printing IR constructs
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for IrModule {
    fn pretty_print(&self) -> String {
        let mut output = String::new();
        writeln!(output, "; module {}", self.name).unwrap();
        writeln!(output).unwrap();

        for func in &self.functions {
            output.push_str(&func.pretty_print());
            writeln!(output).unwrap();
        }

        output
    }
}

impl PrettyPrint for IrFunction {
    fn pretty_print(&self) -> String {
        let mut output = String::new();

        writeln!(output, "fn {}({}) {{", self.name, join(&self.params)).unwrap();

        for block in &self.blocks {
            output.push_str(&block.pretty_print_indented(2));
        }

        writeln!(output, "}}").unwrap();
        output
    }
}

impl BasicBlock {
    fn pretty_print_indented(&self, indent: usize) -> String {
        let mut output = String::new();
        let prefix = " ".repeat(indent);

        if let Some(label) = &self.label {
            writeln!(output, "{}{}: ; {}", prefix, self.id, label).unwrap();
        } else {
            writeln!(output, "{}{}:", prefix, self.id).unwrap();
        }

        for instr in &self.instructions {
            writeln!(output, "{}  {}", prefix, instr).unwrap();
        }

        writeln!(output, "{}  {} {}", prefix, self.terminator_id, self.terminator).unwrap();

        output
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {}", self.id, self.lvalue, self.value)
    }
}

impl fmt::Display for InstrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrValue::Primitive { value } => write!(f, "Primitive {}", value),
            InstrValue::JsxText { value } => write!(f, "JsxText {:?}", value),
            InstrValue::JsxExpression {
                tag,
                props,
                children,
            } => {
                let tag = match tag {
                    JsxTag::BuiltIn(name) => name.clone(),
                    JsxTag::Component(place) => place.to_string(),
                };
                write!(f, "JsxExpression <{}", tag)?;
                for prop in props {
                    write!(f, " {}={{{}}}", prop.name, prop.place)?;
                }
                match children {
                    Some(children) => write!(f, ">{}</{}>", join(children), tag),
                    None => write!(f, " />"),
                }
            }
            InstrValue::JsxFragment { children } => {
                write!(f, "JsxFragment <>{}</>", join(children))
            }
            InstrValue::TemplateLiteral { quasis, subexprs } => {
                write!(f, "TemplateLiteral `")?;
                for (i, quasi) in quasis.iter().enumerate() {
                    write!(f, "{}", quasi)?;
                    if let Some(expr) = subexprs.get(i) {
                        write!(f, "${{{}}}", expr)?;
                    }
                }
                write!(f, "`")
            }
            InstrValue::LoadGlobal { name } => write!(f, "LoadGlobal {}", name),
            InstrValue::StoreGlobal { name, value } => {
                write!(f, "StoreGlobal {} = {}", name, value)
            }
            InstrValue::ArrayExpression { elements } => {
                write!(f, "Array [{}]", join(elements))
            }
            InstrValue::ObjectExpression { properties } => {
                let fields: Vec<String> = properties
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "Object {{ {} }}", fields.join(", "))
            }
            InstrValue::LoadLocal { place } => write!(f, "LoadLocal {}", place),
            InstrValue::StoreLocal { lvalue, value } => {
                write!(f, "StoreLocal {} {} = {}", lvalue.kind, lvalue.place, value)
            }
            InstrValue::DeclareLocal { lvalue } => {
                write!(f, "DeclareLocal {} {}", lvalue.kind, lvalue.place)
            }
            InstrValue::Destructure {
                kind,
                pattern,
                value,
            } => write!(f, "Destructure {} [{}] = {}", kind, join(pattern), value),
            InstrValue::LoadContext { place } => write!(f, "LoadContext {}", place),
            InstrValue::StoreContext { lvalue, value } => {
                write!(f, "StoreContext {} {} = {}", lvalue.kind, lvalue.place, value)
            }
            InstrValue::CallExpression { callee, args } => {
                write!(f, "Call {}({})", callee, join(args))
            }
            InstrValue::MethodCall {
                receiver,
                property,
                args,
            } => write!(f, "MethodCall {}.{}({})", receiver, property, join(args)),
            InstrValue::BinaryExpression { op, left, right } => {
                write!(f, "Binary {} {} {}", left, op, right)
            }
            InstrValue::UnaryExpression { op, operand } => {
                write!(f, "Unary {}{}", op, operand)
            }
            InstrValue::PropertyLoad { object, property } => {
                write!(f, "PropertyLoad {}.{}", object, property)
            }
            InstrValue::PropertyStore {
                object,
                property,
                value,
            } => write!(f, "PropertyStore {}.{} = {}", object, property, value),
        }
    }
}

fn join(places: &[Identifier]) -> String {
    let parts: Vec<String> = places.iter().map(|p| p.to_string()).collect();
    parts.join(", ")
}
