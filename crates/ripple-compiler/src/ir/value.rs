//! IR Values and Identifiers
//!
//! Defines the identifiers and constants referenced by IR instructions.

use std::fmt;

/// Identifier for one produced value in a function
///
/// Every instruction result and every binding produced by a destructuring
/// instruction has its own id. Ids are assigned before any optimization pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentifierId(pub u32);

impl IdentifierId {
    /// Create a new identifier ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for IdentifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Source-level name attached to an identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentifierName {
    /// A variable written by the user
    Named(String),
    /// A compiler temporary that was promoted to a name during lowering
    Promoted(String),
}

impl IdentifierName {
    /// The textual name
    pub fn value(&self) -> &str {
        match self {
            IdentifierName::Named(name) | IdentifierName::Promoted(name) => name,
        }
    }
}

/// A reference to a value: its id plus an optional variable name
///
/// All references to one source variable share the same id and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub id: IdentifierId,
    pub name: Option<IdentifierName>,
}

impl Identifier {
    /// Create an anonymous temporary
    pub fn temporary(id: IdentifierId) -> Self {
        Self { id, name: None }
    }

    /// Create a reference to a named source variable
    pub fn named(id: IdentifierId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(IdentifierName::Named(name.into())),
        }
    }

    /// Create a reference to a promoted temporary
    pub fn promoted(id: IdentifierId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(IdentifierName::Promoted(name.into())),
        }
    }

    /// The variable name, if this identifier is a user-level variable
    pub fn variable_name(&self) -> Option<&str> {
        match &self.name {
            Some(IdentifierName::Named(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}{}", name.value(), self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Constant values in IR
#[derive(Debug, Clone, PartialEq)]
pub enum IrConstant {
    /// Number (all numbers are f64 at the source level)
    Number(f64),
    /// String literal
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Null value
    Null,
    /// Undefined value
    Undefined,
}

impl fmt::Display for IrConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrConstant::Number(v) => write!(f, "{}", v),
            IrConstant::String(s) => write!(f, "\"{}\"", s.escape_default()),
            IrConstant::Boolean(b) => write!(f, "{}", b),
            IrConstant::Null => write!(f, "null"),
            IrConstant::Undefined => write!(f, "undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display() {
        assert_eq!(format!("{}", IdentifierId(42)), "$42");
        assert_eq!(format!("{}", Identifier::temporary(IdentifierId(3))), "$3");
        assert_eq!(format!("{}", Identifier::named(IdentifierId(1), "count")), "count$1");
    }

    #[test]
    fn test_variable_name_only_for_named() {
        assert_eq!(
            Identifier::named(IdentifierId(1), "x").variable_name(),
            Some("x")
        );
        assert_eq!(Identifier::promoted(IdentifierId(2), "#t2").variable_name(), None);
        assert_eq!(Identifier::temporary(IdentifierId(3)).variable_name(), None);
    }

    #[test]
    fn test_constant_display() {
        assert_eq!(format!("{}", IrConstant::Number(42.0)), "42");
        assert_eq!(format!("{}", IrConstant::Number(1.5)), "1.5");
        assert_eq!(format!("{}", IrConstant::Boolean(true)), "true");
        assert_eq!(format!("{}", IrConstant::Undefined), "undefined");
        assert_eq!(format!("{}", IrConstant::String("hi".to_string())), "\"hi\"");
    }
}
