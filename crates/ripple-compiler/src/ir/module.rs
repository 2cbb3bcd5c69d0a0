//! IR Module
//!
//! Top-level container for a compiled module.

use super::function::IrFunction;

/// An IR module (compilation unit)
#[derive(Debug, Clone)]
pub struct IrModule {
    /// Module name
    pub name: String,
    /// Functions in this module
    pub functions: Vec<IrFunction>,
}

impl IrModule {
    /// Create a new empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    /// Add a function to the module, returning its index
    pub fn add_function(&mut self, func: IrFunction) -> usize {
        let index = self.functions.len();
        self.functions.push(func);
        index
    }
}
