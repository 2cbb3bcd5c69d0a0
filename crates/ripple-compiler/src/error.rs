//! Compilation errors

use crate::ir::{BlockId, IdentifierId};
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Invalid IR in function {function}: {message}")]
    InvalidIr { function: String, message: String },

    #[error("Block {block} is not terminated")]
    UnterminatedBlock { block: BlockId },

    #[error("Block {block} references non-existent successor {successor}")]
    MissingSuccessor { block: BlockId, successor: BlockId },

    #[error("Identifier {id} is defined by more than one instruction")]
    DuplicateDefinition { id: IdentifierId },

    #[error("Invalid optimizer configuration: {message}")]
    Config { message: String },
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        CompileError::Config {
            message: err.to_string(),
        }
    }
}
