use super::ids::ResidueKey;
use thiserror::Error;

/// A coordinate that does not resolve to anything in a structure hierarchy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Structure '{name}' not found")]
    StructureNotFound { name: String },

    #[error("Model {model} not found")]
    ModelNotFound { model: usize },

    #[error("Chain '{chain}' not found in model {model}")]
    ChainNotFound { model: usize, chain: String },

    #[error("Residue {key} not found in chain '{chain}'")]
    ResidueNotFound { chain: String, key: ResidueKey },
}

/// Raised when a chain would end up holding two residues with one key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Residue {key} already exists in chain '{chain}'")]
pub struct DuplicateResidueError {
    pub chain: String,
    pub key: ResidueKey,
}
