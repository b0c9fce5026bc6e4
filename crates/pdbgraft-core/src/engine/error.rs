use crate::core::models::error::LookupError;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Kind of plan entity a duplicated name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Structure,
    Operation,
    Output,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NameKind::Structure => "structure",
                NameKind::Operation => "operation",
                NameKind::Output => "output",
            }
        )
    }
}

/// Structurally invalid plan declarations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Operation '{operation}' references undeclared structure '{structure}'")]
    UnknownStructure { operation: String, structure: String },

    #[error("Unknown operation kind '{0}'")]
    UnknownOperationKind(String),

    #[error("Missing required value for '{0}'")]
    MissingValue(&'static str),
}

#[derive(Debug, Error)]
pub enum GraftError {
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to parse {field} '{value}' as an integer")]
    Parse { field: &'static str, value: String },

    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: NameKind, name: String },

    #[error("Failed to load structure '{name}' from '{location}': {source}")]
    Load {
        name: String,
        location: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error("Failed to write structure '{name}' to '{destination}': {source}")]
    Write {
        name: String,
        destination: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}
