use pdbgraft::engine::plan as core_plan;
use serde::Deserialize;
use std::fmt;

/// A coordinate field that authors may write either as a TOML integer or string.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FileScalar {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FileScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileScalar::Integer(value) => write!(f, "{}", value),
            FileScalar::Text(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileStructure {
    pub name: String,
    pub file: String,
}

impl From<FileStructure> for core_plan::StructureEntry {
    fn from(p: FileStructure) -> Self {
        Self {
            name: p.name,
            file: p.file,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileLocation {
    pub structure: String,
    pub model: FileScalar,
    pub chain: String,
    pub residue: FileScalar,
}

impl From<FileLocation> for core_plan::LocationEntry {
    fn from(p: FileLocation) -> Self {
        Self {
            structure: p.structure,
            model: p.model.to_string(),
            chain: p.chain,
            residue: p.residue.to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOperation {
    pub kind: String,
    pub target: FileLocation,
    pub source: FileLocation,
}

impl From<FileOperation> for core_plan::OperationEntry {
    fn from(p: FileOperation) -> Self {
        Self {
            kind: p.kind,
            target: p.target.into(),
            source: p.source.into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutput {
    pub name: String,
    pub file: String,
}

impl From<FileOutput> for core_plan::OutputEntry {
    fn from(p: FileOutput) -> Self {
        Self {
            name: p.name,
            file: p.file,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilePlan {
    #[serde(default)]
    pub structures: Vec<FileStructure>,
    #[serde(default)]
    pub operations: Vec<FileOperation>,
    #[serde(default)]
    pub outputs: Vec<FileOutput>,
}

impl From<FilePlan> for core_plan::Plan {
    fn from(p: FilePlan) -> Self {
        Self {
            structures: p.structures.into_iter().map(Into::into).collect(),
            operations: p.operations.into_iter().map(Into::into).collect(),
            outputs: p.outputs.into_iter().map(Into::into).collect(),
        }
    }
}
