//! Already-parsed plan tree.
//!
//! Every coordinate field is kept as the text the plan author wrote; the
//! resolver parses numbers and builds operation names from this raw text.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub structures: Vec<StructureEntry>,
    pub operations: Vec<OperationEntry>,
    pub outputs: Vec<OutputEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureEntry {
    pub name: String,
    /// Location handed to the structure loader.
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEntry {
    pub kind: String,
    pub target: LocationEntry,
    pub source: LocationEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    pub structure: String,
    pub model: String,
    pub chain: String,
    pub residue: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    /// Name of the pooled structure to write.
    pub name: String,
    /// Destination handed to the structure writer.
    pub file: String,
}

impl LocationEntry {
    pub fn new(structure: &str, model: &str, chain: &str, residue: &str) -> Self {
        Self {
            structure: structure.to_string(),
            model: model.to_string(),
            chain: chain.to_string(),
            residue: residue.to_string(),
        }
    }

    fn joined(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.structure, self.model, self.chain, self.residue
        )
    }
}

impl OperationEntry {
    /// Registry name of the operation: `tS_tM_tC_tR-sS_sM_sC_sR` over the raw text fields.
    pub fn synthesized_name(&self) -> String {
        format!("{}-{}", self.target.joined(), self.source.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_name_uses_raw_text() {
        let entry = OperationEntry {
            kind: "residue-grafter".to_string(),
            target: LocationEntry::new("A", "0", "X", "5"),
            source: LocationEntry::new("B", "00", "Y", "10"),
        };
        assert_eq!(entry.synthesized_name(), "A_0_X_5-B_00_Y_10");
    }
}
