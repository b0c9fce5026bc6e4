use std::fmt;

/// The hetero-residue flag of a residue identifier.
///
/// Follows the PDB convention: residues read from `ATOM` records are standard,
/// `HETATM` waters are flagged as water, and every other `HETATM` residue carries
/// its residue name (rendered as `H_<name>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum HeteroFlag {
    #[default]
    Standard,
    Water,
    Hetero(String),
}

impl HeteroFlag {
    /// Returns `true` for the blank flag used by standard polymer residues.
    pub fn is_standard(&self) -> bool {
        matches!(self, HeteroFlag::Standard)
    }
}

impl fmt::Display for HeteroFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeteroFlag::Standard => write!(f, " "),
            HeteroFlag::Water => write!(f, "W"),
            HeteroFlag::Hetero(name) => write!(f, "H_{}", name),
        }
    }
}

/// Composite identifier of a residue within its chain.
///
/// Two residues of the same chain never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub hetero: HeteroFlag,
    pub number: isize,
    pub insertion: Option<char>, // Insertion code, `None` when blank
}

impl ResidueKey {
    pub fn new(hetero: HeteroFlag, number: isize, insertion: Option<char>) -> Self {
        Self {
            hetero,
            number,
            insertion,
        }
    }

    /// Key with a blank hetero flag and a blank insertion code.
    pub fn standard(number: isize) -> Self {
        Self::new(HeteroFlag::Standard, number, None)
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "('{}', {}, '{}')",
            self.hetero,
            self.number,
            self.insertion.unwrap_or(' ')
        )
    }
}
