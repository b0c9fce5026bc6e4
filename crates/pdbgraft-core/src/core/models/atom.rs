use nalgebra::Point3;

/// Represents a single atom record of a residue.
///
/// Atoms are owned by their residue, so cloning a residue yields an
/// independent copy of all its atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number as read from the source file. Writers renumber on output.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// Alternate location indicator, `None` when blank.
    pub alt_loc: Option<char>,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub b_factor: f64,
    /// Element symbol (e.g., "C", "FE"), empty if the source did not provide one.
    pub element: String,
    /// Formal charge field as written in the source (e.g., "1+"), empty if blank.
    pub charge: String,
}

impl Atom {
    /// Creates a new `Atom` with full occupancy and a zero temperature factor.
    ///
    /// The element symbol is guessed from the first alphabetic character of the
    /// atom name, which is how most readers fill a blank element column.
    pub fn new(name: &str, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.to_string(),
            alt_loc: None,
            position,
            occupancy: 1.0,
            b_factor: 0.0,
            element: guess_element(name),
            charge: String::new(),
        }
    }
}

fn guess_element(atom_name: &str) -> String {
    atom_name
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}
