use super::atom::Atom;
use super::ids::ResidueKey;
use std::collections::HashMap;

/// A residue together with all of its atoms.
///
/// The residue owns its atoms; a `clone()` is a deep copy sharing no state
/// with the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub(crate) key: ResidueKey,            // Identity within the owning chain
    pub name: String,                      // Name of the residue (e.g., "ALA", "GLY")
    pub segment: String,                   // Segment identifier, usually blank
    atoms: Vec<Atom>,                      // Atoms in file order
    atom_map: HashMap<String, Vec<usize>>, // Map from atom name to indices into `atoms`
}

impl Residue {
    pub fn new(key: ResidueKey, name: &str) -> Self {
        Self {
            key,
            name: name.to_string(),
            segment: String::new(),
            atoms: Vec::new(),
            atom_map: HashMap::new(),
        }
    }

    pub fn key(&self) -> &ResidueKey {
        &self.key
    }

    /// Consumes a detached residue and returns it under a new identity.
    ///
    /// Taking `self` by value means a residue still owned by a chain cannot be
    /// re-keyed behind the chain's lookup index.
    pub fn with_key(mut self, key: ResidueKey) -> Self {
        self.key = key;
        self
    }

    pub fn add_atom(&mut self, atom: Atom) {
        let index = self.atoms.len();
        self.atom_map
            .entry(atom.name.clone())
            .or_default()
            .push(index);
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Mutable access to atom records. Atom names are fixed once added.
    pub fn atoms_mut(&mut self) -> impl Iterator<Item = &mut Atom> {
        self.atoms.iter_mut()
    }

    pub fn get_atoms_by_name(&self, name: &str) -> impl Iterator<Item = &Atom> {
        self.atom_map
            .get(name)
            .map(|indices| indices.iter().map(move |&i| &self.atoms[i]))
            .into_iter()
            .flatten()
    }

    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.get_atoms_by_name(name).next()
    }

    pub fn has_atom(&self, name: &str) -> bool {
        self.atom_map.contains_key(name)
    }
}
