use super::error::{DuplicateResidueError, LookupError};
use super::ids::ResidueKey;
use super::residue::Residue;
use std::collections::HashMap;

/// An ordered chain of residues with keyed lookup.
///
/// `residues` is the only storage; `residue_map` holds positions into it and is
/// maintained exclusively by the methods below, so ordered iteration and keyed
/// lookup always see the same residues.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: String,                          // Chain identifier (e.g., "A", "B")
    residues: Vec<Residue>,                  // Residues in file order
    residue_map: HashMap<ResidueKey, usize>, // Map from residue key to index in `residues`
}

impl Chain {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
            residue_map: HashMap::new(),
        }
    }

    /// Appends a residue at the end of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateResidueError`] if a residue with the same key is
    /// already present; the chain is left untouched.
    pub fn push(&mut self, residue: Residue) -> Result<usize, DuplicateResidueError> {
        if self.residue_map.contains_key(&residue.key) {
            return Err(DuplicateResidueError {
                chain: self.id.clone(),
                key: residue.key,
            });
        }
        let index = self.residues.len();
        self.residue_map.insert(residue.key.clone(), index);
        self.residues.push(residue);
        Ok(index)
    }

    /// Returns the residue stored under `residue`'s key, appending `residue`
    /// first if the key is not present yet. An existing residue is left as is.
    pub fn get_or_push(&mut self, residue: Residue) -> &mut Residue {
        let next = self.residues.len();
        let index = *self
            .residue_map
            .entry(residue.key.clone())
            .or_insert(next);
        if index == next {
            self.residues.push(residue);
        }
        &mut self.residues[index]
    }

    pub fn get(&self, key: &ResidueKey) -> Option<&Residue> {
        self.residue_map.get(key).map(|&index| &self.residues[index])
    }

    pub fn get_mut(&mut self, key: &ResidueKey) -> Option<&mut Residue> {
        self.residue_map
            .get(key)
            .map(|&index| &mut self.residues[index])
    }

    /// Position of the residue with `key` in the ordered sequence.
    pub fn position(&self, key: &ResidueKey) -> Option<usize> {
        self.residue_map.get(key).copied()
    }

    pub fn residue_at(&self, index: usize) -> Option<&Residue> {
        self.residues.get(index)
    }

    /// Overwrites the residue stored under `key` in place.
    ///
    /// The replacement takes over the slot of the old residue and is stored
    /// under `key` whatever identity it carried before, so every other residue
    /// keeps both its position and its key. Returns the residue that was
    /// replaced.
    pub fn replace(&mut self, key: &ResidueKey, residue: Residue) -> Result<Residue, LookupError> {
        let index = self
            .position(key)
            .ok_or_else(|| LookupError::ResidueNotFound {
                chain: self.id.clone(),
                key: key.clone(),
            })?;
        let residue = residue.with_key(key.clone());
        Ok(std::mem::replace(&mut self.residues[index], residue))
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn iter(&self) -> impl Iterator<Item = &Residue> {
        self.residues.iter()
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
