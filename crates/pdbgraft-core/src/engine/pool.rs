use super::error::{GraftError, NameKind};
use crate::core::models::structure::Structure;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

new_key_type! {
    /// Stable reference to a structure held by a [`StructurePool`].
    pub struct StructureHandle;
}

/// All structures of a run, addressed by declared name or by handle.
///
/// Operations and outputs hold handles; the pool itself is the single owner
/// and is lent mutably to one operation at a time.
#[derive(Debug, Default)]
pub struct StructurePool {
    structures: SlotMap<StructureHandle, Structure>,
    names: HashMap<String, StructureHandle>,
    order: Vec<StructureHandle>,
}

impl StructurePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a structure under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GraftError::DuplicateName`] if the name is already taken; the
    /// pool is left unchanged.
    pub fn insert(
        &mut self,
        name: &str,
        structure: Structure,
    ) -> Result<StructureHandle, GraftError> {
        if self.names.contains_key(name) {
            return Err(GraftError::DuplicateName {
                kind: NameKind::Structure,
                name: name.to_string(),
            });
        }
        let handle = self.structures.insert(structure);
        self.names.insert(name.to_string(), handle);
        self.order.push(handle);
        Ok(handle)
    }

    pub fn handle(&self, name: &str) -> Option<StructureHandle> {
        self.names.get(name).copied()
    }

    pub fn get(&self, handle: StructureHandle) -> Option<&Structure> {
        self.structures.get(handle)
    }

    pub fn get_mut(&mut self, handle: StructureHandle) -> Option<&mut Structure> {
        self.structures.get_mut(handle)
    }

    pub fn by_name(&self, name: &str) -> Option<&Structure> {
        self.handle(name).and_then(|handle| self.get(handle))
    }

    /// Structures in the order they were inserted.
    pub fn iter(&self) -> impl Iterator<Item = (StructureHandle, &Structure)> {
        self.order
            .iter()
            .filter_map(|&handle| self.structures.get(handle).map(|s| (handle, s)))
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}
