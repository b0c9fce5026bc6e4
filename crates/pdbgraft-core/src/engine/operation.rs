use super::error::GraftError;
use super::pool::{StructureHandle, StructurePool};
use crate::core::models::error::LookupError;
use crate::core::models::ids::ResidueKey;
use crate::core::models::structure::Structure;
use std::fmt;
use tracing::debug;

/// A named unit of work applied to the structure pool.
///
/// Operations run strictly in registration order; each one sees every mutation
/// made by the operations before it.
pub trait Operation: fmt::Debug {
    /// The kind tag this operation was declared with.
    fn kind(&self) -> &'static str;

    /// Applies the operation to the pool.
    ///
    /// # Errors
    ///
    /// Returns [`GraftError`] if a referenced structure, model, chain or
    /// residue cannot be found. Implementations must leave the pool unchanged
    /// when they fail.
    fn apply(&self, pool: &mut StructurePool) -> Result<(), GraftError>;
}

/// Full coordinate of a standard residue inside a pooled structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueLocation {
    pub structure: StructureHandle,
    pub structure_name: String,
    /// 0-based model ordinal.
    pub model: usize,
    pub chain: String,
    pub residue: isize,
}

impl ResidueLocation {
    pub fn key(&self) -> ResidueKey {
        ResidueKey::standard(self.residue)
    }

    fn resolve<'p>(&self, pool: &'p StructurePool) -> Result<&'p Structure, LookupError> {
        pool.get(self.structure)
            .ok_or_else(|| LookupError::StructureNotFound {
                name: self.structure_name.clone(),
            })
    }

    fn resolve_mut<'p>(
        &self,
        pool: &'p mut StructurePool,
    ) -> Result<&'p mut Structure, LookupError> {
        pool.get_mut(self.structure)
            .ok_or_else(|| LookupError::StructureNotFound {
                name: self.structure_name.clone(),
            })
    }
}

impl fmt::Display for ResidueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.structure_name, self.model, self.chain, self.residue
        )
    }
}

/// Overwrites a target residue with an independent copy of a source residue.
///
/// The copy is re-identified as the target's standard key and keeps the
/// target's position in its chain. The source is never modified, and later
/// changes to either side do not leak into the other.
#[derive(Debug, Clone)]
pub struct ResidueGrafter {
    pub target: ResidueLocation,
    pub source: ResidueLocation,
}

impl ResidueGrafter {
    pub const KIND: &'static str = "residue-grafter";

    pub fn new(target: ResidueLocation, source: ResidueLocation) -> Self {
        Self { target, source }
    }
}

impl Operation for ResidueGrafter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn apply(&self, pool: &mut StructurePool) -> Result<(), GraftError> {
        let copy = self
            .source
            .resolve(pool)?
            .residue(self.source.model, &self.source.chain, &self.source.key())?
            .clone();

        let target_key = self.target.key();
        let grafted = copy.with_key(target_key.clone());

        let replaced = self.target.resolve_mut(pool)?.replace_residue(
            self.target.model,
            &self.target.chain,
            &target_key,
            grafted,
        )?;

        debug!(
            "Grafted {} onto {} (replaced {} with {} atoms)",
            self.source,
            self.target,
            replaced.name,
            replaced.atoms().len()
        );
        Ok(())
    }
}
