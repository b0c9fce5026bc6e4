use super::chain::Chain;
use super::error::LookupError;
use super::ids::ResidueKey;
use super::model::Model;
use super::residue::Residue;

/// Represents a complete macromolecular structure: models, chains, residues and atoms.
///
/// A structure is the unit that is loaded, edited in place and written back.
/// Lookups take the full coordinate (model, chain, residue key) and report the
/// first level that failed to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Name under which the structure was loaded.
    pub name: String,
    models: Vec<Model>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            models: Vec::new(),
        }
    }

    pub(crate) fn push_model(&mut self, model: Model) {
        self.models.push(model);
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Retrieves a model by its 0-based id.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ModelNotFound`] if the structure has no such model.
    pub fn model(&self, model: usize) -> Result<&Model, LookupError> {
        self.models
            .iter()
            .find(|m| m.id == model)
            .ok_or(LookupError::ModelNotFound { model })
    }

    pub fn model_mut(&mut self, model: usize) -> Result<&mut Model, LookupError> {
        self.models
            .iter_mut()
            .find(|m| m.id == model)
            .ok_or(LookupError::ModelNotFound { model })
    }

    /// Retrieves a chain of a model.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] naming the model or chain that does not exist.
    pub fn chain(&self, model: usize, chain: &str) -> Result<&Chain, LookupError> {
        self.model(model)?
            .chain(chain)
            .ok_or_else(|| LookupError::ChainNotFound {
                model,
                chain: chain.to_string(),
            })
    }

    pub fn chain_mut(&mut self, model: usize, chain: &str) -> Result<&mut Chain, LookupError> {
        self.model_mut(model)?
            .chain_mut(chain)
            .ok_or_else(|| LookupError::ChainNotFound {
                model,
                chain: chain.to_string(),
            })
    }

    /// Retrieves the residue at a full coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the model, chain or residue does not exist.
    pub fn residue(
        &self,
        model: usize,
        chain: &str,
        key: &ResidueKey,
    ) -> Result<&Residue, LookupError> {
        let chain = self.chain(model, chain)?;
        chain.get(key).ok_or_else(|| LookupError::ResidueNotFound {
            chain: chain.id.clone(),
            key: key.clone(),
        })
    }

    pub fn residue_mut(
        &mut self,
        model: usize,
        chain: &str,
        key: &ResidueKey,
    ) -> Result<&mut Residue, LookupError> {
        let chain = self.chain_mut(model, chain)?;
        let chain_id = chain.id.clone();
        chain
            .get_mut(key)
            .ok_or_else(|| LookupError::ResidueNotFound {
                chain: chain_id,
                key: key.clone(),
            })
    }

    /// Replaces the residue at a full coordinate, keeping its position in the chain.
    ///
    /// After the call, looking up `key` yields `residue` re-identified as `key`;
    /// no other residue changes position or identity.
    ///
    /// # Arguments
    ///
    /// * `model` - The 0-based model id.
    /// * `chain` - The chain identifier.
    /// * `key` - The key of the residue to overwrite.
    /// * `residue` - The residue to put in its place.
    ///
    /// # Return
    ///
    /// Returns the residue that was replaced.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the coordinate does not exist; the structure
    /// is then unchanged.
    pub fn replace_residue(
        &mut self,
        model: usize,
        chain: &str,
        key: &ResidueKey,
        residue: Residue,
    ) -> Result<Residue, LookupError> {
        self.chain_mut(model, chain)?.replace(key, residue)
    }

    pub fn residue_count(&self) -> usize {
        self.models.iter().map(Model::residue_count).sum()
    }

    pub fn atom_count(&self) -> usize {
        self.models
            .iter()
            .flat_map(|m| m.chains())
            .flat_map(|c| c.iter())
            .map(|r| r.atoms().len())
            .sum()
    }
}
