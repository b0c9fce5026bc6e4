use super::atom::Atom;
use super::ids::ResidueKey;
use super::model::Model;
use super::residue::Residue;
use super::structure::Structure;

/// Incremental construction of a [`Structure`] in file order.
///
/// Readers call `start_model`, `start_chain` and `start_residue` whenever the
/// corresponding field changes and `add_atom` for every atom record. Missing
/// levels are created on demand (model serial 1, chain with a blank id), so the
/// builder never panics on records that skip a level.
pub struct StructureBuilder {
    name: String,
    models: Vec<Model>,
    current_chain: Option<String>,
    current_residue: Option<ResidueKey>,
}

impl StructureBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            models: Vec::new(),
            current_chain: None,
            current_residue: None,
        }
    }

    pub fn start_model(&mut self, serial: usize) -> &mut Self {
        let id = self.models.len();
        self.models.push(Model::new(id, serial));
        self.current_chain = None;
        self.current_residue = None;
        self
    }

    pub fn start_chain(&mut self, id: &str) -> &mut Self {
        self.current_model().chain_or_insert(id);
        self.current_chain = Some(id.to_string());
        self.current_residue = None;
        self
    }

    /// Makes the residue with `key` current, appending it if the chain does not have it yet.
    ///
    /// A residue whose records are interrupted by other residues keeps its
    /// first position and collects the later atoms as well.
    pub fn start_residue(&mut self, key: ResidueKey, name: &str) -> &mut Self {
        let chain_id = self.current_chain_id();
        let chain = self.current_model().chain_or_insert(&chain_id);
        chain.get_or_push(Residue::new(key.clone(), name));
        self.current_residue = Some(key);
        self
    }

    /// Returns `true` if the current residue already holds an atom named `name`.
    pub fn current_residue_has_atom(&mut self, name: &str) -> bool {
        self.current_residue_mut()
            .is_some_and(|residue| residue.has_atom(name))
    }

    pub fn set_segment(&mut self, segment: &str) -> &mut Self {
        if let Some(residue) = self.current_residue_mut() {
            residue.segment = segment.to_string();
        }
        self
    }

    pub fn add_atom(&mut self, atom: Atom) -> &mut Self {
        if self.current_residue.is_none() {
            self.start_residue(ResidueKey::standard(0), "UNK");
        }
        if let Some(residue) = self.current_residue_mut() {
            residue.add_atom(atom);
        }
        self
    }

    pub fn build(self) -> Structure {
        let mut structure = Structure::new(&self.name);
        for model in self.models {
            structure.push_model(model);
        }
        structure
    }

    fn current_model(&mut self) -> &mut Model {
        if self.models.is_empty() {
            self.start_model(1);
        }
        let last = self.models.len() - 1;
        &mut self.models[last]
    }

    fn current_chain_id(&mut self) -> String {
        match &self.current_chain {
            Some(id) => id.clone(),
            None => {
                self.start_chain("");
                String::new()
            }
        }
    }

    fn current_residue_mut(&mut self) -> Option<&mut Residue> {
        let key = self.current_residue.clone()?;
        let chain_id = self.current_chain.clone()?;
        self.current_model().chain_mut(&chain_id)?.get_mut(&key)
    }
}
