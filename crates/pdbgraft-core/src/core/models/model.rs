use super::chain::Chain;
use std::collections::HashMap;

/// One conformation of a structure.
///
/// `id` is the 0-based ordinal of the model in its file; `serial` is the
/// number from the `MODEL` record, kept for output.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub id: usize,
    pub serial: usize,
    chains: Vec<Chain>,
    chain_map: HashMap<String, usize>, // Map from chain ID to index in `chains`
}

impl Model {
    pub fn new(id: usize, serial: usize) -> Self {
        Self {
            id,
            serial,
            chains: Vec::new(),
            chain_map: HashMap::new(),
        }
    }

    /// Returns the chain with `id`, appending an empty one if it does not exist yet.
    pub fn chain_or_insert(&mut self, id: &str) -> &mut Chain {
        let index = match self.chain_map.get(id) {
            Some(&index) => index,
            None => {
                let index = self.chains.len();
                self.chains.push(Chain::new(id));
                self.chain_map.insert(id.to_string(), index);
                index
            }
        };
        &mut self.chains[index]
    }

    pub fn chain(&self, id: &str) -> Option<&Chain> {
        self.chain_map.get(id).map(|&index| &self.chains[index])
    }

    pub fn chain_mut(&mut self, id: &str) -> Option<&mut Chain> {
        self.chain_map.get(id).map(|&index| &mut self.chains[index])
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }
}
