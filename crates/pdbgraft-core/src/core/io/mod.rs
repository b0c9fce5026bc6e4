//! Provides input/output functionality for structure file formats.
//!
//! This module contains the [`traits::StructureFile`] interface implemented by
//! each format, the PDB codec, and the loader/writer interfaces through which
//! the engine reaches files without depending on a particular format.

pub mod pdb;
pub mod store;
pub mod traits;
