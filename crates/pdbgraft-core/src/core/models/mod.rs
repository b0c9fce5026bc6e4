//! # Core Models Module
//!
//! This module contains the data structures used to represent macromolecular
//! structures in pdbgraft.
//!
//! ## Overview
//!
//! A [`structure::Structure`] is an ordered tree: structure → model → chain →
//! residue → atom. Every level is owned by its parent, so cloning a residue is
//! a deep copy. Chains expose both ordered iteration and lookup by
//! [`ids::ResidueKey`], backed by a single residue vector.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom records with coordinates and PDB annotations
//! - [`residue`] - Residues and their atoms
//! - [`chain`] - Ordered, keyed residue containers with in-place replacement
//! - [`model`] - Models (conformations) and their chains
//! - [`structure`] - Complete structures with coordinate-based lookup and replacement
//! - [`builder`] - Incremental construction used by file readers
//! - [`ids`] - Residue identifiers
//! - [`error`] - Lookup failures
//!
//! ## Usage
//!
//! ```ignore
//! use pdbgraft::core::models::{builder::StructureBuilder, ids::ResidueKey, atom::Atom};
//!
//! let mut builder = StructureBuilder::new("example");
//! builder.start_model(1).start_chain("A");
//! builder
//!     .start_residue(ResidueKey::standard(1), "ALA")
//!     .add_atom(Atom::new("CA", Point3::new(0.0, 0.0, 0.0)));
//! let structure = builder.build();
//! let ala = structure.residue(0, "A", &ResidueKey::standard(1))?;
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod error;
pub mod ids;
pub mod model;
pub mod residue;
pub mod structure;
