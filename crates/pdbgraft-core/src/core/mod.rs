//! # Core Module
//!
//! This module provides the building blocks of pdbgraft: the in-memory
//! representation of macromolecular structures and the file formats used to
//! load and save them.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Structures, models, chains, residues and atoms
//! - **File I/O** ([`io`]) - Reading/writing structure files and the loader/writer interfaces
//!
//! Everything in this module is free of plan or orchestration concerns; the
//! [`crate::engine`] layer builds on it.

pub mod io;
pub mod models;
