//! # pdbgraft Core Library
//!
//! Residue grafting for hierarchical molecular structures: copy residues from one
//! structure into positions of another, driven by a declarative plan.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** The structure hierarchy (`Structure` → `Model` →
//!   `Chain` → `Residue` → `Atom`) with its identity and ordering invariants, plus the
//!   PDB reader and writer and the loader/writer interfaces.
//!
//! - **[`engine`]: The Logic Core.** The structure pool, the operation trait and its
//!   residue grafter, the ordered operation registry and the plan resolver.
//!
//! - **[`workflows`]: The Public API.** One call that resolves a plan, executes it and
//!   writes the requested outputs.

pub mod core;
pub mod engine;
pub mod workflows;
