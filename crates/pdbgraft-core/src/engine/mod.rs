//! # Engine Module
//!
//! The stateful layer that turns a declarative plan into edits on loaded structures.
//!
//! ## Overview
//!
//! A run owns a single [`pool::StructurePool`]. The [`resolver::PlanResolver`] fills it
//! through a structure loader, builds one operation per plan entry and registers them in
//! an [`registry::OperationRegistry`], which then applies them one by one against the
//! pool. Operations never hold structure data themselves; they carry handles and
//! coordinates and borrow the pool only while they run.
//!
//! ## Architecture
//!
//! - **Structure Pool** ([`pool`]) - Name and handle addressed ownership of all structures
//! - **Operations** ([`operation`]) - The `Operation` trait and the residue grafter
//! - **Registry** ([`registry`]) - Uniquely named operations in execution order
//! - **Plan Tree** ([`plan`]) - Parsed but unresolved plan declarations
//! - **Resolution** ([`resolver`]) - Loading, validation and the kind to factory table
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - The umbrella `GraftError` and its configuration errors

pub mod error;
pub mod operation;
pub mod plan;
pub mod pool;
pub mod progress;
pub mod registry;
pub mod resolver;
