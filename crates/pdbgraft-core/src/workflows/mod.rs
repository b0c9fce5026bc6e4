//! # Workflows Module
//!
//! High-level entry points that run a complete plan.
//!
//! - **Graft Workflow** ([`graft`]) - Resolve a plan, apply every operation in order and
//!   hand the named results to a structure writer.

pub mod graft;
