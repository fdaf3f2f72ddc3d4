//! Resolution context for the specimen pipeline.
//!
//! This crate turns declaration source text into something description
//! generation can query:
//! - `binder` - declaration names to `DefId`s, interface merging
//! - `lower` - type nodes to interned solver types
//! - `state` - `TypeChecker`, the per-pass context implementing `ShapeDatabase`

mod binder;
mod lower;
mod state;

pub use binder::{Binder, Symbol};
pub use state::TypeChecker;
