//! Common types and utilities for the specimen pipeline.
//!
//! This crate provides foundational types used across all specimen crates:
//! - The serializable type description model (`TypeDescription`, `Primitive`, ...)
//! - Source spans (`Span`)
//! - Front-end diagnostics (`Diagnostic`, diagnostic codes)
//! - Centralized limits and thresholds

// Type description model - the wire contract between description and generation
pub mod description;
pub use description::{
    DescriptionEntry, DescriptionFlag, LiteralValue, Primitive, PropertyDescriptor,
    TypeDescription,
};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostics reported by the scanner/parser
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;
