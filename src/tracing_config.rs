//! Tracing configuration for debugging description and generation.
//!
//! Supports three output formats controlled by `SPECIMEN_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Follow the describe recursion as a tree
//! SPECIMEN_LOG=debug SPECIMEN_LOG_FORMAT=tree cargo test
//!
//! # Only the generator, as JSON
//! SPECIMEN_LOG="specimen_runtime=trace" SPECIMEN_LOG_FORMAT=json cargo test
//! ```
//!
//! The subscriber is only installed when `SPECIMEN_LOG` (or `RUST_LOG`) is
//! set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "SPECIMEN_LOG";
pub const LOG_FORMAT_ENV: &str = "SPECIMEN_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines.
    #[default]
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Case-insensitive; anything unrecognized is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// The filter directives to use, if tracing was requested at all.
///
/// `SPECIMEN_LOG` takes precedence over `RUST_LOG`.
pub fn filter_directives(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    lookup(LOG_ENV).or_else(|| lookup("RUST_LOG"))
}

/// Install the global tracing subscriber.
///
/// Does nothing when neither `SPECIMEN_LOG` nor `RUST_LOG` is set. Returns
/// whether a subscriber was installed by this call; a second call, or a
/// subscriber installed elsewhere, leaves the existing one in place.
///
/// All output goes to stderr.
pub fn init_tracing() -> bool {
    let Some(directives) = filter_directives(|name| std::env::var(name).ok()) else {
        return false;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init().is_ok()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init().is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;
