//! Factory configuration.
//!
//! `FactoryConfig` deserializes from JSON (`{"arrayLength": {"range": {"min":
//! 2, "max": 7}}, "seed": 42}`) or is read from the environment:
//!
//! | Variable | Format | Default |
//! |----------|--------|---------|
//! | `SPECIMEN_SEED` | `u64` | fresh entropy per factory |
//! | `SPECIMEN_ARRAY_LENGTH` | `5`, `2..7` or `2..=7` (inclusive) | `5` |

use serde::{Deserialize, Serialize};
use specimen_common::limits::ARRAY_VALUE_COUNT;
use tracing::warn;

pub const SEED_ENV: &str = "SPECIMEN_SEED";
pub const ARRAY_LENGTH_ENV: &str = "SPECIMEN_ARRAY_LENGTH";

/// Element-count policy for `Array`-flagged descriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayLength {
    /// Exactly this many elements.
    Fixed(usize),
    /// Uniform in `[min, max]`; `max <= min` means exactly `min`.
    Range { min: usize, max: usize },
}

impl Default for ArrayLength {
    fn default() -> Self {
        ArrayLength::Fixed(ARRAY_VALUE_COUNT)
    }
}

impl ArrayLength {
    /// Parse `5`, `2..7` or `2..=7`. Both range forms are inclusive.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let Some((min, max)) = text.split_once("..") else {
            return text.parse().ok().map(ArrayLength::Fixed);
        };
        let max = max.strip_prefix('=').unwrap_or(max);
        Some(ArrayLength::Range {
            min: min.trim().parse().ok()?,
            max: max.trim().parse().ok()?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FactoryConfig {
    pub array_length: ArrayLength,
    /// Seed for reproducible generation.
    pub seed: Option<u64>,
}

impl FactoryConfig {
    pub fn seeded(seed: u64) -> Self {
        FactoryConfig {
            seed: Some(seed),
            ..FactoryConfig::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup. Unparsable values are ignored with a
    /// warning.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = FactoryConfig::default();
        if let Some(seed) = lookup(SEED_ENV) {
            match seed.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => warn!(var = SEED_ENV, value = %seed, "ignoring invalid seed"),
            }
        }
        if let Some(length) = lookup(ARRAY_LENGTH_ENV) {
            match ArrayLength::parse(&length) {
                Some(length) => config.array_length = length,
                None => warn!(
                    var = ARRAY_LENGTH_ENV,
                    value = %length,
                    "ignoring invalid array length"
                ),
            }
        }
        config
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
