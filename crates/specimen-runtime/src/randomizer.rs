//! Entry points for generated call sites.
//!
//! `create` and `create_many` treat a missing description as "nothing was
//! asked for" and return `None`; `build` treats it as misuse and fails.
//!
//! A `Randomizer` owns one random source, seeded once from its config. Every
//! factory it hands out draws its own seed from that source, so successive
//! calls produce independent specimens while a seeded randomizer still
//! replays the same sequence.

use crate::config::FactoryConfig;
use crate::error::RandomizerError;
use crate::factory::SpecimenFactory;
use crate::specimen::Specimen;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::de::DeserializeOwned;
use specimen_common::TypeDescription;
use std::cell::RefCell;

#[derive(Clone, Debug)]
pub struct Randomizer {
    config: FactoryConfig,
    rng: RefCell<StdRng>,
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::with_config(FactoryConfig::default())
    }
}

impl Randomizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Randomizer {
            config,
            rng: RefCell::new(rng),
        }
    }

    /// Configured from `SPECIMEN_SEED` and `SPECIMEN_ARRAY_LENGTH`.
    pub fn from_env() -> Self {
        Self::with_config(FactoryConfig::from_env())
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn create(&self, description: Option<&TypeDescription>) -> Option<Specimen> {
        let description = description?;
        Some(self.factory(description.clone()).create())
    }

    /// `min` defaults to 0 and `max` to `min`, so no counts yields an empty
    /// sequence and a single count yields exactly that many.
    pub fn create_many(
        &self,
        description: Option<&TypeDescription>,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Option<Vec<Specimen>> {
        let description = description?;
        let min = min.unwrap_or(0);
        let max = max.unwrap_or(min);
        Some(self.factory(description.clone()).create_many(min, max))
    }

    /// A factory for `description`, for registering mutators.
    pub fn build(
        &self,
        description: Option<TypeDescription>,
    ) -> Result<SpecimenFactory, RandomizerError> {
        let description = description.ok_or(RandomizerError::MissingDescription)?;
        Ok(self.factory(description))
    }

    /// One specimen converted into `T`.
    pub fn create_as<T: DeserializeOwned>(
        &self,
        description: &TypeDescription,
    ) -> Result<T, RandomizerError> {
        self.factory(description.clone()).create_as()
    }

    fn factory(&self, description: TypeDescription) -> SpecimenFactory {
        let seed = self.rng.borrow_mut().next_u64();
        SpecimenFactory::with_rng(
            description,
            self.config.clone(),
            StdRng::seed_from_u64(seed),
        )
    }
}

#[cfg(test)]
#[path = "../tests/randomizer_tests.rs"]
mod tests;
