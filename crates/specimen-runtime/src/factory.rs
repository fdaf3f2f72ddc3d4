//! Specimen factory.
//!
//! A factory owns one description, an ordered list of mutators and a random
//! source. `create` generates a fresh tree and threads it through every
//! mutator in registration order, so the last mutator to write a field wins.

use crate::config::FactoryConfig;
use crate::error::RandomizerError;
use crate::generators::Generator;
use crate::specimen::Specimen;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::DeserializeOwned;
use specimen_common::TypeDescription;
use std::fmt;
use tracing::trace;

/// A post-processing step: consumes the accumulated specimen and returns it.
pub type Mutator = Box<dyn Fn(Specimen) -> Specimen>;

pub struct SpecimenFactory {
    description: TypeDescription,
    mutators: Vec<Mutator>,
    config: FactoryConfig,
    rng: StdRng,
}

impl fmt::Debug for SpecimenFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecimenFactory")
            .field("description", &self.description)
            .field("mutators", &self.mutators.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SpecimenFactory {
    pub fn new(description: TypeDescription) -> Self {
        Self::with_config(description, FactoryConfig::default())
    }

    pub fn with_config(description: TypeDescription, config: FactoryConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(description, config, rng)
    }

    /// A factory drawing from `rng`; `config.seed` is not consulted.
    pub(crate) fn with_rng(
        description: TypeDescription,
        config: FactoryConfig,
        rng: StdRng,
    ) -> Self {
        SpecimenFactory {
            description,
            mutators: Vec::new(),
            config,
            rng,
        }
    }

    pub fn description(&self) -> &TypeDescription {
        &self.description
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Register a mutator that returns the (possibly replaced) specimen.
    pub fn with(mut self, mutator: impl Fn(Specimen) -> Specimen + 'static) -> Self {
        self.mutators.push(Box::new(mutator));
        self
    }

    /// Register a mutator that edits the specimen in place.
    ///
    /// ```ignore
    /// factory.with_mut(|x| x["a"]["b"] = "second".into())
    /// ```
    pub fn with_mut(self, mutator: impl Fn(&mut Specimen) + 'static) -> Self {
        self.with(move |mut specimen| {
            mutator(&mut specimen);
            specimen
        })
    }

    /// Generate one specimen and apply every mutator in order.
    pub fn create(&mut self) -> Specimen {
        let base = Generator::new(&self.config, &mut self.rng).generate(&self.description);
        trace!(mutators = self.mutators.len(), "applying mutators");
        self.mutators
            .iter()
            .fold(base, |specimen, mutator| mutator(specimen))
    }

    /// Between `min` and `max` (inclusive) independent specimens; `max <= min`
    /// yields exactly `min`.
    pub fn create_many(&mut self, min: usize, max: usize) -> Vec<Specimen> {
        let count = if max <= min {
            min
        } else {
            self.rng.gen_range(min..=max)
        };
        (0..count).map(|_| self.create()).collect()
    }

    /// `create`, converted into `T` through its JSON form.
    pub fn create_as<T: DeserializeOwned>(&mut self) -> Result<T, RandomizerError> {
        Ok(self.create().deserialize_into()?)
    }
}

#[cfg(test)]
#[path = "../tests/factory_tests.rs"]
mod tests;
