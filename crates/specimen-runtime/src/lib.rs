//! Specimen runtime.
//!
//! Consumes a [`TypeDescription`](specimen_common::TypeDescription) and
//! produces randomized values matching it:
//!
//! - **`Specimen`**: the generated value tree, indexable and serializable
//! - **`Generator`**: the description interpreter and primitive generators
//! - **`SpecimenFactory`**: one description plus ordered mutators
//! - **`Randomizer`**: `create` / `create_many` / `build` entry points
//! - **`FactoryConfig`**: array-length policy and seeding

pub mod config;
mod error;
pub mod factory;
pub mod generators;
mod randomizer;
pub mod specimen;

pub use config::{ArrayLength, FactoryConfig};
pub use error::RandomizerError;
pub use factory::{Mutator, SpecimenFactory};
pub use generators::Generator;
pub use randomizer::Randomizer;
pub use specimen::{Callable, Specimen};
