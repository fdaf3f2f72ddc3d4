//! Specimen: randomized test values from TypeScript type declarations.
//!
//! The pipeline has two halves joined by a serializable [`TypeDescription`]:
//!
//! - **Compile time**: [`TypeChecker`] parses and binds declarations, and
//!   `describe` turns a (possibly generic) type into a description
//! - **Run time**: [`Randomizer`] and [`SpecimenFactory`] turn a description
//!   into [`Specimen`] values, optionally post-processed by mutators
//!
//! ```ignore
//! let mut checker = TypeChecker::from_source("shapes.ts", source);
//! let description = checker.describe_text("A<string>");
//! let value = Randomizer::new().create(Some(&description));
//! ```

pub use specimen_checker as checker;
pub use specimen_common as common;
pub use specimen_parser as parser;
pub use specimen_runtime as runtime;
pub use specimen_solver as solver;

pub use specimen_checker::TypeChecker;
pub use specimen_common::{
    Diagnostic, DescriptionEntry, DescriptionFlag, LiteralValue, Primitive, PropertyDescriptor,
    TypeDescription,
};
pub use specimen_runtime::{
    ArrayLength, FactoryConfig, Randomizer, RandomizerError, Specimen, SpecimenFactory,
};
pub use specimen_solver::DescribeOptions;

// Tracing subscriber setup
pub mod tracing_config;

/// Describe `type_text` against the declarations in `source`.
///
/// Returns the description together with every parse diagnostic from both
/// the source and the type text.
pub fn describe_source(
    file_name: &str,
    source: &str,
    type_text: &str,
) -> (TypeDescription, Vec<Diagnostic>) {
    let mut checker = TypeChecker::from_source(file_name, source);
    let description = checker.describe_text(type_text);
    (description, checker.diagnostics().to_vec())
}
