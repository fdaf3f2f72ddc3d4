//! Shape Solver
//!
//! Interned type representation plus the algorithms that turn a generic type
//! reference into a serializable [`TypeDescription`](specimen_common::TypeDescription):
//!
//! - **Interning**: `TypeInterner` deduplicates `TypeData`; `TypeId` equality is O(1)
//! - **`ShapeDatabase`**: the capability boundary description generation reads from
//! - **Type-parameter environments**: per-instantiation substitutions, merged per level
//! - **Leaf classification**: keyword and wrapper types to `Primitive`
//! - **Description generation**: closed-dispatch recursion over shape nodes
//! - **Instantiation**: substitution for generic alias expansion

pub mod classify;
mod db;
pub mod describe;
pub mod env;
mod instantiate;
mod intern;
pub mod recursion;
pub mod types;

pub use classify::{classify, wrapper_primitive};
pub use db::ShapeDatabase;
pub use describe::{DescribeOptions, Describer, ShapeNode, describe_type};
pub use env::{Substitution, TypeParamEnv};
pub use instantiate::{MAX_INSTANTIATION_DEPTH, TypeInstantiator, TypeSubstitution, instantiate_type};
pub use intern::TypeInterner;
pub use recursion::DepthCounter;
pub use types::{
    DefId, DefInfo, DefKind, IntrinsicKind, MemberInfo, MemberKind, ObjectShapeId, TypeData,
    TypeId, TypeList, TypeParamId, TypeParamInfo,
};
