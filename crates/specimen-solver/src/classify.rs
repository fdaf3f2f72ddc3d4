//! Leaf classification.
//!
//! Maps a terminal type to one of the fixed [`Primitive`] kinds. Keyword
//! types and the boxed wrapper globals (`String`, `Number`, ...) classify to
//! the same primitive. The classifier is not recursive: array levels are
//! peeled by the caller. Anything unrecognized is `Primitive::Unknown`.

use crate::db::ShapeDatabase;
use crate::types::{IntrinsicKind, TypeData, TypeId};
use specimen_common::Primitive;

/// Wrapper-style global names and the primitive each stands for.
pub fn wrapper_primitive(name: &str) -> Option<Primitive> {
    Some(match name {
        "Number" => Primitive::Number,
        "String" => Primitive::String,
        "Boolean" => Primitive::Boolean,
        "Date" => Primitive::Date,
        "Function" => Primitive::Function,
        "Object" => Primitive::Object,
        _ => return None,
    })
}

pub fn intrinsic_primitive(kind: IntrinsicKind) -> Primitive {
    match kind {
        IntrinsicKind::String => Primitive::String,
        IntrinsicKind::Number => Primitive::Number,
        IntrinsicKind::Boolean => Primitive::Boolean,
        IntrinsicKind::Object => Primitive::Object,
        IntrinsicKind::Null => Primitive::Null,
        IntrinsicKind::Undefined => Primitive::Undefined,
        IntrinsicKind::BigInt
        | IntrinsicKind::Symbol
        | IntrinsicKind::Void
        | IntrinsicKind::Any
        | IntrinsicKind::Unknown
        | IntrinsicKind::Never => Primitive::Unknown,
    }
}

pub fn classify<D: ShapeDatabase + ?Sized>(db: &D, ty: TypeId) -> Primitive {
    match db.lookup(ty) {
        Some(TypeData::Intrinsic(kind)) => intrinsic_primitive(*kind),
        Some(TypeData::Global(name)) => wrapper_primitive(name).unwrap_or(Primitive::Unknown),
        Some(TypeData::Function { .. }) => Primitive::Function,
        _ => Primitive::Unknown,
    }
}
