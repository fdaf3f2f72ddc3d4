//! Type representation for the shape solver.
//!
//! Types are interned: structurally identical `TypeData` values share one
//! `TypeId`, so equality is an integer comparison. Declarations (`DefId`),
//! type parameters (`TypeParamId`) and anonymous object shapes
//! (`ObjectShapeId`) live in side tables owned by the interner.

use smallvec::SmallVec;
use specimen_common::LiteralValue;

/// Type argument lists are almost always short.
pub type TypeList = SmallVec<[TypeId; 4]>;

// =============================================================================
// Identifiers
// =============================================================================

/// Interned type handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    // Intrinsics are pre-registered in this order by `TypeInterner::new`.
    pub const STRING: TypeId = TypeId(0);
    pub const NUMBER: TypeId = TypeId(1);
    pub const BOOLEAN: TypeId = TypeId(2);
    pub const BIGINT: TypeId = TypeId(3);
    pub const SYMBOL: TypeId = TypeId(4);
    pub const OBJECT: TypeId = TypeId(5);
    pub const NULL: TypeId = TypeId(6);
    pub const UNDEFINED: TypeId = TypeId(7);
    pub const VOID: TypeId = TypeId(8);
    pub const ANY: TypeId = TypeId(9);
    pub const UNKNOWN: TypeId = TypeId(10);
    pub const NEVER: TypeId = TypeId(11);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 12;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    #[inline]
    pub const fn is_nullish(self) -> bool {
        matches!(self, TypeId::NULL | TypeId::UNDEFINED | TypeId::VOID)
    }
}

/// A named declaration: interface, class, type alias or enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

/// A type parameter, scoped to the declaration that introduces it.
///
/// Two declarations that both name a parameter `T` get distinct ids, so an
/// environment never confuses them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub u32);

/// An anonymous object type's member list (type literal).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectShapeId(pub u32);

// =============================================================================
// Type Data
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Null,
    Undefined,
    Void,
    Any,
    Unknown,
    Never,
}

impl IntrinsicKind {
    pub const ALL: [IntrinsicKind; 12] = [
        IntrinsicKind::String,
        IntrinsicKind::Number,
        IntrinsicKind::Boolean,
        IntrinsicKind::BigInt,
        IntrinsicKind::Symbol,
        IntrinsicKind::Object,
        IntrinsicKind::Null,
        IntrinsicKind::Undefined,
        IntrinsicKind::Void,
        IntrinsicKind::Any,
        IntrinsicKind::Unknown,
        IntrinsicKind::Never,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    /// A global name with no local declaration (`Date`, `String`, `Promise`).
    Global(String),
    Array(TypeId),
    Tuple(TypeList),
    /// A declared interface/class/alias/enum, with its type arguments.
    Reference { def: DefId, args: TypeList },
    Param(TypeParamId),
    Literal(LiteralValue),
    /// Enum declarations and unions made only of literals.
    LiteralUnion(Vec<LiteralValue>),
    Object(ObjectShapeId),
    Union(TypeList),
    Function { return_type: TypeId },
    /// Syntax outside the shape model.
    Unresolved,
}

// =============================================================================
// Side Tables
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Method,
}

/// A member of a declaration or object shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    pub name: String,
    pub kind: MemberKind,
    /// Property type, or method return type. `None` when not written.
    pub declared: Option<TypeId>,
}

impl MemberInfo {
    pub fn property(name: impl Into<String>, declared: TypeId) -> Self {
        MemberInfo {
            name: name.into(),
            kind: MemberKind::Property,
            declared: Some(declared),
        }
    }

    pub fn method(name: impl Into<String>, returns: Option<TypeId>) -> Self {
        MemberInfo {
            name: name.into(),
            kind: MemberKind::Method,
            declared: returns,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefKind {
    Interface,
    Class,
    TypeAlias,
    Enum,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefInfo {
    pub name: String,
    pub kind: DefKind,
    pub type_params: Vec<TypeParamId>,
    pub members: Vec<MemberInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamInfo {
    pub name: String,
    pub owner: DefId,
    pub default: Option<TypeId>,
}
