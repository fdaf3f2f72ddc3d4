//! Type description generation.
//!
//! Turns a (possibly deeply generic) type into a closed [`TypeDescription`]
//! tree, propagating concrete type arguments through every level of generic
//! nesting. The resolution context is the [`ShapeDatabase`] passed in; there
//! is no global state.
//!
//! Dispatch is over the closed [`ShapeNode`] set:
//!
//! | Node | Result |
//! |------|--------|
//! | `Array(e)` | `{Array, describe(e)}`, one flag per dimension |
//! | `Tuple([..])` | `{Tuple, [{description: p0}, ...]}` |
//! | `Reference(ty)` | fresh environment from `ty`'s type arguments, then the type path |
//! | `Property(m)` | `{key, description}` or a keyed flagged descriptor |
//! | `Method(m)` | `{key, Method, return description}` |
//! | `Plain` | `Unknown` |
//!
//! Resolution failures never abort: an unknown or unresolvable node degrades
//! to `Primitive::Unknown` and the rest of the object is still described.

use crate::classify::classify;
use crate::db::ShapeDatabase;
use crate::env::TypeParamEnv;
use crate::recursion::DepthCounter;
use crate::types::{MemberInfo, MemberKind, TypeData, TypeId};
use specimen_common::limits::DEFAULT_DESCRIBE_DEPTH;
use specimen_common::{DescriptionEntry, PropertyDescriptor, TypeDescription};
use tracing::{debug, trace, warn};

/// Options for description generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DescribeOptions {
    /// Opt-in recursion bound. `None` (the default) leaves recursion
    /// unbounded, so a cyclic shape recurses until the stack is exhausted.
    /// Past the bound a node degrades to `Unknown`.
    pub max_depth: Option<u32>,
}

impl DescribeOptions {
    pub fn bounded(max_depth: u32) -> Self {
        DescribeOptions {
            max_depth: Some(max_depth),
        }
    }

    /// Bounded at [`DEFAULT_DESCRIBE_DEPTH`].
    pub fn bounded_default() -> Self {
        Self::bounded(DEFAULT_DESCRIBE_DEPTH)
    }
}

/// The shape kind of a node being described.
#[derive(Clone, Copy, Debug)]
pub enum ShapeNode<'a> {
    /// Array whose element type is given.
    Array(TypeId),
    Tuple(&'a [TypeId]),
    Reference(TypeId),
    Property(&'a MemberInfo),
    Method(&'a MemberInfo),
    Plain,
}

impl<'a> ShapeNode<'a> {
    /// Classify a type used in a bare position (root or type argument).
    pub fn of(db: &'a dyn ShapeDatabase, ty: TypeId) -> Self {
        match db.lookup(ty) {
            Some(TypeData::Array(element)) => ShapeNode::Array(*element),
            Some(TypeData::Tuple(elements)) => ShapeNode::Tuple(elements),
            Some(TypeData::Unresolved) | None => ShapeNode::Plain,
            Some(_) => ShapeNode::Reference(ty),
        }
    }
}

pub struct Describer<'db> {
    db: &'db dyn ShapeDatabase,
    guard: Option<DepthCounter>,
}

impl<'db> Describer<'db> {
    pub fn new(db: &'db dyn ShapeDatabase) -> Self {
        Self::with_options(db, DescribeOptions::default())
    }

    pub fn with_options(db: &'db dyn ShapeDatabase, options: DescribeOptions) -> Self {
        Describer {
            db,
            guard: options.max_depth.map(DepthCounter::new),
        }
    }

    /// Describe a type reference such as `A<string>` or `A<string>[]`.
    pub fn describe_root(&mut self, ty: TypeId) -> TypeDescription {
        let db = self.db;
        trace!(ty = ty.0, "describe root");
        self.describe(ShapeNode::of(db, ty), &TypeParamEnv::new())
    }

    /// Whether the opt-in depth bound was hit during any call so far.
    pub fn depth_exceeded(&self) -> bool {
        self.guard.as_ref().is_some_and(DepthCounter::is_exceeded)
    }

    pub fn describe(&mut self, node: ShapeNode<'db>, env: &TypeParamEnv) -> TypeDescription {
        if !self.enter() {
            // Members keep their key even when cut off.
            return match node {
                ShapeNode::Property(member) | ShapeNode::Method(member) => {
                    TypeDescription::UNKNOWN.keyed(member.name.as_str())
                }
                _ => TypeDescription::UNKNOWN,
            };
        }
        let result = self.describe_node(node, env);
        self.leave();
        result
    }

    fn describe_node(&mut self, node: ShapeNode<'db>, env: &TypeParamEnv) -> TypeDescription {
        let db = self.db;
        match node {
            ShapeNode::Array(element) => self.describe_array(element, env),
            ShapeNode::Tuple(elements) => self.describe_tuple(elements, env),
            ShapeNode::Reference(ty) => {
                let env = TypeParamEnv::from_type_args(db, ty);
                self.describe_type(Some(ty), &env)
            }
            ShapeNode::Property(member) => self
                .describe_type(member.declared, env)
                .keyed(member.name.as_str()),
            ShapeNode::Method(member) => {
                TypeDescription::method(self.describe_type(member.declared, env))
                    .keyed(member.name.as_str())
            }
            ShapeNode::Plain => TypeDescription::UNKNOWN,
        }
    }

    /// Describe a type in member position under `env`.
    fn describe_type(&mut self, ty: Option<TypeId>, env: &TypeParamEnv) -> TypeDescription {
        let Some(ty) = ty else {
            return TypeDescription::UNKNOWN;
        };
        if !self.enter() {
            return TypeDescription::UNKNOWN;
        }
        let result = self.describe_type_inner(ty, env);
        self.leave();
        result
    }

    fn describe_type_inner(&mut self, ty: TypeId, env: &TypeParamEnv) -> TypeDescription {
        let db = self.db;
        match db.lookup(ty) {
            None => TypeDescription::UNKNOWN,
            Some(TypeData::Intrinsic(_) | TypeData::Global(_) | TypeData::Function { .. }) => {
                classify(db, ty).into()
            }
            Some(TypeData::Array(element)) => self.describe_array(*element, env),
            Some(TypeData::Tuple(elements)) => self.describe_tuple(elements, env),
            Some(TypeData::Literal(value)) => TypeDescription::enumeration(vec![value.clone()]),
            Some(TypeData::LiteralUnion(values)) if values.is_empty() => {
                // An enum with no members has nothing to sample.
                debug!(ty = ty.0, "empty literal union");
                TypeDescription::UNKNOWN
            }
            Some(TypeData::LiteralUnion(values)) => TypeDescription::enumeration(values.clone()),
            // `T` used directly resolves to the caller's argument.
            Some(TypeData::Param(param)) => match env.get(*param) {
                Some(substitution) if substitution.concrete == ty => TypeDescription::UNKNOWN,
                Some(substitution) if substitution.is_array => {
                    TypeDescription::array(self.describe_type(Some(substitution.concrete), env))
                }
                Some(substitution) => self.describe_type(Some(substitution.concrete), env),
                None => {
                    debug!(
                        param = param.0,
                        name = db.type_param(*param).map(|p| p.name.as_str()),
                        "unresolved type parameter"
                    );
                    TypeDescription::UNKNOWN
                }
            },
            Some(TypeData::Reference { .. } | TypeData::Object(_)) => {
                let members = db.members_of(ty).unwrap_or(&[]);
                let node_args = TypeParamEnv::from_type_args(db, ty);
                let entries: Vec<DescriptionEntry> = members
                    .iter()
                    .map(|member| into_entry(self.describe_member(member, &node_args, env)))
                    .collect();
                TypeDescription::Members(entries)
            }
            Some(TypeData::Union(_) | TypeData::Unresolved) => TypeDescription::UNKNOWN,
        }
    }

    /// `T[][]` wraps once per dimension before the element is resolved.
    fn describe_array(&mut self, element: TypeId, env: &TypeParamEnv) -> TypeDescription {
        TypeDescription::array(self.describe_type(Some(element), env))
    }

    fn describe_tuple(&mut self, elements: &[TypeId], env: &TypeParamEnv) -> TypeDescription {
        let positions: Vec<TypeDescription> = elements
            .iter()
            .map(|&element| self.describe_type(Some(element), env))
            .collect();
        TypeDescription::tuple(positions)
    }

    /// Describe one member, building its environment from its own type
    /// arguments, the arguments of the object it belongs to, and the caller.
    fn describe_member(
        &mut self,
        member: &'db MemberInfo,
        node_args: &TypeParamEnv,
        caller: &TypeParamEnv,
    ) -> TypeDescription {
        let db = self.db;
        let Some(declared) = member.declared else {
            trace!(member = %member.name, "member has no declared type");
            return match member.kind {
                MemberKind::Property => TypeDescription::UNKNOWN.keyed(member.name.as_str()),
                MemberKind::Method => {
                    TypeDescription::method(TypeDescription::UNKNOWN).keyed(member.name.as_str())
                }
            };
        };

        let child = TypeParamEnv::from_type_args(db, declared);
        let merged = TypeParamEnv::merge(db, &child, node_args, caller);
        let node = match member.kind {
            MemberKind::Property => ShapeNode::Property(member),
            MemberKind::Method => ShapeNode::Method(member),
        };
        self.describe(node, &merged)
    }

    fn enter(&mut self) -> bool {
        let Some(guard) = self.guard.as_mut() else {
            return true;
        };
        let first_overflow = !guard.is_exceeded();
        if guard.enter() {
            return true;
        }
        if first_overflow {
            warn!(
                max_depth = guard.max_depth(),
                "description depth exceeded; degrading to unknown"
            );
        }
        false
    }

    fn leave(&mut self) {
        if let Some(guard) = self.guard.as_mut() {
            guard.leave();
        }
    }
}

/// Member descriptions are always keyed, so they are always descriptors.
fn into_entry(description: TypeDescription) -> DescriptionEntry {
    match description {
        TypeDescription::Property(descriptor) => DescriptionEntry::Property(*descriptor),
        TypeDescription::Primitive(primitive) => DescriptionEntry::Primitive(primitive),
        members @ TypeDescription::Members(_) => {
            DescriptionEntry::Property(PropertyDescriptor::new(members))
        }
    }
}

/// Describe `ty` with default options.
pub fn describe_type(db: &dyn ShapeDatabase, ty: TypeId) -> TypeDescription {
    Describer::new(db).describe_root(ty)
}

#[cfg(test)]
#[path = "../tests/describe_tests.rs"]
mod tests;
