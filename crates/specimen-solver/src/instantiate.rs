//! Generic type instantiation.
//!
//! Substitutes type parameters with concrete types throughout a type graph.
//! Used when a reference to a generic alias whose body is not an object
//! literal (`type List<T> = T[]`) is expanded at its use site.

use crate::intern::TypeInterner;
use crate::types::{MemberInfo, TypeData, TypeId, TypeList, TypeParamId};
use rustc_hash::FxHashMap;
use tracing::warn;

pub use specimen_common::limits::MAX_INSTANTIATION_DEPTH;

/// Mapping from type parameters to their replacements.
pub type TypeSubstitution = FxHashMap<TypeParamId, TypeId>;

pub struct TypeInstantiator<'a> {
    interner: &'a mut TypeInterner,
    substitution: &'a TypeSubstitution,
    depth: u32,
    /// Set when expansion hit `MAX_INSTANTIATION_DEPTH`.
    pub depth_exceeded: bool,
}

impl<'a> TypeInstantiator<'a> {
    pub fn new(interner: &'a mut TypeInterner, substitution: &'a TypeSubstitution) -> Self {
        TypeInstantiator {
            interner,
            substitution,
            depth: 0,
            depth_exceeded: false,
        }
    }

    pub fn instantiate(&mut self, ty: TypeId) -> TypeId {
        if self.substitution.is_empty() || ty.is_intrinsic() {
            return ty;
        }
        if self.depth >= MAX_INSTANTIATION_DEPTH {
            if !self.depth_exceeded {
                warn!(
                    max_depth = MAX_INSTANTIATION_DEPTH,
                    "instantiation depth exceeded"
                );
            }
            self.depth_exceeded = true;
            return TypeId::UNKNOWN;
        }
        self.depth += 1;
        let result = self.instantiate_inner(ty);
        self.depth -= 1;
        result
    }

    fn instantiate_inner(&mut self, ty: TypeId) -> TypeId {
        let Some(data) = self.interner.lookup(ty).cloned() else {
            return ty;
        };
        match data {
            TypeData::Param(param) => self.substitution.get(&param).copied().unwrap_or(ty),
            TypeData::Array(element) => {
                let element = self.instantiate(element);
                self.interner.array(element)
            }
            TypeData::Tuple(elements) => {
                let elements = self.instantiate_list(&elements);
                self.interner.tuple(elements)
            }
            TypeData::Reference { def, args } => {
                let args = self.instantiate_list(&args);
                self.interner.reference(def, args)
            }
            TypeData::Union(members) => {
                let members = self.instantiate_list(&members);
                self.interner.union(members)
            }
            TypeData::Function { return_type } => {
                let return_type = self.instantiate(return_type);
                self.interner.function(return_type)
            }
            TypeData::Object(shape) => {
                let members = self
                    .interner
                    .shape_members(shape)
                    .map(<[MemberInfo]>::to_vec)
                    .unwrap_or_default();
                let mut changed = false;
                let members: Vec<MemberInfo> = members
                    .into_iter()
                    .map(|mut member| {
                        if let Some(declared) = member.declared {
                            let replaced = self.instantiate(declared);
                            changed |= replaced != declared;
                            member.declared = Some(replaced);
                        }
                        member
                    })
                    .collect();
                if changed {
                    self.interner.object(members)
                } else {
                    ty
                }
            }
            TypeData::Intrinsic(_)
            | TypeData::Global(_)
            | TypeData::Literal(_)
            | TypeData::LiteralUnion(_)
            | TypeData::Unresolved => ty,
        }
    }

    fn instantiate_list(&mut self, types: &[TypeId]) -> TypeList {
        types.iter().map(|&ty| self.instantiate(ty)).collect()
    }
}

/// Instantiate `ty` with `substitution`.
pub fn instantiate_type(
    interner: &mut TypeInterner,
    ty: TypeId,
    substitution: &TypeSubstitution,
) -> TypeId {
    TypeInstantiator::new(interner, substitution).instantiate(ty)
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
