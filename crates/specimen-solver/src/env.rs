//! Type-parameter environments.
//!
//! A `TypeParamEnv` maps a type parameter (scoped to its declaration) to the
//! concrete type substituted for it at one generic instantiation site. An
//! environment is built fresh for each instantiation and combined with the
//! caller's environment by [`TypeParamEnv::merge`]; environments are values
//! and are never mutated once handed down the recursion.
//!
//! Array-typed arguments are stored as their element type plus an
//! `is_array` mark, so `A<number[]>` records `T => { number, array }`.

use crate::db::ShapeDatabase;
use crate::types::{TypeData, TypeId, TypeParamId};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Concrete substitution for one type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Substitution {
    pub concrete: TypeId,
    pub is_array: bool,
}

impl Substitution {
    /// Split one array level off `ty` into the `is_array` mark.
    pub fn of<D: ShapeDatabase + ?Sized>(db: &D, ty: TypeId) -> Self {
        match db.lookup(ty) {
            Some(TypeData::Array(element)) => Substitution {
                concrete: *element,
                is_array: true,
            },
            _ => Substitution {
                concrete: ty,
                is_array: false,
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeParamEnv {
    entries: IndexMap<TypeParamId, Substitution, FxBuildHasher>,
}

impl TypeParamEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn get(&self, param: TypeParamId) -> Option<Substitution> {
        self.entries.get(&param).copied()
    }

    #[inline]
    pub fn contains(&self, param: TypeParamId) -> bool {
        self.entries.contains_key(&param)
    }

    pub fn with(mut self, param: TypeParamId, substitution: Substitution) -> Self {
        self.entries.insert(param, substitution);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeParamId, Substitution)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    /// Environment written at an instantiation site: the declaration's type
    /// parameters zipped with the reference's type arguments.
    ///
    /// Arrays are looked through (`C<T>[]` yields `C`'s environment). Omitted
    /// arguments fall back to the parameter's default. Parameters with neither
    /// are skipped. Anything other than a reference yields an empty environment.
    pub fn from_type_args<D: ShapeDatabase + ?Sized>(db: &D, ty: TypeId) -> Self {
        let mut ty = ty;
        while let Some(TypeData::Array(element)) = db.lookup(ty) {
            ty = *element;
        }
        let Some(TypeData::Reference { def, args }) = db.lookup(ty) else {
            return Self::new();
        };

        let mut env = Self::new();
        for (index, &param) in db.type_params_of(*def).iter().enumerate() {
            let Some(arg) = args
                .get(index)
                .copied()
                .or_else(|| db.type_param(param).and_then(|info| info.default))
            else {
                continue;
            };
            // A default may name an earlier parameter of the same declaration.
            let substitution = match db.lookup(arg) {
                Some(TypeData::Param(earlier)) if env.contains(*earlier) => {
                    env.entries[earlier]
                }
                _ => Substitution::of(db, arg),
            };
            env.entries.insert(param, substitution);
        }
        env
    }

    /// Combine a member's own instantiation environment with the environments
    /// inherited from its declaration and from the caller.
    ///
    /// - `child` (written at the current instantiation site) is the base when
    ///   non-empty. Otherwise `declared` is the base unless the caller already
    ///   resolves one of its parameters, in which case the caller's environment
    ///   is used.
    /// - A base entry whose concrete type is itself a parameter is replaced by
    ///   that parameter's substitution from `caller` (else `declared`); the
    ///   array marks are OR-combined.
    /// - Otherwise the entry's own type arguments are walked one level and any
    ///   parameters found there are registered without overwriting existing
    ///   entries, so `A<B<C>>` chains resolve.
    pub fn merge<D: ShapeDatabase + ?Sized>(
        db: &D,
        child: &TypeParamEnv,
        declared: &TypeParamEnv,
        caller: &TypeParamEnv,
    ) -> TypeParamEnv {
        let base = if !child.is_empty() {
            child
        } else if declared.is_empty() || declared.entries.keys().any(|k| caller.contains(*k)) {
            caller
        } else {
            declared
        };

        let resolve = |param: TypeParamId| caller.get(param).or_else(|| declared.get(param));

        let mut merged = TypeParamEnv::new();
        let mut indirect = Vec::new();
        for (param, substitution) in base.iter() {
            if let Some(TypeData::Param(inner)) = db.lookup(substitution.concrete)
                && let Some(found) = resolve(*inner)
            {
                merged.entries.insert(
                    param,
                    Substitution {
                        concrete: found.concrete,
                        is_array: substitution.is_array || found.is_array,
                    },
                );
                continue;
            }

            merged.entries.insert(param, substitution);
            for arg in type_args(db, substitution.concrete) {
                if let Some(TypeData::Param(inner)) = db.lookup(arg)
                    && let Some(found) = resolve(*inner)
                {
                    indirect.push((*inner, found));
                }
            }
        }
        for (param, found) in indirect {
            merged.entries.entry(param).or_insert(found);
        }
        merged
    }
}

/// Direct type arguments of a reference, looking through one array level.
fn type_args<D: ShapeDatabase + ?Sized>(db: &D, ty: TypeId) -> Vec<TypeId> {
    let ty = match db.lookup(ty) {
        Some(TypeData::Array(element)) => *element,
        _ => ty,
    };
    match db.lookup(ty) {
        Some(TypeData::Reference { args, .. }) => args
            .iter()
            .map(|&arg| match db.lookup(arg) {
                Some(TypeData::Array(element)) => *element,
                _ => arg,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../tests/env_tests.rs"]
mod tests;
