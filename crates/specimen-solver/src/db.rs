//! The capability interface shape resolution reads from.
//!
//! Description generation only needs to ask a front-end a handful of
//! questions: what a type is, which members it declares, and which type
//! parameters a declaration introduces. `ShapeDatabase` is that boundary; the
//! interner implements it directly and front-ends may wrap it.

use crate::intern::TypeInterner;
use crate::types::{DefId, MemberInfo, TypeData, TypeId, TypeParamId, TypeParamInfo};

pub trait ShapeDatabase {
    fn lookup(&self, id: TypeId) -> Option<&TypeData>;

    /// Declared members of a reference or anonymous object type, in source order.
    fn members_of(&self, ty: TypeId) -> Option<&[MemberInfo]>;

    /// Type parameters introduced by a declaration, in declaration order.
    fn type_params_of(&self, def: DefId) -> &[TypeParamId];

    fn type_param(&self, param: TypeParamId) -> Option<&TypeParamInfo>;

    fn def_name(&self, def: DefId) -> Option<&str>;
}

impl ShapeDatabase for TypeInterner {
    fn lookup(&self, id: TypeId) -> Option<&TypeData> {
        TypeInterner::lookup(self, id)
    }

    fn members_of(&self, ty: TypeId) -> Option<&[MemberInfo]> {
        match TypeInterner::lookup(self, ty)? {
            TypeData::Reference { def, .. } => self.def(*def).map(|d| d.members.as_slice()),
            TypeData::Object(shape) => self.shape_members(*shape),
            _ => None,
        }
    }

    fn type_params_of(&self, def: DefId) -> &[TypeParamId] {
        self.def(def).map_or(&[], |d| d.type_params.as_slice())
    }

    fn type_param(&self, param: TypeParamId) -> Option<&TypeParamInfo> {
        self.type_param_info(param)
    }

    fn def_name(&self, def: DefId) -> Option<&str> {
        self.def(def).map(|d| d.name.as_str())
    }
}
