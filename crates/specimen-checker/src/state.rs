//! The resolution context.
//!
//! `TypeChecker` owns everything one compile pass knows about a file: the
//! parsed declarations, the bound symbols and the interned types. It is
//! created per pass and handed by reference to description generation
//! (it implements [`ShapeDatabase`]); nothing is stored globally.

use crate::binder::Binder;
use crate::lower::TypeLowering;
use specimen_common::{Diagnostic, TypeDescription};
use specimen_parser::{SourceFile, parse_source, parse_type_text};
use specimen_solver::{
    DefId, DescribeOptions, Describer, MemberInfo, ShapeDatabase, TypeData, TypeId, TypeInterner,
    TypeParamId, TypeParamInfo,
};
use tracing::{debug, info_span};

pub struct TypeChecker {
    file: SourceFile,
    interner: TypeInterner,
    binder: Binder,
    diagnostics: Vec<Diagnostic>,
    options: DescribeOptions,
}

impl TypeChecker {
    /// Parse, bind and lower `source`.
    ///
    /// Parse errors are recorded as diagnostics; whatever parsed is still
    /// bound and usable.
    pub fn from_source(file_name: &str, source: &str) -> Self {
        let _span = info_span!("check", file = file_name).entered();
        let (file, diagnostics) = parse_source(file_name, source);
        let mut interner = TypeInterner::new();
        let mut binder = Binder::bind(&mut interner, &file);
        TypeLowering::new(&mut interner, &mut binder, &file.declarations).lower_declarations();
        debug!(
            declarations = file.declarations.len(),
            types = interner.len(),
            diagnostics = diagnostics.len(),
            "lowered file"
        );
        TypeChecker {
            file,
            interner,
            binder,
            diagnostics,
            options: DescribeOptions::default(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file.file_name
    }

    pub fn source_file(&self) -> &SourceFile {
        &self.file
    }

    /// Parse diagnostics, including those of `type_from_text` calls.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    pub fn def_of(&self, name: &str) -> Option<DefId> {
        self.binder.def_of(name)
    }

    pub fn describe_options(&self) -> DescribeOptions {
        self.options
    }

    pub fn set_describe_options(&mut self, options: DescribeOptions) {
        self.options = options;
    }

    /// Lower a standalone type such as `A<string>[]` against this file's
    /// declarations.
    pub fn type_from_text(&mut self, text: &str) -> TypeId {
        let (node, diagnostics) = parse_type_text(text);
        self.diagnostics.extend(diagnostics);
        TypeLowering::new(&mut self.interner, &mut self.binder, &self.file.declarations)
            .lower_type(&node)
    }

    /// Describe the shape of `ty`.
    pub fn describe(&self, ty: TypeId) -> TypeDescription {
        Describer::with_options(self, self.options).describe_root(ty)
    }

    /// `describe(type_from_text(text))`.
    pub fn describe_text(&mut self, text: &str) -> TypeDescription {
        let ty = self.type_from_text(text);
        self.describe(ty)
    }
}

impl ShapeDatabase for TypeChecker {
    fn lookup(&self, id: TypeId) -> Option<&TypeData> {
        self.interner.lookup(id)
    }

    fn members_of(&self, ty: TypeId) -> Option<&[MemberInfo]> {
        self.interner.members_of(ty)
    }

    fn type_params_of(&self, def: DefId) -> &[TypeParamId] {
        self.interner.type_params_of(def)
    }

    fn type_param(&self, param: TypeParamId) -> Option<&TypeParamInfo> {
        self.interner.type_param_info(param)
    }

    fn def_name(&self, def: DefId) -> Option<&str> {
        self.interner.def_name(def)
    }
}

#[cfg(test)]
#[path = "../tests/checker_tests.rs"]
mod tests;
