use super::*;
use specimen_parser::parse_source;

fn bind(source: &str) -> (TypeInterner, Binder) {
    let (file, diagnostics) = parse_source("test.ts", source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let mut interner = TypeInterner::new();
    let binder = Binder::bind(&mut interner, &file);
    (interner, binder)
}

#[test]
fn test_bind_declarations_and_type_params() {
    let (interner, binder) = bind(
        "interface A<T, U = string> { a: T }\n\
         class B { b: number }\n\
         type C = string;\n\
         enum D { X }\n",
    );
    assert_eq!(binder.len(), 4);
    let a = binder.symbol("A").unwrap();
    assert_eq!(a.kind, DefKind::Interface);
    assert_eq!(interner.def(a.def).map(|d| d.type_params.len()), Some(2));
    assert_eq!(binder.symbol("B").map(|s| s.kind), Some(DefKind::Class));
    assert_eq!(binder.symbol("C").map(|s| s.kind), Some(DefKind::TypeAlias));
    assert_eq!(binder.symbol("D").map(|s| s.kind), Some(DefKind::Enum));
    assert!(binder.symbol("E").is_none());
}

#[test]
fn test_same_name_interfaces_merge() {
    let (interner, binder) = bind(
        "interface Box<T> { value: T }\n\
         interface Box<V, W> { extra: W }\n",
    );
    let symbol = binder.symbol("Box").unwrap();
    assert_eq!(symbol.declarations, vec![0, 1]);
    // The second declaration's extra parameter is appended by position.
    assert_eq!(interner.def(symbol.def).map(|d| d.type_params.len()), Some(2));
}

#[test]
fn test_incompatible_redeclaration_is_ignored() {
    let (_, binder) = bind(
        "type Thing = string;\n\
         interface Thing { x: number }\n",
    );
    let symbol = binder.symbol("Thing").unwrap();
    assert_eq!(symbol.kind, DefKind::TypeAlias);
    assert_eq!(symbol.declarations, vec![0]);
}

#[test]
fn test_enum_declarations_merge() {
    let (_, binder) = bind(
        "enum Color { Red }\n\
         enum Color { Blue = 3 }\n",
    );
    assert_eq!(binder.symbol("Color").map(|s| s.declarations.len()), Some(2));
}

#[test]
fn test_empty_file_binds_nothing() {
    let (_, binder) = bind("");
    assert!(binder.is_empty());
    assert_eq!(binder.def_of("Anything"), None);
}
