use super::*;
use specimen_parser::{SourceFile, parse_source, parse_type_text};
use specimen_solver::ShapeDatabase;

struct Lowered {
    interner: TypeInterner,
    binder: Binder,
    file: SourceFile,
}

impl Lowered {
    fn new(source: &str) -> Self {
        let (file, diagnostics) = parse_source("test.ts", source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let mut interner = TypeInterner::new();
        let mut binder = Binder::bind(&mut interner, &file);
        TypeLowering::new(&mut interner, &mut binder, &file.declarations).lower_declarations();
        Lowered {
            interner,
            binder,
            file,
        }
    }

    fn ty(&mut self, text: &str) -> TypeId {
        let (node, diagnostics) = parse_type_text(text);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        TypeLowering::new(&mut self.interner, &mut self.binder, &self.file.declarations)
            .lower_type(&node)
    }

    fn data(&self, ty: TypeId) -> TypeData {
        self.interner.lookup(ty).cloned().unwrap()
    }
}

#[test]
fn test_keywords_and_arrays() {
    let mut lowered = Lowered::new("");
    assert_eq!(lowered.ty("string"), TypeId::STRING);
    let numbers = lowered.ty("number[]");
    assert_eq!(lowered.data(numbers), TypeData::Array(TypeId::NUMBER));
    assert_eq!(lowered.ty("Array<number>"), numbers);
    assert_eq!(lowered.ty("ReadonlyArray<number>"), numbers);
}

#[test]
fn test_interface_reference_carries_arguments() {
    let mut lowered = Lowered::new("interface A<T> { t: T }");
    let reference = lowered.ty("A<string>");
    let def = lowered.binder.def_of("A").unwrap();
    assert_eq!(
        lowered.data(reference),
        TypeData::Reference {
            def,
            args: [TypeId::STRING].into_iter().collect(),
        }
    );
    let members = lowered.interner.members_of(reference).unwrap();
    let param = lowered.interner.type_params_of(def)[0];
    assert_eq!(
        members[0].declared.map(|ty| lowered.data(ty)),
        Some(TypeData::Param(param))
    );
}

#[test]
fn test_enum_and_enum_member_references() {
    let mut lowered = Lowered::new("enum Color { Red, Green = 'g' }");
    let color = lowered.ty("Color");
    assert_eq!(
        lowered.data(color),
        TypeData::LiteralUnion(vec![LiteralValue::number(0.0), LiteralValue::string("g")])
    );
    let green = lowered.ty("Color.Green");
    assert_eq!(lowered.data(green), TypeData::Literal(LiteralValue::string("g")));
    let missing = lowered.ty("Color.Blue");
    assert_eq!(lowered.data(missing), TypeData::Unresolved);
}

#[test]
fn test_union_folding() {
    let mut lowered = Lowered::new("");
    assert_eq!(lowered.ty("string | null | undefined"), TypeId::STRING);
    assert_eq!(lowered.ty("null"), TypeId::NULL);

    let literals = lowered.ty("'a' | 'b' | null | 'a'");
    assert_eq!(
        lowered.data(literals),
        TypeData::LiteralUnion(vec![LiteralValue::string("a"), LiteralValue::string("b")])
    );

    let mixed = lowered.ty("string | number");
    assert!(matches!(lowered.data(mixed), TypeData::Union(members) if members.len() == 2));
}

#[test]
fn test_unsupported_forms_are_unresolved() {
    let mut lowered = Lowered::new("interface A { a: string }");
    for text in ["A & { b: number }", "keyof A", "A['a']"] {
        let ty = lowered.ty(text);
        assert_eq!(lowered.data(ty), TypeData::Unresolved, "{text}");
    }
}

#[test]
fn test_unknown_names_become_globals() {
    let mut lowered = Lowered::new("");
    let date = lowered.ty("Date");
    assert_eq!(lowered.data(date), TypeData::Global("Date".to_string()));
    let promise = lowered.ty("Promise<string>");
    assert_eq!(lowered.data(promise), TypeData::Global("Promise".to_string()));
}

#[test]
fn test_generic_alias_expands_by_substitution() {
    let mut lowered = Lowered::new(
        "type List<T> = T[];\n\
         type Pair<A, B = A> = [A, B];\n",
    );
    let list = lowered.ty("List<string>");
    assert_eq!(lowered.data(list), TypeData::Array(TypeId::STRING));

    let pair = lowered.ty("Pair<number>");
    assert_eq!(
        lowered.data(pair),
        TypeData::Tuple([TypeId::NUMBER, TypeId::NUMBER].into_iter().collect())
    );
}

#[test]
fn test_object_alias_is_a_reference() {
    let mut lowered = Lowered::new("type Point<T> = { x: T; y: T };");
    let point = lowered.ty("Point<number>");
    let def = lowered.binder.def_of("Point").unwrap();
    assert!(matches!(lowered.data(point), TypeData::Reference { def: d, .. } if d == def));
    assert_eq!(lowered.interner.members_of(point).map(<[_]>::len), Some(2));
}

#[test]
fn test_circular_alias_is_unresolved() {
    let mut lowered = Lowered::new(
        "type A = B;\n\
         type B = A;\n",
    );
    let a = lowered.ty("A");
    assert_eq!(lowered.data(a), TypeData::Unresolved);
}

#[test]
fn test_merged_interfaces_scope_their_own_parameter_names() {
    let mut lowered = Lowered::new(
        "interface Box<T> { first: T }\n\
         interface Box<V> { second: V[] }\n",
    );
    let boxed = lowered.ty("Box<string>");
    let def = lowered.binder.def_of("Box").unwrap();
    let param = lowered.interner.type_params_of(def)[0];
    let param_ty = lowered.interner.param(param);
    let members = lowered.interner.members_of(boxed).unwrap().to_vec();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].declared, Some(param_ty));
    assert_eq!(
        members[1].declared.map(|ty| lowered.data(ty)),
        Some(TypeData::Array(param_ty))
    );
}

#[test]
fn test_methods_keep_return_types() {
    let mut lowered = Lowered::new("class Svc { run(): boolean { return true; } note; }");
    let svc = lowered.ty("Svc");
    let members = lowered.interner.members_of(svc).unwrap();
    assert_eq!(members[0].kind, MemberKind::Method);
    assert_eq!(members[0].declared, Some(TypeId::BOOLEAN));
    assert_eq!(members[1].kind, MemberKind::Property);
    assert_eq!(members[1].declared, None);
}
