use super::*;
use proptest::prelude::*;
use specimen_common::limits::ARRAY_VALUE_COUNT;

fn field(key: &str, description: TypeDescription) -> DescriptionEntry {
    match description.keyed(key) {
        TypeDescription::Property(descriptor) => DescriptionEntry::Property(*descriptor),
        other => panic!("keyed description was not a property: {other:?}"),
    }
}

fn generate_seeded(config: &FactoryConfig, seed: u64, description: &TypeDescription) -> Specimen {
    let mut rng = StdRng::seed_from_u64(seed);
    Generator::new(config, &mut rng).generate(description)
}

fn is_uuid_v4(text: &str) -> bool {
    uuid::Uuid::parse_str(text).is_ok_and(|id| id.get_version_num() == 4)
        && text.len() == 36
        && text.chars().all(|c| c == '-' || c.is_ascii_hexdigit())
}

proptest! {
    #[test]
    fn test_strings_are_uuid_v4(seed in any::<u64>()) {
        let config = FactoryConfig::default();
        let value = generate_seeded(&config, seed, &Primitive::String.into());
        let text = value.as_str().unwrap_or_default().to_string();
        prop_assert!(is_uuid_v4(&text), "not a uuid v4: {text}");
    }

    #[test]
    fn test_numbers_are_bounded_integers(seed in any::<u64>()) {
        let config = FactoryConfig::default();
        let value = generate_seeded(&config, seed, &Primitive::Number.into());
        let n = value.as_f64().unwrap_or(-1.0);
        prop_assert!((0.0..=NUMBER_UPPER_BOUND as f64).contains(&n));
        prop_assert_eq!(n.fract(), 0.0);
    }

    #[test]
    fn test_unknown_is_never_nullish(seed in any::<u64>()) {
        let config = FactoryConfig::default();
        let value = generate_seeded(&config, seed, &TypeDescription::UNKNOWN);
        let ok = matches!(
            value,
            Specimen::Object(_) | Specimen::Number(_) | Specimen::Bool(_) | Specimen::String(_)
        );
        prop_assert!(ok, "unexpected unknown specimen: {value:?}");
    }

    #[test]
    fn test_enum_values_come_from_the_list(seed in any::<u64>()) {
        let config = FactoryConfig::default();
        let description = TypeDescription::enumeration(vec![
            LiteralValue::number(0.0),
            LiteralValue::string("g"),
            LiteralValue::Boolean(true),
        ]);
        let value = generate_seeded(&config, seed, &description);
        let ok = matches!(
            &value,
            Specimen::Number(n) if *n == 0.0
        ) || value.as_str() == Some("g")
            || value.as_bool() == Some(true);
        prop_assert!(ok, "value outside the enum: {value:?}");
    }

    #[test]
    fn test_array_length_range_is_respected(seed in any::<u64>(), min in 0usize..4, extra in 0usize..4) {
        let config = FactoryConfig {
            array_length: ArrayLength::Range { min, max: min + extra },
            ..FactoryConfig::default()
        };
        let value = generate_seeded(&config, seed, &TypeDescription::array(Primitive::Boolean.into()));
        let len = value.as_array().map_or(usize::MAX, <[Specimen]>::len);
        prop_assert!(len >= min && len <= min + extra);
    }
}

#[test]
fn test_fixed_array_length_and_element_shape() {
    let config = FactoryConfig::default();
    let description = TypeDescription::array(TypeDescription::array(Primitive::Boolean.into()));
    let value = generate_seeded(&config, 7, &description);
    let outer = value.as_array().unwrap();
    assert_eq!(outer.len(), ARRAY_VALUE_COUNT);
    for inner in outer {
        let inner = inner.as_array().unwrap();
        assert_eq!(inner.len(), ARRAY_VALUE_COUNT);
        assert!(inner.iter().all(|b| b.as_bool().is_some()));
    }
}

#[test]
fn test_range_with_max_below_min_uses_min() {
    let config = FactoryConfig {
        array_length: ArrayLength::Range { min: 3, max: 1 },
        ..FactoryConfig::default()
    };
    let value = generate_seeded(&config, 1, &TypeDescription::array(Primitive::Number.into()));
    assert_eq!(value.as_array().map(<[Specimen]>::len), Some(3));
}

#[test]
fn test_tuple_generates_one_value_per_position() {
    let config = FactoryConfig::default();
    let description = TypeDescription::tuple([
        Primitive::Number.into(),
        Primitive::String.into(),
        TypeDescription::array(Primitive::Boolean.into()),
    ]);
    let value = generate_seeded(&config, 3, &description);
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items[0].as_f64().is_some());
    assert!(items[1].as_str().is_some_and(is_uuid_v4));
    assert_eq!(items[2].as_array().map(<[Specimen]>::len), Some(ARRAY_VALUE_COUNT));
}

#[test]
fn test_members_keep_order_and_skip_unkeyed_entries() {
    let config = FactoryConfig::default();
    let description = TypeDescription::members([
        field("b", Primitive::Number.into()),
        DescriptionEntry::Primitive(Primitive::String),
        DescriptionEntry::Property(PropertyDescriptor::new(Primitive::Boolean.into())),
        field("a", Primitive::Null.into()),
        field("", Primitive::Boolean.into()),
    ]);
    let value = generate_seeded(&config, 11, &description);
    let object = value.as_object().unwrap();
    assert_eq!(object.keys().collect::<Vec<_>>(), ["b", "a"]);
    assert!(object["b"].as_f64().is_some());
    assert!(object["a"].is_null());
}

#[test]
fn test_empty_members_produce_empty_object() {
    let config = FactoryConfig::default();
    let value = generate_seeded(&config, 0, &TypeDescription::default());
    assert_eq!(value, Specimen::object());
}

#[test]
fn test_empty_enum_is_undefined() {
    let config = FactoryConfig::default();
    let value = generate_seeded(&config, 0, &TypeDescription::enumeration(Vec::new()));
    assert!(value.is_undefined());
}

#[test]
fn test_methods_regenerate_per_call() {
    let config = FactoryConfig::default();
    let description = TypeDescription::members([field(
        "next",
        TypeDescription::method(Primitive::String.into()),
    )]);
    let value = generate_seeded(&config, 5, &description);
    let first = value["next"].call().unwrap();
    let second = value["next"].call().unwrap();
    assert!(first.as_str().is_some_and(is_uuid_v4));
    assert!(second.as_str().is_some_and(is_uuid_v4));
    assert_ne!(first, second);
}

#[test]
fn test_primitive_passthrough_values() {
    let config = FactoryConfig::default();
    let mut rng = StdRng::seed_from_u64(0);
    let mut generator = Generator::new(&config, &mut rng);
    assert!(generator.primitive(Primitive::Null).is_null());
    assert!(generator.primitive(Primitive::Undefined).is_undefined());
    assert_eq!(generator.primitive(Primitive::Object), Specimen::object());
    assert!(generator.primitive(Primitive::Date).as_date().is_some());
    assert_eq!(
        generator.primitive(Primitive::Function).call(),
        Some(Specimen::Undefined)
    );
}

#[test]
fn test_same_seed_reproduces_tree() {
    let config = FactoryConfig::default();
    let description = TypeDescription::members([
        field("id", Primitive::String.into()),
        field("count", Primitive::Number.into()),
        field("flags", TypeDescription::array(Primitive::Boolean.into())),
        field("mystery", TypeDescription::UNKNOWN),
    ]);
    let first = generate_seeded(&config, 42, &description);
    let second = generate_seeded(&config, 42, &description);
    let third = generate_seeded(&config, 43, &description);
    assert_eq!(first, second);
    assert_ne!(first, third);
}
