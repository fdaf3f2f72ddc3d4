use super::*;
use chrono::TimeZone;
use serde::Deserialize;
use serde_json::json;

fn sample() -> Specimen {
    let mut root = Specimen::object();
    root["name"] = "widget".into();
    root["count"] = 3i64.into();
    root["ratio"] = 0.5.into();
    root["tags"] = vec![Specimen::from("a"), Specimen::from("b")].into();
    root["owner"]["active"] = true.into();
    root
}

#[test]
fn test_index_mut_builds_nested_objects() {
    let root = sample();
    assert_eq!(root["name"].as_str(), Some("widget"));
    assert_eq!(root["owner"]["active"].as_bool(), Some(true));
    assert_eq!(root["tags"][1].as_str(), Some("b"));
    assert_eq!(
        root.as_object().map(|m| m.keys().cloned().collect::<Vec<_>>()),
        Some(vec![
            "name".to_string(),
            "count".to_string(),
            "ratio".to_string(),
            "tags".to_string(),
            "owner".to_string()
        ])
    );
}

#[test]
fn test_get_probes_without_panicking() {
    let root = sample();
    assert!(root.get("missing").is_none());
    assert!(root["name"].get("nested").is_none());
}

#[test]
#[should_panic(expected = "no key")]
fn test_index_missing_key_panics() {
    let root = sample();
    let _ = &root["missing"];
}

#[test]
fn test_serialize_to_json() {
    let mut root = sample();
    root["when"] = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap().into();
    root["nothing"] = Specimen::Undefined;
    root["run"] = Specimen::Function(Callable::placeholder());

    assert_eq!(
        root.to_json(),
        json!({
            "name": "widget",
            "count": 3,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "owner": {"active": true},
            "when": "2024-01-02T03:04:05+00:00",
            "nothing": null,
            "run": null,
        })
    );
}

#[test]
fn test_deserialize_into_typed_value() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Owner {
        active: bool,
    }

    #[derive(Debug, Deserialize)]
    struct Widget {
        name: String,
        count: u32,
        tags: Vec<String>,
        owner: Owner,
    }

    let widget: Widget = sample().deserialize_into().unwrap();
    assert_eq!(widget.name, "widget");
    assert_eq!(widget.count, 3);
    assert_eq!(widget.tags, ["a", "b"]);
    assert_eq!(widget.owner, Owner { active: true });

    assert!(sample().deserialize_into::<Vec<u8>>().is_err());
}

#[test]
fn test_callables_compare_by_identity() {
    let first = Callable::new(|| Specimen::from(1i64));
    let copy = first.clone();
    let other = Callable::new(|| Specimen::from(1i64));
    assert_eq!(first, copy);
    assert_ne!(first, other);
    assert_eq!(Specimen::Function(first).call(), Some(Specimen::Number(1.0)));
    assert_eq!(Specimen::Null.call(), None);
}
