#![cfg(test)]

use super::*;
use crate::record;

fn sample() -> Options {
    record! {
        "overwrite_data" => true,
        "message" => "foo",
        "retries" => 3,
    }
}

#[test]
fn test_get_declared_and_undeclared() {
    let options = sample();

    for field in ["overwrite_data", "message", "retries"] {
        assert!(options.get(field).is_ok(), "Declared field {field:?} should be readable.");
    }
    assert_eq!(options.get("message"), Ok(&Value::from("foo")));

    assert_eq!(
        options.get("overwrite_date"),
        Err(UnknownFieldError::new("overwrite_date")),
        "Reading a misspelled field should fail rather than returning a default."
    );
}

#[test]
fn test_set_existing_field() {
    let mut options = sample();
    options.set("message", "bar")
        .and_then(|o| o.set("retries", 5))
        .expect("Setting declared fields should succeed and allow chaining.");

    assert_eq!(options.get("message").ok().and_then(Value::as_str), Some("bar"));
    assert_eq!(options.get("retries").ok().and_then(Value::as_int), Some(5));
}

#[test]
fn test_set_undeclared_field_always_fails() {
    let mut options = sample();

    for i in 0..10 {
        options.set("retries", i).expect("Declared fields should stay settable.");
        assert_eq!(
            options.set("quux", i).map(|_| ()),
            Err(UnknownFieldError::new("quux")),
            "Undeclared fields should be rejected regardless of prior successful sets."
        );
    }
    assert!(!options.contains("quux"), "A failed set must not declare the field.");
    assert_eq!(options.len(), 3);
}

#[test]
fn test_update_is_all_or_nothing() {
    let mut options = sample();
    let before = options.clone();

    let result = options.update([
        ("message", Value::from("bar")),
        ("overwrite_date", Value::from(false)),
        ("retries", Value::from(7)),
    ]);
    assert_eq!(result.map(|_| ()), Err(UnknownFieldError::new("overwrite_date")));
    assert_eq!(
        options, before,
        "No field should change when any field in the update is undeclared."
    );

    options.update([("message", "bar")]).expect("A valid update should apply.");
    assert_eq!(options.get("message"), Ok(&Value::from("bar")));
}

#[test]
fn test_updated_overrides_defaults() {
    let defaults = record! { "mode" => (), "delimiter" => "\n" };
    let options = defaults.clone().updated([("mode", "r")]).expect("mode is declared");

    assert_eq!(options.get("mode"), Ok(&Value::from("r")));
    assert_eq!(options.get("delimiter"), defaults.get("delimiter"));
    assert!(defaults.clone().updated([("mdoe", "r")]).is_err());
}

#[test]
fn test_equality_ignores_order() {
    let a = record! { "a" => 1, "b" => "two" };
    let b = record! { "b" => "two", "a" => 1 };
    let c = record! { "a" => 1, "b" => "three" };
    let d = record! { "a" => 1 };

    assert_eq!(a, b, "Records from equal mappings should be equal regardless of field order.");
    assert_ne!(a, c, "Records differing in any value should be unequal.");
    assert_ne!(a, d, "Records with different field sets should be unequal.");
    assert_ne!(d, a);
}

#[test]
fn test_empty_record() {
    let mut empty = Options::empty();
    assert!(empty.is_empty());
    assert!(empty.get("anything").is_err());
    assert!(empty.set("anything", 1).is_err());
    assert_eq!(empty, record! {});
}

#[test]
fn test_nested_map_is_opaque() {
    let nested: Value = [("inner", 1)].into_iter().collect();
    let mut options = record! { "section" => nested };

    let section = options.get("section").expect("section is declared");
    assert_eq!(section.lookup("inner"), Some(&Value::Int(1)));

    // The nested mapping can be replaced wholesale, including with keys it didn't have before,
    // because only the outer record has a fixed field set.
    let replaced: Value = [("other", "x")].into_iter().collect();
    options.set("section", replaced).expect("section is declared");
    assert_eq!(
        options.get("section").ok().and_then(|s| s.lookup("other")),
        Some(&Value::from("x"))
    );
    assert!(options.get("section.other").is_err());
}

#[test]
fn test_duplicate_fields_keep_last_value() {
    let record = ClosedRecord::new([("a", 1), ("b", 2), ("a", 3)]);
    assert_eq!(record.len(), 2);
    assert_eq!(record.get("a"), Ok(&3));
    assert_eq!(record.fields().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn test_from_fields_and_order() {
    let mut record = ClosedRecord::<Option<u8>>::from_fields(["z", "y", "x"]);
    assert!(record.values().all(Option::is_none));

    record.set("y", Some(1)).expect("y is declared");
    assert_eq!(
        record.iter().collect::<Vec<_>>(),
        [("z", &None), ("y", &Some(1)), ("x", &None)],
        "Iteration should follow declaration order."
    );
}

#[test]
fn test_display() {
    let options = record! { "b" => true, "a" => "x" };
    assert_eq!(
        options.to_string(),
        r#"#{"b": true, "a": "x"}"#,
        "Values should be displayed, not debug formatted."
    );
    let nested = record! { "n" => 1, "m" => Value::from_iter([("k", 2.5)]) };
    assert_eq!(nested.to_string(), r#"#{"n": 1, "m": {"k": 2.5}}"#);
    assert_eq!(Value::from(vec![Value::from(1), Value::from("s")]).to_string(), r#"[1, "s"]"#);
    assert_eq!(Value::Unset.to_string(), "unset");
}
