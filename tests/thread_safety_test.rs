//! Tests for sharing compiled validators across threads.

use propcheck::{compile_schema, ReferenceTable, Schema, SchemaDescription, Value};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn user_schema() -> SchemaDescription {
    SchemaDescription::new()
        .field("name", Schema::string().min_len(1).required())
        .field("age", Schema::number().min(0.0))
}

#[test]
fn test_concurrent_validation() {
    let compiled = Arc::new(compile_schema(&user_schema(), None));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let compiled = Arc::clone(&compiled);
            thread::spawn(move || {
                let ok = Value::from(json!({"name": format!("User{}", i), "age": 20 + i}));
                assert!(compiled.validate(&ok, "User").is_success());

                let bad = Value::from(json!({"age": -i - 1}));
                let errors = compiled.validate(&bad, "User").into_result().unwrap_err();
                assert_eq!(errors.len(), 2);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_validator_shared_across_threads() {
    let compiled = compile_schema(&user_schema(), None);
    let validator = compiled.field("name").unwrap().clone();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = validator.clone();
            thread::spawn(move || {
                let name = if i % 2 == 0 { "" } else { "x" };
                let value = Value::from(json!({ "name": name }));
                validator.validate_field(&value, "name", "User").is_ok()
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, ok) in results.into_iter().enumerate() {
        assert_eq!(ok, i % 2 == 1);
    }
}

#[test]
fn test_batch_validation_with_references() {
    let mut refs = ReferenceTable::new();
    refs.register("User", user_schema()).unwrap();
    let schema = SchemaDescription::new().field("owner", Schema::reference("User").required());
    let compiled = compile_schema(&schema, Some(&refs));

    let docs: Vec<Value> = (0..200)
        .map(|i| {
            if i % 3 == 0 {
                Value::from(json!({"owner": {"age": i}}))
            } else {
                Value::from(json!({"owner": {"name": "n", "age": i}}))
            }
        })
        .collect();

    let results = compiled.validate_batch(&docs, "Doc");
    assert_eq!(results.len(), docs.len());
    for (i, result) in results.into_iter().enumerate() {
        match result.into_result() {
            Ok(()) => assert_ne!(i % 3, 0),
            Err(errors) => {
                assert_eq!(i % 3, 0);
                assert_eq!(errors.first().path.to_string(), "owner.name");
            }
        }
    }
}
