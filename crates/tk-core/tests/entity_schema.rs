//! JSON shape and JsonSchema validation tests for entity types.

use chrono::Utc;
use pretty_assertions::assert_eq;
use schemars::schema_for;
use serde_json::json;
use tk_core::entities::{Project, Publish};
use tk_core::enums::Release;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_publish() -> Publish {
    Publish {
        id: 7,
        task_id: 3,
        publish_type_id: 2,
        code: "cache".into(),
        path: "/prod/PRJ1/assets/chr/hero_knight/rig/cache/work/chr_hero_knight_cache_abc_w001.abc"
            .into(),
        version: 1,
        release: Release::Work,
        size: 0,
        active: false,
        created_at: Utc::now(),
    }
}

#[test]
fn publish_serializes_release_as_snake_case() {
    let value = serde_json::to_value(sample_publish()).unwrap();
    assert_eq!(value["release"], json!("work"));
    assert_eq!(value["version"], json!(1));
    assert_eq!(value["active"], json!(false));
}

#[test]
fn publish_matches_its_schema() {
    let schema = serde_json::to_value(schema_for!(Publish)).unwrap();
    let instance = serde_json::to_value(sample_publish()).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
}

#[test]
fn publish_schema_rejects_unknown_release() {
    let schema = serde_json::to_value(schema_for!(Publish)).unwrap();
    let mut instance = serde_json::to_value(sample_publish()).unwrap();
    instance["release"] = json!("final");
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}

#[test]
fn project_metadata_is_an_open_object() {
    let project = Project {
        id: 1,
        code: "PRJ1".into(),
        name: "Project One".into(),
        metadata: json!({
            "environment": { "root_path": "/prod/PRJ1", "fps": 24 },
            "client": "acme"
        })
        .as_object()
        .cloned()
        .unwrap(),
        active: true,
        created_at: Utc::now(),
    };

    let schema = serde_json::to_value(schema_for!(Project)).unwrap();
    let instance = serde_json::to_value(&project).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");

    let recovered: Project = serde_json::from_value(instance).unwrap();
    assert_eq!(recovered.root_path(), Some("/prod/PRJ1"));
}

#[test]
fn version_name_uses_release_initial() {
    let mut publish = sample_publish();
    assert_eq!(publish.version_name(), "w001");
    publish.release = Release::Release;
    publish.version = 12;
    assert_eq!(publish.version_name(), "r012");
}
