// crates/reptor-models/tests/design_schema.rs
// =============================================================================
// Module: Design Schema Tests
// Description: Build field schemas and designs from server JSON.
// Purpose: Ensure map and list forms normalize identically and bad shapes fail.
// =============================================================================

//! Design schema construction tests for reptor-models.

use reptor_models::DesignScope;
use reptor_models::FieldOrigin;
use reptor_models::FieldSchema;
use reptor_models::FieldType;
use reptor_models::ProjectDesign;
use reptor_models::SchemaError;
use serde_json::json;

mod common;

use common::TestResult;
use common::assert_err_contains;

#[test]
fn report_sections_are_flattened_in_order() -> TestResult {
    let raw = json!({
        "report_sections": [
            {"id": "s1", "fields": [{"id": "title", "type": "string"}]},
            {"id": "s2", "fields": [{"id": "scope", "type": "markdown"}]}
        ]
    });
    let design = ProjectDesign::from_json(&raw).map_err(|err| err.to_string())?;
    let ids = design.report_fields.iter().map(|field| field.id.as_str()).collect::<Vec<_>>();
    if ids != ["title", "scope"] {
        return Err(format!("unexpected report fields {ids:?}"));
    }
    if design.report_fields[1].field_type != FieldType::Markdown {
        return Err("scope should be markdown".to_string());
    }
    Ok(())
}

#[test]
fn report_fields_win_over_report_sections() -> TestResult {
    let raw = json!({
        "report_fields": {"title": {"type": "string"}},
        "report_sections": [{"id": "s1", "fields": [{"id": "other", "type": "string"}]}]
    });
    let design = ProjectDesign::from_json(&raw).map_err(|err| err.to_string())?;
    if design.report_fields.len() != 1 || design.report_field("title").is_none() {
        return Err("expected report_fields to be used".to_string());
    }
    Ok(())
}

#[test]
fn fixture_design_carries_metadata() -> TestResult {
    let design = common::design()?;
    if design.name != "Pentest Report" || design.scope != Some(DesignScope::Global) {
        return Err("design metadata not decoded".to_string());
    }
    if design.created.is_none() || design.id.is_none() {
        return Err("design id or timestamp missing".to_string());
    }
    let title = design.finding_field("title").ok_or("title missing")?;
    if title.origin != FieldOrigin::Core || !title.required || title.label != "Title" {
        return Err("title attributes not decoded".to_string());
    }
    let names = design.finding_fields.iter().map(|field| field.name()).collect::<Vec<_>>();
    if names.first() != Some(&"title") || names.last() != Some(&"affected") {
        return Err(format!("map order not preserved: {names:?}"));
    }
    Ok(())
}

#[test]
fn overview_design_is_rejected() -> TestResult {
    let raw = json!({
        "id": common::DESIGN_ID,
        "finding_fields": "https://reptor.example/api/v1/projecttypes/x/finding_fields/"
    });
    let result = ProjectDesign::from_json(&raw);
    if !matches!(result, Err(SchemaError::OverviewDesign(ref name)) if name == "finding_fields") {
        return Err(format!("expected overview error, got {result:?}"));
    }
    Ok(())
}

#[test]
fn map_and_list_properties_normalize_identically() -> TestResult {
    let from_map = FieldSchema::from_json(
        Some("host"),
        &json!({"type": "object", "properties": {"name": {"type": "string"}}}),
    )
    .map_err(|err| err.to_string())?;
    let from_list = FieldSchema::from_json(
        None,
        &json!({"id": "host", "type": "object", "properties": [{"id": "name", "type": "string"}]}),
    )
    .map_err(|err| err.to_string())?;
    if from_map != from_list {
        return Err(format!("{from_map:?} != {from_list:?}"));
    }
    Ok(())
}

#[test]
fn map_key_overrides_inline_id() -> TestResult {
    let schema = FieldSchema::from_json(Some("key"), &json!({"id": "inline", "type": "string"}))
        .map_err(|err| err.to_string())?;
    if schema.id != "key" {
        return Err(format!("expected key id, got {}", schema.id));
    }
    Ok(())
}

#[test]
fn list_items_inherit_parent_id() -> TestResult {
    let schema = FieldSchema::from_json(
        Some("references"),
        &json!({"type": "list", "items": {"type": "string"}}),
    )
    .map_err(|err| err.to_string())?;
    let items = schema.items().ok_or("items missing")?;
    if items.id != "references" || items.field_type != FieldType::String {
        return Err(format!("unexpected items schema {items:?}"));
    }
    Ok(())
}

#[test]
fn list_without_items_is_rejected() -> TestResult {
    assert_err_contains(
        FieldSchema::from_json(Some("references"), &json!({"type": "list"})),
        &["references", "items"],
    )
}

#[test]
fn object_without_properties_is_rejected() -> TestResult {
    assert_err_contains(
        FieldSchema::from_json(Some("host"), &json!({"type": "object"})),
        &["host", "properties"],
    )
}

#[test]
fn unknown_type_is_rejected() -> TestResult {
    assert_err_contains(
        FieldSchema::from_json(Some("x"), &json!({"type": "json"})),
        &["unknown type 'json'"],
    )
}

#[test]
fn duplicate_ids_are_rejected() -> TestResult {
    let raw = json!({
        "finding_fields": [{"id": "title", "type": "string"}, {"id": "title", "type": "markdown"}]
    });
    assert_err_contains(ProjectDesign::from_json(&raw), &["duplicate field id 'title'"])
}

#[test]
fn composite_leaf_constructor_is_rejected() -> TestResult {
    assert_err_contains(FieldSchema::new("items", FieldType::List), &["items definition"])
}

#[test]
fn malformed_report_section_is_rejected() -> TestResult {
    let raw = json!({
        "report_sections": [
            "bogus",
            5,
            {"id": "s", "fields": [{"id": "t", "type": "string"}]}
        ]
    });
    let result = ProjectDesign::from_json(&raw);
    if !matches!(result, Err(SchemaError::InvalidCollection(ref name)) if name == "report_sections") {
        return Err(format!("expected invalid collection, got {result:?}"));
    }
    Ok(())
}

#[test]
fn string_properties_are_an_invalid_collection() -> TestResult {
    let result = FieldSchema::from_json(Some("o"), &json!({"type": "object", "properties": "x"}));
    if !matches!(result, Err(SchemaError::InvalidCollection(ref name)) if name == "o") {
        return Err(format!("expected invalid collection, got {result:?}"));
    }
    Ok(())
}
