// crates/reptor-models/tests/resource_models.rs
// =============================================================================
// Module: Resource Model Tests
// Description: Decode findings, sections, templates, and projects.
// Purpose: Ensure API payloads bind against designs and re-encode cleanly.
// =============================================================================

//! Resource model tests for reptor-models.

use reptor_models::BindMode;
use reptor_models::Finding;
use reptor_models::FindingRaw;
use reptor_models::FindingTemplate;
use reptor_models::ModelError;
use reptor_models::Project;
use reptor_models::ProjectNote;
use reptor_models::Section;
use serde_json::json;

mod common;

use common::TestResult;
use common::assert_err_contains;

const PROJECT_ID: &str = "9a1d7c55-2f6b-4d3e-8b21-5c0e4f7a6b90";
const TEMPLATE_ID: &str = "1e4b5c2d-8a7f-4b6e-9c3d-2f1a0b9c8d7e";

fn template_json() -> serde_json::Value {
    json!({
        "id": TEMPLATE_ID,
        "usage_count": 3,
        "tags": ["web"],
        "translations": [
            {"language": "de-DE", "is_main": false, "data": {"title": "Reflektiertes XSS"}},
            {"language": "en-US", "is_main": true, "risk_score": 6.1, "data": {"title": "Reflected XSS", "wstg_category": "INPV"}}
        ]
    })
}

#[test]
fn section_decodes_and_binds_report_fields() -> TestResult {
    let design = common::design()?;
    let raw = json!({
        "id": "executive_summary",
        "label": "Executive Summary",
        "fields": ["title"],
        "project": PROJECT_ID,
        "assignee": {"id": common::USER_ID, "username": "alice"},
        "updated": "2024-03-02T12:00:00Z",
        "data": {"title": "Summary"}
    });
    let section = Section::from_json(&raw, &design, BindMode::Strict).map_err(|err| err.to_string())?;
    if section.id().as_str() != "executive_summary" {
        return Err("section id not decoded".to_string());
    }
    if section.update_body() != json!({"data": {"title": "Summary"}}) {
        return Err(format!("unexpected body {}", section.update_body()));
    }
    let encoded = section.to_json().map_err(|err| err.to_string())?;
    if encoded.get("label") != Some(&json!("Executive Summary")) {
        return Err(format!("unexpected encoding {encoded}"));
    }
    Ok(())
}

#[test]
fn section_with_bad_data_fails_to_bind() -> TestResult {
    let design = common::design()?;
    let raw = json!({"id": "scope", "data": {"scope": 1}});
    let result = Section::from_json(&raw, &design, BindMode::Strict);
    if !matches!(result, Err(ModelError::Bind(_))) {
        return Err(format!("expected bind error, got {result:?}"));
    }
    Ok(())
}

#[test]
fn finding_with_list_data_is_a_decode_error() -> TestResult {
    let design = common::design()?;
    assert_err_contains(
        Finding::from_json(&json!({"data": []}), &design, BindMode::Strict),
        &["invalid finding payload"],
    )
}

#[test]
fn finding_round_trips_metadata_and_data() -> TestResult {
    let design = common::design()?;
    let raw = json!({
        "id": "5d0c8b1e-3f2a-4e6d-9b7c-1a2b3c4d5e6f",
        "project": PROJECT_ID,
        "template": TEMPLATE_ID,
        "order": 2,
        "status": "in-progress",
        "data": {"title": "Open redirect", "severity": "low"}
    });
    let finding = Finding::from_json(&raw, &design, BindMode::Strict).map_err(|err| err.to_string())?;
    if finding.title() != Some("Open redirect") || finding.meta.order != Some(2) {
        return Err("finding not decoded".to_string());
    }
    let encoded = finding.to_json().map_err(|err| err.to_string())?;
    if encoded != raw {
        return Err(format!("unexpected encoding {encoded}"));
    }
    let body = finding.update_body();
    if body.get("template") != Some(&json!(TEMPLATE_ID)) {
        return Err(format!("template missing from body {body}"));
    }
    Ok(())
}

#[test]
fn finding_is_seeded_from_template_translation() -> TestResult {
    let template: FindingTemplate =
        serde_json::from_value(template_json()).map_err(|err| err.to_string())?;
    let german = FindingRaw::from_template(&template, Some("de-DE")).map_err(|err| err.to_string())?;
    if german.data.title() != Some("Reflektiertes XSS") {
        return Err("language selection ignored".to_string());
    }
    let fallback = FindingRaw::from_template(&template, Some("fr-FR")).map_err(|err| err.to_string())?;
    if fallback.meta.language.as_deref() != Some("en-US") || template.title() != Some("Reflected XSS") {
        return Err("main translation not used as fallback".to_string());
    }

    let design = common::design()?;
    let strict = Finding::bind(fallback.clone(), &design, BindMode::Strict);
    if strict.is_ok() {
        return Err("strict binding should reject wstg_category".to_string());
    }
    let finding = Finding::bind(fallback, &design, BindMode::Lenient).map_err(|err| err.to_string())?;
    if finding.meta.template.map(|id| id.to_string()).as_deref() != Some(TEMPLATE_ID) {
        return Err("template id not carried".to_string());
    }
    Ok(())
}

#[test]
fn template_without_translations_cannot_seed() -> TestResult {
    let template: FindingTemplate =
        serde_json::from_value(json!({"id": TEMPLATE_ID})).map_err(|err| err.to_string())?;
    assert_err_contains(FindingRaw::from_template(&template, None), &["no translations"])
}

#[test]
fn project_binds_embedded_content() -> TestResult {
    let design = common::design()?;
    let raw = json!({
        "id": PROJECT_ID,
        "name": "Acme external",
        "project_type": common::DESIGN_ID,
        "members": [{"id": common::USER_ID, "username": "alice", "roles": ["lead"]}],
        "sections": [{"id": "scope", "data": {"scope": "All of it"}}],
        "findings": [{"data": {"title": "Weak TLS"}}]
    });
    let project = Project::from_json(&raw).map_err(|err| err.to_string())?;
    if !project.uses_design(&design) || project.members[0].roles != ["lead"] {
        return Err("project not decoded".to_string());
    }
    let sections = project.bind_sections(&design, BindMode::Strict).map_err(|err| err.to_string())?;
    let findings = project.bind_findings(&design, BindMode::Strict).map_err(|err| err.to_string())?;
    if sections.len() != 1 || findings[0].title() != Some("Weak TLS") {
        return Err("embedded content not bound".to_string());
    }
    Ok(())
}

#[test]
fn new_note_omits_server_assigned_fields() -> TestResult {
    let note = ProjectNote::new("Recon").with_text("nmap output").with_icon("🔍");
    let value = serde_json::to_value(&note).map_err(|err| err.to_string())?;
    let expected = json!({
        "parent": null,
        "title": "Recon",
        "text": "nmap output",
        "checked": null,
        "icon_emoji": "🔍"
    });
    if value != expected {
        return Err(format!("unexpected note encoding {value}"));
    }
    Ok(())
}
