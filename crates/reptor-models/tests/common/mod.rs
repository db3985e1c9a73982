// crates/reptor-models/tests/common/mod.rs
// =============================================================================
// Module: Model Test Helpers
// Description: Shared fixtures for reptor-models integration tests.
// Purpose: Provide design JSON and error assertions reused across suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fmt::Display;

use reptor_models::ProjectDesign;
use serde_json::Value;
use serde_json::json;

/// Result type used by integration tests.
pub type TestResult = Result<(), String>;

/// Version 4 UUID accepted by `user` fields.
pub const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Design id used by fixtures.
pub const DESIGN_ID: &str = "0b3c2ea1-71e8-4c5e-9f4f-7a1f2a7d9c11";

/// Installs a test log writer once per binary.
pub fn init_logging() {
    // A second init in the same binary fails; the first subscriber stays.
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
}

/// Asserts that `result` failed with a message containing every needle.
pub fn assert_err_contains<T, E: Display>(result: Result<T, E>, needles: &[&str]) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            for needle in needles {
                if !message.contains(needle) {
                    return Err(format!("error {message} did not contain {needle}"));
                }
            }
            Ok(())
        }
        Ok(_) => Err("expected an error".to_string()),
    }
}

/// Design JSON covering every field type, with report fields grouped in sections.
pub fn design_json() -> Value {
    json!({
        "id": DESIGN_ID,
        "name": "Pentest Report",
        "scope": "global",
        "language": "en-US",
        "created": "2024-01-10T09:30:00Z",
        "finding_fields": {
            "title": {"type": "string", "label": "Title", "origin": "core", "required": true},
            "cvss": {"type": "cvss", "label": "CVSS"},
            "summary": {"type": "markdown", "label": "Summary"},
            "severity": {
                "type": "enum",
                "label": "Severity",
                "choices": [
                    {"label": "Low", "value": "low"},
                    {"label": "High", "value": "high"}
                ]
            },
            "category": {"type": "combobox", "suggestions": ["web", "network"]},
            "retest": {"type": "boolean"},
            "score": {"type": "number"},
            "found_on": {"type": "date"},
            "owner": {"type": "user"},
            "references": {"type": "list", "items": {"type": "string"}},
            "affected": {
                "type": "list",
                "items": {
                    "type": "object",
                    "properties": {
                        "host": {"type": "string"},
                        "port": {"type": "number"}
                    }
                }
            }
        },
        "report_sections": [
            {"id": "executive_summary", "fields": [{"id": "title", "type": "string"}]},
            {"id": "scope", "fields": [{"id": "scope", "type": "markdown"}]}
        ]
    })
}

/// Parsed fixture design.
pub fn design() -> Result<ProjectDesign, String> {
    ProjectDesign::from_json(&design_json()).map_err(|err| err.to_string())
}
