// crates/reptor-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Validate server, token, and override rules.
// Purpose: Ensure invalid client settings fail before any request is made.
// =============================================================================

//! Config validation tests for reptor-config.

use std::collections::HashMap;

use reptor_config::ConfigError;
use reptor_config::ReptorConfig;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

fn config_with_server(server: &str) -> ReptorConfig {
    ReptorConfig {
        server: Some(server.to_string()),
        ..ReptorConfig::default()
    }
}

#[test]
fn server_must_be_http_url() -> TestResult {
    assert_invalid(config_with_server("ftp://reptor.example").validate(), "http or https")?;
    assert_invalid(config_with_server("reptor.example").validate(), "not a valid url")?;
    config_with_server("http://localhost:8000").validate().map_err(|err| err.to_string())
}

#[test]
fn token_must_be_non_empty_and_trimmed() -> TestResult {
    let mut config = config_with_server("https://reptor.example");
    config.token = Some("  ".to_string());
    assert_invalid(config.validate(), "token must be non-empty")?;
    config.token = Some(" abc".to_string());
    assert_invalid(config.validate(), "token must be trimmed")?;
    config.token = Some("a".repeat(2048));
    assert_invalid(config.validate(), "token exceeds max length")
}

#[test]
fn insecure_requires_https_server() -> TestResult {
    let mut config = config_with_server("http://reptor.example");
    config.insecure = true;
    assert_invalid(config.validate(), "insecure requires an https server")?;
    config.server = None;
    assert_invalid(config.validate(), "insecure requires an https server")?;
    config.server = Some("https://reptor.example".to_string());
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn server_url_requires_server() -> TestResult {
    assert_invalid(ReptorConfig::default().server_url().map(|_| ()), "server must be set")?;
    let url = config_with_server("https://reptor.example/")
        .server_url()
        .map_err(|err| err.to_string())?;
    if url.host_str() != Some("reptor.example") {
        return Err(format!("unexpected url {url}"));
    }
    Ok(())
}

#[test]
fn overrides_replace_file_values() -> TestResult {
    let env = HashMap::from([
        ("REPTOR_SERVER", "https://override.example"),
        ("REPTOR_TOKEN", "override-token"),
        ("REPTOR_PROJECT_ID", "9a1d7c55-2f6b-4d3e-8b21-5c0e4f7a6b90"),
    ]);
    let mut config = ReptorConfig::from_yaml("server: https://file.example\ntoken: file-token\n")
        .map_err(|err| err.to_string())?;
    config
        .apply_overrides(|name| env.get(name).map(ToString::to_string))
        .map_err(|err| err.to_string())?;
    if config.server.as_deref() != Some("https://override.example")
        || config.token.as_deref() != Some("override-token")
        || config.project_id.is_none()
    {
        return Err(format!("overrides not applied: {config:?}"));
    }
    Ok(())
}

#[test]
fn absent_overrides_keep_file_values() -> TestResult {
    let mut config = ReptorConfig::from_yaml("token: file-token\n").map_err(|err| err.to_string())?;
    config.apply_overrides(|_| None).map_err(|err| err.to_string())?;
    if config.token.as_deref() != Some("file-token") {
        return Err("token should be kept".to_string());
    }
    Ok(())
}

#[test]
fn invalid_project_override_is_rejected() -> TestResult {
    let mut config = ReptorConfig::default();
    assert_invalid(
        config.apply_overrides(|name| (name == "REPTOR_PROJECT_ID").then(|| "abc".to_string())),
        "REPTOR_PROJECT_ID must be a uuid",
    )
}
