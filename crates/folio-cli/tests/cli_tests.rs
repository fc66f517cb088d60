// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, ensure};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn folio(config_dir: &Path, args: &[&str], stdin: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(args)
        .env("FOLIO_CONFIG_PATH", config_dir.join("config.toml"))
        .env_remove("FOLIO_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut input) = child.stdin.take() {
        input.write_all(stdin.as_bytes())?;
    }
    Ok(child.wait_with_output()?)
}

fn stdout(output: &Output) -> Result<String> {
    ensure!(
        output.status.success(),
        "folio failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout.clone())?)
}

#[test]
fn validate_prints_errors_keyed_by_field() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let output = folio(
        temp.path(),
        &["--validate"],
        r#"{"name":"A","email":"a@b.co","subject":"Hello","message":"   "}"#,
    )?;
    let errors: serde_json::Value = serde_json::from_str(&stdout(&output)?)?;
    assert_eq!(
        errors,
        serde_json::json!({
            "name": "Name must be at least 2 characters",
            "message": "Message is required",
        })
    );
    Ok(())
}

#[test]
fn mailto_uses_the_configured_recipient() -> Result<()> {
    let temp = tempfile::tempdir()?;
    std::fs::write(
        temp.path().join("config.toml"),
        "version = 1\n[contact]\nrecipient = \"owner@example.com\"\n",
    )?;
    let output = folio(
        temp.path(),
        &["--mailto"],
        r#"{"name":"Al","email":"a@b.co","subject":"Hi & bye","message":"1234567890"}"#,
    )?;
    assert_eq!(
        stdout(&output)?.trim(),
        "mailto:owner@example.com?subject=Hi%20%26%20bye&body=Name%3A%20Al%0AEmail%3A%20a%40b.co%0A%0AMessage%3A%0A1234567890"
    );
    Ok(())
}

#[test]
fn track_reports_the_highlighted_section() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let output = folio(
        temp.path(),
        &["--track", "950", "--layout", "500,500,500", "--viewport", "400"],
        "",
    )?;
    assert_eq!(stdout(&output)?.trim(), "experience");
    Ok(())
}

#[test]
fn replay_prints_updates_and_navigation() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let script = temp.path().join("visit.jsonl");
    std::fs::write(
        &script,
        [
            r#"{"event":"edit","field":"name","value":"Al"}"#,
            r#"{"event":"edit","field":"email","value":"a@b.co"}"#,
            r#"{"event":"edit","field":"subject","value":"Hello there"}"#,
            r#"{"event":"edit","field":"message","value":"1234567890"}"#,
            r#"{"event":"submit"}"#,
            r#"{"event":"wait","ms":5000}"#,
        ]
        .join("\n"),
    )?;
    let script_arg = script.to_string_lossy().into_owned();
    let output = folio(temp.path(), &["--replay", &script_arg], "")?;
    let text = stdout(&output)?;

    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert!(lines.iter().any(|line| line.get("opened").is_some()));
    assert_eq!(
        lines.last(),
        Some(&serde_json::json!({"update": "form", "event": "status_cleared"}))
    );
    Ok(())
}

#[test]
fn check_rejects_an_invalid_config() -> Result<()> {
    let temp = tempfile::tempdir()?;
    std::fs::write(
        temp.path().join("config.toml"),
        "version = 1\n[ui]\ntheme = \"sepia\"\n",
    )?;
    let output = folio(temp.path(), &["--check"], "")?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("ui.theme"), "got {stderr}");
    Ok(())
}

#[test]
fn print_example_config_is_loadable() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let example = stdout(&folio(temp.path(), &["--print-example-config"], "")?)?;
    std::fs::write(temp.path().join("config.toml"), example)?;
    let output = folio(temp.path(), &["--check"], "")?;
    stdout(&output)?;
    Ok(())
}
