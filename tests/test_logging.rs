// Copyright (C) Brian G. Milnes 2025

//! Tests for run logs and the tool runner

use anyhow::{anyhow, Result};
use callfix::{rewrite_source, run_tool, RewriteSpec, ToolConfig, ToolLogger};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

mod common;

fn only_log_file(log_root: &Path, tool_name: &str) -> Result<String> {
    let tool_dir = log_root.join(tool_name);
    let dates = common::list_dir(&tool_dir)?;
    assert_eq!(dates.len(), 1, "Expected one date directory, got {dates:?}");
    let date_dir = tool_dir.join(&dates[0]);
    let runs = common::list_dir(&date_dir)?;
    assert_eq!(runs.len(), 1, "Expected one run log, got {runs:?}");
    assert!(runs[0].starts_with("run-") && runs[0].ends_with(".log"));
    Ok(fs::read_to_string(date_dir.join(&runs[0]))?)
}

#[test]
fn test_logger_records_spec_and_call_sites() -> Result<()> {
    let log_root = TempDir::new()?;
    let spec = RewriteSpec::new("sendReply", "res", "userLanguage").with_leading_arg("phone");
    let rewrite = rewrite_source("sendReply(phone,\n  msg,\n  res);", &spec)?;

    {
        let mut logger = ToolLogger::create(log_root.path(), "fix-test")?;
        assert!(logger.is_enabled());
        assert!(logger.log_path().is_some());
        logger.record_spec(Path::new("sms.controller.js"), &spec, false);
        for site in &rewrite.call_sites {
            logger.record_call_site(Path::new("sms.controller.js"), site);
        }
        logger.finalize("Updated 1 sendReply call(s) in sms.controller.js");
    }

    let log = only_log_file(log_root.path(), "fix-test")?;
    assert!(log.contains("Function: sendReply"));
    assert!(log.contains("Leading argument: phone"));
    assert!(log.contains("New argument: userLanguage"));
    assert!(log.contains("sms.controller.js:1: sendReply(phone,"));
    assert!(log.contains("Duration: "));
    Ok(())
}

#[test]
fn test_disabled_logger_writes_nothing() {
    let mut logger = ToolLogger::disabled();
    logger.record("ignored");
    logger.finalize("ignored");
    assert!(!logger.is_enabled());
    assert!(logger.log_path().is_none());
}

#[test]
fn test_logger_falls_back_when_root_is_a_file() -> Result<()> {
    let dir = TempDir::new()?;
    let blocker = dir.path().join("logs");
    fs::write(&blocker, "not a directory")?;

    assert!(ToolLogger::create(&blocker, "fix-test").is_err());
    let logger = ToolLogger::new(&blocker, "fix-test");
    assert!(!logger.is_enabled());
    Ok(())
}

#[test]
fn test_run_tool_records_failure_and_propagates() -> Result<()> {
    let log_root = TempDir::new()?;
    let config = ToolConfig::new("fix-failing", ".".into()).with_logging(log_root.path().to_path_buf());

    let result = run_tool(config, |logger| {
        logger.record("about to fail");
        Err(anyhow!("failed to write out.js: disk full"))
    });

    let err = result.unwrap_err();
    assert!(err.to_string().contains("disk full"));
    let log = only_log_file(log_root.path(), "fix-failing")?;
    assert!(log.contains("Entering directory '.'"));
    assert!(log.contains("Error: failed to write out.js: disk full"));
    assert!(log.contains("Failed"));
    Ok(())
}

#[test]
fn test_run_tool_without_logging_creates_no_files() -> Result<()> {
    let log_root = TempDir::new()?;
    let mut config = ToolConfig::new("fix-quiet", ".".into());
    config.log_root = log_root.path().to_path_buf();

    run_tool(config, |_logger| Ok("Updated 0 foo call(s) in app.js".to_string()))?;

    assert!(common::list_dir(log_root.path())?.is_empty());
    Ok(())
}

#[test]
fn test_runs_in_the_same_second_get_separate_logs() -> Result<()> {
    let log_root = TempDir::new()?;

    let mut first = ToolLogger::create(log_root.path(), "fix-test")?;
    std::thread::sleep(std::time::Duration::from_millis(5));
    let mut second = ToolLogger::create(log_root.path(), "fix-test")?;
    first.record("first run");
    second.record("second run");

    let first_path = first.log_path().map(Path::to_path_buf);
    let second_path = second.log_path().map(Path::to_path_buf);
    drop(first);
    drop(second);

    assert_ne!(first_path, second_path);
    let first_log = fs::read_to_string(first_path.unwrap())?;
    let second_log = fs::read_to_string(second_path.unwrap())?;
    assert!(first_log.contains("first run") && !first_log.contains("second run"));
    assert!(second_log.contains("second run") && !second_log.contains("first run"));
    Ok(())
}
