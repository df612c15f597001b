// Copyright (C) Brian G. Milnes 2025

//! Common test utilities for integration tests

#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp directory holding one fixture file
pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new(name: &str, content: &str) -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp dir")?;
        let path = dir.path().join(name);
        fs::write(&path, content)
            .context(format!("Failed to write fixture: {}", path.display()))?;
        Ok(Fixture { dir, path })
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .context(format!("Failed to read fixture: {}", self.path.display()))
    }

    /// Names of all entries in the fixture's directory
    pub fn dir_entries(&self) -> Result<Vec<String>> {
        list_dir(self.dir.path())
    }
}

pub fn list_dir(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Parse the count out of "Updated N name call(s) in path"
pub fn parse_call_count(summary: &str) -> Result<usize> {
    let count = summary
        .split_whitespace()
        .find_map(|word| word.parse::<usize>().ok())
        .context(format!("No call count in summary: {summary}"))?;
    Ok(count)
}
