// Copyright (C) Brian G. Milnes 2025

//! Run logs for callfix tools
//!
//! One file per run: <log-root>/<tool-name>/<YYYY-MM-DD>/run-<HH-MM-SS-mmm>.log
//!
//! The log never writes to stdout; the tools keep stdout to a single
//! completion line.

pub mod logging {
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use chrono::{Local, DateTime};
    use anyhow::{Context, Result};
    use crate::rewriter::rewriter::{CallSite, RewriteSpec};

    pub struct ToolLogger {
        log_file: Option<fs::File>,
        log_path: Option<PathBuf>,
        start_time: DateTime<Local>,
    }

    impl ToolLogger {
        /// A logger that records nothing
        pub fn disabled() -> Self {
            ToolLogger {
                log_file: None,
                log_path: None,
                start_time: Local::now(),
            }
        }

        /// Open a run log, or fall back to a disabled logger with a warning
        pub fn new(log_root: &Path, tool_name: &str) -> Self {
            match Self::create(log_root, tool_name) {
                Ok(logger) => logger,
                Err(e) => {
                    eprintln!("Warning: Could not create log file: {e:#}");
                    eprintln!("Continuing without logging...");
                    Self::disabled()
                }
            }
        }

        /// Open a run log, failing if the directory or file cannot be created
        pub fn create(log_root: &Path, tool_name: &str) -> Result<Self> {
            let start_time = Local::now();
            let log_dir = log_root
                .join(tool_name)
                .join(start_time.format("%Y-%m-%d").to_string());
            fs::create_dir_all(&log_dir)
                .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

            // Milliseconds keep runs in the same second apart
            let log_path = log_dir.join(format!("run-{}.log", start_time.format("%H-%M-%S-%3f")));
            let log_file = fs::File::create(&log_path)
                .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

            Ok(ToolLogger {
                log_file: Some(log_file),
                log_path: Some(log_path),
                start_time,
            })
        }

        pub fn is_enabled(&self) -> bool {
            self.log_file.is_some()
        }

        pub fn log_path(&self) -> Option<&Path> {
            self.log_path.as_deref()
        }

        /// Append a timestamped line to the log file
        pub fn record(&mut self, message: &str) {
            if let Some(ref mut file) = self.log_file {
                let _ = writeln!(file, "[{}] {message}", Local::now().format("%H:%M:%S%.3f"));
            }
        }

        pub fn record_spec(&mut self, path: &Path, spec: &RewriteSpec, dry_run: bool) {
            self.record(&format!("File: {}", path.display()));
            self.record(&format!("Function: {}", spec.function_name));
            if let Some(leading) = &spec.leading_arg {
                self.record(&format!("Leading argument: {leading}"));
            }
            self.record(&format!("Trailing argument: {}", spec.trailing_arg));
            self.record(&format!("New argument: {}", spec.new_arg));
            self.record(&format!("Dry-run: {dry_run}"));
        }

        /// Compile-mode style `path:line:` entry for one call
        pub fn record_call_site(&mut self, path: &Path, site: &CallSite) {
            let first_line = site.text.lines().next().unwrap_or_default();
            self.record(&format!("{}:{}: {}", path.display(), site.line, first_line.trim()));
        }

        /// Close the run with its summary and timing
        pub fn finalize(&mut self, summary: &str) {
            let end_time = Local::now();
            let duration = end_time.signed_duration_since(self.start_time);

            self.record("=== Run Summary ===");
            self.record(summary);
            self.record(&format!("Started: {}", self.start_time.format("%Y-%m-%d %H:%M:%S")));
            self.record(&format!("Ended: {}", end_time.format("%Y-%m-%d %H:%M:%S")));
            self.record(&format!("Duration: {}ms", duration.num_milliseconds()));
        }
    }

    impl Drop for ToolLogger {
        fn drop(&mut self) {
            if let Some(ref mut file) = self.log_file {
                let _ = file.flush();
            }
        }
    }
}
