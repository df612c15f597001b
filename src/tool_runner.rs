// Copyright (C) Brian G. Milnes 2025

//! Tool runner for callfix binaries
//!
//! Wraps a tool's body with:
//! - Timing measurement
//! - Optional run log
//! - A single completion line on stdout
//! - Error recording before the error propagates to `main`

pub mod tool_runner {
    use std::time::Instant;
    use std::path::PathBuf;
    use anyhow::Result;
    use crate::logging::logging::ToolLogger;

    pub struct ToolConfig {
        /// Name of the tool (log directory name)
        pub tool_name: String,
        /// Directory the tool works in, recorded in the log
        pub base_dir: PathBuf,
        pub log_root: PathBuf,
        pub enable_logging: bool,
    }

    impl ToolConfig {
        /// Config with logging disabled
        pub fn new(tool_name: &str, base_dir: PathBuf) -> Self {
            ToolConfig {
                tool_name: tool_name.to_string(),
                base_dir,
                log_root: PathBuf::from("logs"),
                enable_logging: false,
            }
        }

        pub fn with_logging(mut self, log_root: PathBuf) -> Self {
            self.log_root = log_root;
            self.enable_logging = true;
            self
        }
    }

    /// Run `tool_fn` and print the summary line it returns
    ///
    /// Usage:
    /// ```no_run
    /// use callfix::{run_tool, ToolConfig};
    /// let config = ToolConfig::new("fix-append-trailing-arg", ".".into());
    /// run_tool(config, |logger| {
    ///     logger.record("Starting rewrite...");
    ///     Ok("Updated 0 sendReply call(s) in app.js".to_string())
    /// }).unwrap();
    /// ```
    pub fn run_tool<F>(config: ToolConfig, tool_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ToolLogger) -> Result<String>,
    {
        let start = Instant::now();

        let mut logger = if config.enable_logging {
            ToolLogger::new(&config.log_root, &config.tool_name)
        } else {
            ToolLogger::disabled()
        };
        logger.record(&format!("Entering directory '{}'", config.base_dir.display()));

        match tool_fn(&mut logger) {
            Ok(summary) => {
                println!("{summary}");
                logger.record(&format!("Completed in {}ms", start.elapsed().as_millis()));
                logger.finalize(&summary);
                Ok(())
            }
            Err(e) => {
                logger.record(&format!("Error: {e:#}"));
                logger.finalize("Failed");
                Err(e)
            }
        }
    }
}
