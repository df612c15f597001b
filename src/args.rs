// Copyright (C) Brian G. Milnes 2025

//! Command-line configuration for callfix tools
//!
//! With no arguments the tool rewrites
//! `sendReply(..., res)` calls in src/controllers/sms.controller.js.

pub mod args {
    use std::path::{Path, PathBuf};
    use clap::{Parser, ValueEnum};
    use crate::error::error::RewriteError;
    use crate::rewriter::rewriter::{RewriteOptions, RewriteSpec};

    pub const DEFAULT_FILE: &str = "src/controllers/sms.controller.js";
    pub const DEFAULT_FUNCTION: &str = "sendReply";
    pub const DEFAULT_TRAILING_ARG: &str = "res";
    pub const DEFAULT_NEW_ARG: &str = "userLanguage";
    pub const DEFAULT_LOG_DIR: &str = "logs";

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        Text,
        Json,
    }

    #[derive(Debug, Parser)]
    #[command(name = "callfix-fix-append-trailing-arg")]
    #[command(about = "Append an argument to calls that end in a given trailing argument", long_about = None)]
    pub struct RewriteArgs {
        /// File to rewrite in place
        #[arg(short, long, default_value = DEFAULT_FILE)]
        pub file: PathBuf,

        /// Name of the called function
        #[arg(long = "function", default_value = DEFAULT_FUNCTION)]
        pub function_name: String,

        /// Last argument that marks a call to rewrite
        #[arg(long, default_value = DEFAULT_TRAILING_ARG)]
        pub trailing_arg: String,

        /// Argument appended after the trailing argument
        #[arg(long, default_value = DEFAULT_NEW_ARG)]
        pub new_arg: String,

        /// Only rewrite calls whose first argument is this
        #[arg(long)]
        pub leading_arg: Option<String>,

        /// Report what would change without writing
        #[arg(short = 'n', long)]
        pub dry_run: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        pub format: OutputFormat,

        /// Print each rewritten call site to stderr
        #[arg(short, long)]
        pub verbose: bool,

        /// Write a run log under --log-dir
        #[arg(long)]
        pub log: bool,

        #[arg(long, default_value = DEFAULT_LOG_DIR)]
        pub log_dir: PathBuf,
    }

    impl RewriteArgs {
        pub fn rewrite_spec(&self) -> RewriteSpec {
            let spec = RewriteSpec::new(&self.function_name, &self.trailing_arg, &self.new_arg);
            match &self.leading_arg {
                Some(leading) => spec.with_leading_arg(leading),
                None => spec,
            }
        }

        /// Spec plus an early check that the literals are usable
        pub fn validated_spec(&self) -> Result<RewriteSpec, RewriteError> {
            let spec = self.rewrite_spec();
            spec.pattern()?;
            Ok(spec)
        }

        pub fn rewrite_options(&self) -> RewriteOptions {
            RewriteOptions { dry_run: self.dry_run }
        }

        /// Directory containing the target file
        pub fn base_dir(&self) -> PathBuf {
            match self.file.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => Path::new(".").to_path_buf(),
            }
        }
    }
}
