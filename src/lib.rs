// Copyright (C) Brian G. Milnes 2025

//! Callfix - regex-based call-site rewriter
//!
//! Appends an argument to every call of a named function whose last
//! argument is a given identifier, rewriting one file in place.

pub mod error;
pub mod rewriter;
pub mod atomic_write;
pub mod args;
pub mod logging;
pub mod tool_runner;

// Re-export commonly used items
pub use error::error::{FileOp, RewriteError};
pub use rewriter::rewriter::{
    rewrite_file, rewrite_source, CallSite, Rewrite, RewriteOptions, RewriteReport, RewriteSpec,
};
pub use atomic_write::atomic_write::write_atomic;
pub use args::args::{OutputFormat, RewriteArgs};
pub use logging::logging::ToolLogger;
pub use tool_runner::tool_runner::{run_tool, ToolConfig};
