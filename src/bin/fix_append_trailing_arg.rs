// Copyright (C) Brian G. Milnes 2025

//! Fix: Append an argument to calls ending in a given trailing argument
//!
//! Transforms calls like:
//!   sendReply(phone, "Welcome", res)
//! into:
//!   sendReply(phone, "Welcome", res, userLanguage)
//!
//! Replaces: scripts/fix-sendreply.py
//! Binary: callfix-fix-append-trailing-arg

use anyhow::Result;
use clap::Parser;
use callfix::{rewrite_file, run_tool, OutputFormat, RewriteArgs, ToolConfig};

const TOOL_NAME: &str = "fix-append-trailing-arg";

fn main() -> Result<()> {
    let args = RewriteArgs::parse();

    let mut config = ToolConfig::new(TOOL_NAME, args.base_dir());
    if args.log {
        config = config.with_logging(args.log_dir.clone());
    }

    run_tool(config, |logger| {
        let spec = args.validated_spec()?;
        logger.record_spec(&args.file, &spec, args.dry_run);

        let report = rewrite_file(&args.file, &spec, &args.rewrite_options())?;

        for site in &report.call_sites {
            logger.record_call_site(&report.path, site);
            if args.verbose {
                eprintln!(
                    "{}:{}: {} call ends in {}",
                    report.path.display(),
                    site.line,
                    spec.function_name,
                    spec.trailing_arg
                );
            }
        }
        if !report.written {
            logger.record("File left unchanged");
        }

        let summary = match args.format {
            OutputFormat::Text => report.summary(),
            OutputFormat::Json => serde_json::to_string(&report)?,
        };
        Ok(summary)
    })
}
