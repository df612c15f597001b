// Copyright (C) Brian G. Milnes 2025

//! Call-site rewriter
//!
//! Appends an argument to calls of one function whose last argument is a given
//! identifier:
//!   sendReply(phone, msg, res)
//! becomes:
//!   sendReply(phone, msg, res, userLanguage)
//!
//! Matching is textual. The argument list is matched lazily and may span lines,
//! so each match ends at the first `, <trailing>)` after the call's opening
//! parenthesis. Calls inside strings or comments are rewritten too, and a
//! call that does not end in the trailing argument can be joined to a later
//! `, <trailing>)` in the file. That includes a call rewritten by an earlier
//! run, so a second run is a no-op only when no unrewritten `, <trailing>)`
//! follows the last call.
//!
//! `$` counts as an identifier character, so `$foo(` is not a call to `foo`.

pub mod rewriter {
    use std::fs;
    use std::path::{Path, PathBuf};
    use regex::Regex;
    use serde::Serialize;
    use crate::atomic_write::atomic_write::write_atomic;
    use crate::error::error::RewriteError;

    /// Literals describing which calls to rewrite and what to append
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct RewriteSpec {
        pub function_name: String,
        pub trailing_arg: String,
        pub new_arg: String,
        /// Optional first argument the call must start with
        #[serde(skip_serializing_if = "Option::is_none")]
        pub leading_arg: Option<String>,
    }

    impl RewriteSpec {
        pub fn new(function_name: &str, trailing_arg: &str, new_arg: &str) -> Self {
            RewriteSpec {
                function_name: function_name.to_string(),
                trailing_arg: trailing_arg.to_string(),
                new_arg: new_arg.to_string(),
                leading_arg: None,
            }
        }

        /// Require the call's first argument to be `leading_arg`
        pub fn with_leading_arg(mut self, leading_arg: &str) -> Self {
            self.leading_arg = Some(leading_arg.to_string());
            self
        }

        fn validate(&self) -> Result<(), RewriteError> {
            let fields = [
                ("function name", self.function_name.as_str()),
                ("trailing argument", self.trailing_arg.as_str()),
                ("new argument", self.new_arg.as_str()),
            ];
            for (what, value) in fields {
                if value.trim().is_empty() {
                    return Err(RewriteError::InvalidSpec(format!("{what} must not be empty")));
                }
            }
            if let Some(leading) = &self.leading_arg {
                if leading.trim().is_empty() {
                    return Err(RewriteError::InvalidSpec("leading argument must not be empty".to_string()));
                }
            }
            Ok(())
        }

        /// Build the call-site regex
        ///
        /// Groups: `head` is the call up to the comma before the trailing
        /// argument, `sep` the whitespace after that comma, `tail` the
        /// whitespace before the closing parenthesis.
        pub fn pattern(&self) -> Result<Regex, RewriteError> {
            self.validate()?;

            let mut head = String::new();
            if starts_with_word_char(&self.function_name) {
                head.push_str(r"\b");
            }
            head.push_str(&regex::escape(&self.function_name));
            head.push_str(r"\(");
            match &self.leading_arg {
                // The leading argument is followed by the trailing comma or by
                // `,` and more arguments; anything else means a longer name
                Some(leading) => {
                    head.push_str(r"\s*");
                    head.push_str(&regex::escape(leading));
                    head.push_str(r"\s*(?:,(?s:.*?))??");
                }
                None => head.push_str("(?s:.*?)"),
            }

            let pattern = format!(
                r"(?P<head>{head}),(?P<sep>\s*){trailing}(?P<tail>\s*)\)",
                trailing = regex::escape(&self.trailing_arg),
            );
            Ok(Regex::new(&pattern)?)
        }
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    fn starts_with_word_char(s: &str) -> bool {
        s.chars().next().is_some_and(is_word_char)
    }

    /// True when the match at `start` continues a `$`-identifier like `$foo`
    fn follows_dollar(source: &str, start: usize) -> bool {
        source[..start].ends_with('$')
    }

    /// One rewritten call, positioned in the input text
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct CallSite {
        /// 1-based line of the function name
        pub line: usize,
        /// Byte range of the whole call in the input
        pub start: usize,
        pub end: usize,
        /// The call as it appeared before rewriting
        pub text: String,
    }

    #[derive(Debug, Clone)]
    pub struct Rewrite {
        pub text: String,
        pub call_sites: Vec<CallSite>,
    }

    impl Rewrite {
        pub fn changed(&self) -> bool {
            !self.call_sites.is_empty()
        }
    }

    /// Rewrite every qualifying call in `source`
    ///
    /// Text outside the matched calls is copied unchanged. Zero matches is not
    /// an error: the result equals the input.
    pub fn rewrite_source(source: &str, spec: &RewriteSpec) -> Result<Rewrite, RewriteError> {
        let re = spec.pattern()?;

        let mut text = String::with_capacity(source.len() + 16);
        let mut call_sites = Vec::new();
        let mut last = 0;
        let mut line = 1;
        let mut pos = 0;
        let check_dollar = starts_with_word_char(&spec.function_name);

        while let Some(caps) = re.captures_at(source, pos) {
            let (Some(whole), Some(head), Some(sep), Some(tail)) =
                (caps.get(0), caps.name("head"), caps.name("sep"), caps.name("tail"))
            else {
                break;
            };

            if check_dollar && follows_dollar(source, whole.start()) {
                // Resume one char later so a real call inside the span is still found
                pos = whole.start() + source[whole.start()..].chars().next().map_or(1, char::len_utf8);
                continue;
            }

            line += source[last..whole.start()].matches('\n').count();
            call_sites.push(CallSite {
                line,
                start: whole.start(),
                end: whole.end(),
                text: whole.as_str().to_string(),
            });
            line += whole.as_str().matches('\n').count();

            // Built by hand so `$` in the literals is never read as a group reference
            text.push_str(&source[last..whole.start()]);
            text.push_str(head.as_str());
            text.push(',');
            text.push_str(sep.as_str());
            text.push_str(&spec.trailing_arg);
            text.push_str(", ");
            text.push_str(&spec.new_arg);
            text.push_str(tail.as_str());
            text.push(')');
            last = whole.end();
            pos = whole.end();
        }
        text.push_str(&source[last..]);

        Ok(Rewrite { text, call_sites })
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct RewriteOptions {
        /// Find and report call sites without touching the file
        pub dry_run: bool,
    }

    /// Outcome of rewriting one file
    #[derive(Debug, Clone, Serialize)]
    pub struct RewriteReport {
        pub path: PathBuf,
        pub spec: RewriteSpec,
        pub call_sites: Vec<CallSite>,
        pub changed: bool,
        pub written: bool,
        pub dry_run: bool,
    }

    impl RewriteReport {
        pub fn call_count(&self) -> usize {
            self.call_sites.len()
        }

        /// The one-line completion notice
        pub fn summary(&self) -> String {
            let verb = if self.dry_run { "Would update" } else { "Updated" };
            format!(
                "{} {} {} call(s) in {}",
                verb,
                self.call_count(),
                self.spec.function_name,
                self.path.display()
            )
        }
    }

    /// Rewrite qualifying calls in the file at `path`
    ///
    /// A read failure aborts before anything is written. The new text replaces
    /// the file atomically, and only when at least one call was rewritten.
    pub fn rewrite_file(
        path: &Path,
        spec: &RewriteSpec,
        options: &RewriteOptions,
    ) -> Result<RewriteReport, RewriteError> {
        let source = fs::read_to_string(path).map_err(|e| RewriteError::read(path, e))?;
        let rewrite = rewrite_source(&source, spec)?;

        let changed = rewrite.changed();
        let written = changed && !options.dry_run;
        if written {
            write_atomic(path, &rewrite.text)?;
        }

        Ok(RewriteReport {
            path: path.to_path_buf(),
            spec: spec.clone(),
            call_sites: rewrite.call_sites,
            changed,
            written,
            dry_run: options.dry_run,
        })
    }
}
