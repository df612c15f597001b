// Copyright (C) Brian G. Milnes 2025

//! Error types for call-site rewriting

pub mod error {
    use std::fmt;
    use std::path::PathBuf;

    /// Which file operation failed
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FileOp {
        Read,
        Write,
    }

    impl fmt::Display for FileOp {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                FileOp::Read => write!(f, "read"),
                FileOp::Write => write!(f, "write"),
            }
        }
    }

    /// Errors from building a rewrite or applying it to a file
    #[derive(Debug, thiserror::Error)]
    pub enum RewriteError {
        /// Target does not exist or cannot be opened for reading
        #[error("file not found: {path}: {source}")]
        FileNotFound {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("failed to {op} {path}: {source}")]
        Io {
            op: FileOp,
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("invalid rewrite spec: {0}")]
        InvalidSpec(String),

        #[error("invalid call-site pattern: {0}")]
        Pattern(#[from] regex::Error),
    }

    impl RewriteError {
        /// Classify a failed read: missing or unreadable files are `FileNotFound`
        pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
            match source.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    RewriteError::FileNotFound { path: path.into(), source }
                }
                _ => RewriteError::Io { op: FileOp::Read, path: path.into(), source },
            }
        }

        pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
            RewriteError::Io { op: FileOp::Write, path: path.into(), source }
        }

        pub fn is_file_not_found(&self) -> bool {
            matches!(self, RewriteError::FileNotFound { .. })
        }
    }
}
