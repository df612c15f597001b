// Copyright (C) Brian G. Milnes 2025

//! Atomic file replacement
//!
//! The new contents are written to a temp file next to the target and renamed
//! over it, so the target path holds either the old file or the complete new one.

pub mod atomic_write {
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;
    use crate::error::error::RewriteError;

    /// Replace the contents of `path` with `contents`
    pub fn write_atomic(path: &Path, contents: &str) -> Result<(), RewriteError> {
        // Same directory as the target so the rename stays on one filesystem
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| RewriteError::write(path, e))?;
        temp.write_all(contents.as_bytes()).map_err(|e| RewriteError::write(path, e))?;
        temp.as_file().sync_all().map_err(|e| RewriteError::write(path, e))?;

        // NamedTempFile is created 0600; keep the target's mode
        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(temp.path(), metadata.permissions())
                .map_err(|e| RewriteError::write(path, e))?;
        }

        temp.persist(path).map_err(|e| RewriteError::write(path, e.error))?;
        Ok(())
    }
}
