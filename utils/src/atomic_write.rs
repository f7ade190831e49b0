//! Atomic file write helpers.
//!
//! Bytes go to a temp file in the destination directory, which is then renamed
//! over the target. Readers see either the old content or the new, never a
//! torn write. Where rename-over-existing fails (Windows), the old file is
//! parked as `.bak` for the duration of the swap.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// How hard to push the bytes to disk before the rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPolicy {
    /// `sync_all` the temp file, best-effort sync of the parent directory.
    #[default]
    Durable,
    /// Rename only. For tests and throwaway data.
    Fast,
}

pub fn atomic_write_with(path: impl AsRef<Path>, bytes: &[u8], sync: SyncPolicy) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    if sync == SyncPolicy::Durable {
        tmp.as_file().sync_all()?;
    }

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        let backup = path.with_extension("bak");
        let _ = fs::remove_file(&backup);
        fs::rename(path, &backup)?;

        if let Err(retry) = err.file.persist(path) {
            let _ = fs::rename(&backup, path);
            return Err(retry.error);
        }
        if let Err(e) = fs::remove_file(&backup) {
            tracing::warn!(path = %backup.display(), "Failed to remove .bak after atomic write: {e}");
        }
    }

    if sync == SyncPolicy::Durable {
        sync_parent_dir(parent);
    }
    Ok(())
}

/// Restore `path` from `path.bak` when a crash hit the backup-rename window.
pub fn recover_bak_file(path: &Path) {
    let backup = path.with_extension("bak");
    if path.exists() || !backup.exists() {
        return;
    }
    match fs::rename(&backup, path) {
        Ok(()) => tracing::warn!(
            path = %path.display(),
            "Recovered .bak file from interrupted atomic write"
        ),
        Err(e) => tracing::warn!(path = %path.display(), "Failed to recover .bak file: {e}"),
    }
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) {
    if let Err(e) = fs::File::open(parent).and_then(|dir| dir.sync_all()) {
        tracing::debug!(path = %parent.display(), "Parent directory sync failed (best-effort): {e}");
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_parent: &Path) {}
