//! Flat-file storage backend.
//!
//! # Responsibility
//! - Read and decode the storage file on startup.
//! - Encode and atomically replace the storage file on save.
//!
//! # Invariants
//! - Writes go to a temporary sibling file that is renamed over the target,
//!   so readers never observe a half-written list.
//! - A missing file loads as an empty list.
//! - Text bytes are written back exactly as they were read.
//! - Saving through a symlink updates the link target and keeps the link.
//! - A replaced file keeps its permissions.

use super::{StorageError, StorageOp, StorageResult, TodoStorage};
use crate::codec::record::{decode_records, encode_records, DecodeReport};
use crate::model::todo::TodoItem;
use log::{error, info, warn};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Storage file name used when no path is configured.
pub const DEFAULT_STORAGE_FILE: &str = "todos.dat";

/// Storage backed by one pipe-delimited text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTodoStorage {
    path: PathBuf,
}

impl FileTodoStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path a save replaces.
    ///
    /// A symlinked storage file is resolved so the link itself survives and
    /// its target receives the new content.
    fn replace_target(&self) -> PathBuf {
        match fs::symlink_metadata(&self.path) {
            Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(&self.path)
                .or_else(|_| {
                    fs::read_link(&self.path).map(|link| parent_dir(&self.path).join(link))
                })
                .unwrap_or_else(|_| self.path.clone()),
            _ => self.path.clone(),
        }
    }

    fn write_replace(&self, payload: &[u8]) -> StorageResult<()> {
        let target = self.replace_target();
        let write_err = |err| StorageError::io(StorageOp::Write, &target, err);

        let mut staged = NamedTempFile::new_in(parent_dir(&target)).map_err(write_err)?;
        staged
            .write_all(payload)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(write_err)?;

        // Staged files are created owner-only; keep the mode of the file being replaced.
        if let Ok(existing) = fs::metadata(&target) {
            staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(write_err)?;
        }

        staged
            .persist(&target)
            .map_err(|err| StorageError::io(StorageOp::Replace, &target, err.error))?;
        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

impl Default for FileTodoStorage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_FILE)
    }
}

impl TodoStorage for FileTodoStorage {
    fn load(&self) -> StorageResult<DecodeReport> {
        let started_at = Instant::now();

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=todos_load module=storage status=ok source=missing path={}",
                    self.path.display()
                );
                return Ok(DecodeReport::default());
            }
            Err(err) => {
                error!(
                    "event=todos_load module=storage status=error error_code=read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(StorageError::io(StorageOp::Read, &self.path, err));
            }
        };

        let report = decode_records(&bytes);
        for skipped in &report.skipped {
            warn!(
                "event=todos_record_skipped module=storage line={} reason=\"{}\"",
                skipped.line, skipped.reason
            );
        }
        info!(
            "event=todos_load module=storage status=ok source=file items={} skipped={} duration_ms={}",
            report.items.len(),
            report.skipped.len(),
            started_at.elapsed().as_millis()
        );

        Ok(report)
    }

    fn save(&self, items: &[TodoItem]) -> StorageResult<()> {
        let started_at = Instant::now();
        let payload = encode_records(items)?;

        match self.write_replace(&payload) {
            Ok(()) => {
                info!(
                    "event=todos_save module=storage status=ok items={} bytes={} duration_ms={}",
                    items.len(),
                    payload.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=todos_save module=storage status=error error_code=write_failed duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
