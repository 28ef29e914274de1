//! Persistence boundary for the item store.
//!
//! # Responsibility
//! - Define the load/save contract used by the app controller.
//! - Keep file-system details out of the controller and store.
//!
//! # Invariants
//! - `save` fully replaces previously stored content; it never appends.
//! - `load` treats a missing backing file as an empty list.
//! - Failures are returned to the caller, never swallowed.

use crate::codec::record::{DecodeReport, EncodeError};
use crate::model::todo::TodoItem;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;

pub use file::{FileTodoStorage, DEFAULT_STORAGE_FILE};

pub type StorageResult<T> = Result<T, StorageError>;

/// File-system step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Read,
    Write,
    Replace,
}

impl Display for StorageOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

#[derive(Debug)]
pub enum StorageError {
    Io {
        op: StorageOp,
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(EncodeError),
}

impl StorageError {
    pub(crate) fn io(op: StorageOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { op, path, source } => {
                write!(f, "failed to {op} `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<EncodeError> for StorageError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

/// Load/save contract for the to-do list.
pub trait TodoStorage {
    /// Reads all stored items in order, reporting skipped records.
    fn load(&self) -> StorageResult<DecodeReport>;
    /// Replaces stored content with `items`.
    fn save(&self, items: &[TodoItem]) -> StorageResult<()>;
}

impl<S: TodoStorage + ?Sized> TodoStorage for &S {
    fn load(&self) -> StorageResult<DecodeReport> {
        (**self).load()
    }

    fn save(&self, items: &[TodoItem]) -> StorageResult<()> {
        (**self).save(items)
    }
}
