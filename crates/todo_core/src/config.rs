//! Process configuration for the to-do app.
//!
//! # Responsibility
//! - Hold caller-provided settings with stable defaults.
//! - Build the storage backend named by the configuration.

use crate::storage::{FileTodoStorage, DEFAULT_STORAGE_FILE};
use std::path::PathBuf;

/// Settings resolved by the front-end before the app is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Storage file; relative paths resolve against the working directory.
    pub storage_path: PathBuf,
    /// Initial state of the "show completed" view toggle.
    pub show_completed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
            show_completed: true,
        }
    }
}

impl AppConfig {
    pub fn storage(&self) -> FileTodoStorage {
        FileTodoStorage::new(self.storage_path.clone())
    }
}
