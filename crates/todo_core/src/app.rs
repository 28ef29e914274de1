//! Application controller owning session state.
//!
//! # Responsibility
//! - Load the item store once at startup.
//! - Route UI mutations to the store and track the dirty flag.
//! - Flush pending changes once per frame through `maybe_save`.
//!
//! # Invariants
//! - The dirty flag is set only by mutations that changed the list.
//! - A failed save leaves the dirty flag set so the next frame retries.
//! - View state (`show_completed`) never marks the list dirty.

use crate::codec::record::SkippedRecord;
use crate::config::AppConfig;
use crate::model::todo::{TodoItem, TodoValidationError};
use crate::storage::{FileTodoStorage, StorageError, StorageResult, TodoStorage};
use crate::store::todo_list::{StoreError, StoreResult, TaskSummary, TodoList};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Combined error for front-ends that drive the controller.
#[derive(Debug)]
pub enum AppError {
    Validation(TodoValidationError),
    Store(StoreError),
    Storage(StorageError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<TodoValidationError> for AppError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of the startup load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of items placed in the store.
    pub loaded: usize,
    /// Malformed records dropped during decoding.
    pub skipped: Vec<SkippedRecord>,
    /// Set when the backing file existed but could not be read; the app then
    /// starts empty.
    pub load_error: Option<StorageError>,
}

/// Session controller over a storage backend.
pub struct TodoApp<S: TodoStorage> {
    storage: S,
    list: TodoList,
    dirty: bool,
    show_completed: bool,
}

impl TodoApp<FileTodoStorage> {
    /// Loads the app from the configured storage file.
    pub fn from_config(config: &AppConfig) -> (Self, LoadReport) {
        let (mut app, report) = Self::load(config.storage());
        app.show_completed = config.show_completed;
        (app, report)
    }
}

impl<S: TodoStorage> TodoApp<S> {
    /// Populates the store from `storage`.
    ///
    /// Never fails: unreadable storage yields an empty list and the error is
    /// carried in the returned report.
    pub fn load(storage: S) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let list = match storage.load() {
            Ok(decoded) => {
                report.loaded = decoded.items.len();
                report.skipped = decoded.skipped;
                TodoList::from_items(decoded.items)
            }
            Err(err) => {
                warn!(
                    "event=app_load module=app status=degraded reason=storage_unreadable error={}",
                    err
                );
                report.load_error = Some(err);
                TodoList::new()
            }
        };

        let app = Self {
            storage,
            list,
            dirty: false,
            show_completed: true,
        };
        (app, report)
    }

    /// Adds a task from raw input text.
    ///
    /// Trailing control characters are trimmed. Input that is empty after
    /// trimming is ignored and returns `Ok(None)`.
    ///
    /// # Errors
    /// - Returns `MultilineText` when the remaining text contains `\n`.
    pub fn add(&mut self, input: &str) -> Result<Option<usize>, TodoValidationError> {
        let text = input.trim_end_matches(char::is_control);
        if text.is_empty() {
            debug!("event=todo_add module=app status=skip reason=empty_input");
            return Ok(None);
        }

        let item = TodoItem::new(text);
        item.validate()?;
        let index = self.list.push(item);
        self.dirty = true;
        debug!("event=todo_add module=app status=ok index={index}");
        Ok(Some(index))
    }

    /// Flips completion of the item at `index`.
    pub fn toggle(&mut self, index: usize) -> StoreResult<bool> {
        let completed = self.list.toggle(index)?;
        self.dirty = true;
        debug!("event=todo_toggle module=app status=ok index={index} completed={completed}");
        Ok(completed)
    }

    /// Deletes the item at `index`.
    pub fn remove(&mut self, index: usize) -> StoreResult<TodoItem> {
        let removed = self.list.remove(index)?;
        self.dirty = true;
        debug!("event=todo_remove module=app status=ok index={index}");
        Ok(removed)
    }

    /// Deletes completed items; marks dirty only if something was removed.
    pub fn clear_completed(&mut self) -> usize {
        let removed = self.list.clear_completed();
        self.dirty |= removed > 0;
        debug!("event=todo_clear_completed module=app status=ok removed={removed}");
        removed
    }

    /// Deletes all items; a no-op on an empty list.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.list.clear_all();
        self.dirty |= removed > 0;
        debug!("event=todo_clear_all module=app status=ok removed={removed}");
        removed
    }

    /// Writes the list if it has unsaved changes.
    ///
    /// Returns `Ok(true)` when a save happened and `Ok(false)` when nothing
    /// was pending.
    ///
    /// # Errors
    /// - Returns the storage error unchanged; the dirty flag stays set.
    pub fn maybe_save(&mut self) -> StorageResult<bool> {
        if !self.dirty {
            return Ok(false);
        }

        match self.storage.save(self.list.items()) {
            Ok(()) => {
                self.dirty = false;
                Ok(true)
            }
            Err(err) => {
                warn!(
                    "event=app_save module=app status=error pending=true error={}",
                    err
                );
                Err(err)
            }
        }
    }

    pub fn list(&self) -> &TodoList {
        &self.list
    }

    pub fn summary(&self) -> TaskSummary {
        self.list.summary()
    }

    /// Items to display under the current view toggle, with store indices.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &TodoItem)> {
        self.list.visible(self.show_completed)
    }

    pub fn show_completed(&self) -> bool {
        self.show_completed
    }

    pub fn set_show_completed(&mut self, show: bool) {
        self.show_completed = show;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
