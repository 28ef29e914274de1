//! Ordered to-do list and its mutations.
//!
//! # Responsibility
//! - Append, toggle, remove and bulk-clear items by index.
//! - Expose read-only aggregates for status display.
//!
//! # Invariants
//! - Out-of-range indices are reported as `StoreError`, never ignored.
//! - Bulk removals preserve the relative order of surviving items.
//! - Mutations report whether they changed anything so callers can decide
//!   when a save is needed.

use crate::model::todo::{TodoItem, TodoText};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for index-based store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Index does not reference an existing item.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "todo index {index} out of range (len {len})")
            }
        }
    }
}

impl Error for StoreError {}

/// Aggregate counts shown in the list status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
}

impl Display for TaskSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tasks: {} total | {} completed",
            self.total, self.completed
        )
    }
}

/// Ordered collection of to-do items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from items in their stored order.
    pub fn from_items(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    /// Appends a new pending item stamped with the current time.
    ///
    /// Returns the index of the appended item.
    pub fn add(&mut self, text: impl Into<TodoText>) -> usize {
        self.push(TodoItem::new(text))
    }

    /// Appends an existing item as-is.
    pub fn push(&mut self, item: TodoItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Flips `completed` on the item at `index` and returns the new value.
    pub fn toggle(&mut self, index: usize) -> StoreResult<bool> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .map(TodoItem::toggle)
            .ok_or(StoreError::IndexOutOfRange { index, len })
    }

    /// Removes the item at `index`, shifting later items down by one.
    pub fn remove(&mut self, index: usize) -> StoreResult<TodoItem> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Removes every completed item and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.completed);
        before - self.items.len()
    }

    /// Removes every item and returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn count_completed(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            total: self.count(),
            completed: self.count_completed(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Iterates `(index, item)` pairs for display.
    ///
    /// Completed items are skipped when `show_completed` is false. Yielded
    /// indices are store indices, so they stay valid for `toggle`/`remove`.
    pub fn visible(&self, show_completed: bool) -> impl Iterator<Item = (usize, &TodoItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| show_completed || !item.completed)
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.items.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<TodoItem>> for TodoList {
    fn from(items: Vec<TodoItem>) -> Self {
        Self::from_items(items)
    }
}
