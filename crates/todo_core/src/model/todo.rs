//! To-do item model.
//!
//! # Responsibility
//! - Define the single record type persisted by the flat-file codec.
//! - Keep item text as raw bytes so stored content survives a load/save
//!   cycle even when it is not valid UTF-8.
//!
//! # Invariants
//! - `text` never contains `\n`; other bytes, `\r` included, are kept as-is.
//! - `completed` starts as `false` for newly created items.
//! - `created_at` is Unix epoch seconds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Validation error for item content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Text contains `\n` and would split the storage record.
    MultilineText,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultilineText => write!(f, "todo text must be a single line"),
        }
    }
}

impl Error for TodoValidationError {}

/// Task text as stored on disk.
///
/// Bytes are kept verbatim; UTF-8 is only required for display, where
/// invalid sequences render as U+FFFD.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct TodoText(Vec<u8>);

impl TodoText {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the text when it is valid UTF-8.
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn has_newline(&self) -> bool {
        self.0.contains(&b'\n')
    }
}

impl From<String> for TodoText {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&str> for TodoText {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for TodoText {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for TodoText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for TodoText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl Display for TodoText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl Debug for TodoText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_str() {
            Some(text) => Debug::fmt(text, f),
            None => write!(f, "TodoText({:?})", self.0),
        }
    }
}

impl Serialize for TodoText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_str_lossy())
    }
}

impl<'de> Deserialize<'de> for TodoText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// One task entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// User-entered task text, stored verbatim.
    pub text: TodoText,
    /// Whether the task has been checked off.
    pub completed: bool,
    /// Unix epoch seconds at creation.
    pub created_at: i64,
}

impl TodoItem {
    /// Creates a pending item stamped with the current time.
    pub fn new(text: impl Into<TodoText>) -> Self {
        Self::with_created_at(text, false, now_epoch_secs())
    }

    /// Rebuilds an item from persisted fields.
    ///
    /// Used by the codec; does not validate `text`.
    pub fn with_created_at(text: impl Into<TodoText>, completed: bool, created_at: i64) -> Self {
        Self {
            text: text.into(),
            completed,
            created_at,
        }
    }

    /// Checks that the item can be written as one storage record.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.text.has_newline() {
            return Err(TodoValidationError::MultilineText);
        }
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// Current wall-clock time in whole seconds since the Unix epoch.
///
/// Clocks set before 1970 yield negative values instead of failing.
pub fn now_epoch_secs() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(err) => -i64::try_from(err.duration().as_secs()).unwrap_or(i64::MAX),
    }
}
