//! Core domain logic for the overlay to-do list.
//! This crate owns the item store, its flat-file persistence and the
//! controller that ties them to a UI frame loop.

pub mod app;
pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use app::{AppError, LoadReport, TodoApp};
pub use codec::record::{
    decode_records, encode_records, DecodeReport, EncodeError, RecordError, SkippedRecord,
};
pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo::{now_epoch_secs, TodoItem, TodoText, TodoValidationError};
pub use storage::{
    FileTodoStorage, StorageError, StorageOp, StorageResult, TodoStorage, DEFAULT_STORAGE_FILE,
};
pub use store::todo_list::{StoreError, StoreResult, TaskSummary, TodoList};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
