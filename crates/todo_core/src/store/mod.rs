//! In-memory item store.
//!
//! # Responsibility
//! - Own the ordered list of items for the current session.
//! - Provide index-based mutations used by UI callers.
//!
//! # Invariants
//! - Insertion order is display order and storage order; nothing sorts.
//! - The store never performs I/O and never tracks persistence state.

pub mod todo_list;
