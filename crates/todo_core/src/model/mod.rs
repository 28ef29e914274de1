//! Domain model for to-do entries.
//!
//! # Responsibility
//! - Define the canonical item record shared by store, codec and UI callers.
//!
//! # Invariants
//! - Item text never contains `\n` (storage is line-oriented).
//! - `created_at` is fixed at creation time and never rewritten.

pub mod todo;
