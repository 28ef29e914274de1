//! Flat-file record codec.
//!
//! # Responsibility
//! - Convert items to and from pipe-delimited storage lines.
//! - Keep text parsing free of file-system concerns.
//!
//! # Invariants
//! - Only the first two `|` characters on a line are significant.
//! - A malformed line never aborts decoding of later lines.

pub mod record;
