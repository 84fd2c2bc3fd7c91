//! Error types for corpus ingest.
//!
//! These never escape [`load`](crate::load); they are folded into
//! [`LoadStatus`](crate::LoadStatus) and only surface directly from
//! [`parse`](crate::parse).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  /// A chapter or verse key that is not a positive integer.
  #[error("invalid {level} number {key:?} in {book}")]
  InvalidKey {
    level: &'static str,
    book:  String,
    key:   String,
  },

  /// Two keys that coerce to the same number, e.g. `"1"` and `"01"`.
  #[error("duplicate {level} number {number} in {book}")]
  DuplicateKey {
    level:  &'static str,
    book:   String,
    number: u32,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
