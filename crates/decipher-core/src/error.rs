//! Error types for `decipher-core`.

use thiserror::Error;

use crate::confirm::DeleteState;

#[derive(Debug, Error)]
pub enum Error {
  /// A required annotation input was absent or blank.
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("{field} must be a positive integer")]
  InvalidNumber { field: &'static str },

  #[error("cannot {action} a delete that is {from}")]
  InvalidTransition {
    from:   DeleteState,
    action: &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
