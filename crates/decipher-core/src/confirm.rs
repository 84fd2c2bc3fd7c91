//! Two-step delete confirmation, owned by the caller.
//!
//! Deleting an annotation takes two explicit user actions: the first arms a
//! confirmation, the second commits it (or cancels it). The store knows
//! nothing about this; a caller runs the machine and calls
//! [`AnnotationStore::delete`](crate::store::AnnotationStore::delete) only
//! after [`DeleteConfirmation::confirm`] succeeds.
//!
//! ```text
//! Idle ──arm──▶ Armed ──confirm──▶ Committed
//!                 │
//!                 └──cancel──▶ Cancelled ──arm──▶ Armed
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteState {
  #[default]
  Idle,
  Armed,
  Committed,
  Cancelled,
}

impl fmt::Display for DeleteState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Idle => "idle",
      Self::Armed => "armed",
      Self::Committed => "committed",
      Self::Cancelled => "cancelled",
    })
  }
}

/// Pending-delete state for one annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
  pub annotation_id: i64,
  pub state:         DeleteState,
}

impl DeleteConfirmation {
  pub fn new(annotation_id: i64) -> Self {
    Self {
      annotation_id,
      state: DeleteState::Idle,
    }
  }

  /// First step: ask the user to confirm.
  pub fn arm(&mut self) -> Result<DeleteState> {
    self.transition("arm", |from| match from {
      DeleteState::Idle | DeleteState::Cancelled => Some(DeleteState::Armed),
      _ => None,
    })
  }

  /// Second step: the user confirmed. Only after this returns `Ok` may the
  /// caller perform the delete.
  pub fn confirm(&mut self) -> Result<DeleteState> {
    self.transition("confirm", |from| match from {
      DeleteState::Armed => Some(DeleteState::Committed),
      _ => None,
    })
  }

  pub fn cancel(&mut self) -> Result<DeleteState> {
    self.transition("cancel", |from| match from {
      DeleteState::Armed => Some(DeleteState::Cancelled),
      _ => None,
    })
  }

  pub fn is_armed(&self) -> bool { self.state == DeleteState::Armed }

  fn transition(
    &mut self,
    action: &'static str,
    next: impl FnOnce(DeleteState) -> Option<DeleteState>,
  ) -> Result<DeleteState> {
    let from = self.state;
    let to = next(from).ok_or(Error::InvalidTransition { from, action })?;
    self.state = to;
    Ok(to)
  }
}
