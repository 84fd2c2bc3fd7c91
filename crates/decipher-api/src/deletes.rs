//! Two-step delete for `/annotations/:id/delete`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/annotations/:id/delete` | Arm; 202 + confirmation state |
//! | `POST` | `/annotations/:id/delete/confirm` | Commit and delete; 204 |
//! | `POST` | `/annotations/:id/delete/cancel` | Cancel; 200 + confirmation state |
//!
//! Confirming or cancelling something that was never armed is a 409.
//! Pending confirmations live in [`ApiState`]. A cancel drops one at once; a
//! confirm drops it only after the store delete succeeds, so a failed delete
//! stays armed and can be confirmed again.

use std::{
  collections::HashMap,
  sync::{Mutex, MutexGuard, PoisonError},
};

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use decipher_core::{
  confirm::{DeleteConfirmation, DeleteState},
  store::AnnotationStore,
};
use tracing::info;

use crate::{ApiState, error::ApiError, extract::ApiPath};

/// Armed delete confirmations keyed by annotation id.
#[derive(Debug, Default)]
pub struct PendingDeletes(Mutex<HashMap<i64, DeleteConfirmation>>);

impl PendingDeletes {
  fn lock(&self) -> MutexGuard<'_, HashMap<i64, DeleteConfirmation>> {
    // The map holds plain values; a panic elsewhere cannot leave it torn.
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn state(&self, id: i64) -> DeleteState {
    self.lock().get(&id).map(|c| c.state).unwrap_or_default()
  }

  pub(crate) fn arm(&self, id: i64) -> decipher_core::Result<DeleteConfirmation> {
    let mut pending = self.lock();
    let entry = pending
      .entry(id)
      .or_insert_with(|| DeleteConfirmation::new(id));
    entry.arm()?;
    Ok(entry.clone())
  }

  /// Apply `step` to a copy of the pending confirmation for `id`. The
  /// stored entry is untouched.
  fn check(
    &self,
    id: i64,
    step: impl FnOnce(&mut DeleteConfirmation) -> decipher_core::Result<DeleteState>,
  ) -> decipher_core::Result<DeleteConfirmation> {
    let mut confirmation = self
      .lock()
      .get(&id)
      .cloned()
      .unwrap_or_else(|| DeleteConfirmation::new(id));
    step(&mut confirmation)?;
    Ok(confirmation)
  }

  fn forget(&self, id: i64) { self.lock().remove(&id); }

  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.lock().is_empty() }
}

/// `POST /annotations/:id/delete`
pub async fn arm<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AnnotationStore + Clone,
{
  let exists = state.store.get(id).await.map_err(ApiError::store)?.is_some();
  if !exists {
    state.pending_deletes.forget(id);
    return Err(ApiError::NotFound(format!("annotation {id} not found")));
  }

  let confirmation = state.pending_deletes.arm(id)?;
  Ok((StatusCode::ACCEPTED, Json(confirmation)))
}

/// `POST /annotations/:id/delete/confirm`
pub async fn confirm<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError>
where
  S: AnnotationStore + Clone,
{
  // The lock is released before the store is touched.
  state
    .pending_deletes
    .check(id, DeleteConfirmation::confirm)?;

  let removed = state.store.delete(id).await.map_err(ApiError::store)?;
  state.pending_deletes.forget(id);
  info!(id, removed, "annotation delete committed");
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /annotations/:id/delete/cancel`
pub async fn cancel<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<Json<DeleteConfirmation>, ApiError>
where
  S: AnnotationStore + Clone,
{
  let confirmation = state
    .pending_deletes
    .check(id, DeleteConfirmation::cancel)?;
  state.pending_deletes.forget(id);
  Ok(Json(confirmation))
}
