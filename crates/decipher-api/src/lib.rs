//! JSON REST API for Decipher.
//!
//! Exposes an axum [`Router`] over a loaded corpus and any
//! [`decipher_core::store::AnnotationStore`]. TLS, auth and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", decipher_api::api_router(state))
//! ```

pub mod annotations;
pub mod corpus;
pub mod deletes;
pub mod error;
pub mod extract;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use decipher_core::{corpus::Corpus, store::AnnotationStore};
use decipher_corpus::{LoadStatus, Loaded};

pub use deletes::PendingDeletes;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState<S: AnnotationStore> {
  pub store:           Arc<S>,
  pub corpus:          Arc<Corpus>,
  pub corpus_status:   LoadStatus,
  pub pending_deletes: Arc<PendingDeletes>,
}

impl<S: AnnotationStore> ApiState<S> {
  pub fn new(store: S, loaded: Loaded) -> Self {
    Self {
      store:           Arc::new(store),
      corpus:          loaded.corpus,
      corpus_status:   loaded.status,
      pending_deletes: Arc::default(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: AnnotationStore + Clone + 'static,
{
  Router::new()
    // Corpus navigation
    .route("/corpus/status", get(corpus::status::<S>))
    .route("/books", get(corpus::books::<S>))
    .route("/books/{book}/chapters", get(corpus::chapters::<S>))
    .route("/books/{book}/chapters/{chapter}/verses", get(corpus::verses::<S>))
    .route(
      "/books/{book}/chapters/{chapter}/verses/{verse}",
      get(corpus::verse::<S>),
    )
    // Annotations
    .route(
      "/annotations",
      get(annotations::list::<S>).post(annotations::create::<S>),
    )
    .route("/annotations/stats", get(annotations::stats::<S>))
    .route("/annotations/{id}", get(annotations::get_one::<S>))
    // Two-step delete
    .route("/annotations/{id}/delete", post(deletes::arm::<S>))
    .route("/annotations/{id}/delete/confirm", post(deletes::confirm::<S>))
    .route("/annotations/{id}/delete/cancel", post(deletes::cancel::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
