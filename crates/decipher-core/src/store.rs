//! The `AnnotationStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `decipher-store-sqlite`).
//! Higher layers (`decipher-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  annotation::{Annotation, NewAnnotation},
  review::SortOrder,
};

/// Abstraction over a durable annotation store.
///
/// Records are append-only: `create` always inserts a new row, even when one
/// already exists for the same verse, and nothing is ever updated in place.
/// The only removal is an explicit [`delete`](AnnotationStore::delete).
///
/// Backend failures are returned, never swallowed; a caller must not assume
/// a write happened unless it received `Ok`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait AnnotationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Validate and persist a new annotation. `id` and `created_at` are set by
  /// the store.
  fn create(
    &self,
    input: NewAnnotation,
  ) -> impl Future<Output = Result<Annotation, Self::Error>> + Send + '_;

  /// Retrieve an annotation by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Annotation>, Self::Error>> + Send + '_;

  /// Snapshot of every annotation ordered by `created_at` in the requested
  /// direction, ties broken by `id` ascending.
  fn list_all(
    &self,
    order: SortOrder,
  ) -> impl Future<Output = Result<Vec<Annotation>, Self::Error>> + Send + '_;

  /// Remove the annotation with `id`. Returns `false` when there was nothing
  /// to remove; a miss is not an error.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
