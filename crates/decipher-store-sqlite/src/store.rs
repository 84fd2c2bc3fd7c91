//! [`SqliteStore`]: the SQLite implementation of [`AnnotationStore`].

use std::path::Path;

use chrono::{SubsecRound, Utc};
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use decipher_core::{
  annotation::{Annotation, NewAnnotation},
  review::SortOrder,
  store::AnnotationStore,
};

use crate::{
  Result,
  encode::{ANNOTATION_COLUMNS, RawAnnotation, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Decipher annotation store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. The
/// connection closes when the last clone is dropped.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    info!(path = %path.display(), "annotation store ready");
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Ensure the annotation table exists. Safe to run on every start.
  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── AnnotationStore impl ────────────────────────────────────────────────────

impl AnnotationStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, input: NewAnnotation) -> Result<Annotation> {
    input.validate()?;

    // Stored at microsecond precision; truncate first so the returned record
    // equals what a later read produces.
    let created_at = Utc::now().trunc_subsecs(6);
    let at_str = encode_dt(created_at);
    let row = input.clone();

    let id: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO simplified_verses
             (book, chapter, verse, original_text, simplified_text, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            row.book,
            row.chapter,
            row.verse,
            row.original_text,
            row.simplified_text,
            at_str,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    let annotation = Annotation {
      id,
      book: input.book,
      chapter: input.chapter,
      verse: input.verse,
      original_text: input.original_text,
      simplified_text: input.simplified_text,
      created_at,
    };
    debug!(id, verse = %annotation.verse_ref(), "annotation created");
    Ok(annotation)
  }

  async fn get(&self, id: i64) -> Result<Option<Annotation>> {
    let raw: Option<RawAnnotation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {ANNOTATION_COLUMNS} FROM simplified_verses WHERE id = ?1"
              ),
              rusqlite::params![id],
              RawAnnotation::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAnnotation::into_annotation).transpose()
  }

  async fn list_all(&self, order: SortOrder) -> Result<Vec<Annotation>> {
    let direction = match order {
      SortOrder::NewestFirst => "DESC",
      SortOrder::OldestFirst => "ASC",
    };

    let raws: Vec<RawAnnotation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ANNOTATION_COLUMNS} FROM simplified_verses
           ORDER BY created_at {direction}, id ASC"
        ))?;
        let rows = stmt
          .query_map([], RawAnnotation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnnotation::into_annotation).collect()
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM simplified_verses WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    debug!(id, removed, "annotation delete");
    Ok(removed > 0)
  }
}
