//! Handlers for corpus navigation.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/corpus/status` | How the corpus was loaded |
//! | `GET`  | `/books` | Sorted book names |
//! | `GET`  | `/books/:book/chapters` | `[]` for an unknown book |
//! | `GET`  | `/books/:book/chapters/:chapter/verses` | `[]` on any miss |
//! | `GET`  | `/books/:book/chapters/:chapter/verses/:verse` | 404 on any miss |
//!
//! Chapter and verse path segments are coerced to numbers; a segment that is
//! not a positive integer is treated like an unknown key.

use axum::{Json, extract::State};
use decipher_core::{
  annotation::VerseRef,
  corpus::coerce_number,
  store::AnnotationStore,
};
use decipher_corpus::LoadStatus;
use serde::Serialize;

use crate::{ApiState, error::ApiError, extract::ApiPath};

/// `GET /corpus/status`
pub async fn status<S>(State(state): State<ApiState<S>>) -> Json<LoadStatus>
where
  S: AnnotationStore + Clone,
{
  Json(state.corpus_status.clone())
}

/// `GET /books`
pub async fn books<S>(State(state): State<ApiState<S>>) -> Json<Vec<String>>
where
  S: AnnotationStore + Clone,
{
  Json(state.corpus.list_books())
}

/// `GET /books/:book/chapters`
pub async fn chapters<S>(
  State(state): State<ApiState<S>>,
  ApiPath(book): ApiPath<String>,
) -> Json<Vec<u32>>
where
  S: AnnotationStore + Clone,
{
  Json(state.corpus.list_chapters(&book))
}

/// `GET /books/:book/chapters/:chapter/verses`
pub async fn verses<S>(
  State(state): State<ApiState<S>>,
  ApiPath((book, chapter)): ApiPath<(String, String)>,
) -> Json<Vec<u32>>
where
  S: AnnotationStore + Clone,
{
  let verses = coerce_number(&chapter)
    .map(|chapter| state.corpus.list_verses(&book, chapter))
    .unwrap_or_default();
  Json(verses)
}

/// A single verse of reference text.
#[derive(Debug, Serialize)]
pub struct VerseBody {
  pub reference:          String,
  pub book:               String,
  pub chapter:            u32,
  pub verse:              u32,
  pub text:               String,
  pub simplified_example: Option<String>,
}

/// `GET /books/:book/chapters/:chapter/verses/:verse`
pub async fn verse<S>(
  State(state): State<ApiState<S>>,
  ApiPath((book, chapter, verse)): ApiPath<(String, String, String)>,
) -> Result<Json<VerseBody>, ApiError>
where
  S: AnnotationStore + Clone,
{
  let not_found = || ApiError::NotFound(format!("{book} {chapter}:{verse} not found"));

  let chapter_n = coerce_number(&chapter).ok_or_else(not_found)?;
  let verse_n = coerce_number(&verse).ok_or_else(not_found)?;
  let entry = state
    .corpus
    .verse(&book, chapter_n, verse_n)
    .ok_or_else(not_found)?;

  let reference = VerseRef {
    book:    book.clone(),
    chapter: chapter_n,
    verse:   verse_n,
  };
  Ok(Json(VerseBody {
    reference:          reference.to_string(),
    book,
    chapter:            chapter_n,
    verse:              verse_n,
    text:               entry.text.clone(),
    simplified_example: entry.simplified_example.clone(),
  }))
}
