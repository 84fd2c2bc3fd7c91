//! Handlers for `/annotations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/annotations` | Body: [`CreateBody`]; returns 201 + stored record |
//! | `GET`  | `/annotations` | `?book=All&sort=newest_first&page_size=5&page=1` |
//! | `GET`  | `/annotations/stats` | Optional `?book=` |
//! | `GET`  | `/annotations/:id` | 404 if not found |

use std::num::NonZeroUsize;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use decipher_core::{
  annotation::{Annotation, NewAnnotation},
  corpus::coerce_number,
  review::{
    BookFilter, SortOrder, Statistics, compute_statistics, filter_by_book,
    paginate, unique_books,
  },
  store::AnnotationStore,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  ApiState,
  error::ApiError,
  extract::{ApiJson, ApiPath, ApiQuery},
};

pub const DEFAULT_PAGE_SIZE: usize = 5;

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /annotations`.
///
/// Every field is required. `chapter` and `verse` may be numbers or numeric
/// strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateBody {
  pub book:            Option<String>,
  pub chapter:         Value,
  pub verse:           Value,
  pub original_text:   Option<String>,
  pub simplified_text: Option<String>,
}

fn coerce_field(field: &'static str, value: &Value) -> decipher_core::Result<u32> {
  let n = match value {
    Value::Null => return Err(decipher_core::Error::MissingField(field)),
    Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
    Value::String(s) if s.trim().is_empty() => {
      return Err(decipher_core::Error::MissingField(field));
    }
    Value::String(s) => coerce_number(s),
    _ => None,
  };
  n.filter(|n| *n > 0)
    .ok_or(decipher_core::Error::InvalidNumber { field })
}

impl TryFrom<CreateBody> for NewAnnotation {
  type Error = decipher_core::Error;

  fn try_from(b: CreateBody) -> Result<Self, Self::Error> {
    let required = |field: &'static str, value: Option<String>| {
      value.ok_or(decipher_core::Error::MissingField(field))
    };

    let input = NewAnnotation {
      book:            required("book", b.book)?,
      chapter:         coerce_field("chapter", &b.chapter)?,
      verse:           coerce_field("verse", &b.verse)?,
      original_text:   required("original_text", b.original_text)?,
      simplified_text: required("simplified_text", b.simplified_text)?,
    };
    input.validate()?;
    Ok(input)
  }
}

/// `POST /annotations`; returns 201 + the stored [`Annotation`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  ApiJson(body): ApiJson<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AnnotationStore + Clone,
{
  let input = NewAnnotation::try_from(body)?;
  let annotation = state.store.create(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(annotation)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Book name, or `All` (the default).
  #[serde(default)]
  pub book:      BookFilter,
  #[serde(default)]
  pub sort:      SortOrder,
  pub page_size: Option<usize>,
  /// 1-based; clamped into range.
  pub page:      Option<usize>,
}

/// One page of annotations plus what a review screen needs around it.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnnotationPage {
  pub items:       Vec<Annotation>,
  pub page:        usize,
  pub page_size:   usize,
  pub total_pages: usize,
  pub total_items: usize,
  /// 1-based positions for "Showing x-y of N"; 0 when empty.
  pub first_item:  usize,
  pub last_item:   usize,
  /// Every book with at least one annotation, for the filter choices.
  pub books:       Vec<String>,
}

/// `GET /annotations[?book=...][&sort=...][&page_size=...][&page=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<AnnotationPage>, ApiError>
where
  S: AnnotationStore + Clone,
{
  let page_size = NonZeroUsize::new(params.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
    .ok_or_else(|| ApiError::BadRequest("page_size must be positive".into()))?;

  let all = state
    .store
    .list_all(params.sort)
    .await
    .map_err(ApiError::store)?;
  let books = unique_books(&all);
  let filtered = filter_by_book(all, &params.book);
  let page = paginate(&filtered, page_size, params.page.unwrap_or(1));

  Ok(Json(AnnotationPage {
    items: page.items.to_vec(),
    page: page.page,
    page_size: page.page_size,
    total_pages: page.total_pages,
    total_items: page.total_items,
    first_item: page.first_item(),
    last_item: page.last_item(),
    books,
  }))
}

// ─── Statistics ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct StatsParams {
  #[serde(default)]
  pub book: BookFilter,
}

/// `GET /annotations/stats[?book=...]`
pub async fn stats<S>(
  State(state): State<ApiState<S>>,
  ApiQuery(params): ApiQuery<StatsParams>,
) -> Result<Json<Statistics>, ApiError>
where
  S: AnnotationStore + Clone,
{
  let all = state
    .store
    .list_all(SortOrder::default())
    .await
    .map_err(ApiError::store)?;
  let records = filter_by_book(all, &params.book);
  Ok(Json(compute_statistics(&records)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /annotations/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<Json<Annotation>, ApiError>
where
  S: AnnotationStore + Clone,
{
  let annotation = state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("annotation {id} not found")))?;
  Ok(Json(annotation))
}
