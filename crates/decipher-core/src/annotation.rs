//! Annotation types: a user's paraphrase of one verse.
//!
//! An annotation is an immutable record. `book`, `chapter`, `verse` and
//! `original_text` are a snapshot of the corpus entry taken when the record
//! was created; no link back to the corpus is enforced, so records stay
//! readable after the corpus changes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Verse reference ─────────────────────────────────────────────────────────

/// A (book, chapter, verse) address, displayed as `John 3:16`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRef {
  pub book:    String,
  pub chapter: u32,
  pub verse:   u32,
}

impl fmt::Display for VerseRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
  /// Assigned by the store; unique and increasing.
  pub id:              i64,
  pub book:            String,
  pub chapter:         u32,
  pub verse:           u32,
  pub original_text:   String,
  pub simplified_text: String,
  /// Assigned by the store at insertion; never updated.
  pub created_at:      DateTime<Utc>,
}

impl Annotation {
  pub fn verse_ref(&self) -> VerseRef {
    VerseRef {
      book:    self.book.clone(),
      chapter: self.chapter,
      verse:   self.verse,
    }
  }
}

/// Input for [`AnnotationStore::create`](crate::store::AnnotationStore::create).
///
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnnotation {
  pub book:            String,
  pub chapter:         u32,
  pub verse:           u32,
  pub original_text:   String,
  pub simplified_text: String,
}

impl NewAnnotation {
  pub fn new(
    book: impl Into<String>,
    chapter: u32,
    verse: u32,
    original_text: impl Into<String>,
    simplified_text: impl Into<String>,
  ) -> Self {
    Self {
      book: book.into(),
      chapter,
      verse,
      original_text: original_text.into(),
      simplified_text: simplified_text.into(),
    }
  }

  /// Reject the input if any field is missing. Stores call this before any
  /// write so a rejected input never leaves a partial record behind.
  pub fn validate(&self) -> Result<()> {
    for (name, value) in [
      ("book", &self.book),
      ("original_text", &self.original_text),
      ("simplified_text", &self.simplified_text),
    ] {
      if value.trim().is_empty() {
        return Err(Error::MissingField(name));
      }
    }
    if self.chapter == 0 {
      return Err(Error::InvalidNumber { field: "chapter" });
    }
    if self.verse == 0 {
      return Err(Error::InvalidNumber { field: "verse" });
    }
    Ok(())
  }
}
