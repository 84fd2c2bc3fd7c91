//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are written as `YYYY-MM-DD HH:MM:SS.ffffff` in UTC. That is
//! the layout SQLite's own `CURRENT_TIMESTAMP` produces (plus a fractional
//! part), so rows written by either sort correctly against each other as
//! text. Nothing else is accepted on read: `ORDER BY created_at` compares
//! the column as text, and another layout (RFC 3339's `T`, say) would sort
//! out of time order.

use chrono::{DateTime, NaiveDateTime, Utc};
use decipher_core::annotation::Annotation;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

const DT_WRITE: &str = "%Y-%m-%d %H:%M:%S%.6f";
/// `%.f` also accepts a missing fractional part.
const DT_READ: &str = "%Y-%m-%d %H:%M:%S%.f";

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.format(DT_WRITE).to_string() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  NaiveDateTime::parse_from_str(s, DT_READ)
    .map(|naive| naive.and_utc())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawAnnotation`].
pub const ANNOTATION_COLUMNS: &str =
  "id, book, chapter, verse, original_text, simplified_text, created_at";

/// A `simplified_verses` row as read from SQLite.
pub struct RawAnnotation {
  pub id:              i64,
  pub book:            String,
  pub chapter:         u32,
  pub verse:           u32,
  pub original_text:   String,
  pub simplified_text: String,
  pub created_at:      String,
}

impl RawAnnotation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      book:            row.get(1)?,
      chapter:         row.get(2)?,
      verse:           row.get(3)?,
      original_text:   row.get(4)?,
      simplified_text: row.get(5)?,
      created_at:      row.get(6)?,
    })
  }

  pub fn into_annotation(self) -> Result<Annotation> {
    Ok(Annotation {
      id:              self.id,
      book:            self.book,
      chapter:         self.chapter,
      verse:           self.verse,
      original_text:   self.original_text,
      simplified_text: self.simplified_text,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}
