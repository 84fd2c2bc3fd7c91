//! The on-disk corpus document and its conversion into the typed tree.
//!
//! ```json
//! { "books": { "John": { "chapters": { "3": { "verses": {
//!     "16": { "text": "...", "simplified_example": "..." } } } } } } }
//! ```
//!
//! Chapter and verse keys are strings in the document. They are coerced to
//! integers here, once, and nowhere else.

use std::collections::{BTreeMap, btree_map::Entry};

use decipher_core::{
  annotation::VerseRef,
  corpus::{Book, Chapter, Corpus, Verse, coerce_number},
};
use serde::Deserialize;
use tracing::warn;

use crate::{Error, Result};

// ─── Raw document shape ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawCorpus {
  /// A document without `books` is an empty corpus, not a malformed one.
  #[serde(default)]
  books: BTreeMap<String, RawBook>,
}

#[derive(Debug, Deserialize)]
struct RawBook {
  chapters: BTreeMap<String, RawChapter>,
}

#[derive(Debug, Deserialize)]
struct RawChapter {
  verses: BTreeMap<String, RawVerse>,
}

#[derive(Debug, Deserialize)]
struct RawVerse {
  text:               String,
  #[serde(default)]
  simplified_example: Option<String>,
}

// ─── Conversion ──────────────────────────────────────────────────────────────

/// Parse a corpus document.
///
/// Fails on invalid JSON, on a missing `chapters`/`verses`/`text`, on a
/// chapter or verse key that is not a positive integer, and on two keys
/// naming the same number. A verse with blank text is left out.
pub fn parse(json: &str) -> Result<Corpus> {
  let raw: RawCorpus = serde_json::from_str(json)?;

  let mut books = BTreeMap::new();
  for (name, raw_book) in raw.books {
    let book = convert_book(&name, raw_book)?;
    books.insert(name, book);
  }
  Ok(Corpus::new(books))
}

fn convert_book(name: &str, raw: RawBook) -> Result<Book> {
  let mut book = Book::default();
  for (key, raw_chapter) in raw.chapters {
    let number = numeric_key("chapter", name, &key)?;
    let chapter = convert_chapter(name, number, raw_chapter)?;
    insert_unique(&mut book.chapters, number, chapter, "chapter", name)?;
  }
  Ok(book)
}

fn convert_chapter(book: &str, chapter: u32, raw: RawChapter) -> Result<Chapter> {
  let mut out = Chapter::default();
  for (key, raw_verse) in raw.verses {
    let number = numeric_key("verse", book, &key)?;
    if raw_verse.text.trim().is_empty() {
      let at = VerseRef {
        book: book.to_owned(),
        chapter,
        verse: number,
      };
      warn!(verse = %at, "skipping verse with blank text");
      continue;
    }
    let verse = Verse {
      text:               raw_verse.text,
      simplified_example: raw_verse
        .simplified_example
        .filter(|s| !s.trim().is_empty()),
    };
    insert_unique(&mut out.verses, number, verse, "verse", book)?;
  }
  Ok(out)
}

fn numeric_key(level: &'static str, book: &str, key: &str) -> Result<u32> {
  coerce_number(key).ok_or_else(|| Error::InvalidKey {
    level,
    book: book.to_owned(),
    key: key.to_owned(),
  })
}

fn insert_unique<V>(
  map: &mut BTreeMap<u32, V>,
  number: u32,
  value: V,
  level: &'static str,
  book: &str,
) -> Result<()> {
  match map.entry(number) {
    Entry::Vacant(slot) => {
      slot.insert(value);
      Ok(())
    }
    Entry::Occupied(_) => Err(Error::DuplicateKey {
      level,
      book: book.to_owned(),
      number,
    }),
  }
}
