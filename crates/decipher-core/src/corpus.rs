//! The reference corpus: an immutable book → chapter → verse tree.
//!
//! Chapter and verse numbers are native integers. Any coercion from textual
//! keys happens once, where external data is ingested (see
//! [`coerce_number`]); every query here works on the typed tree. Because the
//! levels are `BTreeMap`s, enumerations come out in ascending order without a
//! separate sort.
//!
//! Every lookup degrades to "not found" (`None` or an empty `Vec`) instead of
//! failing, so a caller can render partial selections such as "book chosen,
//! chapter not yet chosen".

use std::collections::BTreeMap;

// ─── Tree ────────────────────────────────────────────────────────────────────

/// A single verse of reference text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
  pub text:               String,
  /// A sample paraphrase shipped with the corpus, if any.
  pub simplified_example: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
  pub verses: BTreeMap<u32, Verse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
  pub chapters: BTreeMap<u32, Chapter>,
}

/// The loaded reference corpus. Never mutated once constructed; share it as
/// `Arc<Corpus>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
  /// Book names are case-sensitive.
  pub books: BTreeMap<String, Book>,
}

// ─── Navigation ──────────────────────────────────────────────────────────────

impl Corpus {
  pub fn new(books: BTreeMap<String, Book>) -> Self { Self { books } }

  pub fn is_empty(&self) -> bool { self.books.is_empty() }

  pub fn book(&self, book: &str) -> Option<&Book> { self.books.get(book) }

  pub fn chapter(&self, book: &str, chapter: u32) -> Option<&Chapter> {
    self.book(book)?.chapters.get(&chapter)
  }

  pub fn verse(&self, book: &str, chapter: u32, verse: u32) -> Option<&Verse> {
    self.chapter(book, chapter)?.verses.get(&verse)
  }

  /// All book names in ascending lexicographic order.
  pub fn list_books(&self) -> Vec<String> {
    self.books.keys().cloned().collect()
  }

  /// Chapter numbers of `book` in ascending order; empty if the book is
  /// unknown.
  pub fn list_chapters(&self, book: &str) -> Vec<u32> {
    self
      .book(book)
      .map(|b| b.chapters.keys().copied().collect())
      .unwrap_or_default()
  }

  /// Verse numbers of `book` `chapter` in ascending order; empty if either
  /// level is unknown.
  pub fn list_verses(&self, book: &str, chapter: u32) -> Vec<u32> {
    self
      .chapter(book, chapter)
      .map(|c| c.verses.keys().copied().collect())
      .unwrap_or_default()
  }

  pub fn get_text(&self, book: &str, chapter: u32, verse: u32) -> Option<&str> {
    self.verse(book, chapter, verse).map(|v| v.text.as_str())
  }

  /// The shipped sample paraphrase. `None` both when the verse is missing
  /// and when it exists without an example.
  pub fn get_example(
    &self,
    book: &str,
    chapter: u32,
    verse: u32,
  ) -> Option<&str> {
    self
      .verse(book, chapter, verse)?
      .simplified_example
      .as_deref()
  }
}

// ─── Coercion ────────────────────────────────────────────────────────────────

/// Parse a chapter or verse key into its canonical numeric form.
///
/// Surrounding whitespace is ignored. Zero, negative and non-numeric input
/// yield `None`.
pub fn coerce_number(raw: &str) -> Option<u32> {
  raw.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
