//! Built-in corpus used when the external document cannot be loaded.

use std::collections::BTreeMap;

use decipher_core::corpus::{Book, Chapter, Corpus, Verse};

pub const FALLBACK_BOOK: &str = "Genesis";

/// A one-verse corpus: Genesis 1:1.
pub fn fallback() -> Corpus {
  let mut chapter = Chapter::default();
  chapter.verses.insert(1, Verse {
    text:               "In the beginning, God created the heavens and the \
                         earth."
      .to_owned(),
    simplified_example: Some(
      "Before anything else existed, God made the entire universe."
        .to_owned(),
    ),
  });

  let mut book = Book::default();
  book.chapters.insert(1, chapter);

  Corpus::new(BTreeMap::from([(FALLBACK_BOOK.to_owned(), book)]))
}
