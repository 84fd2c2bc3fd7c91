//! Reference corpus ingest for Decipher.
//!
//! Converts the external JSON corpus document into the typed
//! [`decipher_core::corpus::Corpus`] tree. Pure synchronous; no HTTP or
//! database dependencies.
//!
//! Loading never fails: a missing, unreadable or malformed document is
//! replaced by the built-in [`fallback`] corpus and the substitution is
//! reported through [`LoadStatus`].
//!
//! # Quick start
//!
//! ```no_run
//! use decipher_corpus::CorpusSource;
//!
//! let source = CorpusSource::new("bible_data.json");
//! let loaded = source.load();
//! println!("{:?}: {} books", loaded.status, loaded.corpus.list_books().len());
//! ```

pub mod error;
mod fallback;
mod load;
mod source;

pub use error::{Error, Result};
pub use fallback::fallback;
pub use load::{CorpusSource, LoadStatus, Loaded, load};
pub use source::parse;
