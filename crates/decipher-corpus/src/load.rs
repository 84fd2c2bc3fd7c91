//! Loading the corpus from disk with fallback substitution.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::{Arc, OnceLock},
};

use decipher_core::corpus::Corpus;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Error, Result, fallback, parse};

// ─── Status ──────────────────────────────────────────────────────────────────

/// What happened when the corpus document was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum LoadStatus {
  /// The document was read and parsed.
  Loaded,
  /// No document at the configured path; the fallback corpus is in use.
  NotFound,
  /// The document exists but is not a valid corpus; fallback in use.
  Malformed(String),
  /// The document could not be read for another reason; fallback in use.
  Unreadable(String),
}

impl LoadStatus {
  pub fn is_fallback(&self) -> bool { !matches!(self, Self::Loaded) }
}

impl From<&Error> for LoadStatus {
  fn from(err: &Error) -> Self {
    match err {
      Error::Io(e) if e.kind() == ErrorKind::NotFound => Self::NotFound,
      // Not UTF-8: the bytes are there but they are not a corpus.
      Error::Io(e) if e.kind() == ErrorKind::InvalidData => {
        Self::Malformed(err.to_string())
      }
      Error::Io(_) => Self::Unreadable(err.to_string()),
      Error::Json(_) | Error::InvalidKey { .. } | Error::DuplicateKey { .. } => {
        Self::Malformed(err.to_string())
      }
    }
  }
}

/// A corpus together with how it was obtained.
#[derive(Debug, Clone)]
pub struct Loaded {
  pub corpus: Arc<Corpus>,
  pub status: LoadStatus,
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Read and parse the corpus at `path`, substituting [`fallback`] on any
/// failure. Never returns an error.
pub fn load(path: impl AsRef<Path>) -> Loaded {
  let path = path.as_ref();
  match read(path) {
    Ok(corpus) => {
      info!(
        path = %path.display(),
        books = corpus.books.len(),
        "corpus loaded"
      );
      Loaded {
        corpus: Arc::new(corpus),
        status: LoadStatus::Loaded,
      }
    }
    Err(err) => {
      let status = LoadStatus::from(&err);
      warn!(
        path = %path.display(),
        error = %err,
        ?status,
        "corpus unavailable, using fallback"
      );
      Loaded {
        corpus: Arc::new(fallback()),
        status,
      }
    }
  }
}

fn read(path: &Path) -> Result<Corpus> {
  // `read_to_string` closes the file before returning, on every path.
  let json = std::fs::read_to_string(path)?;
  parse(&json)
}

// ─── Load-once source ────────────────────────────────────────────────────────

/// A corpus location that is read at most once.
///
/// The first [`load`](CorpusSource::load) reads the document; every later
/// call returns the same [`Loaded`] without touching the filesystem. Build one
/// at start-up and hand the resulting `Arc<Corpus>` to whoever needs it.
#[derive(Debug)]
pub struct CorpusSource {
  path:   PathBuf,
  loaded: OnceLock<Loaded>,
}

impl CorpusSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path:   path.into(),
      loaded: OnceLock::new(),
    }
  }

  pub fn path(&self) -> &Path { &self.path }

  pub fn load(&self) -> &Loaded {
    self.loaded.get_or_init(|| load(&self.path))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  const DOC: &str = r#"{"books":{"John":{"chapters":{"3":{"verses":{
    "16":{"text":"For God so loved the world..."}
  }}}}}}"#;

  fn write(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn valid_document_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bible_data.json", DOC.as_bytes());

    let loaded = load(&path);
    assert_eq!(loaded.status, LoadStatus::Loaded);
    assert!(!loaded.status.is_fallback());
    assert_eq!(loaded.corpus.list_books(), ["John"]);
  }

  #[test]
  fn missing_document_falls_back() {
    let dir = TempDir::new().unwrap();
    let loaded = load(dir.path().join("absent.json"));

    assert_eq!(loaded.status, LoadStatus::NotFound);
    assert!(loaded.corpus.list_books().contains(&"Genesis".to_string()));
    assert_eq!(
      loaded.corpus.get_text("Genesis", 1, 1),
      Some("In the beginning, God created the heavens and the earth.")
    );
  }

  #[test]
  fn malformed_document_falls_back() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.json", br#"{"books": {"John": "#);

    let loaded = load(&path);
    assert!(matches!(loaded.status, LoadStatus::Malformed(_)));
    assert_eq!(loaded.corpus.list_books(), ["Genesis"]);
  }

  #[test]
  fn non_utf8_document_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "binary.json", &[0xff, 0xfe, 0x00, 0x7b]);

    let loaded = load(&path);
    assert!(matches!(loaded.status, LoadStatus::Malformed(_)));
  }

  #[test]
  fn directory_path_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let loaded = load(dir.path());
    assert!(matches!(loaded.status, LoadStatus::Unreadable(_)));
    assert!(loaded.status.is_fallback());
  }

  #[test]
  fn source_reads_only_once() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bible_data.json", DOC.as_bytes());
    let source = CorpusSource::new(&path);

    let first = Arc::clone(&source.load().corpus);
    fs::remove_file(&path).unwrap();
    let second = source.load();

    assert_eq!(second.status, LoadStatus::Loaded);
    assert!(Arc::ptr_eq(&first, &second.corpus));
  }

  #[test]
  fn status_serialises_with_reason() {
    let json = serde_json::to_value(LoadStatus::Malformed("bad".into())).unwrap();
    assert_eq!(json, serde_json::json!({"status": "malformed", "reason": "bad"}));
    let json = serde_json::to_value(LoadStatus::NotFound).unwrap();
    assert_eq!(json, serde_json::json!({"status": "not_found"}));
  }
}
