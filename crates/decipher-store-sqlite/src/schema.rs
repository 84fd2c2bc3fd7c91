//! SQL schema for the Decipher SQLite store.
//!
//! Executed once at connection startup. The version is recorded in
//! `PRAGMA user_version`; future migrations will be gated on that number.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per save action. Duplicate (book, chapter, verse) rows are allowed.
-- book/chapter/verse/original_text snapshot the corpus at save time; there
-- is deliberately no reference to the corpus.
CREATE TABLE IF NOT EXISTS simplified_verses (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    book            TEXT NOT NULL,
    chapter         INTEGER NOT NULL,
    verse           INTEGER NOT NULL,
    original_text   TEXT NOT NULL,
    simplified_text TEXT NOT NULL,
    created_at      TIMESTAMP DEFAULT CURRENT_TIMESTAMP  -- UTC, store-assigned
);

CREATE INDEX IF NOT EXISTS simplified_verses_created_idx
    ON simplified_verses(created_at);

PRAGMA user_version = 1;
";
