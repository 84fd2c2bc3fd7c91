//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use chrono::{SubsecRound, Utc};
use decipher_core::{
  annotation::NewAnnotation,
  review::{BookFilter, SortOrder, filter_by_book},
  store::AnnotationStore,
};
use tempfile::TempDir;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn john_3_16() -> NewAnnotation {
  NewAnnotation::new(
    "John",
    3,
    16,
    "For God so loved...",
    "God loved people so much...",
  )
}

fn genesis_1_1() -> NewAnnotation {
  NewAnnotation::new(
    "Genesis",
    1,
    1,
    "In the beginning, God created the heavens and the earth.",
    "God made everything.",
  )
}

/// Insert a row with a fixed `created_at`, bypassing the store's clock.
async fn insert_at(s: &SqliteStore, book: &'static str, created_at: &'static str) -> i64 {
  s.conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO simplified_verses
           (book, chapter, verse, original_text, simplified_text, created_at)
         VALUES (?1, 1, 1, 'original', 'simple', ?2)",
        rusqlite::params![book, created_at],
      )?;
      Ok(conn.last_insert_rowid())
    })
    .await
    .unwrap()
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_list_round_trips() {
  let s = store().await;
  let before_count = s.list_all(SortOrder::NewestFirst).await.unwrap().len();
  let before = Utc::now().trunc_subsecs(6);

  let created = s.create(john_3_16()).await.unwrap();

  let all = s.list_all(SortOrder::NewestFirst).await.unwrap();
  assert_eq!(all.len(), before_count + 1);
  assert_eq!(all[0], created);
  assert_eq!(created.book, "John");
  assert_eq!((created.chapter, created.verse), (3, 16));
  assert_eq!(created.original_text, "For God so loved...");
  assert_eq!(created.simplified_text, "God loved people so much...");
  assert!(created.created_at >= before);
}

#[tokio::test]
async fn create_appends_duplicates_for_same_verse() {
  let s = store().await;
  let a = s.create(john_3_16()).await.unwrap();
  let b = s.create(john_3_16()).await.unwrap();

  assert!(b.id > a.id);
  assert_eq!(s.list_all(SortOrder::OldestFirst).await.unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_input_writes_nothing() {
  let s = store().await;
  let mut input = john_3_16();
  input.simplified_text = "  ".into();

  let err = s.create(input).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(decipher_core::Error::MissingField("simplified_text"))
  ));
  assert!(s.list_all(SortOrder::NewestFirst).await.unwrap().is_empty());
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let a = s.create(john_3_16()).await.unwrap();
  s.delete(a.id).await.unwrap();
  let b = s.create(john_3_16()).await.unwrap();
  assert!(b.id > a.id);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_by_id() {
  let s = store().await;
  let created = s.create(genesis_1_1()).await.unwrap();

  assert_eq!(s.get(created.id).await.unwrap(), Some(created));
  assert_eq!(s.get(9_999).await.unwrap(), None);
}

#[tokio::test]
async fn list_all_orders_by_time_then_id() {
  let s = store().await;
  let early = insert_at(&s, "Genesis", "2024-01-01 08:00:00.000000").await;
  let tie_a = insert_at(&s, "John", "2024-03-01 08:00:00.000000").await;
  let tie_b = insert_at(&s, "Psalms", "2024-03-01 08:00:00.000000").await;
  let late = insert_at(&s, "John", "2024-06-01 08:00:00.000000").await;

  let newest: Vec<i64> = s
    .list_all(SortOrder::NewestFirst)
    .await
    .unwrap()
    .iter()
    .map(|a| a.id)
    .collect();
  assert_eq!(newest, [late, tie_a, tie_b, early]);

  let oldest: Vec<i64> = s
    .list_all(SortOrder::OldestFirst)
    .await
    .unwrap()
    .iter()
    .map(|a| a.id)
    .collect();
  assert_eq!(oldest, [early, tie_a, tie_b, late]);
}

#[tokio::test]
async fn rows_with_default_timestamp_are_readable() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute(
        "INSERT INTO simplified_verses
           (book, chapter, verse, original_text, simplified_text)
         VALUES ('Romans', 8, 28, 'And we know...', 'Good comes...')",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let all = s.list_all(SortOrder::NewestFirst).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].book, "Romans");
  assert!(all[0].created_at <= Utc::now());
}

#[tokio::test]
async fn filter_scenario_returns_the_one_record() {
  let s = store().await;
  s.create(genesis_1_1()).await.unwrap();
  let john = s.create(john_3_16()).await.unwrap();
  s.create(genesis_1_1()).await.unwrap();

  let all = s.list_all(SortOrder::NewestFirst).await.unwrap();
  let only_john = filter_by_book(all, &BookFilter::Book("John".into()));
  assert_eq!(only_john, [john]);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_record() {
  let s = store().await;
  let keep = s.create(genesis_1_1()).await.unwrap();
  let gone = s.create(john_3_16()).await.unwrap();

  assert!(s.delete(gone.id).await.unwrap());

  let all = s.list_all(SortOrder::NewestFirst).await.unwrap();
  assert_eq!(all, [keep]);
  assert_eq!(s.get(gone.id).await.unwrap(), None);
}

#[tokio::test]
async fn delete_twice_is_a_no_op() {
  let s = store().await;
  let a = s.create(john_3_16()).await.unwrap();

  assert!(s.delete(a.id).await.unwrap());
  let after_first = s.list_all(SortOrder::NewestFirst).await.unwrap();

  assert!(!s.delete(a.id).await.unwrap());
  let after_second = s.list_all(SortOrder::NewestFirst).await.unwrap();

  assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn delete_unknown_id_is_not_an_error() {
  let s = store().await;
  assert!(!s.delete(42).await.unwrap());
}

// ─── Backend failures ────────────────────────────────────────────────────────

async fn drop_table(s: &SqliteStore) {
  s.conn
    .call(|conn| {
      conn.execute_batch("DROP TABLE simplified_verses")?;
      Ok(())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn backend_failures_propagate() {
  let s = store().await;
  let existing = s.create(john_3_16()).await.unwrap();
  drop_table(&s).await;

  assert!(matches!(
    s.create(genesis_1_1()).await,
    Err(crate::Error::Database(_))
  ));
  assert!(matches!(
    s.list_all(SortOrder::NewestFirst).await,
    Err(crate::Error::Database(_))
  ));
  assert!(matches!(s.get(existing.id).await, Err(crate::Error::Database(_))));
  assert!(matches!(
    s.delete(existing.id).await,
    Err(crate::Error::Database(_))
  ));
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn records_survive_reopen() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("scripture_decipher.db");

  let created = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create(john_3_16()).await.unwrap()
  };

  // Re-running schema initialisation must not disturb existing rows.
  let s = SqliteStore::open(&path).await.unwrap();
  let all = s.list_all(SortOrder::NewestFirst).await.unwrap();
  assert_eq!(all, [created]);
}

#[tokio::test]
async fn open_fails_for_unusable_path() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("missing-dir").join("store.db");
  assert!(matches!(
    SqliteStore::open(&path).await,
    Err(crate::Error::Database(_))
  ));
}
