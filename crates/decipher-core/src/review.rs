//! Review helpers over a list of annotations: sorting, filtering by book,
//! paging and summary statistics.
//!
//! These are pure functions. Callers fetch a snapshot with
//! [`AnnotationStore::list_all`](crate::store::AnnotationStore::list_all) and
//! project it here.

use std::{fmt, num::NonZeroUsize, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::annotation::Annotation;

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Direction for ordering annotations by `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
  #[default]
  NewestFirst,
  OldestFirst,
}

/// Re-sort `records` by `created_at` in `order`, ties by `id` ascending.
pub fn sort_records(records: &mut [Annotation], order: SortOrder) {
  records.sort_by(|a, b| {
    let by_time = match order {
      SortOrder::NewestFirst => b.created_at.cmp(&a.created_at),
      SortOrder::OldestFirst => a.created_at.cmp(&b.created_at),
    };
    by_time.then(a.id.cmp(&b.id))
  });
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Restricts a review to one book. Parsed from a string where `"All"` means
/// no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookFilter {
  #[default]
  All,
  Book(String),
}

impl BookFilter {
  pub const ALL: &'static str = "All";

  pub fn matches(&self, book: &str) -> bool {
    match self {
      Self::All => true,
      Self::Book(name) => name == book,
    }
  }
}

impl From<&str> for BookFilter {
  fn from(s: &str) -> Self {
    match s {
      Self::ALL => Self::All,
      name => Self::Book(name.to_owned()),
    }
  }
}

impl FromStr for BookFilter {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self::from(s)) }
}

impl fmt::Display for BookFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str(Self::ALL),
      Self::Book(name) => f.write_str(name),
    }
  }
}

impl Serialize for BookFilter {
  fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for BookFilter {
  fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(d)?;
    Ok(Self::from(raw.as_str()))
  }
}

/// Keep the records whose `book` equals the filter exactly, in input order.
pub fn filter_by_book(
  records: Vec<Annotation>,
  filter: &BookFilter,
) -> Vec<Annotation> {
  match filter {
    BookFilter::All => records,
    BookFilter::Book(_) => {
      records.into_iter().filter(|r| filter.matches(&r.book)).collect()
    }
  }
}

/// The distinct book names present in `records`, sorted.
pub fn unique_books(records: &[Annotation]) -> Vec<String> {
  let mut books: Vec<String> = records.iter().map(|r| r.book.clone()).collect();
  books.sort();
  books.dedup();
  books
}

// ─── Paging ──────────────────────────────────────────────────────────────────

/// One page of a record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
  pub items:       &'a [T],
  /// 1-based page number after clamping.
  pub page:        usize,
  pub page_size:   usize,
  /// Never less than 1, even for an empty list.
  pub total_pages: usize,
  pub total_items: usize,
}

impl<T> Page<'_, T> {
  /// 1-based position of the first item on this page; 0 when empty.
  pub fn first_item(&self) -> usize {
    if self.items.is_empty() {
      0
    } else {
      (self.page - 1) * self.page_size + 1
    }
  }

  /// 1-based position of the last item on this page; 0 when empty.
  pub fn last_item(&self) -> usize {
    if self.items.is_empty() {
      return 0;
    }
    (self.page - 1) * self.page_size + self.items.len()
  }
}

/// Number of pages needed for `total` items, at least 1.
pub fn total_pages(total: usize, page_size: NonZeroUsize) -> usize {
  total.div_ceil(page_size.get()).max(1)
}

/// Clamp a requested 1-based page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
  page.clamp(1, total_pages.max(1))
}

/// Slice `records` into the requested page.
///
/// `page` is 1-based and clamped into range, so an out-of-range request
/// yields the nearest valid page.
pub fn paginate<T>(
  records: &[T],
  page_size: NonZeroUsize,
  page: usize,
) -> Page<'_, T> {
  let total_items = records.len();
  let total_pages = total_pages(total_items, page_size);
  let page = clamp_page(page, total_pages);

  let start = ((page - 1) * page_size.get()).min(total_items);
  let end = (start + page_size.get()).min(total_items);

  Page {
    items: &records[start..end],
    page,
    page_size: page_size.get(),
    total_pages,
    total_items,
  }
}

// ─── Statistics ──────────────────────────────────────────────────────────────

/// Summary figures for a set of annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
  pub total:            usize,
  /// Ties go to the book encountered first in the input.
  pub most_common_book: Option<String>,
  pub earliest:         Option<DateTime<Utc>>,
}

pub fn compute_statistics(records: &[Annotation]) -> Statistics {
  // Insertion-ordered counts so ties resolve to the first-seen book.
  let mut counts: Vec<(&str, usize)> = Vec::new();
  for r in records {
    match counts.iter_mut().find(|(book, _)| *book == r.book.as_str()) {
      Some((_, n)) => *n += 1,
      None => counts.push((r.book.as_str(), 1)),
    }
  }

  let mut most_common: Option<(&str, usize)> = None;
  for (book, n) in counts {
    if most_common.is_none_or(|(_, best)| n > best) {
      most_common = Some((book, n));
    }
  }

  Statistics {
    total:            records.len(),
    most_common_book: most_common.map(|(book, _)| book.to_owned()),
    earliest:         records.iter().map(|r| r.created_at).min(),
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn record(id: i64, book: &str, ts_secs: i64) -> Annotation {
    Annotation {
      id,
      book: book.into(),
      chapter: 1,
      verse: 1,
      original_text: "original".into(),
      simplified_text: "simple".into(),
      created_at: Utc.timestamp_opt(ts_secs, 0).unwrap(),
    }
  }

  fn ids(records: &[Annotation]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
  }

  fn size(n: usize) -> NonZeroUsize { NonZeroUsize::new(n).unwrap() }

  // ── Sorting ───────────────────────────────────────────────────────────────

  #[test]
  fn sort_newest_first_breaks_ties_by_id() {
    let mut rs = vec![
      record(1, "John", 100),
      record(3, "John", 200),
      record(2, "John", 200),
    ];
    sort_records(&mut rs, SortOrder::NewestFirst);
    assert_eq!(ids(&rs), [2, 3, 1]);

    sort_records(&mut rs, SortOrder::OldestFirst);
    assert_eq!(ids(&rs), [1, 2, 3]);
  }

  // ── Filtering ─────────────────────────────────────────────────────────────

  #[test]
  fn filter_all_is_identity() {
    let rs = vec![record(2, "John", 2), record(1, "Genesis", 1)];
    let out = filter_by_book(rs.clone(), &BookFilter::All);
    assert_eq!(out, rs);
  }

  #[test]
  fn filter_by_book_is_exact_and_keeps_order() {
    let rs = vec![
      record(3, "John", 3),
      record(2, "Genesis", 2),
      record(1, "John", 1),
      record(4, "1 John", 4),
    ];
    let out = filter_by_book(rs, &"John".parse().unwrap());
    assert_eq!(ids(&out), [3, 1]);
  }

  #[test]
  fn book_filter_parses_all() {
    assert_eq!("All".parse::<BookFilter>().unwrap(), BookFilter::All);
    assert_eq!(
      "Psalms".parse::<BookFilter>().unwrap(),
      BookFilter::Book("Psalms".into())
    );
    let json: BookFilter = serde_json::from_str("\"All\"").unwrap();
    assert_eq!(json, BookFilter::All);
  }

  #[test]
  fn unique_books_sorted_and_deduplicated() {
    let rs = vec![
      record(1, "John", 1),
      record(2, "Genesis", 2),
      record(3, "John", 3),
    ];
    assert_eq!(unique_books(&rs), ["Genesis", "John"]);
  }

  // ── Paging ────────────────────────────────────────────────────────────────

  #[test]
  fn empty_list_has_one_empty_page() {
    let empty: [u8; 0] = [];
    let page = paginate(&empty, size(5), 1);
    assert_eq!(page.total_pages, 1);
    assert!(page.items.is_empty());
    assert_eq!((page.first_item(), page.last_item()), (0, 0));
  }

  #[test]
  fn last_page_is_partial() {
    let items: Vec<u32> = (1..=12).collect();
    let page = paginate(&items, size(5), 3);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items, [11, 12]);
    assert_eq!((page.first_item(), page.last_item()), (11, 12));
  }

  #[test]
  fn out_of_range_pages_are_clamped() {
    let items: Vec<u32> = (1..=7).collect();
    assert_eq!(paginate(&items, size(5), 0).page, 1);
    let last = paginate(&items, size(5), 40);
    assert_eq!(last.page, 2);
    assert_eq!(last.items, [6, 7]);
  }

  #[test]
  fn pages_concatenate_to_input() {
    for n in 0..=23 {
      let items: Vec<usize> = (0..n).collect();
      for p in 1..=6 {
        let total = total_pages(n, size(p));
        let joined: Vec<usize> = (1..=total)
          .flat_map(|page| paginate(&items, size(p), page).items.to_vec())
          .collect();
        assert_eq!(joined, items, "n={n} page_size={p}");
      }
    }
  }

  // ── Statistics ────────────────────────────────────────────────────────────

  #[test]
  fn statistics_of_nothing() {
    let stats = compute_statistics(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.most_common_book, None);
    assert_eq!(stats.earliest, None);
  }

  #[test]
  fn statistics_most_common_and_earliest() {
    let rs = vec![
      record(1, "Genesis", 300),
      record(2, "Genesis", 100),
      record(3, "John", 200),
    ];
    let stats = compute_statistics(&rs);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.most_common_book.as_deref(), Some("Genesis"));
    assert_eq!(stats.earliest, Some(Utc.timestamp_opt(100, 0).unwrap()));
  }

  #[test]
  fn statistics_tie_goes_to_first_seen() {
    let rs = vec![
      record(1, "John", 1),
      record(2, "Genesis", 2),
      record(3, "Genesis", 3),
      record(4, "John", 4),
    ];
    let stats = compute_statistics(&rs);
    assert_eq!(stats.most_common_book.as_deref(), Some("John"));
  }
}
