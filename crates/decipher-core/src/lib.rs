//! Core types and trait definitions for Decipher.
//!
//! This crate is deliberately free of HTTP and database dependencies. It holds
//! the typed reference corpus, the annotation records users write against it,
//! and the pure review logic (sorting, filtering, paging, statistics) the
//! presentation layer drives.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod annotation;
pub mod confirm;
pub mod corpus;
pub mod error;
pub mod review;
pub mod store;

pub use error::{Error, Result};
