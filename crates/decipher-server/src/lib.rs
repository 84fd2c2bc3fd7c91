//! Process composition for the Decipher server.
//!
//! Loads the corpus once, opens the annotation store, and wraps the JSON API
//! in request tracing. The binary in `main.rs` only adds logging set-up, CLI
//! parsing and the listen loop.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use axum::Router;
use decipher_api::{ApiState, api_router};
use decipher_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `DECIPHER_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  /// The JSON corpus document. A missing or invalid file is not fatal.
  pub corpus_path: PathBuf,
  /// The SQLite annotation database; created on first start.
  pub store_path:  PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:        "127.0.0.1".to_string(),
      port:        8501,
      corpus_path: PathBuf::from("bible_data.json"),
      store_path:  PathBuf::from("scripture_decipher.db"),
    }
  }
}

impl ServerConfig {
  /// Read `path` (optional) and overlay `DECIPHER_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("DECIPHER"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Composition ──────────────────────────────────────────────────────────────

/// Build the application router for `config`.
///
/// Corpus problems degrade to the fallback corpus; a store that cannot be
/// opened is an error.
pub async fn build_app(config: &ServerConfig) -> anyhow::Result<Router> {
  let loaded = decipher_corpus::load(expand_tilde(&config.corpus_path));

  let store_path = expand_tilde(&config.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  info!(corpus = ?loaded.status, "application state ready");
  let state = ApiState::new(store, loaded);

  Ok(
    Router::new()
      .nest("/api", api_router(state))
      .layer(TraceLayer::new_for_http()),
  )
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
