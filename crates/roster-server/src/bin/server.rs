//! roster server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store (or in-memory repositories with `--in-memory`), seeds it, and serves
//! the JSON API under `/api`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_core::{countries::CountryStore, memory::MemoryRepository, persons::PersonStore};
use roster_server::{expand_tilde, load_config, run};
use roster_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster country/person server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Keep everything in memory instead of opening the SQLite store.
  #[arg(long)]
  in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = load_config(&cli.config)?;

  if cli.in_memory {
    tracing::warn!("using in-memory repositories; data is lost on exit");
    let countries = CountryStore::new(Arc::new(MemoryRepository::new()));
    let persons = PersonStore::new(Arc::new(MemoryRepository::new()), countries.clone());
    return run(&server_cfg, countries, persons).await;
  }

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let store = Arc::new(store);
  let countries = CountryStore::new(Arc::clone(&store));
  let persons = PersonStore::new(Arc::clone(&store), countries.clone());
  run(&server_cfg, countries, persons).await
}
