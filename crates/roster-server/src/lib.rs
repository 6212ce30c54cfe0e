//! Server assembly for Roster: configuration, seed data, and the HTTP app.
//!
//! The `server` binary wires these together over either the SQLite backend
//! or in-memory repositories.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use axum::Router;
use roster_core::{
  countries::CountryStore, country::Country, person::{Person, PersonAddRequest},
  persons::PersonStore, repository::Repository,
};
use serde::{Deserialize, de::DeserializeOwned};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// JSON array of `{country_id, country_name}` objects seeded at startup.
  pub seed_countries: Option<PathBuf>,
  /// JSON array of person add requests, loaded only into an empty store.
  pub seed_persons:   Option<PathBuf>,
}

/// Read `path` (if it exists) layered under `ROSTER_*` environment variables.
pub fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5080_i64)?
    .set_default("store_path", "roster.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

// ─── Seeding ──────────────────────────────────────────────────────────────────

/// Counts of records written by [`seed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
  pub countries: usize,
  pub persons:   usize,
}

/// Parse a JSON seed file.
pub fn read_seed_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read seed file {path:?}"))?;
  serde_json::from_str(&raw).with_context(|| format!("invalid seed file {path:?}"))
}

/// Insert `seed_countries` with their given ids, then add `people` if no
/// person exists yet.
///
/// Countries whose id or name is already stored are skipped, so reseeding on
/// every start is harmless. Seeded persons refer to countries by those ids.
pub async fn seed<CR, PR>(
  countries: &CountryStore<CR>,
  persons: &PersonStore<PR, CountryStore<CR>>,
  seed_countries: Vec<Country>,
  people: Vec<PersonAddRequest>,
) -> anyhow::Result<SeedReport>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  let mut report = SeedReport {
    countries: countries
      .seed_countries(seed_countries)
      .await
      .context("failed to seed countries")?,
    ..SeedReport::default()
  };

  if !people.is_empty() && persons.get_all_persons().await?.is_empty() {
    for request in people {
      persons
        .add_person(Some(request))
        .await
        .context("failed to seed person")?;
      report.persons += 1;
    }
  }

  Ok(report)
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// The full HTTP app: the API nested under `/api` with request tracing.
pub fn app<CR, PR>(
  countries: CountryStore<CR>,
  persons: PersonStore<PR, CountryStore<CR>>,
) -> Router
where
  CR: Repository<Country> + 'static,
  PR: Repository<Person> + 'static,
{
  Router::new()
    .nest("/api", roster_api::api_router(countries, persons))
    .layer(TraceLayer::new_for_http())
}

/// Seed from the configured files, then serve until the listener fails.
pub async fn run<CR, PR>(
  config: &ServerConfig,
  countries: CountryStore<CR>,
  persons: PersonStore<PR, CountryStore<CR>>,
) -> anyhow::Result<()>
where
  CR: Repository<Country> + 'static,
  PR: Repository<Person> + 'static,
{
  let seed_countries = match &config.seed_countries {
    Some(path) => read_seed_file(path)?,
    None => Vec::new(),
  };
  let people = match &config.seed_persons {
    Some(path) => read_seed_file(path)?,
    None => Vec::new(),
  };
  let report = seed(&countries, &persons, seed_countries, people).await?;
  tracing::info!(countries = report.countries, persons = report.persons, "seeded");

  let address = format!("{}:{}", config.host, config.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(countries, persons))
    .await
    .context("server error")?;
  Ok(())
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

#[cfg(test)]
mod tests;
