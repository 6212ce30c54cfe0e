//! [`CountryStore`]: add, list and look up countries.

use std::{future::Future, sync::Arc};

use uuid::Uuid;

use crate::{
  Error, Result,
  country::{Country, CountryAddRequest, CountryResponse},
  repository::Repository,
  validate::Validate as _,
};

/// Resolves a country id to its display name.
///
/// [`PersonStore`](crate::persons::PersonStore) depends on this capability
/// rather than on a concrete store, purely to fill in
/// [`PersonResponse::country_name`](crate::person::PersonResponse).
pub trait CountryNameLookup: Send + Sync {
  /// Returns `None` if no country has this id.
  fn resolve_country_name(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<String>>> + Send + '_;
}

/// Owns the lifecycle of [`Country`] records.
///
/// Cloning is cheap; the repository is reference-counted.
#[derive(Debug)]
pub struct CountryStore<R> {
  repo: Arc<R>,
}

impl<R> Clone for CountryStore<R> {
  fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: Repository<Country>> CountryStore<R> {
  pub fn new(repo: Arc<R>) -> Self { Self { repo } }

  /// Add a country with a fresh id.
  ///
  /// Fails with [`Error::InvalidArgument`] if the name is blank or already
  /// taken (exact, case-sensitive match).
  pub async fn add_country(
    &self,
    request: Option<CountryAddRequest>,
  ) -> Result<CountryResponse> {
    let request = request.ok_or(Error::NullArgument("country_add_request"))?;
    request.validate()?;

    let name = request.country_name.clone().unwrap_or_default();
    if self.name_taken(&name).await? {
      tracing::debug!(country_name = %name, "rejected duplicate country name");
      return Err(Error::InvalidArgument("Given country name already exists".into()));
    }

    let country = self
      .repo
      .add(request.into_country(Uuid::new_v4()))
      .await
      .map_err(Error::repository)?;

    tracing::info!(country_id = %country.country_id, country_name = %country.country_name, "country added");
    Ok(country.into())
  }

  pub async fn get_all_countries(&self) -> Result<Vec<CountryResponse>> {
    let countries = self.repo.get_all().await.map_err(Error::repository)?;
    Ok(countries.into_iter().map(CountryResponse::from).collect())
  }

  /// `None` for a missing id or one that matches no country.
  pub async fn get_country_by_id(&self, id: Option<Uuid>) -> Result<Option<CountryResponse>> {
    let Some(id) = id else { return Ok(None) };
    let country = self.repo.get_by_id(id).await.map_err(Error::repository)?;
    Ok(country.map(CountryResponse::from))
  }

  /// Insert every name that is non-blank and not already present, returning
  /// how many were inserted. Duplicates inside `names` count once.
  pub async fn import_countries<I>(&self, names: I) -> Result<usize>
  where
    I: IntoIterator<Item = String>,
  {
    let mut inserted = 0;
    for name in names {
      if name.trim().is_empty() || self.name_taken(&name).await? {
        continue;
      }
      self
        .repo
        .add(Country { country_id: Uuid::new_v4(), country_name: name })
        .await
        .map_err(Error::repository)?;
      inserted += 1;
    }

    tracing::info!(inserted, "countries imported");
    Ok(inserted)
  }

  /// Insert fixed-id countries, so that seeded persons can point at them.
  ///
  /// A country is skipped if its name is blank, or if its id or name is
  /// already stored. Returns how many were inserted.
  pub async fn seed_countries<I>(&self, seeds: I) -> Result<usize>
  where
    I: IntoIterator<Item = Country>,
  {
    let mut inserted = 0;
    for country in seeds {
      if country.country_name.trim().is_empty()
        || country.country_id.is_nil()
        || self.repo.get_by_id(country.country_id).await.map_err(Error::repository)?.is_some()
        || self.name_taken(&country.country_name).await?
      {
        continue;
      }
      self.repo.add(country).await.map_err(Error::repository)?;
      inserted += 1;
    }

    tracing::info!(inserted, "countries seeded");
    Ok(inserted)
  }

  async fn name_taken(&self, name: &str) -> Result<bool> {
    let name = name.to_owned();
    let matches = self
      .repo
      .find_where(move |c: &Country| c.country_name == name)
      .await
      .map_err(Error::repository)?;
    Ok(!matches.is_empty())
  }
}

impl<R: Repository<Country>> CountryNameLookup for CountryStore<R> {
  async fn resolve_country_name(&self, id: Uuid) -> Result<Option<String>> {
    let country = self.repo.get_by_id(id).await.map_err(Error::repository)?;
    Ok(country.map(|c| c.country_name))
  }
}
