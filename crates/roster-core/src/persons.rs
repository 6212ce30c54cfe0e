//! [`PersonStore`]: CRUD, filtering and sorting over persons.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
  Error, Result,
  countries::CountryNameLookup,
  person::{Person, PersonAddRequest, PersonResponse, PersonUpdateRequest},
  query::{self, SortOrder},
  repository::Repository,
  validate::Validate as _,
};

/// Owns the lifecycle of [`Person`] records.
///
/// `L` resolves each person's country id to a name on every read; it is a
/// lookup only and never written through.
#[derive(Debug)]
pub struct PersonStore<R, L> {
  repo:      Arc<R>,
  countries: L,
}

impl<R, L: Clone> Clone for PersonStore<R, L> {
  fn clone(&self) -> Self {
    Self { repo: Arc::clone(&self.repo), countries: self.countries.clone() }
  }
}

impl<R, L> PersonStore<R, L>
where
  R: Repository<Person>,
  L: CountryNameLookup,
{
  pub fn new(repo: Arc<R>, countries: L) -> Self { Self { repo, countries } }

  async fn to_response(&self, person: Person, today: NaiveDate) -> Result<PersonResponse> {
    let country_name = match person.country_id {
      Some(id) => self.countries.resolve_country_name(id).await?,
      None => None,
    };
    Ok(PersonResponse::from_person(person, country_name, today))
  }

  /// Validate and persist a new person. The country id is stored as given.
  pub async fn add_person(&self, request: Option<PersonAddRequest>) -> Result<PersonResponse> {
    let request = request.ok_or(Error::NullArgument("person_add_request"))?;
    if let Err(errors) = request.validate() {
      tracing::debug!(?errors, "rejected person");
      return Err(errors.into());
    }

    let person = self
      .repo
      .add(request.into_person(Uuid::new_v4()))
      .await
      .map_err(Error::repository)?;

    tracing::info!(person_id = %person.person_id, "person added");
    self.to_response(person, today()).await
  }

  pub async fn get_all_persons(&self) -> Result<Vec<PersonResponse>> {
    let persons = self.repo.get_all().await.map_err(Error::repository)?;
    let today = today();

    let mut responses = Vec::with_capacity(persons.len());
    for person in persons {
      responses.push(self.to_response(person, today).await?);
    }
    Ok(responses)
  }

  /// `None` for a missing id or one that matches no person.
  pub async fn get_person_by_id(&self, id: Option<Uuid>) -> Result<Option<PersonResponse>> {
    let Some(id) = id else { return Ok(None) };
    match self.repo.get_by_id(id).await.map_err(Error::repository)? {
      Some(person) => Ok(Some(self.to_response(person, today()).await?)),
      None => Ok(None),
    }
  }

  /// All persons whose `search_by` field contains `search_string`; see
  /// [`query::filter_persons`] for the pass-through cases.
  pub async fn get_filtered_persons(
    &self,
    search_by: &str,
    search_string: &str,
  ) -> Result<Vec<PersonResponse>> {
    let all = self.get_all_persons().await?;
    Ok(query::filter_persons(all, search_by, search_string))
  }

  /// Stable sort by field name; an empty or unknown field is a no-op.
  pub fn get_sorted_persons(
    &self,
    persons: Vec<PersonResponse>,
    sort_by: &str,
    sort_order: SortOrder,
  ) -> Vec<PersonResponse> {
    query::sort_persons(persons, sort_by, sort_order)
  }

  /// Replace every mutable field of an existing person.
  pub async fn update_person(
    &self,
    request: Option<PersonUpdateRequest>,
  ) -> Result<PersonResponse> {
    let request = request.ok_or(Error::NullArgument("person_update_request"))?;
    if let Err(errors) = request.validate() {
      tracing::debug!(?errors, "rejected person update");
      return Err(errors.into());
    }

    let person_id = request.person_id;
    let Some(mut person) = self.repo.get_by_id(person_id).await.map_err(Error::repository)?
    else {
      tracing::debug!(%person_id, "update of unknown person");
      return Err(missing_person());
    };

    request.apply_to(&mut person);
    let updated = self
      .repo
      .update(person)
      .await
      .map_err(Error::repository)?
      .ok_or_else(missing_person)?;

    tracing::info!(%person_id, "person updated");
    self.to_response(updated, today()).await
  }

  /// Returns `false` if no person has this id.
  pub async fn delete_person(&self, id: Option<Uuid>) -> Result<bool> {
    let id = id.ok_or(Error::NullArgument("person_id"))?;
    let deleted = self.repo.delete(id).await.map_err(Error::repository)?;
    if deleted {
      tracing::info!(person_id = %id, "person deleted");
    }
    Ok(deleted)
  }
}

fn missing_person() -> Error { Error::InvalidArgument("Given person id doesn't exist".into()) }

fn today() -> NaiveDate { Utc::now().date_naive() }
