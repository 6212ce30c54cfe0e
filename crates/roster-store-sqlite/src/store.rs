//! [`SqliteStore`]: the SQLite implementation of [`Repository`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{country::Country, person::Person, repository::Repository};

use crate::{
  Result,
  encode::{RawCountry, RawPerson, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Countries and persons backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every write
/// is a single statement, so SQLite commits it atomically.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_countries(&self) -> Result<Vec<Country>> {
    let raws: Vec<RawCountry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM countries ORDER BY rowid",
          RawCountry::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawCountry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountry::into_country).collect()
  }

  async fn select_persons(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM persons ORDER BY rowid",
          RawPerson::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }
}

// ─── Countries ───────────────────────────────────────────────────────────────

impl Repository<Country> for SqliteStore {
  type Error = crate::Error;

  async fn add(&self, country: Country) -> Result<Country> {
    let id_str = encode_uuid(country.country_id);
    let name = country.country_name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (country_id, country_name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(country)
  }

  async fn get_all(&self) -> Result<Vec<Country>> { self.select_countries().await }

  async fn get_by_id(&self, id: Uuid) -> Result<Option<Country>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM countries WHERE country_id = ?1", RawCountry::COLUMNS),
              rusqlite::params![id_str],
              RawCountry::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn update(&self, country: Country) -> Result<Option<Country>> {
    let id_str = encode_uuid(country.country_id);
    let name = country.country_name.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE countries SET country_name = ?2 WHERE country_id = ?1",
          rusqlite::params![id_str, name],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(country))
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM countries WHERE country_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn find_where<'a, P>(&'a self, predicate: P) -> Result<Vec<Country>>
  where
    P: Fn(&Country) -> bool + Send + 'a,
  {
    let mut countries = self.select_countries().await?;
    countries.retain(|c| predicate(c));
    Ok(countries)
  }
}

// ─── Persons ─────────────────────────────────────────────────────────────────

impl Repository<Person> for SqliteStore {
  type Error = crate::Error;

  async fn add(&self, person: Person) -> Result<Person> {
    let raw = RawPerson::from_person(&person);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             person_id, person_name, email, date_of_birth,
             gender, country_id, address, receive_news_letters
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            raw.person_id,
            raw.person_name,
            raw.email,
            raw.date_of_birth,
            raw.gender,
            raw.country_id,
            raw.address,
            raw.receive_news_letters,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn get_all(&self) -> Result<Vec<Person>> { self.select_persons().await }

  async fn get_by_id(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM persons WHERE person_id = ?1", RawPerson::COLUMNS),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn update(&self, person: Person) -> Result<Option<Person>> {
    let raw = RawPerson::from_person(&person);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE persons SET
             person_name = ?2, email = ?3, date_of_birth = ?4, gender = ?5,
             country_id = ?6, address = ?7, receive_news_letters = ?8
           WHERE person_id = ?1",
          rusqlite::params![
            raw.person_id,
            raw.person_name,
            raw.email,
            raw.date_of_birth,
            raw.gender,
            raw.country_id,
            raw.address,
            raw.receive_news_letters,
          ],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(person))
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM persons WHERE person_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn find_where<'a, P>(&'a self, predicate: P) -> Result<Vec<Person>>
  where
    P: Fn(&Person) -> bool + Send + 'a,
  {
    let mut persons = self.select_persons().await?;
    persons.retain(|p| predicate(p));
    Ok(persons)
  }
}
