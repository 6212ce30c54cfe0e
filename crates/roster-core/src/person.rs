//! Person entity, its request/response DTOs, and the derived `age` field.

use std::str::FromStr as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  repository::Entity,
  validate::{Validate, ValidationErrors, is_blank, is_email},
};

/// Average year length used when deriving an age from a birth date.
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
  Male,
  Female,
  Other,
}

/// A stored person. Gender is kept as free text; country is a bare id that
/// is not checked against the country table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub person_id:            Uuid,
  pub person_name:          String,
  pub email:                String,
  pub date_of_birth:        Option<NaiveDate>,
  pub gender:               Option<String>,
  pub country_id:           Option<Uuid>,
  pub address:              Option<String>,
  pub receive_news_letters: bool,
}

impl Entity for Person {
  fn id(&self) -> Uuid { self.person_id }
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Body for adding a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonAddRequest {
  pub person_name:          Option<String>,
  pub email:                Option<String>,
  pub date_of_birth:        Option<NaiveDate>,
  pub gender:               Option<Gender>,
  pub country_id:           Option<Uuid>,
  pub address:              Option<String>,
  #[serde(default)]
  pub receive_news_letters: bool,
}

impl PersonAddRequest {
  pub(crate) fn into_person(self, person_id: Uuid) -> Person {
    Person {
      person_id,
      person_name:          self.person_name.unwrap_or_default(),
      email:                self.email.unwrap_or_default(),
      date_of_birth:        self.date_of_birth,
      gender:               self.gender.map(|g| g.to_string()),
      country_id:           self.country_id,
      address:              self.address,
      receive_news_letters: self.receive_news_letters,
    }
  }
}

impl Validate for PersonAddRequest {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_name_and_email(&mut errors, self.person_name.as_deref(), self.email.as_deref());
    errors.into_result()
  }
}

/// Body for replacing every mutable field of an existing person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonUpdateRequest {
  #[serde(default)]
  pub person_id:            Uuid,
  pub person_name:          Option<String>,
  pub email:                Option<String>,
  pub date_of_birth:        Option<NaiveDate>,
  pub gender:               Option<Gender>,
  pub country_id:           Option<Uuid>,
  pub address:              Option<String>,
  #[serde(default)]
  pub receive_news_letters: bool,
}

impl PersonUpdateRequest {
  /// Overwrite all mutable fields of `person`; the id is left alone.
  pub(crate) fn apply_to(self, person: &mut Person) {
    person.person_name = self.person_name.unwrap_or_default();
    person.email = self.email.unwrap_or_default();
    person.date_of_birth = self.date_of_birth;
    person.gender = self.gender.map(|g| g.to_string());
    person.country_id = self.country_id;
    person.address = self.address;
    person.receive_news_letters = self.receive_news_letters;
  }
}

impl Validate for PersonUpdateRequest {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if self.person_id.is_nil() {
      errors.push("person_id", "Person Id is required");
    }
    check_name_and_email(&mut errors, self.person_name.as_deref(), self.email.as_deref());
    errors.into_result()
  }
}

fn check_name_and_email(
  errors: &mut ValidationErrors,
  name: Option<&str>,
  email: Option<&str>,
) {
  if is_blank(name) {
    errors.push("person_name", "Person name is required");
  }
  match email {
    e if is_blank(e) => errors.push("email", "Email is required"),
    Some(e) if !is_email(e) => errors.push("email", "Enter a valid email"),
    _ => {}
  }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// A person as returned to callers, with `age` and `country_name` derived at
/// read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResponse {
  pub person_id:            Uuid,
  pub person_name:          String,
  pub email:                String,
  pub date_of_birth:        Option<NaiveDate>,
  pub gender:               Option<String>,
  pub country_id:           Option<Uuid>,
  pub country_name:         Option<String>,
  pub address:              Option<String>,
  pub age:                  Option<u32>,
  pub receive_news_letters: bool,
}

impl PersonResponse {
  pub fn from_person(
    person: Person,
    country_name: Option<String>,
    today: NaiveDate,
  ) -> Self {
    Self {
      age: person.date_of_birth.and_then(|dob| age_on(dob, today)),
      person_id: person.person_id,
      person_name: person.person_name,
      email: person.email,
      date_of_birth: person.date_of_birth,
      gender: person.gender,
      country_id: person.country_id,
      country_name,
      address: person.address,
      receive_news_letters: person.receive_news_letters,
    }
  }

  /// Pre-fill an update payload from this response. Gender text that does not
  /// name a [`Gender`] is dropped.
  pub fn to_update_request(&self) -> PersonUpdateRequest {
    PersonUpdateRequest {
      person_id:            self.person_id,
      person_name:          Some(self.person_name.clone()),
      email:                Some(self.email.clone()),
      date_of_birth:        self.date_of_birth,
      gender:               self.gender.as_deref().and_then(|g| Gender::from_str(g).ok()),
      country_id:           self.country_id,
      address:              self.address.clone(),
      receive_news_letters: self.receive_news_letters,
    }
  }
}

/// Whole years between `dob` and `today`, counting 365.25 days per year.
/// `None` if `dob` is after `today`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
  let days = (today - dob).num_days();
  if days < 0 {
    return None;
  }
  Some((days as f64 / DAYS_PER_YEAR).floor() as u32)
}
