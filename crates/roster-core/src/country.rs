//! Country entity and the DTOs that cross the store boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  repository::Entity,
  validate::{Validate, ValidationErrors, is_blank},
};

/// A stored country. Names are unique, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub country_id:   Uuid,
  pub country_name: String,
}

impl Entity for Country {
  fn id(&self) -> Uuid { self.country_id }
}

/// Body for adding a country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryAddRequest {
  pub country_name: Option<String>,
}

impl CountryAddRequest {
  pub fn new(country_name: impl Into<String>) -> Self {
    Self { country_name: Some(country_name.into()) }
  }

  pub(crate) fn into_country(self, country_id: Uuid) -> Country {
    Country { country_id, country_name: self.country_name.unwrap_or_default() }
  }
}

impl Validate for CountryAddRequest {
  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if is_blank(self.country_name.as_deref()) {
      errors.push("country_name", "Country name is required");
    }
    errors.into_result()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryResponse {
  pub country_id:   Uuid,
  pub country_name: String,
}

impl From<Country> for CountryResponse {
  fn from(c: Country) -> Self {
    Self { country_id: c.country_id, country_name: c.country_name }
  }
}
