//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] over a [`CountryStore`] and a [`PersonStore`],
//! each backed by any [`Repository`]. Transport concerns (binding, TLS,
//! request tracing) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(countries, persons))
//! ```

pub mod countries;
pub mod error;
pub mod persons;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use roster_core::{
  countries::CountryStore, country::Country, person::Person, persons::PersonStore,
  repository::Repository,
};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct AppState<CR, PR> {
  pub countries: CountryStore<CR>,
  pub persons:   PersonStore<PR, CountryStore<CR>>,
}

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<CR, PR>(
  countries: CountryStore<CR>,
  persons: PersonStore<PR, CountryStore<CR>>,
) -> Router<()>
where
  CR: Repository<Country> + 'static,
  PR: Repository<Person> + 'static,
{
  let state = Arc::new(AppState { countries, persons });

  Router::new()
    // Countries
    .route("/countries", get(countries::list::<CR, PR>).post(countries::create::<CR, PR>))
    .route("/countries/import", post(countries::import::<CR, PR>))
    .route("/countries/{id}", get(countries::get_one::<CR, PR>))
    // Persons
    .route("/persons", get(persons::list::<CR, PR>).post(persons::create::<CR, PR>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<CR, PR>)
        .put(persons::update::<CR, PR>)
        .delete(persons::delete_one::<CR, PR>),
    )
    .with_state(state)
}
