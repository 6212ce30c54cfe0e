//! Handlers for `/countries` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/countries` | All countries, insertion order |
//! | `POST` | `/countries` | Body: `{"country_name":"..."}` or `null`; returns 201 |
//! | `GET`  | `/countries/{id}` | 404 if not found |
//! | `POST` | `/countries/import` | Body: `["name", ...]`; returns `{"inserted":n}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  country::{Country, CountryAddRequest, CountryResponse},
  person::Person,
  repository::Repository,
};
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /countries`
pub async fn list<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
) -> Result<Json<Vec<CountryResponse>>, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  Ok(Json(state.countries.get_all_countries().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /countries`: returns 201 with the stored country.
pub async fn create<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
  Json(body): Json<Option<CountryAddRequest>>,
) -> Result<impl IntoResponse, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  let country = state.countries.add_country(body).await?;
  Ok((StatusCode::CREATED, Json(country)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /countries/{id}`
pub async fn get_one<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CountryResponse>, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  let country = state
    .countries
    .get_country_by_id(Some(id))
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("country {id} not found")))?;
  Ok(Json(country))
}

// ─── Import ───────────────────────────────────────────────────────────────────

/// `POST /countries/import`, body: a JSON array of names.
pub async fn import<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
  Json(names): Json<Vec<String>>,
) -> Result<impl IntoResponse, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  let inserted = state.countries.import_countries(names).await?;
  Ok(Json(json!({ "inserted": inserted })))
}
