//! Handlers for `/persons` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons` | Optional `search_by`, `search_string`, `sort_by`, `sort_order` |
//! | `POST`   | `/persons` | Body: [`PersonAddRequest`] or `null`; returns 201 |
//! | `GET`    | `/persons/{id}` | 404 if not found |
//! | `PUT`    | `/persons/{id}` | Body: [`PersonUpdateRequest`]; the path id wins |
//! | `DELETE` | `/persons/{id}` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  country::Country,
  person::{Person, PersonAddRequest, PersonResponse, PersonUpdateRequest},
  query::{PersonField, SortOrder},
  repository::Repository,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Field name to search, e.g. `PersonName` or `Country`.
  pub search_by:     Option<String>,
  /// Case-insensitive substring to look for.
  pub search_string: Option<String>,
  /// Field name to sort by. Defaults to `PersonName`.
  pub sort_by:       Option<String>,
  /// `ASC` or `DESC`, upper or lower case. Defaults to `ASC`.
  pub sort_order:    Option<SortOrder>,
}

/// `GET /persons[?search_by=...&search_string=...][&sort_by=...&sort_order=...]`
pub async fn list<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PersonResponse>>, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  let filtered = state
    .persons
    .get_filtered_persons(
      params.search_by.as_deref().unwrap_or_default(),
      params.search_string.as_deref().unwrap_or_default(),
    )
    .await?;

  let sort_by = params
    .sort_by
    .unwrap_or_else(|| PersonField::PersonName.to_string());
  let sorted = state.persons.get_sorted_persons(
    filtered,
    &sort_by,
    params.sort_order.unwrap_or_default(),
  );
  Ok(Json(sorted))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons`: returns 201 with the stored person.
pub async fn create<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
  Json(body): Json<Option<PersonAddRequest>>,
) -> Result<impl IntoResponse, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  let person = state.persons.add_person(body).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/{id}`
pub async fn get_one<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PersonResponse>, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  let person = state
    .persons
    .get_person_by_id(Some(id))
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/{id}`: full replacement of the mutable fields.
pub async fn update<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
  Path(id): Path<Uuid>,
  Json(body): Json<Option<PersonUpdateRequest>>,
) -> Result<Json<PersonResponse>, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  let request = body.map(|b| PersonUpdateRequest { person_id: id, ..b });
  Ok(Json(state.persons.update_person(request).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /persons/{id}`
pub async fn delete_one<CR, PR>(
  State(state): State<Arc<AppState<CR, PR>>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  CR: Repository<Country>,
  PR: Repository<Person>,
{
  if state.persons.delete_person(Some(id)).await? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("person {id} not found")))
  }
}
