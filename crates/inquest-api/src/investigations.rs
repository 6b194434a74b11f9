//! Handlers for `/investigations` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/investigations` | Newest first |
//! | `POST`   | `/investigations` | Body: [`CreateBody`]; 201 + record |
//! | `GET`    | `/investigations/:id` | 404 if not found |
//! | `PUT`    | `/investigations/:id` | Body: partial patch |
//! | `DELETE` | `/investigations/:id` | 204 |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime};
use inquest_core::{
  investigation::{
    Investigation, InvestigationPatch, NewInvestigation, Severity,
  },
  store::InvestigationStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /investigations`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Investigation>>, ApiError>
where
  S: InvestigationStore,
{
  let investigations = state
    .store
    .list_investigations()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(investigations))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub number:        String,
  pub occurred_on:   NaiveDate,
  pub occurred_time: Option<NaiveTime>,
  pub location:      String,
  pub severity:      Severity,
  #[serde(default)]
  pub description:   String,
}

/// `POST /investigations`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InvestigationStore,
{
  ApiError::require("number", &body.number)?;
  ApiError::require("location", &body.location)?;

  let investigation = state
    .store
    .create_investigation(NewInvestigation {
      number:        body.number,
      occurred_on:   body.occurred_on,
      occurred_time: body.occurred_time,
      location:      body.location,
      severity:      body.severity,
      description:   body.description,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(investigation)))
}

/// `GET /investigations/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Investigation>, ApiError>
where
  S: InvestigationStore,
{
  let investigation = state
    .store
    .get_investigation(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("investigation {id} not found")))?;
  Ok(Json(investigation))
}

/// `PUT /investigations/:id` — partial update, last write wins.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<InvestigationPatch>,
) -> Result<Json<Investigation>, ApiError>
where
  S: InvestigationStore,
{
  let investigation = state
    .store
    .update_investigation(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(investigation))
}

/// `DELETE /investigations/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InvestigationStore,
{
  state
    .store
    .delete_investigation(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
