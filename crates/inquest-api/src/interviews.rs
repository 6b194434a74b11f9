//! Handlers for interview records.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use inquest_core::{
  interview::{Interview, InterviewPatch, NewInterview},
  store::InvestigationStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /investigations/:id/interviews`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Interview>>, ApiError>
where
  S: InvestigationStore,
{
  let records = state
    .store
    .interviews_for(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub interviewee:  String,
  #[serde(default)]
  pub role:         String,
  pub conducted_on: NaiveDate,
  #[serde(default)]
  pub findings:     String,
}

/// `POST /investigations/:id/interviews`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InvestigationStore,
{
  ApiError::require("interviewee", &body.interviewee)?;

  let record = state
    .store
    .add_interview(NewInterview {
      investigation_id: id,
      interviewee:      body.interviewee,
      role:             body.role,
      conducted_on:     body.conducted_on,
      findings:         body.findings,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /interviews/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<InterviewPatch>,
) -> Result<Json<Interview>, ApiError>
where
  S: InvestigationStore,
{
  let record = state
    .store
    .update_interview(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(record))
}

/// `DELETE /interviews/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InvestigationStore,
{
  state
    .store
    .delete_interview(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
