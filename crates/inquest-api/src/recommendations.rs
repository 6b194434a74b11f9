//! Handlers for recommendations.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use inquest_core::{
  recommendation::{
    ControlType, NewRecommendation, Priority, Recommendation,
    RecommendationPatch,
  },
  store::InvestigationStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /investigations/:id/recommendations` — most urgent first.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Recommendation>>, ApiError>
where
  S: InvestigationStore,
{
  let records = state
    .store
    .recommendations_for(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:                 String,
  #[serde(default)]
  pub description:           String,
  pub control_type:          ControlType,
  pub priority:              Priority,
  /// Causal factor ids; not validated against the factor collection.
  #[serde(default)]
  pub linked_causal_factors: Vec<Uuid>,
}

/// `POST /investigations/:id/recommendations`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InvestigationStore,
{
  ApiError::require("title", &body.title)?;

  let record = state
    .store
    .add_recommendation(NewRecommendation {
      investigation_id:      id,
      title:                 body.title,
      description:           body.description,
      control_type:          body.control_type,
      priority:              body.priority,
      linked_causal_factors: body.linked_causal_factors,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /recommendations/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<RecommendationPatch>,
) -> Result<Json<Recommendation>, ApiError>
where
  S: InvestigationStore,
{
  let record = state
    .store
    .update_recommendation(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(record))
}

/// `DELETE /recommendations/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InvestigationStore,
{
  state
    .store
    .delete_recommendation(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
