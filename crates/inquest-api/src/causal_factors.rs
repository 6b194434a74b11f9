//! Handlers for causal factors.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use inquest_core::{
  causal::{
    CausalFactor, CausalFactorPatch, FactorType, FishboneCategory,
    NewCausalFactor,
  },
  store::InvestigationStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /investigations/:id/causal-factors`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<CausalFactor>>, ApiError>
where
  S: InvestigationStore,
{
  let factors = state
    .store
    .causal_factors_for(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(factors))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub factor_type: FactorType,
  pub category:    FishboneCategory,
}

/// `POST /investigations/:id/causal-factors`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InvestigationStore,
{
  ApiError::require("title", &body.title)?;

  let factor = state
    .store
    .add_causal_factor(NewCausalFactor {
      investigation_id: id,
      title:            body.title,
      description:      body.description,
      factor_type:      body.factor_type,
      category:         body.category,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(factor)))
}

/// `PUT /causal-factors/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<CausalFactorPatch>,
) -> Result<Json<CausalFactor>, ApiError>
where
  S: InvestigationStore,
{
  let factor = state
    .store
    .update_causal_factor(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(factor))
}

/// `DELETE /causal-factors/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InvestigationStore,
{
  state
    .store
    .delete_causal_factor(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
