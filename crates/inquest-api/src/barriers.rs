//! Handlers for barrier records.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use inquest_core::{
  barrier::{Barrier, BarrierKind, BarrierPatch, BarrierStatus, NewBarrier},
  store::InvestigationStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /investigations/:id/barriers`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Barrier>>, ApiError>
where
  S: InvestigationStore,
{
  let records = state
    .store
    .barriers_for(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:           String,
  pub kind:           BarrierKind,
  pub status:         BarrierStatus,
  #[serde(default)]
  pub performed:      bool,
  pub failure_reason: Option<String>,
}

/// `POST /investigations/:id/barriers`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InvestigationStore,
{
  ApiError::require("name", &body.name)?;

  let record = state
    .store
    .add_barrier(NewBarrier {
      investigation_id: id,
      name:             body.name,
      kind:             body.kind,
      status:           body.status,
      performed:        body.performed,
      failure_reason:   body.failure_reason,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /barriers/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<BarrierPatch>,
) -> Result<Json<Barrier>, ApiError>
where
  S: InvestigationStore,
{
  let record = state
    .store
    .update_barrier(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(record))
}

/// `DELETE /barriers/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InvestigationStore,
{
  state
    .store
    .delete_barrier(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
