//! Handlers for the two per-factor assessment forms (HFAT and HOP).
//!
//! Both are PUT-upserts keyed by the causal factor id in the path; the
//! store replaces the existing assessment's content in place when one
//! already exists.

use axum::{
  Json,
  extract::{Path, State},
};
use inquest_core::{
  assessment::{
    HfatAssessment, HopAssessment, HopFields, HumanFactorsMap, JustCulture,
    NewHfatAssessment, NewHopAssessment,
  },
  store::InvestigationStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── HFAT ────────────────────────────────────────────────────────────────────

/// `GET /causal-factors/:id/hfat`
pub async fn get_hfat<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<HfatAssessment>, ApiError>
where
  S: InvestigationStore,
{
  let assessment = state
    .store
    .hfat_for_factor(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no HFAT assessment for factor {id}"))
    })?;
  Ok(Json(assessment))
}

#[derive(Debug, Deserialize)]
pub struct PutHfatBody {
  pub investigation_id: Uuid,
  #[serde(default)]
  pub human_factors:    HumanFactorsMap,
  #[serde(default)]
  pub just_culture:     JustCulture,
}

/// `PUT /causal-factors/:id/hfat`
pub async fn put_hfat<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<PutHfatBody>,
) -> Result<Json<HfatAssessment>, ApiError>
where
  S: InvestigationStore,
{
  let assessment = state
    .store
    .put_hfat_assessment(NewHfatAssessment {
      investigation_id: body.investigation_id,
      causal_factor_id: id,
      human_factors:    body.human_factors,
      just_culture:     body.just_culture,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(assessment))
}

// ─── HOP ─────────────────────────────────────────────────────────────────────

/// `GET /causal-factors/:id/hop`
pub async fn get_hop<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<HopAssessment>, ApiError>
where
  S: InvestigationStore,
{
  let assessment = state
    .store
    .hop_for_factor(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!("no HOP assessment for factor {id}"))
    })?;
  Ok(Json(assessment))
}

#[derive(Debug, Deserialize)]
pub struct PutHopBody {
  pub investigation_id: Uuid,
  #[serde(default)]
  pub fields:           HopFields,
}

/// `PUT /causal-factors/:id/hop`
pub async fn put_hop<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<PutHopBody>,
) -> Result<Json<HopAssessment>, ApiError>
where
  S: InvestigationStore,
{
  let assessment = state
    .store
    .put_hop_assessment(NewHopAssessment {
      investigation_id: body.investigation_id,
      causal_factor_id: id,
      fields:           body.fields,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(assessment))
}
