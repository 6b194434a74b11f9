//! Handlers for timeline events.
//!
//! The workflow creates and deletes events; the only mutation is the
//! verified flag.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime};
use inquest_core::{
  store::InvestigationStore,
  timeline::{NewTimelineEvent, TimelineEvent},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /investigations/:id/timeline` — chronological, flat. Grouping into
/// the parent/child tree is a client (or report) concern.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<TimelineEvent>>, ApiError>
where
  S: InvestigationStore,
{
  let events = state
    .store
    .timeline_for(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(events))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub parent_event_id:   Option<Uuid>,
  pub occurred_on:       NaiveDate,
  pub occurred_time:     Option<NaiveTime>,
  #[serde(default)]
  pub category:          String,
  pub title:             String,
  #[serde(default)]
  pub is_incident_event: bool,
}

/// `POST /investigations/:id/timeline`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InvestigationStore,
{
  ApiError::require("title", &body.title)?;

  let event = state
    .store
    .add_timeline_event(NewTimelineEvent {
      investigation_id:  id,
      parent_event_id:   body.parent_event_id,
      occurred_on:       body.occurred_on,
      occurred_time:     body.occurred_time,
      category:          body.category,
      title:             body.title,
      is_incident_event: body.is_incident_event,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(event)))
}

#[derive(Debug, Deserialize)]
pub struct VerifyBody {
  pub verified: bool,
}

/// `POST /timeline/:id/verify` — body: `{"verified":true}`
pub async fn verify<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<VerifyBody>,
) -> Result<Json<TimelineEvent>, ApiError>
where
  S: InvestigationStore,
{
  let event = state
    .store
    .set_event_verified(id, body.verified)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(event))
}

/// `DELETE /timeline/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InvestigationStore,
{
  state
    .store
    .delete_timeline_event(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
