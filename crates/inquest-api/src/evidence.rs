//! Handlers for evidence records and file upload.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/investigations/:id/evidence` | Creation order |
//! | `POST`   | `/investigations/:id/evidence` | Body: [`CreateBody`] |
//! | `POST`   | `/investigations/:id/evidence/:eid/file` | Raw bytes; returns public URL |
//! | `PUT`    | `/evidence/:id` | Partial patch |
//! | `DELETE` | `/evidence/:id` | 204 |

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use chrono::Utc;
use inquest_core::{
  evidence::{Evidence, EvidenceKind, EvidencePatch, NewEvidence, StoredFile},
  store::InvestigationStore,
};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest as _, Sha256};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /investigations/:id/evidence`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Evidence>>, ApiError>
where
  S: InvestigationStore,
{
  let records = state
    .store
    .evidence_for(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub kind:        EvidenceKind,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub tags:        Vec<String>,
}

/// `POST /investigations/:id/evidence`
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
    .add_evidence(NewEvidence {
      investigation_id: id,
      kind:             body.kind,
      title:            body.title,
      description:      body.description,
      tags:             body.tags,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /evidence/:id`
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<EvidencePatch>,
) -> Result<Json<Evidence>, ApiError>
where
  S: InvestigationStore,
{
  let record = state
    .store
    .update_evidence(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(record))
}

/// `DELETE /evidence/:id`
pub async fn delete<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: InvestigationStore,
{
  state
    .store
    .delete_evidence(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── File upload ─────────────────────────────────────────────────────────────

fn extension_for(media_type: &str) -> &'static str {
  match media_type {
    "image/jpeg" => ".jpg",
    "image/png" => ".png",
    "image/gif" => ".gif",
    "application/pdf" => ".pdf",
    "text/plain" => ".txt",
    _ => ".bin",
  }
}

/// `POST /investigations/:id/evidence/:eid/file` — store the raw request
/// body under a path scoped by investigation id and upload timestamp, and
/// attach the resulting file reference to the evidence record.
pub async fn upload_file<S>(
  State(state): State<ApiState<S>>,
  Path((id, eid)): Path<(Uuid, Uuid)>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: InvestigationStore,
{
  if body.is_empty() {
    return Err(ApiError::BadRequest("empty file body".to_string()));
  }

  // The evidence record must exist under this investigation.
  let known = state
    .store
    .evidence_for(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !known.iter().any(|ev| ev.evidence_id == eid) {
    return Err(ApiError::NotFound(format!(
      "evidence {eid} not found in investigation {id}"
    )));
  }

  let media_type = headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or("application/octet-stream")
    .to_string();

  let timestamp = Utc::now().format("%Y%m%d%H%M%S");
  let rel_path = format!("{id}/{timestamp}-{eid}{}", extension_for(&media_type));

  let abs_path = state.blob_dir.join(&rel_path);
  if let Some(parent) = abs_path.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(&abs_path, &body).await?;

  let content_hash = hex::encode(Sha256::digest(&body));
  tracing::info!(%eid, path = %rel_path, bytes = body.len(), "stored evidence file");

  let record = state
    .store
    .attach_evidence_file(eid, StoredFile {
      path: rel_path.clone(),
      content_hash,
      media_type,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((
    StatusCode::CREATED,
    Json(json!({
      "url": format!("/files/{rel_path}"),
      "evidence": record,
    })),
  ))
}
