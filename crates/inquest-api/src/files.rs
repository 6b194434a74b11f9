//! Blob download — serves evidence files stored by the upload handler.

use std::path::Component;

use axum::{
  extract::{Path, State},
  http::header,
  response::{IntoResponse, Response},
};
use inquest_core::store::InvestigationStore;

use crate::{ApiState, error::ApiError};

fn content_type_for(path: &str) -> &'static str {
  match path.rsplit_once('.').map(|(_, ext)| ext) {
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("png") => "image/png",
    Some("gif") => "image/gif",
    Some("pdf") => "application/pdf",
    Some("txt") => "text/plain; charset=utf-8",
    _ => "application/octet-stream",
  }
}

/// `GET /files/*path`
pub async fn download<S>(
  State(state): State<ApiState<S>>,
  Path(path): Path<String>,
) -> Result<Response, ApiError>
where
  S: InvestigationStore,
{
  // Reject anything that could escape the blob directory.
  let relative = std::path::Path::new(&path);
  let safe = relative
    .components()
    .all(|c| matches!(c, Component::Normal(_)));
  if !safe {
    return Err(ApiError::BadRequest("invalid file path".to_string()));
  }

  let abs = state.blob_dir.join(relative);
  let bytes = match tokio::fs::read(&abs).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      return Err(ApiError::NotFound(format!("no stored file at {path}")));
    }
    Err(e) => return Err(ApiError::Io(e)),
  };

  Ok(
    (
      [(header::CONTENT_TYPE, content_type_for(&path))],
      bytes,
    )
      .into_response(),
  )
}
