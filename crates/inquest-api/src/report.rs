//! Handler for the composed investigation report.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::header,
  response::{IntoResponse, Response},
};
use inquest_core::store::InvestigationStore;
use inquest_report::{ReportData, compose, render_plain_text};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct ReportParams {
  /// `json` (default) or `text` for the clipboard-export flattening.
  pub format: Option<String>,
}

/// `GET /investigations/:id/report[?format=text]`
pub async fn get_report<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<ReportParams>,
) -> Result<Response, ApiError>
where
  S: InvestigationStore,
{
  let data = ReportData::fetch(state.store.as_ref(), id)
    .await
    .map_err(|e| match e {
      inquest_report::Error::InvestigationNotFound(id) => {
        ApiError::NotFound(format!("investigation {id} not found"))
      }
      other => ApiError::Store(Box::new(other)),
    })?;

  let report = compose(&data);

  if params.format.as_deref() == Some("text") {
    let text = render_plain_text(&report);
    return Ok(
      (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
      )
        .into_response(),
    );
  }

  Ok(Json(report).into_response())
}
