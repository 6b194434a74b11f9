//! Error type for `inquest-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] inquest_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored column value could not be decoded (malformed date, unknown
  /// enum discriminant).
  #[error("column decode error: {0}")]
  Decode(String),

  #[error("investigation not found: {0}")]
  InvestigationNotFound(uuid::Uuid),

  #[error("evidence not found: {0}")]
  EvidenceNotFound(uuid::Uuid),

  #[error("interview not found: {0}")]
  InterviewNotFound(uuid::Uuid),

  #[error("timeline event not found: {0}")]
  TimelineEventNotFound(uuid::Uuid),

  #[error("causal factor not found: {0}")]
  CausalFactorNotFound(uuid::Uuid),

  #[error("recommendation not found: {0}")]
  RecommendationNotFound(uuid::Uuid),

  #[error("barrier not found: {0}")]
  BarrierNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
