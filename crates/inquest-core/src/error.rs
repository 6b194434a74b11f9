//! Error types for `inquest-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("investigation not found: {0}")]
  InvestigationNotFound(Uuid),

  #[error("evidence not found: {0}")]
  EvidenceNotFound(Uuid),

  #[error("interview not found: {0}")]
  InterviewNotFound(Uuid),

  #[error("timeline event not found: {0}")]
  TimelineEventNotFound(Uuid),

  #[error("causal factor not found: {0}")]
  CausalFactorNotFound(Uuid),

  #[error("recommendation not found: {0}")]
  RecommendationNotFound(Uuid),

  #[error("barrier not found: {0}")]
  BarrierNotFound(Uuid),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
