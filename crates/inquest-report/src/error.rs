//! Error type for `inquest-report`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The one fatal condition: the investigation row itself is missing or
  /// unreadable. Every other collection read degrades to "no records".
  #[error("investigation not found: {0}")]
  InvestigationNotFound(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
