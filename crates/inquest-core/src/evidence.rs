//! Evidence records collected in the second workflow step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of artifact a piece of evidence is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
  Photo,
  Document,
  Physical,
  Statement,
  Other,
}

/// An uploaded file stored on disk; no binary data lives in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
  /// Path relative to the configured blob directory.
  pub path:         String,
  /// SHA-256 hex digest of the file contents.
  pub content_hash: String,
  pub media_type:   String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
  pub evidence_id:      Uuid,
  pub investigation_id: Uuid,
  pub kind:             EvidenceKind,
  pub title:            String,
  pub description:      String,
  /// Present once a file has been uploaded for this record.
  pub file:             Option<StoredFile>,
  pub tags:             Vec<String>,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::add_evidence`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvidence {
  pub investigation_id: Uuid,
  pub kind:             EvidenceKind,
  pub title:            String,
  #[serde(default)]
  pub description:      String,
  #[serde(default)]
  pub tags:             Vec<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidencePatch {
  pub kind:        Option<EvidenceKind>,
  pub title:       Option<String>,
  pub description: Option<String>,
  pub tags:        Option<Vec<String>>,
}

impl EvidencePatch {
  pub fn apply(self, ev: &mut Evidence) {
    if let Some(v) = self.kind {
      ev.kind = v;
    }
    if let Some(v) = self.title {
      ev.title = v;
    }
    if let Some(v) = self.description {
      ev.description = v;
    }
    if let Some(v) = self.tags {
      ev.tags = v;
    }
  }
}
