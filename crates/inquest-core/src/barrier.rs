//! Barrier records — controls that existed (or should have) at incident time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum BarrierKind {
  #[strum(serialize = "Physical")]
  Physical,
  #[strum(serialize = "Functional")]
  Functional,
  #[strum(serialize = "Symbolic")]
  Symbolic,
  #[strum(serialize = "Incorporeal")]
  Incorporeal,
}

/// How the barrier held up during the incident.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum BarrierStatus {
  #[strum(serialize = "Effective")]
  Effective,
  #[strum(serialize = "Partially Effective")]
  Partial,
  #[strum(serialize = "Failed")]
  Failed,
  #[strum(serialize = "Missing")]
  Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
  pub barrier_id:       Uuid,
  pub investigation_id: Uuid,
  pub name:             String,
  pub kind:             BarrierKind,
  pub status:           BarrierStatus,
  /// Whether the barrier actually performed its function.
  pub performed:        bool,
  pub failure_reason:   Option<String>,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::add_barrier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBarrier {
  pub investigation_id: Uuid,
  pub name:             String,
  pub kind:             BarrierKind,
  pub status:           BarrierStatus,
  #[serde(default)]
  pub performed:        bool,
  pub failure_reason:   Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarrierPatch {
  pub name:           Option<String>,
  pub kind:           Option<BarrierKind>,
  pub status:         Option<BarrierStatus>,
  pub performed:      Option<bool>,
  pub failure_reason: Option<Option<String>>,
}

impl BarrierPatch {
  pub fn apply(self, b: &mut Barrier) {
    if let Some(v) = self.name {
      b.name = v;
    }
    if let Some(v) = self.kind {
      b.kind = v;
    }
    if let Some(v) = self.status {
      b.status = v;
    }
    if let Some(v) = self.performed {
      b.performed = v;
    }
    if let Some(v) = self.failure_reason {
      b.failure_reason = v;
    }
  }
}
