//! Investigation — the parent record that owns everything else.
//!
//! Every other record in the store carries an `investigation_id` pointing at
//! one of these. An investigation is created at the start of the workflow and
//! mutated through its steps until it reaches the terminal `Completed` state.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Severity ────────────────────────────────────────────────────────────────

/// Consequence (or potential consequence) classification.
///
/// `HighPotential` marks a near miss that could plausibly have been severe;
/// it drives the warning banner in the generated report.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
  #[strum(serialize = "Low")]
  Low,
  #[strum(serialize = "Medium")]
  Medium,
  #[strum(serialize = "High")]
  High,
  #[strum(serialize = "High Potential")]
  HighPotential,
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Workflow state. `Completed` is terminal.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationStatus {
  #[strum(serialize = "Open")]
  Open,
  #[strum(serialize = "In Progress")]
  InProgress,
  #[strum(serialize = "Completed")]
  Completed,
}

// ─── Investigation ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investigation {
  pub investigation_id: Uuid,
  /// Human-readable reference, e.g. `INV-2024-001`.
  pub number:           String,
  pub occurred_on:      NaiveDate,
  pub occurred_time:    Option<NaiveTime>,
  /// Facility or site name.
  pub location:         String,
  pub severity:         Severity,
  pub description:      String,
  pub status:           InvestigationStatus,
  /// Server-assigned; never changes after creation.
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::create_investigation`].
/// `investigation_id`, `status` and `created_at` are set by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvestigation {
  pub number:        String,
  pub occurred_on:   NaiveDate,
  pub occurred_time: Option<NaiveTime>,
  pub location:      String,
  pub severity:      Severity,
  pub description:   String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestigationPatch {
  pub number:        Option<String>,
  pub occurred_on:   Option<NaiveDate>,
  pub occurred_time: Option<Option<NaiveTime>>,
  pub location:      Option<String>,
  pub severity:      Option<Severity>,
  pub description:   Option<String>,
  pub status:        Option<InvestigationStatus>,
}

impl InvestigationPatch {
  /// Apply this patch to `inv`, field by field.
  pub fn apply(self, inv: &mut Investigation) {
    if let Some(v) = self.number {
      inv.number = v;
    }
    if let Some(v) = self.occurred_on {
      inv.occurred_on = v;
    }
    if let Some(v) = self.occurred_time {
      inv.occurred_time = v;
    }
    if let Some(v) = self.location {
      inv.location = v;
    }
    if let Some(v) = self.severity {
      inv.severity = v;
    }
    if let Some(v) = self.description {
      inv.description = v;
    }
    if let Some(v) = self.status {
      inv.status = v;
    }
  }
}
