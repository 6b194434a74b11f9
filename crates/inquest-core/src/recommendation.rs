//! Recommendations — corrective actions linked to causal factors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hierarchy-of-controls classification.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
  #[strum(serialize = "Elimination")]
  Elimination,
  #[strum(serialize = "Substitution")]
  Substitution,
  #[strum(serialize = "Engineering Control")]
  Engineering,
  #[strum(serialize = "Administrative Control")]
  Administrative,
  #[strum(serialize = "PPE")]
  Ppe,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  #[strum(serialize = "Low")]
  Low,
  #[strum(serialize = "Medium")]
  Medium,
  #[strum(serialize = "High")]
  High,
  #[strum(serialize = "Critical")]
  Critical,
}

impl Priority {
  /// Sort rank — lower is more urgent. Used for list ordering.
  pub fn rank(self) -> u8 {
    match self {
      Priority::Critical => 0,
      Priority::High => 1,
      Priority::Medium => 2,
      Priority::Low => 3,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
  pub recommendation_id:     Uuid,
  pub investigation_id:      Uuid,
  pub title:                 String,
  pub description:           String,
  pub control_type:          ControlType,
  pub priority:              Priority,
  /// CausalFactor ids this recommendation addresses. Ids are not validated
  /// against the factor collection; report rendering falls back to showing
  /// the raw id when no matching factor exists.
  pub linked_causal_factors: Vec<Uuid>,
  pub created_at:            DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::add_recommendation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecommendation {
  pub investigation_id:      Uuid,
  pub title:                 String,
  #[serde(default)]
  pub description:           String,
  pub control_type:          ControlType,
  pub priority:              Priority,
  #[serde(default)]
  pub linked_causal_factors: Vec<Uuid>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationPatch {
  pub title:                 Option<String>,
  pub description:           Option<String>,
  pub control_type:          Option<ControlType>,
  pub priority:              Option<Priority>,
  pub linked_causal_factors: Option<Vec<Uuid>>,
}

impl RecommendationPatch {
  pub fn apply(self, rec: &mut Recommendation) {
    if let Some(v) = self.title {
      rec.title = v;
    }
    if let Some(v) = self.description {
      rec.description = v;
    }
    if let Some(v) = self.control_type {
      rec.control_type = v;
    }
    if let Some(v) = self.priority {
      rec.priority = v;
    }
    if let Some(v) = self.linked_causal_factors {
      rec.linked_causal_factors = v;
    }
  }
}
