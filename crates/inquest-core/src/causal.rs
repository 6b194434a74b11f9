//! Causal factors — user-identified contributors to the incident.
//!
//! Factors are created from the analysis tools (five-whys chains, causal
//! trees, fishbone diagrams) and carry the fishbone category they were filed
//! under. Structured assessments (HFAT, HOP) hang off a factor by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How directly the factor contributed to the incident.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum FactorType {
  #[strum(serialize = "Direct")]
  Direct,
  #[strum(serialize = "Contributing")]
  Contributing,
  #[strum(serialize = "Root")]
  Root,
}

/// The fixed six-category fishbone taxonomy.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum FishboneCategory {
  #[strum(serialize = "People")]
  People,
  #[strum(serialize = "Procedures")]
  Procedures,
  #[strum(serialize = "Plant & Equipment")]
  Plant,
  #[strum(serialize = "Environment")]
  Environment,
  #[strum(serialize = "Management Systems")]
  Management,
  #[strum(serialize = "External")]
  External,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CausalFactor {
  pub causal_factor_id: Uuid,
  pub investigation_id: Uuid,
  pub title:            String,
  pub description:      String,
  pub factor_type:      FactorType,
  pub category:         FishboneCategory,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::add_causal_factor`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCausalFactor {
  pub investigation_id: Uuid,
  pub title:            String,
  #[serde(default)]
  pub description:      String,
  pub factor_type:      FactorType,
  pub category:         FishboneCategory,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CausalFactorPatch {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub factor_type: Option<FactorType>,
  pub category:    Option<FishboneCategory>,
}

impl CausalFactorPatch {
  pub fn apply(self, cf: &mut CausalFactor) {
    if let Some(v) = self.title {
      cf.title = v;
    }
    if let Some(v) = self.description {
      cf.description = v;
    }
    if let Some(v) = self.factor_type {
      cf.factor_type = v;
    }
    if let Some(v) = self.category {
      cf.category = v;
    }
  }
}
