//! Structured assessments attached to a causal factor.
//!
//! Two assessment forms exist: HFAT (a fixed-taxonomy rating exercise over
//! individual/task/organizational human factors plus a just-culture
//! classification) and HOP (a free-text structured reflection). Both are
//! keyed by `causal_factor_id`; by convention there is at most one of each
//! per factor, but nothing enforces that — readers take the first match.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Ratings ─────────────────────────────────────────────────────────────────

/// The two meaningful ratings a human-factor item can hold. An unrated item
/// is represented as `None`, not as a variant.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
  #[strum(serialize = "Contributing")]
  Contributing,
  #[strum(serialize = "Causal")]
  Causal,
}

impl Rating {
  /// Rating-button semantics: pressing the rating an item already holds
  /// clears it; pressing any other rating selects it.
  pub fn toggle(current: Option<Rating>, pressed: Rating) -> Option<Rating> {
    if current == Some(pressed) {
      None
    } else {
      Some(pressed)
    }
  }
}

/// One rated item within a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanFactorEntry {
  pub rating: Option<Rating>,
  #[serde(default)]
  pub notes:  String,
}

impl HumanFactorEntry {
  /// An entry with no rating and no notes carries no information and is
  /// dropped from report output.
  pub fn is_empty(&self) -> bool {
    self.rating.is_none() && self.notes.trim().is_empty()
  }
}

// ─── Sections ────────────────────────────────────────────────────────────────

/// The three fixed HFAT sections. Declaration order is presentation order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum HumanFactorSection {
  #[strum(serialize = "Individual Factors")]
  Individual,
  #[strum(serialize = "Task / Work Environment Factors")]
  Task,
  #[strum(serialize = "Organizational Factors")]
  Organizational,
}

/// Section → item identifier → entry. The two-level structure replaces the
/// legacy flat `section_item` composite-key encoding; `BTreeMap` makes
/// iteration order deterministic.
pub type HumanFactorsMap =
  BTreeMap<HumanFactorSection, BTreeMap<String, HumanFactorEntry>>;

// ─── Just culture ────────────────────────────────────────────────────────────

/// Culpability classification of the individual action involved in a factor.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum JustCultureClassification {
  #[strum(serialize = "Human Error")]
  HumanError,
  #[strum(serialize = "At-Risk Behavior")]
  AtRiskBehavior,
  #[strum(serialize = "Reckless Behavior")]
  RecklessBehavior,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JustCulture {
  pub classification:   Option<JustCultureClassification>,
  #[serde(default)]
  pub justification:    String,
  #[serde(default)]
  pub response_actions: String,
}

impl JustCulture {
  pub fn is_empty(&self) -> bool {
    self.classification.is_none()
      && self.justification.trim().is_empty()
      && self.response_actions.trim().is_empty()
  }
}

// ─── HFAT ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HfatAssessment {
  pub assessment_id:    Uuid,
  pub investigation_id: Uuid,
  pub causal_factor_id: Uuid,
  #[serde(default)]
  pub human_factors:    HumanFactorsMap,
  #[serde(default)]
  pub just_culture:     JustCulture,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::put_hfat_assessment`].
/// The store upserts on `causal_factor_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHfatAssessment {
  pub investigation_id: Uuid,
  pub causal_factor_id: Uuid,
  #[serde(default)]
  pub human_factors:    HumanFactorsMap,
  #[serde(default)]
  pub just_culture:     JustCulture,
}

// ─── HOP ─────────────────────────────────────────────────────────────────────

/// Human and Organizational Performance reflection — all free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HopFields {
  #[serde(default)]
  pub task_summary:              String,
  #[serde(default)]
  pub work_as_planned:           String,
  #[serde(default)]
  pub work_as_done:              String,
  #[serde(default)]
  pub error_precursors:          String,
  #[serde(default)]
  pub defenses_present:          String,
  #[serde(default)]
  pub defenses_failed:           String,
  #[serde(default)]
  pub defenses_missing:          String,
  #[serde(default)]
  pub organizational_weaknesses: String,
  #[serde(default)]
  pub local_conditions:          String,
  #[serde(default)]
  pub individual_actions:        String,
  #[serde(default)]
  pub knowledge_gaps:            String,
  #[serde(default)]
  pub communication_factors:     String,
  #[serde(default)]
  pub supervision_factors:       String,
  #[serde(default)]
  pub learning_points:           String,
  #[serde(default)]
  pub improvement_ideas:         String,
}

impl HopFields {
  /// Display labels paired with values, in form order. Used by report
  /// rendering; blank fields are the caller's concern.
  pub fn labeled(&self) -> Vec<(&'static str, &str)> {
    vec![
      ("Task Being Performed", &self.task_summary),
      ("Work as Planned", &self.work_as_planned),
      ("Work as Done", &self.work_as_done),
      ("Error Precursors", &self.error_precursors),
      ("Defenses That Worked", &self.defenses_present),
      ("Defenses That Failed", &self.defenses_failed),
      ("Defenses That Were Missing", &self.defenses_missing),
      ("Organizational Weaknesses", &self.organizational_weaknesses),
      ("Local Workplace Conditions", &self.local_conditions),
      ("Individual Actions", &self.individual_actions),
      ("Knowledge / Skill Gaps", &self.knowledge_gaps),
      ("Communication Factors", &self.communication_factors),
      ("Supervision / Oversight", &self.supervision_factors),
      ("Operational Learning Points", &self.learning_points),
      ("Improvement Ideas", &self.improvement_ideas),
    ]
  }

  pub fn is_empty(&self) -> bool {
    self.labeled().iter().all(|(_, v)| v.trim().is_empty())
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HopAssessment {
  pub assessment_id:    Uuid,
  pub investigation_id: Uuid,
  pub causal_factor_id: Uuid,
  #[serde(default)]
  pub fields:           HopFields,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::put_hop_assessment`].
/// The store upserts on `causal_factor_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHopAssessment {
  pub investigation_id: Uuid,
  pub causal_factor_id: Uuid,
  #[serde(default)]
  pub fields:           HopFields,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggle_same_rating_clears() {
    assert_eq!(Rating::toggle(Some(Rating::Causal), Rating::Causal), None);
    assert_eq!(
      Rating::toggle(Some(Rating::Contributing), Rating::Contributing),
      None
    );
  }

  #[test]
  fn toggle_other_rating_replaces() {
    assert_eq!(
      Rating::toggle(Some(Rating::Contributing), Rating::Causal),
      Some(Rating::Causal)
    );
    assert_eq!(
      Rating::toggle(None, Rating::Contributing),
      Some(Rating::Contributing)
    );
  }

  #[test]
  fn entry_with_only_whitespace_notes_is_empty() {
    let entry = HumanFactorEntry {
      rating: None,
      notes:  "   ".into(),
    };
    assert!(entry.is_empty());
  }

  #[test]
  fn entry_with_rating_is_not_empty() {
    let entry = HumanFactorEntry {
      rating: Some(Rating::Causal),
      notes:  String::new(),
    };
    assert!(!entry.is_empty());
  }

  #[test]
  fn classification_display_strings() {
    assert_eq!(
      JustCultureClassification::AtRiskBehavior.to_string(),
      "At-Risk Behavior"
    );
    assert_eq!(
      JustCultureClassification::HumanError.to_string(),
      "Human Error"
    );
  }
}
