//! Human-factors grouping — assessment entries to the three report buckets.
//!
//! The domain model already carries the explicit section → item → entry
//! structure. This module additionally understands the legacy flat
//! `section_item` key encoding so imported assessments keep their meaning,
//! including the American and British spellings of "organizational".

use std::collections::BTreeMap;

use inquest_core::assessment::{
  HumanFactorEntry, HumanFactorSection, HumanFactorsMap, Rating,
};
use strum::IntoEnumIterator as _;

// ─── Item labels ─────────────────────────────────────────────────────────────

/// Display labels for known item identifiers, keyed by the identifier alone.
static ITEM_LABELS: &[(&str, &str)] = &[
  ("capability", "Physical / Mental Capability"),
  ("communication", "Communication / Handover"),
  ("complacency", "Complacency / Overconfidence"),
  ("distraction", "Distraction / Preoccupation"),
  ("experience", "Knowledge / Experience"),
  ("fatigue", "Fatigue / Alertness"),
  ("housekeeping", "Housekeeping / Work Area"),
  ("management_of_change", "Management of Change"),
  ("procedures", "Procedures / Work Instructions"),
  ("resources", "Resourcing / Staffing"),
  ("safety_culture", "Safety Culture"),
  ("stress", "Stress / Pressure"),
  ("supervision", "Supervision"),
  ("time_pressure", "Time Pressure / Haste"),
  ("tools_equipment", "Tools / Equipment"),
  ("training", "Training / Competence Assurance"),
  ("work_planning", "Work Planning / Scheduling"),
  ("workload", "Workload"),
];

/// Label for an item identifier, falling back to underscore→space on the
/// raw identifier when the table has no entry.
pub fn item_label(item: &str) -> String {
  ITEM_LABELS
    .iter()
    .find(|(key, _)| *key == item)
    .map(|(_, label)| (*label).to_string())
    .unwrap_or_else(|| item.replace('_', " "))
}

// ─── Legacy flat keys ────────────────────────────────────────────────────────

/// Split a legacy `section_item` composite key at the first underscore.
/// The item identifier is the remainder and may itself contain underscores.
/// Returns `None` for an unknown section prefix.
pub fn parse_flat_key(key: &str) -> Option<(HumanFactorSection, &str)> {
  let (section, item) = key.split_once('_')?;
  let section = match section {
    "individual" => HumanFactorSection::Individual,
    "task" => HumanFactorSection::Task,
    "organizational" | "organisational" => HumanFactorSection::Organizational,
    _ => return None,
  };
  Some((section, item))
}

/// Convert a legacy flat map into the two-level structure. Keys with an
/// unknown section prefix are dropped.
pub fn sections_from_flat(
  flat: &BTreeMap<String, HumanFactorEntry>,
) -> HumanFactorsMap {
  let mut map = HumanFactorsMap::new();
  for (key, entry) in flat {
    if let Some((section, item)) = parse_flat_key(key) {
      map
        .entry(section)
        .or_default()
        .insert(item.to_string(), entry.clone());
    }
  }
  map
}

// ─── Grouping ────────────────────────────────────────────────────────────────

/// One labelled line of report output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedItem {
  pub label:  String,
  pub rating: Option<Rating>,
  pub notes:  String,
}

/// A report bucket: one of the three fixed sections with its rated items.
#[derive(Debug, Clone)]
pub struct SectionGroup {
  pub section: HumanFactorSection,
  pub items:   Vec<RatedItem>,
}

/// Group an assessment's entries into the three fixed buckets, in section
/// order, items sorted by identifier. Entries with no rating and no notes
/// are excluded entirely.
pub fn group(map: &HumanFactorsMap) -> Vec<SectionGroup> {
  HumanFactorSection::iter()
    .map(|section| {
      let items = map
        .get(&section)
        .map(|entries| {
          entries
            .iter()
            .filter(|(_, entry)| !entry.is_empty())
            .map(|(item, entry)| RatedItem {
              label:  item_label(item),
              rating: entry.rating,
              notes:  entry.notes.clone(),
            })
            .collect()
        })
        .unwrap_or_default();
      SectionGroup { section, items }
    })
    .collect()
}

/// True when no bucket has any item — the whole block is omitted from the
/// report in that case.
pub fn is_all_empty(groups: &[SectionGroup]) -> bool {
  groups.iter().all(|g| g.items.is_empty())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(rating: Option<Rating>, notes: &str) -> HumanFactorEntry {
    HumanFactorEntry {
      rating,
      notes: notes.into(),
    }
  }

  #[test]
  fn empty_entries_are_excluded_from_all_buckets() {
    let mut map = HumanFactorsMap::new();
    map
      .entry(HumanFactorSection::Individual)
      .or_default()
      .insert("fatigue".into(), entry(None, ""));
    map
      .entry(HumanFactorSection::Task)
      .or_default()
      .insert("workload".into(), entry(None, "   "));

    let groups = group(&map);
    assert!(is_all_empty(&groups));
  }

  #[test]
  fn both_organizational_spellings_share_one_bucket() {
    let mut flat = BTreeMap::new();
    flat.insert(
      "organizational_training".to_string(),
      entry(Some(Rating::Contributing), ""),
    );
    flat.insert(
      "organisational_supervision".to_string(),
      entry(Some(Rating::Causal), ""),
    );

    let map = sections_from_flat(&flat);
    assert_eq!(map.len(), 1);
    let org = map.get(&HumanFactorSection::Organizational).unwrap();
    assert_eq!(org.len(), 2);
    assert!(org.contains_key("training"));
    assert!(org.contains_key("supervision"));
  }

  #[test]
  fn item_identifier_is_remainder_after_first_underscore() {
    let (section, item) =
      parse_flat_key("organizational_management_of_change").unwrap();
    assert_eq!(section, HumanFactorSection::Organizational);
    assert_eq!(item, "management_of_change");
  }

  #[test]
  fn unknown_section_prefix_is_rejected() {
    assert!(parse_flat_key("environmental_noise").is_none());
    assert!(parse_flat_key("nounderscore").is_none());
  }

  #[test]
  fn label_lookup_with_fallback() {
    assert_eq!(item_label("fatigue"), "Fatigue / Alertness");
    assert_eq!(item_label("management_of_change"), "Management of Change");
    // Not in the table: underscores become spaces.
    assert_eq!(item_label("night_shift_handover"), "night shift handover");
  }

  #[test]
  fn buckets_come_back_in_fixed_section_order() {
    let mut map = HumanFactorsMap::new();
    map
      .entry(HumanFactorSection::Organizational)
      .or_default()
      .insert("training".into(), entry(Some(Rating::Causal), ""));
    map
      .entry(HumanFactorSection::Individual)
      .or_default()
      .insert("fatigue".into(), entry(Some(Rating::Contributing), ""));

    let groups = group(&map);
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].section, HumanFactorSection::Individual);
    assert_eq!(groups[1].section, HumanFactorSection::Task);
    assert_eq!(groups[2].section, HumanFactorSection::Organizational);
    assert!(groups[1].items.is_empty());
  }

  #[test]
  fn notes_only_entry_survives_grouping() {
    let mut map = HumanFactorsMap::new();
    map
      .entry(HumanFactorSection::Task)
      .or_default()
      .insert("workload".into(), entry(None, "doubled-up coverage"));

    let groups = group(&map);
    assert_eq!(groups[1].items.len(), 1);
    assert_eq!(groups[1].items[0].label, "Workload");
    assert_eq!(groups[1].items[0].rating, None);
  }
}
