//! Report composition — the eight-section investigation document.
//!
//! The composer is a pure projection over [`ReportData`]: no store access,
//! no cross-record consistency checks. Section numbers are fixed (Causal
//! Analysis is always section 5, so its subsections are `5.1`, `5.2`, …)
//! even when the Barrier Analysis section is omitted for lack of barriers.

use chrono::{DateTime, Utc};
use inquest_core::{
  barrier::Barrier,
  causal::CausalFactor,
  investigation::Severity,
  recommendation::Recommendation,
  timeline::TimelineEvent,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{fetch::ReportData, human_factors, timeline};

// ─── Document model ──────────────────────────────────────────────────────────

/// The composed report: a tree of sections that serialises to JSON for
/// visual rendering and flattens depth-first to plain text for export.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
  pub title:        String,
  pub number:       String,
  pub generated_at: DateTime<Utc>,
  pub sections:     Vec<Section>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
  /// Fixed position in the document, kept even when sections are omitted.
  pub number: u8,
  pub title:  String,
  pub blocks: Vec<Block>,
}

/// A numbered subsection, e.g. `5.1` under Causal Analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Subsection {
  pub number: String,
  pub title:  String,
  pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Block {
  /// Full-width emphasis line (the high-potential warning).
  Banner(String),
  /// Minor heading within a section or subsection.
  Heading(String),
  Paragraph(String),
  /// Label/value rows.
  KeyValues(Vec<(String, String)>),
  /// Pre-formatted lines, rendered one per line.
  Items(Vec<String>),
  Subsection(Subsection),
}

// ─── Composer ────────────────────────────────────────────────────────────────

/// Build the full document from fetched data.
pub fn compose(data: &ReportData) -> Report {
  let mut sections = Vec::with_capacity(8);

  sections.push(executive_summary(data));
  sections.push(incident_description(data));
  sections.push(timeline_section(&data.timeline));
  if !data.barriers.is_empty() {
    sections.push(barrier_analysis(&data.barriers));
  }
  sections.push(causal_analysis(data));
  sections.push(recommendations_section(
    &data.recommendations,
    &data.causal_factors,
  ));
  sections.push(conclusion(data));
  sections.push(sign_off());

  Report {
    title:        "Incident Investigation Report".to_string(),
    number:       data.investigation.number.clone(),
    generated_at: Utc::now(),
    sections,
  }
}

// ─── 1. Executive summary ────────────────────────────────────────────────────

fn executive_summary(data: &ReportData) -> Section {
  let inv = &data.investigation;
  let mut blocks = Vec::new();

  if inv.severity == Severity::HighPotential {
    blocks.push(Block::Banner("HIGH POTENTIAL INCIDENT".to_string()));
  }

  let mut date = inv.occurred_on.format("%Y-%m-%d").to_string();
  if let Some(t) = inv.occurred_time {
    date.push_str(&format!(" {}", t.format("%H:%M")));
  }

  blocks.push(Block::KeyValues(vec![
    ("Investigation".to_string(), inv.number.clone()),
    ("Incident date".to_string(), date),
    ("Location".to_string(), inv.location.clone()),
    ("Severity".to_string(), inv.severity.to_string()),
    ("Status".to_string(), inv.status.to_string()),
  ]));

  blocks.push(Block::KeyValues(vec![
    ("Evidence items".to_string(), data.evidence.len().to_string()),
    ("Interviews".to_string(), data.interviews.len().to_string()),
    (
      "Causal factors".to_string(),
      data.causal_factors.len().to_string(),
    ),
    (
      "Recommendations".to_string(),
      data.recommendations.len().to_string(),
    ),
  ]));

  Section {
    number: 1,
    title: "Executive Summary".to_string(),
    blocks,
  }
}

// ─── 2. Incident description ─────────────────────────────────────────────────

fn incident_description(data: &ReportData) -> Section {
  let description = data.investigation.description.trim();
  let block = if description.is_empty() {
    Block::Paragraph("No description recorded.".to_string())
  } else {
    Block::Paragraph(description.to_string())
  };
  Section {
    number: 2,
    title:  "Incident Description".to_string(),
    blocks: vec![block],
  }
}

// ─── 3. Timeline ─────────────────────────────────────────────────────────────

fn event_line(e: &TimelineEvent) -> String {
  let mut line = e.occurred_on.format("%Y-%m-%d").to_string();
  if let Some(t) = e.occurred_time {
    line.push_str(&format!(" {}", t.format("%H:%M")));
  }
  line.push_str("  ");
  line.push_str(&e.title);
  if !e.category.trim().is_empty() {
    line.push_str(&format!(" ({})", e.category.trim()));
  }
  if e.is_incident_event {
    line.push_str(" [INCIDENT]");
  }
  if e.verified {
    line.push_str(" [verified]");
  }
  line
}

fn timeline_section(events: &[TimelineEvent]) -> Section {
  let grouped = timeline::group_events(events.to_vec());

  let blocks = if grouped.groups.is_empty() {
    vec![Block::Paragraph("No timeline events recorded.".to_string())]
  } else {
    let mut lines = Vec::new();
    for group in &grouped.groups {
      lines.push(event_line(&group.parent));
      for child in &group.children {
        lines.push(format!("    - {}", event_line(child)));
      }
    }
    vec![Block::Items(lines)]
  };

  Section {
    number: 3,
    title: "Timeline".to_string(),
    blocks,
  }
}

// ─── 4. Barrier analysis ─────────────────────────────────────────────────────

fn barrier_line(b: &Barrier) -> String {
  let mut line = format!("{} ({}): {}", b.name, b.kind, b.status);
  if !b.performed {
    line.push_str(", did not perform");
  }
  if let Some(reason) = b.failure_reason.as_deref()
    && !reason.trim().is_empty()
  {
    line.push_str(&format!(" [{}]", reason.trim()));
  }
  line
}

/// Only composed when at least one barrier exists; the section is omitted
/// entirely otherwise.
fn barrier_analysis(barriers: &[Barrier]) -> Section {
  Section {
    number: 4,
    title:  "Barrier Analysis".to_string(),
    blocks: vec![Block::Items(barriers.iter().map(barrier_line).collect())],
  }
}

// ─── 5. Causal analysis ──────────────────────────────────────────────────────

fn rated_item_line(item: &human_factors::RatedItem) -> String {
  let mut line = item.label.clone();
  if let Some(rating) = item.rating {
    line.push_str(&format!(": {rating}"));
  }
  if !item.notes.trim().is_empty() {
    line.push_str(&format!(" ({})", item.notes.trim()));
  }
  line
}

fn factor_subsection(data: &ReportData, index: usize, factor: &CausalFactor) -> Subsection {
  let mut blocks = vec![Block::KeyValues(vec![
    ("Type".to_string(), factor.factor_type.to_string()),
    ("Category".to_string(), factor.category.to_string()),
  ])];

  if !factor.description.trim().is_empty() {
    blocks.push(Block::Paragraph(factor.description.trim().to_string()));
  }

  // HFAT block: grouped ratings plus the just-culture classification.
  // Each part is omitted when it carries nothing.
  if let Some(assessment) = data.hfat_for_factor(factor.causal_factor_id) {
    let groups = human_factors::group(&assessment.human_factors);
    if !human_factors::is_all_empty(&groups) {
      blocks.push(Block::Heading("Human Factors Assessment".to_string()));
      for group in &groups {
        if group.items.is_empty() {
          continue;
        }
        blocks.push(Block::Heading(group.section.to_string()));
        blocks.push(Block::Items(
          group.items.iter().map(rated_item_line).collect(),
        ));
      }
    }

    if !assessment.just_culture.is_empty() {
      blocks.push(Block::Heading("Just Culture Review".to_string()));
      let jc = &assessment.just_culture;
      let mut pairs = Vec::new();
      if let Some(classification) = jc.classification {
        pairs.push(("Classification".to_string(), classification.to_string()));
      }
      if !jc.justification.trim().is_empty() {
        pairs.push(("Justification".to_string(), jc.justification.trim().to_string()));
      }
      if !jc.response_actions.trim().is_empty() {
        pairs.push((
          "Agreed response".to_string(),
          jc.response_actions.trim().to_string(),
        ));
      }
      blocks.push(Block::KeyValues(pairs));
    }
  }

  if let Some(assessment) = data.hop_for_factor(factor.causal_factor_id)
    && !assessment.fields.is_empty()
  {
    blocks.push(Block::Heading("HOP Assessment".to_string()));
    blocks.push(Block::KeyValues(
      assessment
        .fields
        .labeled()
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| (label.to_string(), value.trim().to_string()))
        .collect(),
    ));
  }

  Subsection {
    number: format!("5.{}", index + 1),
    title: factor.title.clone(),
    blocks,
  }
}

fn causal_analysis(data: &ReportData) -> Section {
  let blocks = if data.causal_factors.is_empty() {
    vec![Block::Paragraph("No causal factors identified.".to_string())]
  } else {
    data
      .causal_factors
      .iter()
      .enumerate()
      .map(|(i, factor)| Block::Subsection(factor_subsection(data, i, factor)))
      .collect()
  };

  Section {
    number: 5,
    title: "Causal Analysis".to_string(),
    blocks,
  }
}

// ─── 6. Recommendations ──────────────────────────────────────────────────────

/// Title of the linked factor, or the raw id string when no factor matches.
fn linked_factor_title(factors: &[CausalFactor], id: Uuid) -> String {
  factors
    .iter()
    .find(|f| f.causal_factor_id == id)
    .map(|f| f.title.clone())
    .unwrap_or_else(|| id.to_string())
}

fn recommendations_section(
  recommendations: &[Recommendation],
  factors: &[CausalFactor],
) -> Section {
  let blocks = if recommendations.is_empty() {
    vec![Block::Paragraph("No recommendations recorded.".to_string())]
  } else {
    let mut blocks = Vec::new();
    for rec in recommendations {
      blocks.push(Block::Heading(rec.title.clone()));
      blocks.push(Block::KeyValues(vec![
        ("Priority".to_string(), rec.priority.to_string()),
        ("Control type".to_string(), rec.control_type.to_string()),
      ]));
      if !rec.description.trim().is_empty() {
        blocks.push(Block::Paragraph(rec.description.trim().to_string()));
      }
      if !rec.linked_causal_factors.is_empty() {
        blocks.push(Block::Items(
          rec
            .linked_causal_factors
            .iter()
            .map(|&id| {
              format!(
                "Addresses causal factor: {}",
                linked_factor_title(factors, id)
              )
            })
            .collect(),
        ));
      }
    }
    blocks
  };

  Section {
    number: 6,
    title: "Recommendations".to_string(),
    blocks,
  }
}

// ─── 7. Conclusion ───────────────────────────────────────────────────────────

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
  if count == 1 {
    format!("{count} {singular}")
  } else {
    format!("{count} {plural}")
  }
}

fn conclusion(data: &ReportData) -> Section {
  let sentence = format!(
    "This investigation identified {} and produced {} to prevent recurrence.",
    pluralize(
      data.causal_factors.len(),
      "causal factor",
      "causal factors"
    ),
    pluralize(
      data.recommendations.len(),
      "recommendation",
      "recommendations"
    ),
  );

  Section {
    number: 7,
    title:  "Conclusion".to_string(),
    blocks: vec![Block::Paragraph(sentence)],
  }
}

// ─── 8. Sign-off ─────────────────────────────────────────────────────────────

fn sign_off() -> Section {
  Section {
    number: 8,
    title:  "Sign-off".to_string(),
    blocks: vec![Block::Items(vec![
      "Lead investigator: ______________________".to_string(),
      "Signature: ______________________".to_string(),
      "Date: ______________".to_string(),
    ])],
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use inquest_core::{
    barrier::{BarrierKind, BarrierStatus},
    causal::{FactorType, FishboneCategory},
    investigation::{Investigation, InvestigationStatus},
    recommendation::{ControlType, Priority},
  };

  use super::*;
  use crate::render::render_plain_text;

  fn investigation(severity: Severity) -> Investigation {
    Investigation {
      investigation_id: Uuid::new_v4(),
      number:           "INV-2024-001".into(),
      occurred_on:      NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
      occurred_time:    None,
      location:         "Unit 3".into(),
      severity,
      description:      "Valve failure".into(),
      status:           InvestigationStatus::Open,
      created_at:       Utc::now(),
    }
  }

  fn empty_data(severity: Severity) -> ReportData {
    ReportData {
      investigation:   investigation(severity),
      evidence:        vec![],
      interviews:      vec![],
      timeline:        vec![],
      causal_factors:  vec![],
      hfat:            vec![],
      hop:             vec![],
      recommendations: vec![],
      barriers:        vec![],
    }
  }

  fn factor(investigation_id: Uuid, title: &str) -> CausalFactor {
    CausalFactor {
      causal_factor_id: Uuid::new_v4(),
      investigation_id,
      title:            title.into(),
      description:      String::new(),
      factor_type:      FactorType::Direct,
      category:         FishboneCategory::Plant,
      created_at:       Utc::now(),
    }
  }

  fn recommendation(
    investigation_id: Uuid,
    linked: Vec<Uuid>,
  ) -> Recommendation {
    Recommendation {
      recommendation_id:     Uuid::new_v4(),
      investigation_id,
      title:                 "Inspect valves quarterly".into(),
      description:           String::new(),
      control_type:          ControlType::Administrative,
      priority:              Priority::High,
      linked_causal_factors: linked,
      created_at:            Utc::now(),
    }
  }

  #[test]
  fn conclusion_uses_singular_for_one_factor() {
    let mut data = empty_data(Severity::Medium);
    let inv_id = data.investigation.investigation_id;
    data.causal_factors.push(factor(inv_id, "Worn seat"));

    let text = render_plain_text(&compose(&data));
    assert!(text.contains("identified 1 causal factor "), "got:\n{text}");
    assert!(text.contains("0 recommendations"), "got:\n{text}");
  }

  #[test]
  fn conclusion_uses_plural_for_zero_and_many() {
    let data = empty_data(Severity::Medium);
    let text = render_plain_text(&compose(&data));
    assert!(text.contains("0 causal factors"), "got:\n{text}");

    let mut data = empty_data(Severity::Medium);
    let inv_id = data.investigation.investigation_id;
    data.causal_factors.push(factor(inv_id, "a"));
    data.causal_factors.push(factor(inv_id, "b"));
    let text = render_plain_text(&compose(&data));
    assert!(text.contains("2 causal factors"), "got:\n{text}");
  }

  #[test]
  fn unmatched_recommendation_link_renders_raw_id() {
    let mut data = empty_data(Severity::Medium);
    let inv_id = data.investigation.investigation_id;
    let ghost = Uuid::new_v4();
    data
      .recommendations
      .push(recommendation(inv_id, vec![ghost]));

    let text = render_plain_text(&compose(&data));
    assert!(
      text.contains(&format!("Addresses causal factor: {ghost}")),
      "got:\n{text}"
    );
  }

  #[test]
  fn barrier_section_omitted_when_no_barriers() {
    let data = empty_data(Severity::Medium);
    let report = compose(&data);
    assert!(
      report.sections.iter().all(|s| s.title != "Barrier Analysis"),
      "barrier section should be absent"
    );
    // Causal analysis keeps its fixed number regardless.
    let causal = report
      .sections
      .iter()
      .find(|s| s.title == "Causal Analysis")
      .unwrap();
    assert_eq!(causal.number, 5);
  }

  #[test]
  fn barrier_section_present_with_one_barrier() {
    let mut data = empty_data(Severity::Medium);
    data.barriers.push(Barrier {
      barrier_id:       Uuid::new_v4(),
      investigation_id: data.investigation.investigation_id,
      name:             "Relief valve".into(),
      kind:             BarrierKind::Physical,
      status:           BarrierStatus::Failed,
      performed:        false,
      failure_reason:   Some("blocked tell-tale".into()),
      created_at:       Utc::now(),
    });

    let text = render_plain_text(&compose(&data));
    assert!(text.contains("4. BARRIER ANALYSIS"), "got:\n{text}");
    assert!(text.contains("Relief valve (Physical): Failed"), "got:\n{text}");
  }

  #[test]
  fn high_potential_banner_is_conditional() {
    let text = render_plain_text(&compose(&empty_data(Severity::HighPotential)));
    assert!(text.contains("HIGH POTENTIAL INCIDENT"), "got:\n{text}");

    let text = render_plain_text(&compose(&empty_data(Severity::High)));
    assert!(!text.contains("HIGH POTENTIAL INCIDENT"), "got:\n{text}");
  }

  #[test]
  fn factor_subsections_are_numbered_under_section_five() {
    let mut data = empty_data(Severity::Medium);
    let inv_id = data.investigation.investigation_id;
    data.causal_factors.push(factor(inv_id, "First"));
    data.causal_factors.push(factor(inv_id, "Second"));

    let text = render_plain_text(&compose(&data));
    assert!(text.contains("5.1 First"), "got:\n{text}");
    assert!(text.contains("5.2 Second"), "got:\n{text}");
  }
}
