//! End-to-end: build an investigation in a real (in-memory) store, fetch,
//! compose, and check the rendered report.

use chrono::NaiveDate;
use inquest_core::{
  assessment::{
    HumanFactorEntry, HumanFactorSection, HumanFactorsMap,
    JustCultureClassification, NewHfatAssessment, Rating,
  },
  causal::{FactorType, FishboneCategory, NewCausalFactor},
  investigation::{NewInvestigation, Severity},
  recommendation::{ControlType, NewRecommendation, Priority},
  store::InvestigationStore,
};
use inquest_report::{ReportData, compose, render_plain_text};
use inquest_store_sqlite::SqliteStore;

#[tokio::test]
async fn valve_failure_scenario_renders_expected_report() {
  let store = SqliteStore::open_in_memory().await.unwrap();

  let investigation = store
    .create_investigation(NewInvestigation {
      number:        "INV-2024-001".into(),
      occurred_on:   NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
      occurred_time: None,
      location:      "Unit 3".into(),
      severity:      Severity::High,
      description:   "Valve failure".into(),
    })
    .await
    .unwrap();

  let factor = store
    .add_causal_factor(NewCausalFactor {
      investigation_id: investigation.investigation_id,
      title:            "Inadequate valve inspection".into(),
      description:      String::new(),
      factor_type:      FactorType::Root,
      category:         FishboneCategory::Procedures,
    })
    .await
    .unwrap();

  let mut human_factors = HumanFactorsMap::new();
  human_factors
    .entry(HumanFactorSection::Individual)
    .or_default()
    .insert("fatigue".into(), HumanFactorEntry {
      rating: Some(Rating::Causal),
      notes:  "long shift".into(),
    });
  store
    .put_hfat_assessment(NewHfatAssessment {
      investigation_id: investigation.investigation_id,
      causal_factor_id: factor.causal_factor_id,
      human_factors,
      just_culture: inquest_core::assessment::JustCulture {
        classification:   Some(JustCultureClassification::AtRiskBehavior),
        justification:    String::new(),
        response_actions: String::new(),
      },
    })
    .await
    .unwrap();

  store
    .add_recommendation(NewRecommendation {
      investigation_id:      investigation.investigation_id,
      title:                 "Add valve inspection to quarterly PM routine".into(),
      description:           String::new(),
      control_type:          ControlType::Administrative,
      priority:              Priority::High,
      linked_causal_factors: vec![factor.causal_factor_id],
    })
    .await
    .unwrap();

  let data = ReportData::fetch(&store, investigation.investigation_id)
    .await
    .unwrap();
  let text = render_plain_text(&compose(&data));

  // Executive summary counts.
  assert!(text.contains("Evidence items: 0"), "got:\n{text}");
  assert!(text.contains("Interviews: 0"), "got:\n{text}");
  assert!(text.contains("Causal factors: 1"), "got:\n{text}");
  assert!(text.contains("Recommendations: 1"), "got:\n{text}");
  assert!(text.contains("Location: Unit 3"), "got:\n{text}");

  // Description.
  assert!(text.contains("Valve failure"), "got:\n{text}");

  // Causal analysis subsection with the human-factors and just-culture
  // blocks.
  assert!(text.contains("5.1 Inadequate valve inspection"), "got:\n{text}");
  assert!(text.contains("Individual Factors"), "got:\n{text}");
  assert!(
    text.contains("Fatigue / Alertness: Causal (long shift)"),
    "got:\n{text}"
  );
  assert!(text.contains("Classification: At-Risk Behavior"), "got:\n{text}");

  // Recommendation linkage resolves to the factor title.
  assert!(
    text.contains("Addresses causal factor: Inadequate valve inspection"),
    "got:\n{text}"
  );

  // Conclusion pluralisation: one factor, one recommendation.
  assert!(text.contains("identified 1 causal factor "), "got:\n{text}");
  assert!(text.contains("1 recommendation "), "got:\n{text}");
}

#[tokio::test]
async fn fetch_for_missing_investigation_is_an_error() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let result = ReportData::fetch(&store, uuid::Uuid::new_v4()).await;
  assert!(result.is_err());
}
