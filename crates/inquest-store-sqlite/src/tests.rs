//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, NaiveTime};
use inquest_core::{
  assessment::{
    HumanFactorEntry, HumanFactorSection, NewHfatAssessment, NewHopAssessment,
    Rating,
  },
  barrier::{BarrierKind, BarrierPatch, BarrierStatus, NewBarrier},
  causal::{CausalFactorPatch, FactorType, FishboneCategory, NewCausalFactor},
  evidence::{EvidenceKind, EvidencePatch, NewEvidence, StoredFile},
  interview::NewInterview,
  investigation::{
    Investigation, InvestigationPatch, InvestigationStatus, NewInvestigation,
    Severity,
  },
  recommendation::{ControlType, NewRecommendation, Priority},
  store::InvestigationStore,
  timeline::NewTimelineEvent,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, m, 0).unwrap() }

async fn investigation(s: &SqliteStore) -> Investigation {
  s.create_investigation(NewInvestigation {
    number:        "INV-2024-001".into(),
    occurred_on:   date(2024, 3, 1),
    occurred_time: Some(time(8, 15)),
    location:      "Unit 3".into(),
    severity:      Severity::High,
    description:   "Valve failure".into(),
  })
  .await
  .unwrap()
}

// ─── Investigations ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_investigation() {
  let s = store().await;
  let inv = investigation(&s).await;
  assert_eq!(inv.status, InvestigationStatus::Open);

  let fetched = s.get_investigation(inv.investigation_id).await.unwrap();
  assert!(fetched.is_some());
  let fetched = fetched.unwrap();
  assert_eq!(fetched.number, "INV-2024-001");
  assert_eq!(fetched.occurred_on, date(2024, 3, 1));
  assert_eq!(fetched.occurred_time, Some(time(8, 15)));
  assert_eq!(fetched.severity, Severity::High);
}

#[tokio::test]
async fn get_investigation_missing_returns_none() {
  let s = store().await;
  let result = s.get_investigation(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn list_investigations_newest_first() {
  let s = store().await;
  let first = investigation(&s).await;
  let second = s
    .create_investigation(NewInvestigation {
      number:        "INV-2024-002".into(),
      occurred_on:   date(2024, 3, 2),
      occurred_time: None,
      location:      "Unit 1".into(),
      severity:      Severity::Low,
      description:   String::new(),
    })
    .await
    .unwrap();

  let all = s.list_investigations().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].investigation_id, second.investigation_id);
  assert_eq!(all[1].investigation_id, first.investigation_id);
}

#[tokio::test]
async fn patch_updates_only_set_fields() {
  let s = store().await;
  let inv = investigation(&s).await;

  let updated = s
    .update_investigation(inv.investigation_id, InvestigationPatch {
      status: Some(InvestigationStatus::Completed),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.status, InvestigationStatus::Completed);
  assert_eq!(updated.number, inv.number);
  assert_eq!(updated.location, inv.location);
}

#[tokio::test]
async fn update_missing_investigation_errors() {
  let s = store().await;
  let result = s
    .update_investigation(Uuid::new_v4(), InvestigationPatch::default())
    .await;
  assert!(matches!(result, Err(Error::InvestigationNotFound(_))));
}

// ─── Evidence ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn evidence_round_trip_with_tags_and_file() {
  let s = store().await;
  let inv = investigation(&s).await;

  let ev = s
    .add_evidence(NewEvidence {
      investigation_id: inv.investigation_id,
      kind:             EvidenceKind::Photo,
      title:            "Valve bonnet".into(),
      description:      "Close-up of the failed bonnet".into(),
      tags:             vec!["valve".into(), "unit-3".into()],
    })
    .await
    .unwrap();
  assert!(ev.file.is_none());

  let attached = s
    .attach_evidence_file(ev.evidence_id, StoredFile {
      path:         "inv/photo.jpg".into(),
      content_hash: "deadbeef".into(),
      media_type:   "image/jpeg".into(),
    })
    .await
    .unwrap();
  assert!(attached.file.is_some());

  let listed = s.evidence_for(inv.investigation_id).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].tags, vec!["valve", "unit-3"]);
  assert_eq!(listed[0].file.as_ref().unwrap().media_type, "image/jpeg");
}

#[tokio::test]
async fn evidence_requires_existing_investigation() {
  let s = store().await;
  let result = s
    .add_evidence(NewEvidence {
      investigation_id: Uuid::new_v4(),
      kind:             EvidenceKind::Other,
      title:            "orphan".into(),
      description:      String::new(),
      tags:             vec![],
    })
    .await;
  assert!(result.is_err(), "foreign key should reject a dangling owner");
}

#[tokio::test]
async fn evidence_patch_and_delete() {
  let s = store().await;
  let inv = investigation(&s).await;
  let ev = s
    .add_evidence(NewEvidence {
      investigation_id: inv.investigation_id,
      kind:             EvidenceKind::Document,
      title:            "Permit".into(),
      description:      String::new(),
      tags:             vec![],
    })
    .await
    .unwrap();

  let updated = s
    .update_evidence(ev.evidence_id, EvidencePatch {
      title: Some("Work permit 4411".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.title, "Work permit 4411");
  assert_eq!(updated.kind, EvidenceKind::Document);

  s.delete_evidence(ev.evidence_id).await.unwrap();
  assert!(s.evidence_for(inv.investigation_id).await.unwrap().is_empty());

  let missing = s.delete_evidence(ev.evidence_id).await;
  assert!(matches!(missing, Err(Error::EvidenceNotFound(_))));
}

// ─── Interviews ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn interviews_ordered_by_date() {
  let s = store().await;
  let inv = investigation(&s).await;

  s.add_interview(NewInterview {
    investigation_id: inv.investigation_id,
    interviewee:      "B. Operator".into(),
    role:             "Operator".into(),
    conducted_on:     date(2024, 3, 5),
    findings:         String::new(),
  })
  .await
  .unwrap();
  s.add_interview(NewInterview {
    investigation_id: inv.investigation_id,
    interviewee:      "A. Supervisor".into(),
    role:             "Shift supervisor".into(),
    conducted_on:     date(2024, 3, 3),
    findings:         String::new(),
  })
  .await
  .unwrap();

  let listed = s.interviews_for(inv.investigation_id).await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].interviewee, "A. Supervisor");
  assert_eq!(listed[1].interviewee, "B. Operator");
}

// ─── Timeline ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn timeline_is_chronological() {
  let s = store().await;
  let inv = investigation(&s).await;

  let add = |title: &str, d: NaiveDate, t: Option<NaiveTime>| {
    let title = title.to_string();
    let s = s.clone();
    let inv_id = inv.investigation_id;
    async move {
      s.add_timeline_event(NewTimelineEvent {
        investigation_id:  inv_id,
        parent_event_id:   None,
        occurred_on:       d,
        occurred_time:     t,
        category:          String::new(),
        title,
        is_incident_event: false,
      })
      .await
      .unwrap()
    }
  };

  add("later", date(2024, 3, 1), Some(time(9, 0))).await;
  add("earlier", date(2024, 3, 1), Some(time(7, 30))).await;
  add("previous day", date(2024, 2, 29), None).await;

  let listed = s.timeline_for(inv.investigation_id).await.unwrap();
  let titles: Vec<_> = listed.iter().map(|e| e.title.as_str()).collect();
  assert_eq!(titles, vec!["previous day", "earlier", "later"]);
}

#[tokio::test]
async fn verify_and_delete_timeline_event() {
  let s = store().await;
  let inv = investigation(&s).await;

  let event = s
    .add_timeline_event(NewTimelineEvent {
      investigation_id:  inv.investigation_id,
      parent_event_id:   None,
      occurred_on:       date(2024, 3, 1),
      occurred_time:     None,
      category:          "response".into(),
      title:             "Alarm raised".into(),
      is_incident_event: false,
    })
    .await
    .unwrap();
  assert!(!event.verified);

  let verified = s.set_event_verified(event.event_id, true).await.unwrap();
  assert!(verified.verified);

  s.delete_timeline_event(event.event_id).await.unwrap();
  let missing = s.set_event_verified(event.event_id, true).await;
  assert!(matches!(missing, Err(Error::TimelineEventNotFound(_))));
}

// ─── Causal factors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn causal_factor_round_trip() {
  let s = store().await;
  let inv = investigation(&s).await;

  let cf = s
    .add_causal_factor(NewCausalFactor {
      investigation_id: inv.investigation_id,
      title:            "Inadequate valve inspection".into(),
      description:      String::new(),
      factor_type:      FactorType::Root,
      category:         FishboneCategory::Procedures,
    })
    .await
    .unwrap();

  let updated = s
    .update_causal_factor(cf.causal_factor_id, CausalFactorPatch {
      factor_type: Some(FactorType::Contributing),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.factor_type, FactorType::Contributing);
  assert_eq!(updated.title, "Inadequate valve inspection");

  let listed = s.causal_factors_for(inv.investigation_id).await.unwrap();
  assert_eq!(listed.len(), 1);
}

// ─── Assessments ─────────────────────────────────────────────────────────────

fn hfat_input(inv_id: Uuid, factor_id: Uuid, notes: &str) -> NewHfatAssessment {
  let mut human_factors = inquest_core::assessment::HumanFactorsMap::new();
  human_factors
    .entry(HumanFactorSection::Individual)
    .or_default()
    .insert("fatigue".into(), HumanFactorEntry {
      rating: Some(Rating::Causal),
      notes:  notes.into(),
    });
  NewHfatAssessment {
    investigation_id: inv_id,
    causal_factor_id: factor_id,
    human_factors,
    just_culture: Default::default(),
  }
}

#[tokio::test]
async fn hfat_put_twice_replaces_in_place() {
  let s = store().await;
  let inv = investigation(&s).await;
  let factor_id = Uuid::new_v4();

  let first = s
    .put_hfat_assessment(hfat_input(inv.investigation_id, factor_id, "long shift"))
    .await
    .unwrap();
  let second = s
    .put_hfat_assessment(hfat_input(inv.investigation_id, factor_id, "double shift"))
    .await
    .unwrap();

  // Same row, new content.
  assert_eq!(first.assessment_id, second.assessment_id);

  let all = s.hfat_for_investigation(inv.investigation_id).await.unwrap();
  assert_eq!(all.len(), 1);

  let fetched = s.hfat_for_factor(factor_id).await.unwrap().unwrap();
  let entry = fetched
    .human_factors
    .get(&HumanFactorSection::Individual)
    .and_then(|items| items.get("fatigue"))
    .unwrap();
  assert_eq!(entry.rating, Some(Rating::Causal));
  assert_eq!(entry.notes, "double shift");
}

#[tokio::test]
async fn hop_upsert_and_fetch() {
  let s = store().await;
  let inv = investigation(&s).await;
  let factor_id = Uuid::new_v4();

  let mut fields = inquest_core::assessment::HopFields::default();
  fields.error_precursors = "time pressure at shift change".into();

  s.put_hop_assessment(NewHopAssessment {
    investigation_id: inv.investigation_id,
    causal_factor_id: factor_id,
    fields,
  })
  .await
  .unwrap();

  let fetched = s.hop_for_factor(factor_id).await.unwrap().unwrap();
  assert_eq!(fetched.fields.error_precursors, "time pressure at shift change");
  assert!(fetched.fields.work_as_planned.is_empty());

  assert!(s.hop_for_factor(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Recommendations ─────────────────────────────────────────────────────────

#[tokio::test]
async fn recommendations_ordered_by_priority() {
  let s = store().await;
  let inv = investigation(&s).await;

  let add = |title: &str, priority: Priority| {
    let title = title.to_string();
    let s = s.clone();
    let inv_id = inv.investigation_id;
    async move {
      s.add_recommendation(NewRecommendation {
        investigation_id:      inv_id,
        title,
        description:           String::new(),
        control_type:          ControlType::Administrative,
        priority,
        linked_causal_factors: vec![],
      })
      .await
      .unwrap()
    }
  };

  add("paperwork", Priority::Low).await;
  add("interlock", Priority::Critical).await;
  add("training", Priority::Medium).await;

  let listed = s.recommendations_for(inv.investigation_id).await.unwrap();
  let titles: Vec<_> = listed.iter().map(|r| r.title.as_str()).collect();
  assert_eq!(titles, vec!["interlock", "training", "paperwork"]);
}

#[tokio::test]
async fn recommendation_links_survive_round_trip() {
  let s = store().await;
  let inv = investigation(&s).await;
  let linked = vec![Uuid::new_v4(), Uuid::new_v4()];

  let rec = s
    .add_recommendation(NewRecommendation {
      investigation_id:      inv.investigation_id,
      title:                 "Inspect quarterly".into(),
      description:           String::new(),
      control_type:          ControlType::Engineering,
      priority:              Priority::High,
      linked_causal_factors: linked.clone(),
    })
    .await
    .unwrap();

  let listed = s.recommendations_for(inv.investigation_id).await.unwrap();
  assert_eq!(listed[0].recommendation_id, rec.recommendation_id);
  assert_eq!(listed[0].linked_causal_factors, linked);
}

// ─── Barriers ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn barrier_round_trip() {
  let s = store().await;
  let inv = investigation(&s).await;

  let barrier = s
    .add_barrier(NewBarrier {
      investigation_id: inv.investigation_id,
      name:             "Relief valve".into(),
      kind:             BarrierKind::Physical,
      status:           BarrierStatus::Failed,
      performed:        false,
      failure_reason:   Some("blocked tell-tale".into()),
    })
    .await
    .unwrap();

  let updated = s
    .update_barrier(barrier.barrier_id, BarrierPatch {
      status: Some(BarrierStatus::Partial),
      performed: Some(true),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.status, BarrierStatus::Partial);
  assert!(updated.performed);
  assert_eq!(updated.failure_reason.as_deref(), Some("blocked tell-tale"));

  s.delete_barrier(barrier.barrier_id).await.unwrap();
  assert!(s.barriers_for(inv.investigation_id).await.unwrap().is_empty());
}
