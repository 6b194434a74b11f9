//! The `InvestigationStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `inquest-store-sqlite`). Higher layers (`inquest-api`, `inquest-report`)
//! depend on this abstraction, not on any concrete backend.
//!
//! Every read is an independent, per-collection operation filtered by the
//! owning investigation id and ordered by an entity-appropriate key. There
//! are no transactions spanning collections; a caller assembling several
//! collections must tolerate each read failing independently.

use std::future::Future;

use uuid::Uuid;

use crate::{
  assessment::{
    HfatAssessment, HopAssessment, NewHfatAssessment, NewHopAssessment,
  },
  barrier::{Barrier, BarrierPatch, NewBarrier},
  causal::{CausalFactor, CausalFactorPatch, NewCausalFactor},
  evidence::{Evidence, EvidencePatch, NewEvidence, StoredFile},
  interview::{Interview, InterviewPatch, NewInterview},
  investigation::{Investigation, InvestigationPatch, NewInvestigation},
  recommendation::{NewRecommendation, Recommendation, RecommendationPatch},
  timeline::{NewTimelineEvent, TimelineEvent},
};

/// Abstraction over an Inquest record store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait InvestigationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Investigations ────────────────────────────────────────────────────

  /// Create and persist a new investigation. The id, `Open` status and
  /// `created_at` timestamp are assigned by the store.
  fn create_investigation(
    &self,
    input: NewInvestigation,
  ) -> impl Future<Output = Result<Investigation, Self::Error>> + Send + '_;

  /// Retrieve an investigation by id. Returns `None` if not found.
  fn get_investigation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Investigation>, Self::Error>> + Send + '_;

  /// List all investigations, newest first.
  fn list_investigations(
    &self,
  ) -> impl Future<Output = Result<Vec<Investigation>, Self::Error>> + Send + '_;

  /// Apply a partial update. Last write wins; there is no conflict
  /// detection between concurrent editors.
  fn update_investigation(
    &self,
    id: Uuid,
    patch: InvestigationPatch,
  ) -> impl Future<Output = Result<Investigation, Self::Error>> + Send + '_;

  fn delete_investigation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Evidence ──────────────────────────────────────────────────────────

  fn add_evidence(
    &self,
    input: NewEvidence,
  ) -> impl Future<Output = Result<Evidence, Self::Error>> + Send + '_;

  /// All evidence for an investigation, in creation order.
  fn evidence_for(
    &self,
    investigation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Evidence>, Self::Error>> + Send + '_;

  fn update_evidence(
    &self,
    id: Uuid,
    patch: EvidencePatch,
  ) -> impl Future<Output = Result<Evidence, Self::Error>> + Send + '_;

  /// Attach (or replace) the stored file reference on an evidence record.
  fn attach_evidence_file(
    &self,
    id: Uuid,
    file: StoredFile,
  ) -> impl Future<Output = Result<Evidence, Self::Error>> + Send + '_;

  fn delete_evidence(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Interviews ────────────────────────────────────────────────────────

  fn add_interview(
    &self,
    input: NewInterview,
  ) -> impl Future<Output = Result<Interview, Self::Error>> + Send + '_;

  /// All interviews for an investigation, ordered by interview date.
  fn interviews_for(
    &self,
    investigation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Interview>, Self::Error>> + Send + '_;

  fn update_interview(
    &self,
    id: Uuid,
    patch: InterviewPatch,
  ) -> impl Future<Output = Result<Interview, Self::Error>> + Send + '_;

  fn delete_interview(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Timeline events ───────────────────────────────────────────────────
  //
  // The workflow only creates and deletes events; the single mutation is
  // the verified flag.

  fn add_timeline_event(
    &self,
    input: NewTimelineEvent,
  ) -> impl Future<Output = Result<TimelineEvent, Self::Error>> + Send + '_;

  /// All events for an investigation, in chronological order
  /// (date, then time; events without a time sort first within their day).
  fn timeline_for(
    &self,
    investigation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TimelineEvent>, Self::Error>> + Send + '_;

  fn set_event_verified(
    &self,
    id: Uuid,
    verified: bool,
  ) -> impl Future<Output = Result<TimelineEvent, Self::Error>> + Send + '_;

  fn delete_timeline_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Causal factors ────────────────────────────────────────────────────

  fn add_causal_factor(
    &self,
    input: NewCausalFactor,
  ) -> impl Future<Output = Result<CausalFactor, Self::Error>> + Send + '_;

  /// All factors for an investigation, in creation order.
  fn causal_factors_for(
    &self,
    investigation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<CausalFactor>, Self::Error>> + Send + '_;

  fn update_causal_factor(
    &self,
    id: Uuid,
    patch: CausalFactorPatch,
  ) -> impl Future<Output = Result<CausalFactor, Self::Error>> + Send + '_;

  fn delete_causal_factor(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Assessments ───────────────────────────────────────────────────────
  //
  // Upserts are keyed by causal_factor_id: if an assessment already exists
  // for the factor, its content is replaced in place. Duplicates are not
  // prevented at the storage level; `*_for_factor` reads return the oldest
  // matching record.

  fn put_hfat_assessment(
    &self,
    input: NewHfatAssessment,
  ) -> impl Future<Output = Result<HfatAssessment, Self::Error>> + Send + '_;

  fn hfat_for_factor(
    &self,
    causal_factor_id: Uuid,
  ) -> impl Future<Output = Result<Option<HfatAssessment>, Self::Error>> + Send + '_;

  fn hfat_for_investigation(
    &self,
    investigation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<HfatAssessment>, Self::Error>> + Send + '_;

  fn put_hop_assessment(
    &self,
    input: NewHopAssessment,
  ) -> impl Future<Output = Result<HopAssessment, Self::Error>> + Send + '_;

  fn hop_for_factor(
    &self,
    causal_factor_id: Uuid,
  ) -> impl Future<Output = Result<Option<HopAssessment>, Self::Error>> + Send + '_;

  fn hop_for_investigation(
    &self,
    investigation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<HopAssessment>, Self::Error>> + Send + '_;

  // ── Recommendations ───────────────────────────────────────────────────

  fn add_recommendation(
    &self,
    input: NewRecommendation,
  ) -> impl Future<Output = Result<Recommendation, Self::Error>> + Send + '_;

  /// All recommendations for an investigation, most urgent priority first,
  /// creation order within a priority.
  fn recommendations_for(
    &self,
    investigation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Recommendation>, Self::Error>> + Send + '_;

  fn update_recommendation(
    &self,
    id: Uuid,
    patch: RecommendationPatch,
  ) -> impl Future<Output = Result<Recommendation, Self::Error>> + Send + '_;

  fn delete_recommendation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Barriers ──────────────────────────────────────────────────────────

  fn add_barrier(
    &self,
    input: NewBarrier,
  ) -> impl Future<Output = Result<Barrier, Self::Error>> + Send + '_;

  /// All barriers for an investigation, in creation order.
  fn barriers_for(
    &self,
    investigation_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Barrier>, Self::Error>> + Send + '_;

  fn update_barrier(
    &self,
    id: Uuid,
    patch: BarrierPatch,
  ) -> impl Future<Output = Result<Barrier, Self::Error>> + Send + '_;

  fn delete_barrier(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
