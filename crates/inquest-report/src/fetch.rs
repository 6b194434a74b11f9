//! Fault-tolerant assembly of everything the report needs.
//!
//! The investigation row is loaded first; its absence is the only fatal
//! error. The remaining collections are then read independently. A failed
//! collection read is logged and treated as empty, so the composer always
//! receives a complete (if partial) data set. No retries, no all-or-nothing
//! semantics: a mid-sequence failure leaves earlier collections populated
//! and later ones empty, and the report renders whatever was retrieved.

use inquest_core::{
  assessment::{HfatAssessment, HopAssessment},
  barrier::Barrier,
  causal::CausalFactor,
  evidence::Evidence,
  interview::Interview,
  investigation::Investigation,
  recommendation::Recommendation,
  store::InvestigationStore,
  timeline::TimelineEvent,
};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Everything the composer consumes, fetched per collection.
#[derive(Debug, Clone)]
pub struct ReportData {
  pub investigation:   Investigation,
  pub evidence:        Vec<Evidence>,
  pub interviews:      Vec<Interview>,
  pub timeline:        Vec<TimelineEvent>,
  pub causal_factors:  Vec<CausalFactor>,
  pub hfat:            Vec<HfatAssessment>,
  pub hop:             Vec<HopAssessment>,
  pub recommendations: Vec<Recommendation>,
  pub barriers:        Vec<Barrier>,
}

impl ReportData {
  /// Fetch all collections for `investigation_id` from `store`.
  ///
  /// The investigation read must succeed and match; every other read
  /// degrades independently to an empty collection.
  pub async fn fetch<S>(store: &S, investigation_id: Uuid) -> Result<Self>
  where
    S: InvestigationStore,
  {
    let investigation = store
      .get_investigation(investigation_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
      .ok_or(Error::InvestigationNotFound(investigation_id))?;

    Ok(Self {
      investigation,
      evidence: or_empty("evidence", store.evidence_for(investigation_id).await),
      interviews: or_empty(
        "interviews",
        store.interviews_for(investigation_id).await,
      ),
      timeline: or_empty("timeline", store.timeline_for(investigation_id).await),
      causal_factors: or_empty(
        "causal_factors",
        store.causal_factors_for(investigation_id).await,
      ),
      hfat: or_empty(
        "hfat_assessments",
        store.hfat_for_investigation(investigation_id).await,
      ),
      hop: or_empty(
        "hop_assessments",
        store.hop_for_investigation(investigation_id).await,
      ),
      recommendations: or_empty(
        "recommendations",
        store.recommendations_for(investigation_id).await,
      ),
      barriers: or_empty("barriers", store.barriers_for(investigation_id).await),
    })
  }

  /// First HFAT assessment recorded for `causal_factor_id`, if any.
  /// Duplicates are legal; the oldest record wins.
  pub fn hfat_for_factor(&self, causal_factor_id: Uuid) -> Option<&HfatAssessment> {
    self
      .hfat
      .iter()
      .find(|a| a.causal_factor_id == causal_factor_id)
  }

  /// First HOP assessment recorded for `causal_factor_id`, if any.
  pub fn hop_for_factor(&self, causal_factor_id: Uuid) -> Option<&HopAssessment> {
    self
      .hop
      .iter()
      .find(|a| a.causal_factor_id == causal_factor_id)
  }
}

/// Collapse a failed collection read to "no records", with a warning.
fn or_empty<T, E>(collection: &'static str, result: Result<Vec<T>, E>) -> Vec<T>
where
  E: std::error::Error,
{
  match result {
    Ok(records) => records,
    Err(e) => {
      tracing::warn!(collection, error = %e, "collection read failed, rendering without it");
      Vec::new()
    }
  }
}
