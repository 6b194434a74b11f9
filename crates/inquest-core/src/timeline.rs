//! Timeline events — the sequence-of-events reconstruction.
//!
//! Events form a shallow tree: a top-level event may have child events
//! attached through `parent_event_id`. The store returns them flat and in
//! chronological order; grouping into a tree is a read-side concern.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
  pub event_id:          Uuid,
  pub investigation_id:  Uuid,
  /// When set, this event nests under the referenced top-level event.
  pub parent_event_id:   Option<Uuid>,
  pub occurred_on:       NaiveDate,
  pub occurred_time:     Option<NaiveTime>,
  /// Free-text phase label, e.g. "pre-incident", "response".
  pub category:          String,
  pub title:             String,
  /// Marks the event as the incident itself, for emphasis in rendering.
  pub is_incident_event: bool,
  /// Set once the event has been corroborated against evidence.
  pub verified:          bool,
  pub created_at:        DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::add_timeline_event`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimelineEvent {
  pub investigation_id:  Uuid,
  pub parent_event_id:   Option<Uuid>,
  pub occurred_on:       NaiveDate,
  pub occurred_time:     Option<NaiveTime>,
  #[serde(default)]
  pub category:          String,
  pub title:             String,
  #[serde(default)]
  pub is_incident_event: bool,
}
