//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as `YYYY-MM-DD`, times
//! as `HH:MM:SS`. Structured fields (tags, id lists, the human-factors map,
//! just-culture and HOP payloads) are stored as compact JSON. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use inquest_core::{
  assessment::{HfatAssessment, HopAssessment, HopFields, HumanFactorsMap, JustCulture},
  barrier::{Barrier, BarrierKind, BarrierStatus},
  causal::{CausalFactor, FactorType, FishboneCategory},
  evidence::{Evidence, EvidenceKind, StoredFile},
  interview::Interview,
  investigation::{Investigation, InvestigationStatus, Severity},
  recommendation::{ControlType, Priority, Recommendation},
  timeline::TimelineEvent,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Date / time ─────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

pub fn encode_time(t: NaiveTime) -> String { t.format("%H:%M:%S").to_string() }

pub fn decode_time(s: &str) -> Result<NaiveTime> {
  NaiveTime::parse_from_str(s, "%H:%M:%S")
    .map_err(|e| Error::Decode(format!("time {s:?}: {e}")))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_severity(s: Severity) -> &'static str {
  match s {
    Severity::Low => "low",
    Severity::Medium => "medium",
    Severity::High => "high",
    Severity::HighPotential => "high_potential",
  }
}

pub fn decode_severity(s: &str) -> Result<Severity> {
  match s {
    "low" => Ok(Severity::Low),
    "medium" => Ok(Severity::Medium),
    "high" => Ok(Severity::High),
    "high_potential" => Ok(Severity::HighPotential),
    other => Err(Error::Decode(format!("unknown severity: {other:?}"))),
  }
}

pub fn encode_status(s: InvestigationStatus) -> &'static str {
  match s {
    InvestigationStatus::Open => "open",
    InvestigationStatus::InProgress => "in_progress",
    InvestigationStatus::Completed => "completed",
  }
}

pub fn decode_status(s: &str) -> Result<InvestigationStatus> {
  match s {
    "open" => Ok(InvestigationStatus::Open),
    "in_progress" => Ok(InvestigationStatus::InProgress),
    "completed" => Ok(InvestigationStatus::Completed),
    other => Err(Error::Decode(format!("unknown status: {other:?}"))),
  }
}

pub fn encode_evidence_kind(k: EvidenceKind) -> &'static str {
  match k {
    EvidenceKind::Photo => "photo",
    EvidenceKind::Document => "document",
    EvidenceKind::Physical => "physical",
    EvidenceKind::Statement => "statement",
    EvidenceKind::Other => "other",
  }
}

pub fn decode_evidence_kind(s: &str) -> Result<EvidenceKind> {
  match s {
    "photo" => Ok(EvidenceKind::Photo),
    "document" => Ok(EvidenceKind::Document),
    "physical" => Ok(EvidenceKind::Physical),
    "statement" => Ok(EvidenceKind::Statement),
    "other" => Ok(EvidenceKind::Other),
    other => Err(Error::Decode(format!("unknown evidence kind: {other:?}"))),
  }
}

pub fn encode_factor_type(t: FactorType) -> &'static str {
  match t {
    FactorType::Direct => "direct",
    FactorType::Contributing => "contributing",
    FactorType::Root => "root",
  }
}

pub fn decode_factor_type(s: &str) -> Result<FactorType> {
  match s {
    "direct" => Ok(FactorType::Direct),
    "contributing" => Ok(FactorType::Contributing),
    "root" => Ok(FactorType::Root),
    other => Err(Error::Decode(format!("unknown factor type: {other:?}"))),
  }
}

pub fn encode_category(c: FishboneCategory) -> &'static str {
  match c {
    FishboneCategory::People => "people",
    FishboneCategory::Procedures => "procedures",
    FishboneCategory::Plant => "plant",
    FishboneCategory::Environment => "environment",
    FishboneCategory::Management => "management",
    FishboneCategory::External => "external",
  }
}

pub fn decode_category(s: &str) -> Result<FishboneCategory> {
  match s {
    "people" => Ok(FishboneCategory::People),
    "procedures" => Ok(FishboneCategory::Procedures),
    "plant" => Ok(FishboneCategory::Plant),
    "environment" => Ok(FishboneCategory::Environment),
    "management" => Ok(FishboneCategory::Management),
    "external" => Ok(FishboneCategory::External),
    other => Err(Error::Decode(format!("unknown category: {other:?}"))),
  }
}

pub fn encode_control_type(c: ControlType) -> &'static str {
  match c {
    ControlType::Elimination => "elimination",
    ControlType::Substitution => "substitution",
    ControlType::Engineering => "engineering",
    ControlType::Administrative => "administrative",
    ControlType::Ppe => "ppe",
  }
}

pub fn decode_control_type(s: &str) -> Result<ControlType> {
  match s {
    "elimination" => Ok(ControlType::Elimination),
    "substitution" => Ok(ControlType::Substitution),
    "engineering" => Ok(ControlType::Engineering),
    "administrative" => Ok(ControlType::Administrative),
    "ppe" => Ok(ControlType::Ppe),
    other => Err(Error::Decode(format!("unknown control type: {other:?}"))),
  }
}

pub fn encode_priority(p: Priority) -> &'static str {
  match p {
    Priority::Low => "low",
    Priority::Medium => "medium",
    Priority::High => "high",
    Priority::Critical => "critical",
  }
}

pub fn decode_priority(s: &str) -> Result<Priority> {
  match s {
    "low" => Ok(Priority::Low),
    "medium" => Ok(Priority::Medium),
    "high" => Ok(Priority::High),
    "critical" => Ok(Priority::Critical),
    other => Err(Error::Decode(format!("unknown priority: {other:?}"))),
  }
}

pub fn encode_barrier_kind(k: BarrierKind) -> &'static str {
  match k {
    BarrierKind::Physical => "physical",
    BarrierKind::Functional => "functional",
    BarrierKind::Symbolic => "symbolic",
    BarrierKind::Incorporeal => "incorporeal",
  }
}

pub fn decode_barrier_kind(s: &str) -> Result<BarrierKind> {
  match s {
    "physical" => Ok(BarrierKind::Physical),
    "functional" => Ok(BarrierKind::Functional),
    "symbolic" => Ok(BarrierKind::Symbolic),
    "incorporeal" => Ok(BarrierKind::Incorporeal),
    other => Err(Error::Decode(format!("unknown barrier kind: {other:?}"))),
  }
}

pub fn encode_barrier_status(s: BarrierStatus) -> &'static str {
  match s {
    BarrierStatus::Effective => "effective",
    BarrierStatus::Partial => "partial",
    BarrierStatus::Failed => "failed",
    BarrierStatus::Missing => "missing",
  }
}

pub fn decode_barrier_status(s: &str) -> Result<BarrierStatus> {
  match s {
    "effective" => Ok(BarrierStatus::Effective),
    "partial" => Ok(BarrierStatus::Partial),
    "failed" => Ok(BarrierStatus::Failed),
    "missing" => Ok(BarrierStatus::Missing),
    other => Err(Error::Decode(format!("unknown barrier status: {other:?}"))),
  }
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_id_list(ids: &[Uuid]) -> Result<String> {
  let strings: Vec<String> = ids.iter().copied().map(encode_uuid).collect();
  Ok(serde_json::to_string(&strings)?)
}

pub fn decode_id_list(s: &str) -> Result<Vec<Uuid>> {
  let strings: Vec<String> = serde_json::from_str(s)?;
  strings.iter().map(|s| decode_uuid(s)).collect()
}

pub fn encode_stored_file(f: &StoredFile) -> Result<String> {
  Ok(serde_json::to_string(f)?)
}

pub fn decode_stored_file(s: &str) -> Result<StoredFile> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_human_factors(m: &HumanFactorsMap) -> Result<String> {
  Ok(serde_json::to_string(m)?)
}

pub fn decode_human_factors(s: &str) -> Result<HumanFactorsMap> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_just_culture(jc: &JustCulture) -> Result<String> {
  Ok(serde_json::to_string(jc)?)
}

pub fn decode_just_culture(s: &str) -> Result<JustCulture> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_hop_fields(f: &HopFields) -> Result<String> {
  Ok(serde_json::to_string(f)?)
}

pub fn decode_hop_fields(s: &str) -> Result<HopFields> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────
//
// Raw strings read directly from table rows; converted to domain types
// outside the connection closure so decode errors surface as store errors.

pub struct RawInvestigation {
  pub investigation_id: String,
  pub number:           String,
  pub occurred_on:      String,
  pub occurred_time:    Option<String>,
  pub location:         String,
  pub severity:         String,
  pub description:      String,
  pub status:           String,
  pub created_at:       String,
}

impl RawInvestigation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      investigation_id: row.get(0)?,
      number:           row.get(1)?,
      occurred_on:      row.get(2)?,
      occurred_time:    row.get(3)?,
      location:         row.get(4)?,
      severity:         row.get(5)?,
      description:      row.get(6)?,
      status:           row.get(7)?,
      created_at:       row.get(8)?,
    })
  }

  pub fn into_investigation(self) -> Result<Investigation> {
    Ok(Investigation {
      investigation_id: decode_uuid(&self.investigation_id)?,
      number:           self.number,
      occurred_on:      decode_date(&self.occurred_on)?,
      occurred_time:    self
        .occurred_time
        .as_deref()
        .map(decode_time)
        .transpose()?,
      location:         self.location,
      severity:         decode_severity(&self.severity)?,
      description:      self.description,
      status:           decode_status(&self.status)?,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawEvidence {
  pub evidence_id:      String,
  pub investigation_id: String,
  pub kind:             String,
  pub title:            String,
  pub description:      String,
  pub file_json:        Option<String>,
  pub tags:             String,
  pub created_at:       String,
}

impl RawEvidence {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      evidence_id:      row.get(0)?,
      investigation_id: row.get(1)?,
      kind:             row.get(2)?,
      title:            row.get(3)?,
      description:      row.get(4)?,
      file_json:        row.get(5)?,
      tags:             row.get(6)?,
      created_at:       row.get(7)?,
    })
  }

  pub fn into_evidence(self) -> Result<Evidence> {
    Ok(Evidence {
      evidence_id:      decode_uuid(&self.evidence_id)?,
      investigation_id: decode_uuid(&self.investigation_id)?,
      kind:             decode_evidence_kind(&self.kind)?,
      title:            self.title,
      description:      self.description,
      file:             self
        .file_json
        .as_deref()
        .map(decode_stored_file)
        .transpose()?,
      tags:             decode_tags(&self.tags)?,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawInterview {
  pub interview_id:     String,
  pub investigation_id: String,
  pub interviewee:      String,
  pub role:             String,
  pub conducted_on:     String,
  pub findings:         String,
  pub created_at:       String,
}

impl RawInterview {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      interview_id:     row.get(0)?,
      investigation_id: row.get(1)?,
      interviewee:      row.get(2)?,
      role:             row.get(3)?,
      conducted_on:     row.get(4)?,
      findings:         row.get(5)?,
      created_at:       row.get(6)?,
    })
  }

  pub fn into_interview(self) -> Result<Interview> {
    Ok(Interview {
      interview_id:     decode_uuid(&self.interview_id)?,
      investigation_id: decode_uuid(&self.investigation_id)?,
      interviewee:      self.interviewee,
      role:             self.role,
      conducted_on:     decode_date(&self.conducted_on)?,
      findings:         self.findings,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawTimelineEvent {
  pub event_id:          String,
  pub investigation_id:  String,
  pub parent_event_id:   Option<String>,
  pub occurred_on:       String,
  pub occurred_time:     Option<String>,
  pub category:          String,
  pub title:             String,
  pub is_incident_event: bool,
  pub verified:          bool,
  pub created_at:        String,
}

impl RawTimelineEvent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id:          row.get(0)?,
      investigation_id:  row.get(1)?,
      parent_event_id:   row.get(2)?,
      occurred_on:       row.get(3)?,
      occurred_time:     row.get(4)?,
      category:          row.get(5)?,
      title:             row.get(6)?,
      is_incident_event: row.get(7)?,
      verified:          row.get(8)?,
      created_at:        row.get(9)?,
    })
  }

  pub fn into_event(self) -> Result<TimelineEvent> {
    Ok(TimelineEvent {
      event_id:          decode_uuid(&self.event_id)?,
      investigation_id:  decode_uuid(&self.investigation_id)?,
      parent_event_id:   self
        .parent_event_id
        .as_deref()
        .map(decode_uuid)
        .transpose()?,
      occurred_on:       decode_date(&self.occurred_on)?,
      occurred_time:     self
        .occurred_time
        .as_deref()
        .map(decode_time)
        .transpose()?,
      category:          self.category,
      title:             self.title,
      is_incident_event: self.is_incident_event,
      verified:          self.verified,
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawCausalFactor {
  pub causal_factor_id: String,
  pub investigation_id: String,
  pub title:            String,
  pub description:      String,
  pub factor_type:      String,
  pub category:         String,
  pub created_at:       String,
}

impl RawCausalFactor {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      causal_factor_id: row.get(0)?,
      investigation_id: row.get(1)?,
      title:            row.get(2)?,
      description:      row.get(3)?,
      factor_type:      row.get(4)?,
      category:         row.get(5)?,
      created_at:       row.get(6)?,
    })
  }

  pub fn into_factor(self) -> Result<CausalFactor> {
    Ok(CausalFactor {
      causal_factor_id: decode_uuid(&self.causal_factor_id)?,
      investigation_id: decode_uuid(&self.investigation_id)?,
      title:            self.title,
      description:      self.description,
      factor_type:      decode_factor_type(&self.factor_type)?,
      category:         decode_category(&self.category)?,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawHfat {
  pub assessment_id:    String,
  pub investigation_id: String,
  pub causal_factor_id: String,
  pub human_factors:    String,
  pub just_culture:     String,
  pub created_at:       String,
}

impl RawHfat {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      assessment_id:    row.get(0)?,
      investigation_id: row.get(1)?,
      causal_factor_id: row.get(2)?,
      human_factors:    row.get(3)?,
      just_culture:     row.get(4)?,
      created_at:       row.get(5)?,
    })
  }

  pub fn into_assessment(self) -> Result<HfatAssessment> {
    Ok(HfatAssessment {
      assessment_id:    decode_uuid(&self.assessment_id)?,
      investigation_id: decode_uuid(&self.investigation_id)?,
      causal_factor_id: decode_uuid(&self.causal_factor_id)?,
      human_factors:    decode_human_factors(&self.human_factors)?,
      just_culture:     decode_just_culture(&self.just_culture)?,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawHop {
  pub assessment_id:    String,
  pub investigation_id: String,
  pub causal_factor_id: String,
  pub fields_json:      String,
  pub created_at:       String,
}

impl RawHop {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      assessment_id:    row.get(0)?,
      investigation_id: row.get(1)?,
      causal_factor_id: row.get(2)?,
      fields_json:      row.get(3)?,
      created_at:       row.get(4)?,
    })
  }

  pub fn into_assessment(self) -> Result<HopAssessment> {
    Ok(HopAssessment {
      assessment_id:    decode_uuid(&self.assessment_id)?,
      investigation_id: decode_uuid(&self.investigation_id)?,
      causal_factor_id: decode_uuid(&self.causal_factor_id)?,
      fields:           decode_hop_fields(&self.fields_json)?,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawRecommendation {
  pub recommendation_id:     String,
  pub investigation_id:      String,
  pub title:                 String,
  pub description:           String,
  pub control_type:          String,
  pub priority:              String,
  pub linked_causal_factors: String,
  pub created_at:            String,
}

impl RawRecommendation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      recommendation_id:     row.get(0)?,
      investigation_id:      row.get(1)?,
      title:                 row.get(2)?,
      description:           row.get(3)?,
      control_type:          row.get(4)?,
      priority:              row.get(5)?,
      linked_causal_factors: row.get(6)?,
      created_at:            row.get(7)?,
    })
  }

  pub fn into_recommendation(self) -> Result<Recommendation> {
    Ok(Recommendation {
      recommendation_id:     decode_uuid(&self.recommendation_id)?,
      investigation_id:      decode_uuid(&self.investigation_id)?,
      title:                 self.title,
      description:           self.description,
      control_type:          decode_control_type(&self.control_type)?,
      priority:              decode_priority(&self.priority)?,
      linked_causal_factors: decode_id_list(&self.linked_causal_factors)?,
      created_at:            decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawBarrier {
  pub barrier_id:       String,
  pub investigation_id: String,
  pub name:             String,
  pub kind:             String,
  pub status:           String,
  pub performed:        bool,
  pub failure_reason:   Option<String>,
  pub created_at:       String,
}

impl RawBarrier {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      barrier_id:       row.get(0)?,
      investigation_id: row.get(1)?,
      name:             row.get(2)?,
      kind:             row.get(3)?,
      status:           row.get(4)?,
      performed:        row.get(5)?,
      failure_reason:   row.get(6)?,
      created_at:       row.get(7)?,
    })
  }

  pub fn into_barrier(self) -> Result<Barrier> {
    Ok(Barrier {
      barrier_id:       decode_uuid(&self.barrier_id)?,
      investigation_id: decode_uuid(&self.investigation_id)?,
      name:             self.name,
      kind:             decode_barrier_kind(&self.kind)?,
      status:           decode_barrier_status(&self.status)?,
      performed:        self.performed,
      failure_reason:   self.failure_reason,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}
