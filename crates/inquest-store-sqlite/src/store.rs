//! [`SqliteStore`] — the SQLite implementation of [`InvestigationStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use inquest_core::{
  assessment::{
    HfatAssessment, HopAssessment, NewHfatAssessment, NewHopAssessment,
  },
  barrier::{Barrier, BarrierPatch, NewBarrier},
  causal::{CausalFactor, CausalFactorPatch, NewCausalFactor},
  evidence::{Evidence, EvidencePatch, NewEvidence, StoredFile},
  interview::{Interview, InterviewPatch, NewInterview},
  investigation::{
    Investigation, InvestigationPatch, InvestigationStatus, NewInvestigation,
  },
  recommendation::{NewRecommendation, Recommendation, RecommendationPatch},
  store::InvestigationStore,
  timeline::{NewTimelineEvent, TimelineEvent},
};

use crate::{
  Error, Result,
  encode::{
    RawBarrier, RawCausalFactor, RawEvidence, RawHfat, RawHop, RawInterview,
    RawInvestigation, RawRecommendation, RawTimelineEvent, encode_barrier_kind,
    encode_barrier_status, encode_category, encode_control_type, encode_date,
    encode_dt, encode_evidence_kind, encode_factor_type, encode_hop_fields,
    encode_human_factors, encode_id_list, encode_just_culture, encode_priority,
    encode_severity, encode_status, encode_stored_file, encode_tags,
    encode_time, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Inquest record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── By-id lookups (internal; updates are read-modify-write) ──────────────

  async fn evidence_by_id(&self, id: Uuid) -> Result<Option<Evidence>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawEvidence> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT evidence_id, investigation_id, kind, title, description,
                      file_json, tags, created_at
               FROM evidence WHERE evidence_id = ?1",
              rusqlite::params![id_str],
              RawEvidence::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawEvidence::into_evidence).transpose()
  }

  async fn interview_by_id(&self, id: Uuid) -> Result<Option<Interview>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawInterview> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT interview_id, investigation_id, interviewee, role,
                      conducted_on, findings, created_at
               FROM interviews WHERE interview_id = ?1",
              rusqlite::params![id_str],
              RawInterview::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawInterview::into_interview).transpose()
  }

  async fn event_by_id(&self, id: Uuid) -> Result<Option<TimelineEvent>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawTimelineEvent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT event_id, investigation_id, parent_event_id, occurred_on,
                      occurred_time, category, title, is_incident_event,
                      verified, created_at
               FROM timeline_events WHERE event_id = ?1",
              rusqlite::params![id_str],
              RawTimelineEvent::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawTimelineEvent::into_event).transpose()
  }

  async fn factor_by_id(&self, id: Uuid) -> Result<Option<CausalFactor>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawCausalFactor> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT causal_factor_id, investigation_id, title, description,
                      factor_type, category, created_at
               FROM causal_factors WHERE causal_factor_id = ?1",
              rusqlite::params![id_str],
              RawCausalFactor::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawCausalFactor::into_factor).transpose()
  }

  async fn recommendation_by_id(&self, id: Uuid) -> Result<Option<Recommendation>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawRecommendation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT recommendation_id, investigation_id, title, description,
                      control_type, priority, linked_causal_factors, created_at
               FROM recommendations WHERE recommendation_id = ?1",
              rusqlite::params![id_str],
              RawRecommendation::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawRecommendation::into_recommendation).transpose()
  }

  async fn barrier_by_id(&self, id: Uuid) -> Result<Option<Barrier>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawBarrier> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT barrier_id, investigation_id, name, kind, status,
                      performed, failure_reason, created_at
               FROM barriers WHERE barrier_id = ?1",
              rusqlite::params![id_str],
              RawBarrier::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawBarrier::into_barrier).transpose()
  }

  // ── Full-row writes (used by both inserts and patch updates) ─────────────

  async fn write_evidence(&self, ev: &Evidence, insert: bool) -> Result<()> {
    let id_str = encode_uuid(ev.evidence_id);
    let inv_str = encode_uuid(ev.investigation_id);
    let kind = encode_evidence_kind(ev.kind).to_owned();
    let title = ev.title.clone();
    let description = ev.description.clone();
    let file_json = ev.file.as_ref().map(encode_stored_file).transpose()?;
    let tags = encode_tags(&ev.tags)?;
    let created_at = encode_dt(ev.created_at);

    self
      .conn
      .call(move |conn| {
        let sql = if insert {
          "INSERT INTO evidence (
             evidence_id, investigation_id, kind, title, description,
             file_json, tags, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        } else {
          "UPDATE evidence SET
             investigation_id = ?2, kind = ?3, title = ?4, description = ?5,
             file_json = ?6, tags = ?7, created_at = ?8
           WHERE evidence_id = ?1"
        };
        conn.execute(
          sql,
          rusqlite::params![
            id_str, inv_str, kind, title, description, file_json, tags,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_interview(&self, iv: &Interview, insert: bool) -> Result<()> {
    let id_str = encode_uuid(iv.interview_id);
    let inv_str = encode_uuid(iv.investigation_id);
    let interviewee = iv.interviewee.clone();
    let role = iv.role.clone();
    let conducted_on = encode_date(iv.conducted_on);
    let findings = iv.findings.clone();
    let created_at = encode_dt(iv.created_at);

    self
      .conn
      .call(move |conn| {
        let sql = if insert {
          "INSERT INTO interviews (
             interview_id, investigation_id, interviewee, role, conducted_on,
             findings, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        } else {
          "UPDATE interviews SET
             investigation_id = ?2, interviewee = ?3, role = ?4,
             conducted_on = ?5, findings = ?6, created_at = ?7
           WHERE interview_id = ?1"
        };
        conn.execute(
          sql,
          rusqlite::params![
            id_str, inv_str, interviewee, role, conducted_on, findings,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_factor(&self, cf: &CausalFactor, insert: bool) -> Result<()> {
    let id_str = encode_uuid(cf.causal_factor_id);
    let inv_str = encode_uuid(cf.investigation_id);
    let title = cf.title.clone();
    let description = cf.description.clone();
    let factor_type = encode_factor_type(cf.factor_type).to_owned();
    let category = encode_category(cf.category).to_owned();
    let created_at = encode_dt(cf.created_at);

    self
      .conn
      .call(move |conn| {
        let sql = if insert {
          "INSERT INTO causal_factors (
             causal_factor_id, investigation_id, title, description,
             factor_type, category, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        } else {
          "UPDATE causal_factors SET
             investigation_id = ?2, title = ?3, description = ?4,
             factor_type = ?5, category = ?6, created_at = ?7
           WHERE causal_factor_id = ?1"
        };
        conn.execute(
          sql,
          rusqlite::params![
            id_str, inv_str, title, description, factor_type, category,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_recommendation(
    &self,
    rec: &Recommendation,
    insert: bool,
  ) -> Result<()> {
    let id_str = encode_uuid(rec.recommendation_id);
    let inv_str = encode_uuid(rec.investigation_id);
    let title = rec.title.clone();
    let description = rec.description.clone();
    let control_type = encode_control_type(rec.control_type).to_owned();
    let priority = encode_priority(rec.priority).to_owned();
    let priority_rank = rec.priority.rank() as i64;
    let linked = encode_id_list(&rec.linked_causal_factors)?;
    let created_at = encode_dt(rec.created_at);

    self
      .conn
      .call(move |conn| {
        let sql = if insert {
          "INSERT INTO recommendations (
             recommendation_id, investigation_id, title, description,
             control_type, priority, priority_rank, linked_causal_factors,
             created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        } else {
          "UPDATE recommendations SET
             investigation_id = ?2, title = ?3, description = ?4,
             control_type = ?5, priority = ?6, priority_rank = ?7,
             linked_causal_factors = ?8, created_at = ?9
           WHERE recommendation_id = ?1"
        };
        conn.execute(
          sql,
          rusqlite::params![
            id_str, inv_str, title, description, control_type, priority,
            priority_rank, linked, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_barrier(&self, b: &Barrier, insert: bool) -> Result<()> {
    let id_str = encode_uuid(b.barrier_id);
    let inv_str = encode_uuid(b.investigation_id);
    let name = b.name.clone();
    let kind = encode_barrier_kind(b.kind).to_owned();
    let status = encode_barrier_status(b.status).to_owned();
    let performed = b.performed;
    let failure_reason = b.failure_reason.clone();
    let created_at = encode_dt(b.created_at);

    self
      .conn
      .call(move |conn| {
        let sql = if insert {
          "INSERT INTO barriers (
             barrier_id, investigation_id, name, kind, status, performed,
             failure_reason, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        } else {
          "UPDATE barriers SET
             investigation_id = ?2, name = ?3, kind = ?4, status = ?5,
             performed = ?6, failure_reason = ?7, created_at = ?8
           WHERE barrier_id = ?1"
        };
        conn.execute(
          sql,
          rusqlite::params![
            id_str, inv_str, name, kind, status, performed, failure_reason,
            created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a DELETE and map "no rows" to the given error.
  async fn delete_row(
    &self,
    sql: &'static str,
    id: Uuid,
    not_found: fn(Uuid) -> Error,
  ) -> Result<()> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id_str])?))
      .await?;
    if affected == 0 {
      return Err(not_found(id));
    }
    Ok(())
  }
}

// ─── InvestigationStore impl ─────────────────────────────────────────────────

impl InvestigationStore for SqliteStore {
  type Error = Error;

  // ── Investigations ────────────────────────────────────────────────────────

  async fn create_investigation(
    &self,
    input: NewInvestigation,
  ) -> Result<Investigation> {
    let inv = Investigation {
      investigation_id: Uuid::new_v4(),
      number:           input.number,
      occurred_on:      input.occurred_on,
      occurred_time:    input.occurred_time,
      location:         input.location,
      severity:         input.severity,
      description:      input.description,
      status:           InvestigationStatus::Open,
      created_at:       Utc::now(),
    };

    self.write_investigation(&inv, true).await?;
    Ok(inv)
  }

  async fn get_investigation(&self, id: Uuid) -> Result<Option<Investigation>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawInvestigation> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT investigation_id, number, occurred_on, occurred_time,
                      location, severity, description, status, created_at
               FROM investigations WHERE investigation_id = ?1",
              rusqlite::params![id_str],
              RawInvestigation::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawInvestigation::into_investigation).transpose()
  }

  async fn list_investigations(&self) -> Result<Vec<Investigation>> {
    let raws: Vec<RawInvestigation> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT investigation_id, number, occurred_on, occurred_time,
                  location, severity, description, status, created_at
           FROM investigations
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map([], RawInvestigation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws
      .into_iter()
      .map(RawInvestigation::into_investigation)
      .collect()
  }

  async fn update_investigation(
    &self,
    id: Uuid,
    patch: InvestigationPatch,
  ) -> Result<Investigation> {
    let mut inv = self
      .get_investigation(id)
      .await?
      .ok_or(Error::InvestigationNotFound(id))?;
    patch.apply(&mut inv);
    self.write_investigation(&inv, false).await?;
    Ok(inv)
  }

  async fn delete_investigation(&self, id: Uuid) -> Result<()> {
    self
      .delete_row(
        "DELETE FROM investigations WHERE investigation_id = ?1",
        id,
        Error::InvestigationNotFound,
      )
      .await
  }

  // ── Evidence ──────────────────────────────────────────────────────────────

  async fn add_evidence(&self, input: NewEvidence) -> Result<Evidence> {
    let ev = Evidence {
      evidence_id:      Uuid::new_v4(),
      investigation_id: input.investigation_id,
      kind:             input.kind,
      title:            input.title,
      description:      input.description,
      file:             None,
      tags:             input.tags,
      created_at:       Utc::now(),
    };
    self.write_evidence(&ev, true).await?;
    Ok(ev)
  }

  async fn evidence_for(&self, investigation_id: Uuid) -> Result<Vec<Evidence>> {
    let inv_str = encode_uuid(investigation_id);
    let raws: Vec<RawEvidence> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT evidence_id, investigation_id, kind, title, description,
                  file_json, tags, created_at
           FROM evidence
           WHERE investigation_id = ?1
           ORDER BY created_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![inv_str], RawEvidence::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawEvidence::into_evidence).collect()
  }

  async fn update_evidence(&self, id: Uuid, patch: EvidencePatch) -> Result<Evidence> {
    let mut ev = self
      .evidence_by_id(id)
      .await?
      .ok_or(Error::EvidenceNotFound(id))?;
    patch.apply(&mut ev);
    self.write_evidence(&ev, false).await?;
    Ok(ev)
  }

  async fn attach_evidence_file(&self, id: Uuid, file: StoredFile) -> Result<Evidence> {
    let mut ev = self
      .evidence_by_id(id)
      .await?
      .ok_or(Error::EvidenceNotFound(id))?;
    ev.file = Some(file);
    self.write_evidence(&ev, false).await?;
    Ok(ev)
  }

  async fn delete_evidence(&self, id: Uuid) -> Result<()> {
    self
      .delete_row(
        "DELETE FROM evidence WHERE evidence_id = ?1",
        id,
        Error::EvidenceNotFound,
      )
      .await
  }

  // ── Interviews ────────────────────────────────────────────────────────────

  async fn add_interview(&self, input: NewInterview) -> Result<Interview> {
    let iv = Interview {
      interview_id:     Uuid::new_v4(),
      investigation_id: input.investigation_id,
      interviewee:      input.interviewee,
      role:             input.role,
      conducted_on:     input.conducted_on,
      findings:         input.findings,
      created_at:       Utc::now(),
    };
    self.write_interview(&iv, true).await?;
    Ok(iv)
  }

  async fn interviews_for(&self, investigation_id: Uuid) -> Result<Vec<Interview>> {
    let inv_str = encode_uuid(investigation_id);
    let raws: Vec<RawInterview> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT interview_id, investigation_id, interviewee, role,
                  conducted_on, findings, created_at
           FROM interviews
           WHERE investigation_id = ?1
           ORDER BY conducted_on, created_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![inv_str], RawInterview::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawInterview::into_interview).collect()
  }

  async fn update_interview(&self, id: Uuid, patch: InterviewPatch) -> Result<Interview> {
    let mut iv = self
      .interview_by_id(id)
      .await?
      .ok_or(Error::InterviewNotFound(id))?;
    patch.apply(&mut iv);
    self.write_interview(&iv, false).await?;
    Ok(iv)
  }

  async fn delete_interview(&self, id: Uuid) -> Result<()> {
    self
      .delete_row(
        "DELETE FROM interviews WHERE interview_id = ?1",
        id,
        Error::InterviewNotFound,
      )
      .await
  }

  // ── Timeline events ───────────────────────────────────────────────────────

  async fn add_timeline_event(&self, input: NewTimelineEvent) -> Result<TimelineEvent> {
    let event = TimelineEvent {
      event_id:          Uuid::new_v4(),
      investigation_id:  input.investigation_id,
      parent_event_id:   input.parent_event_id,
      occurred_on:       input.occurred_on,
      occurred_time:     input.occurred_time,
      category:          input.category,
      title:             input.title,
      is_incident_event: input.is_incident_event,
      verified:          false,
      created_at:        Utc::now(),
    };

    let id_str = encode_uuid(event.event_id);
    let inv_str = encode_uuid(event.investigation_id);
    let parent_str = event.parent_event_id.map(encode_uuid);
    let occurred_on = encode_date(event.occurred_on);
    let occurred_time = event.occurred_time.map(encode_time);
    let category = event.category.clone();
    let title = event.title.clone();
    let is_incident = event.is_incident_event;
    let created_at = encode_dt(event.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO timeline_events (
             event_id, investigation_id, parent_event_id, occurred_on,
             occurred_time, category, title, is_incident_event, verified,
             created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9)",
          rusqlite::params![
            id_str, inv_str, parent_str, occurred_on, occurred_time, category,
            title, is_incident, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(event)
  }

  async fn timeline_for(&self, investigation_id: Uuid) -> Result<Vec<TimelineEvent>> {
    let inv_str = encode_uuid(investigation_id);
    let raws: Vec<RawTimelineEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT event_id, investigation_id, parent_event_id, occurred_on,
                  occurred_time, category, title, is_incident_event, verified,
                  created_at
           FROM timeline_events
           WHERE investigation_id = ?1
           ORDER BY occurred_on, occurred_time, created_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![inv_str], RawTimelineEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawTimelineEvent::into_event).collect()
  }

  async fn set_event_verified(&self, id: Uuid, verified: bool) -> Result<TimelineEvent> {
    let id_str = encode_uuid(id);
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE timeline_events SET verified = ?2 WHERE event_id = ?1",
          rusqlite::params![id_str, verified],
        )?)
      })
      .await?;
    if affected == 0 {
      return Err(Error::TimelineEventNotFound(id));
    }
    self
      .event_by_id(id)
      .await?
      .ok_or(Error::TimelineEventNotFound(id))
  }

  async fn delete_timeline_event(&self, id: Uuid) -> Result<()> {
    self
      .delete_row(
        "DELETE FROM timeline_events WHERE event_id = ?1",
        id,
        Error::TimelineEventNotFound,
      )
      .await
  }

  // ── Causal factors ────────────────────────────────────────────────────────

  async fn add_causal_factor(&self, input: NewCausalFactor) -> Result<CausalFactor> {
    let cf = CausalFactor {
      causal_factor_id: Uuid::new_v4(),
      investigation_id: input.investigation_id,
      title:            input.title,
      description:      input.description,
      factor_type:      input.factor_type,
      category:         input.category,
      created_at:       Utc::now(),
    };
    self.write_factor(&cf, true).await?;
    Ok(cf)
  }

  async fn causal_factors_for(&self, investigation_id: Uuid) -> Result<Vec<CausalFactor>> {
    let inv_str = encode_uuid(investigation_id);
    let raws: Vec<RawCausalFactor> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT causal_factor_id, investigation_id, title, description,
                  factor_type, category, created_at
           FROM causal_factors
           WHERE investigation_id = ?1
           ORDER BY created_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![inv_str], RawCausalFactor::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawCausalFactor::into_factor).collect()
  }

  async fn update_causal_factor(
    &self,
    id: Uuid,
    patch: CausalFactorPatch,
  ) -> Result<CausalFactor> {
    let mut cf = self
      .factor_by_id(id)
      .await?
      .ok_or(Error::CausalFactorNotFound(id))?;
    patch.apply(&mut cf);
    self.write_factor(&cf, false).await?;
    Ok(cf)
  }

  async fn delete_causal_factor(&self, id: Uuid) -> Result<()> {
    self
      .delete_row(
        "DELETE FROM causal_factors WHERE causal_factor_id = ?1",
        id,
        Error::CausalFactorNotFound,
      )
      .await
  }

  // ── Assessments ───────────────────────────────────────────────────────────

  async fn put_hfat_assessment(&self, input: NewHfatAssessment) -> Result<HfatAssessment> {
    let factor_str = encode_uuid(input.causal_factor_id);
    let existing: Option<RawHfat> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT assessment_id, investigation_id, causal_factor_id,
                      human_factors, just_culture, created_at
               FROM hfat_assessments
               WHERE causal_factor_id = ?1
               ORDER BY created_at, rowid
               LIMIT 1",
              rusqlite::params![factor_str],
              RawHfat::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    let human_factors_str = encode_human_factors(&input.human_factors)?;
    let just_culture_str = encode_just_culture(&input.just_culture)?;

    match existing {
      Some(raw) => {
        let mut assessment = raw.into_assessment()?;
        assessment.human_factors = input.human_factors;
        assessment.just_culture = input.just_culture;

        let id_str = encode_uuid(assessment.assessment_id);
        self
          .conn
          .call(move |conn| {
            conn.execute(
              "UPDATE hfat_assessments
               SET human_factors = ?2, just_culture = ?3
               WHERE assessment_id = ?1",
              rusqlite::params![id_str, human_factors_str, just_culture_str],
            )?;
            Ok(())
          })
          .await?;
        Ok(assessment)
      }
      None => {
        let assessment = HfatAssessment {
          assessment_id:    Uuid::new_v4(),
          investigation_id: input.investigation_id,
          causal_factor_id: input.causal_factor_id,
          human_factors:    input.human_factors,
          just_culture:     input.just_culture,
          created_at:       Utc::now(),
        };

        let id_str = encode_uuid(assessment.assessment_id);
        let inv_str = encode_uuid(assessment.investigation_id);
        let factor_str = encode_uuid(assessment.causal_factor_id);
        let created_at = encode_dt(assessment.created_at);
        self
          .conn
          .call(move |conn| {
            conn.execute(
              "INSERT INTO hfat_assessments (
                 assessment_id, investigation_id, causal_factor_id,
                 human_factors, just_culture, created_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
              rusqlite::params![
                id_str, inv_str, factor_str, human_factors_str,
                just_culture_str, created_at,
              ],
            )?;
            Ok(())
          })
          .await?;
        Ok(assessment)
      }
    }
  }

  async fn hfat_for_factor(&self, causal_factor_id: Uuid) -> Result<Option<HfatAssessment>> {
    let factor_str = encode_uuid(causal_factor_id);
    let raw: Option<RawHfat> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT assessment_id, investigation_id, causal_factor_id,
                      human_factors, just_culture, created_at
               FROM hfat_assessments
               WHERE causal_factor_id = ?1
               ORDER BY created_at, rowid
               LIMIT 1",
              rusqlite::params![factor_str],
              RawHfat::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawHfat::into_assessment).transpose()
  }

  async fn hfat_for_investigation(&self, investigation_id: Uuid) -> Result<Vec<HfatAssessment>> {
    let inv_str = encode_uuid(investigation_id);
    let raws: Vec<RawHfat> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT assessment_id, investigation_id, causal_factor_id,
                  human_factors, just_culture, created_at
           FROM hfat_assessments
           WHERE investigation_id = ?1
           ORDER BY created_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![inv_str], RawHfat::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawHfat::into_assessment).collect()
  }

  async fn put_hop_assessment(&self, input: NewHopAssessment) -> Result<HopAssessment> {
    let factor_str = encode_uuid(input.causal_factor_id);
    let existing: Option<RawHop> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT assessment_id, investigation_id, causal_factor_id,
                      fields_json, created_at
               FROM hop_assessments
               WHERE causal_factor_id = ?1
               ORDER BY created_at, rowid
               LIMIT 1",
              rusqlite::params![factor_str],
              RawHop::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    let fields_str = encode_hop_fields(&input.fields)?;

    match existing {
      Some(raw) => {
        let mut assessment = raw.into_assessment()?;
        assessment.fields = input.fields;

        let id_str = encode_uuid(assessment.assessment_id);
        self
          .conn
          .call(move |conn| {
            conn.execute(
              "UPDATE hop_assessments SET fields_json = ?2 WHERE assessment_id = ?1",
              rusqlite::params![id_str, fields_str],
            )?;
            Ok(())
          })
          .await?;
        Ok(assessment)
      }
      None => {
        let assessment = HopAssessment {
          assessment_id:    Uuid::new_v4(),
          investigation_id: input.investigation_id,
          causal_factor_id: input.causal_factor_id,
          fields:           input.fields,
          created_at:       Utc::now(),
        };

        let id_str = encode_uuid(assessment.assessment_id);
        let inv_str = encode_uuid(assessment.investigation_id);
        let factor_str = encode_uuid(assessment.causal_factor_id);
        let created_at = encode_dt(assessment.created_at);
        self
          .conn
          .call(move |conn| {
            conn.execute(
              "INSERT INTO hop_assessments (
                 assessment_id, investigation_id, causal_factor_id,
                 fields_json, created_at
               ) VALUES (?1, ?2, ?3, ?4, ?5)",
              rusqlite::params![id_str, inv_str, factor_str, fields_str, created_at],
            )?;
            Ok(())
          })
          .await?;
        Ok(assessment)
      }
    }
  }

  async fn hop_for_factor(&self, causal_factor_id: Uuid) -> Result<Option<HopAssessment>> {
    let factor_str = encode_uuid(causal_factor_id);
    let raw: Option<RawHop> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT assessment_id, investigation_id, causal_factor_id,
                      fields_json, created_at
               FROM hop_assessments
               WHERE causal_factor_id = ?1
               ORDER BY created_at, rowid
               LIMIT 1",
              rusqlite::params![factor_str],
              RawHop::from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawHop::into_assessment).transpose()
  }

  async fn hop_for_investigation(&self, investigation_id: Uuid) -> Result<Vec<HopAssessment>> {
    let inv_str = encode_uuid(investigation_id);
    let raws: Vec<RawHop> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT assessment_id, investigation_id, causal_factor_id,
                  fields_json, created_at
           FROM hop_assessments
           WHERE investigation_id = ?1
           ORDER BY created_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![inv_str], RawHop::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawHop::into_assessment).collect()
  }

  // ── Recommendations ───────────────────────────────────────────────────────

  async fn add_recommendation(&self, input: NewRecommendation) -> Result<Recommendation> {
    let rec = Recommendation {
      recommendation_id:     Uuid::new_v4(),
      investigation_id:      input.investigation_id,
      title:                 input.title,
      description:           input.description,
      control_type:          input.control_type,
      priority:              input.priority,
      linked_causal_factors: input.linked_causal_factors,
      created_at:            Utc::now(),
    };
    self.write_recommendation(&rec, true).await?;
    Ok(rec)
  }

  async fn recommendations_for(&self, investigation_id: Uuid) -> Result<Vec<Recommendation>> {
    let inv_str = encode_uuid(investigation_id);
    let raws: Vec<RawRecommendation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT recommendation_id, investigation_id, title, description,
                  control_type, priority, linked_causal_factors, created_at
           FROM recommendations
           WHERE investigation_id = ?1
           ORDER BY priority_rank, created_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![inv_str], RawRecommendation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws
      .into_iter()
      .map(RawRecommendation::into_recommendation)
      .collect()
  }

  async fn update_recommendation(
    &self,
    id: Uuid,
    patch: RecommendationPatch,
  ) -> Result<Recommendation> {
    let mut rec = self
      .recommendation_by_id(id)
      .await?
      .ok_or(Error::RecommendationNotFound(id))?;
    patch.apply(&mut rec);
    self.write_recommendation(&rec, false).await?;
    Ok(rec)
  }

  async fn delete_recommendation(&self, id: Uuid) -> Result<()> {
    self
      .delete_row(
        "DELETE FROM recommendations WHERE recommendation_id = ?1",
        id,
        Error::RecommendationNotFound,
      )
      .await
  }

  // ── Barriers ──────────────────────────────────────────────────────────────

  async fn add_barrier(&self, input: NewBarrier) -> Result<Barrier> {
    let barrier = Barrier {
      barrier_id:       Uuid::new_v4(),
      investigation_id: input.investigation_id,
      name:             input.name,
      kind:             input.kind,
      status:           input.status,
      performed:        input.performed,
      failure_reason:   input.failure_reason,
      created_at:       Utc::now(),
    };
    self.write_barrier(&barrier, true).await?;
    Ok(barrier)
  }

  async fn barriers_for(&self, investigation_id: Uuid) -> Result<Vec<Barrier>> {
    let inv_str = encode_uuid(investigation_id);
    let raws: Vec<RawBarrier> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT barrier_id, investigation_id, name, kind, status, performed,
                  failure_reason, created_at
           FROM barriers
           WHERE investigation_id = ?1
           ORDER BY created_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![inv_str], RawBarrier::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawBarrier::into_barrier).collect()
  }

  async fn update_barrier(&self, id: Uuid, patch: BarrierPatch) -> Result<Barrier> {
    let mut barrier = self
      .barrier_by_id(id)
      .await?
      .ok_or(Error::BarrierNotFound(id))?;
    patch.apply(&mut barrier);
    self.write_barrier(&barrier, false).await?;
    Ok(barrier)
  }

  async fn delete_barrier(&self, id: Uuid) -> Result<()> {
    self
      .delete_row(
        "DELETE FROM barriers WHERE barrier_id = ?1",
        id,
        Error::BarrierNotFound,
      )
      .await
  }
}

// ─── Investigation row writes ────────────────────────────────────────────────

impl SqliteStore {
  async fn write_investigation(&self, inv: &Investigation, insert: bool) -> Result<()> {
    let id_str = encode_uuid(inv.investigation_id);
    let number = inv.number.clone();
    let occurred_on = encode_date(inv.occurred_on);
    let occurred_time = inv.occurred_time.map(encode_time);
    let location = inv.location.clone();
    let severity = encode_severity(inv.severity).to_owned();
    let description = inv.description.clone();
    let status = encode_status(inv.status).to_owned();
    let created_at = encode_dt(inv.created_at);

    self
      .conn
      .call(move |conn| {
        let sql = if insert {
          "INSERT INTO investigations (
             investigation_id, number, occurred_on, occurred_time, location,
             severity, description, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        } else {
          "UPDATE investigations SET
             number = ?2, occurred_on = ?3, occurred_time = ?4, location = ?5,
             severity = ?6, description = ?7, status = ?8, created_at = ?9
           WHERE investigation_id = ?1"
        };
        conn.execute(
          sql,
          rusqlite::params![
            id_str, number, occurred_on, occurred_time, location, severity,
            description, status, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
