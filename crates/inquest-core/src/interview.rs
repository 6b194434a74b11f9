//! Interview records — witness and personnel accounts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
  pub interview_id:     Uuid,
  pub investigation_id: Uuid,
  pub interviewee:      String,
  /// Role or job title of the interviewee at the time of the incident.
  pub role:             String,
  pub conducted_on:     NaiveDate,
  pub findings:         String,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::InvestigationStore::add_interview`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInterview {
  pub investigation_id: Uuid,
  pub interviewee:      String,
  #[serde(default)]
  pub role:             String,
  pub conducted_on:     NaiveDate,
  #[serde(default)]
  pub findings:         String,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewPatch {
  pub interviewee:  Option<String>,
  pub role:         Option<String>,
  pub conducted_on: Option<NaiveDate>,
  pub findings:     Option<String>,
}

impl InterviewPatch {
  pub fn apply(self, iv: &mut Interview) {
    if let Some(v) = self.interviewee {
      iv.interviewee = v;
    }
    if let Some(v) = self.role {
      iv.role = v;
    }
    if let Some(v) = self.conducted_on {
      iv.conducted_on = v;
    }
    if let Some(v) = self.findings {
      iv.findings = v;
    }
  }
}
