//! SQL schema for the Inquest SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every child table carries a real foreign key on `investigation_id` —
/// the one referential-integrity check the original system left to the
/// backing store. `linked_causal_factors` on recommendations is a JSON id
/// list and deliberately unvalidated; report rendering falls back to the
/// raw id when a link no longer resolves.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS investigations (
    investigation_id TEXT PRIMARY KEY,
    number           TEXT NOT NULL,
    occurred_on      TEXT NOT NULL,   -- ISO 8601 date
    occurred_time    TEXT,            -- HH:MM:SS or NULL
    location         TEXT NOT NULL,
    severity         TEXT NOT NULL,   -- 'low'|'medium'|'high'|'high_potential'
    description      TEXT NOT NULL DEFAULT '',
    status           TEXT NOT NULL,   -- 'open'|'in_progress'|'completed'
    created_at       TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS evidence (
    evidence_id      TEXT PRIMARY KEY,
    investigation_id TEXT NOT NULL REFERENCES investigations(investigation_id),
    kind             TEXT NOT NULL,
    title            TEXT NOT NULL,
    description      TEXT NOT NULL DEFAULT '',
    file_json        TEXT,            -- JSON StoredFile or NULL
    tags             TEXT NOT NULL DEFAULT '[]',
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS interviews (
    interview_id     TEXT PRIMARY KEY,
    investigation_id TEXT NOT NULL REFERENCES investigations(investigation_id),
    interviewee      TEXT NOT NULL,
    role             TEXT NOT NULL DEFAULT '',
    conducted_on     TEXT NOT NULL,
    findings         TEXT NOT NULL DEFAULT '',
    created_at       TEXT NOT NULL
);

-- parent_event_id is a soft self-reference: the tree is assembled on read
-- and an unresolved parent simply leaves the child out of the tree.
CREATE TABLE IF NOT EXISTS timeline_events (
    event_id          TEXT PRIMARY KEY,
    investigation_id  TEXT NOT NULL REFERENCES investigations(investigation_id),
    parent_event_id   TEXT,
    occurred_on       TEXT NOT NULL,
    occurred_time     TEXT,
    category          TEXT NOT NULL DEFAULT '',
    title             TEXT NOT NULL,
    is_incident_event INTEGER NOT NULL DEFAULT 0,
    verified          INTEGER NOT NULL DEFAULT 0,
    created_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS causal_factors (
    causal_factor_id TEXT PRIMARY KEY,
    investigation_id TEXT NOT NULL REFERENCES investigations(investigation_id),
    title            TEXT NOT NULL,
    description      TEXT NOT NULL DEFAULT '',
    factor_type      TEXT NOT NULL,
    category         TEXT NOT NULL,
    created_at       TEXT NOT NULL
);

-- At most one assessment per factor by convention only; duplicates are
-- legal and readers take the oldest.
CREATE TABLE IF NOT EXISTS hfat_assessments (
    assessment_id    TEXT PRIMARY KEY,
    investigation_id TEXT NOT NULL REFERENCES investigations(investigation_id),
    causal_factor_id TEXT NOT NULL,
    human_factors    TEXT NOT NULL DEFAULT '{}',  -- JSON section->item->entry
    just_culture     TEXT NOT NULL DEFAULT '{}',  -- JSON
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS hop_assessments (
    assessment_id    TEXT PRIMARY KEY,
    investigation_id TEXT NOT NULL REFERENCES investigations(investigation_id),
    causal_factor_id TEXT NOT NULL,
    fields_json      TEXT NOT NULL DEFAULT '{}',
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS recommendations (
    recommendation_id     TEXT PRIMARY KEY,
    investigation_id      TEXT NOT NULL REFERENCES investigations(investigation_id),
    title                 TEXT NOT NULL,
    description           TEXT NOT NULL DEFAULT '',
    control_type          TEXT NOT NULL,
    priority              TEXT NOT NULL,
    priority_rank         INTEGER NOT NULL,       -- 0 = most urgent; list order
    linked_causal_factors TEXT NOT NULL DEFAULT '[]',
    created_at            TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS barriers (
    barrier_id       TEXT PRIMARY KEY,
    investigation_id TEXT NOT NULL REFERENCES investigations(investigation_id),
    name             TEXT NOT NULL,
    kind             TEXT NOT NULL,
    status           TEXT NOT NULL,
    performed        INTEGER NOT NULL DEFAULT 0,
    failure_reason   TEXT,
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS evidence_investigation_idx   ON evidence(investigation_id);
CREATE INDEX IF NOT EXISTS interviews_investigation_idx ON interviews(investigation_id);
CREATE INDEX IF NOT EXISTS timeline_investigation_idx   ON timeline_events(investigation_id);
CREATE INDEX IF NOT EXISTS factors_investigation_idx    ON causal_factors(investigation_id);
CREATE INDEX IF NOT EXISTS hfat_investigation_idx       ON hfat_assessments(investigation_id);
CREATE INDEX IF NOT EXISTS hfat_factor_idx              ON hfat_assessments(causal_factor_id);
CREATE INDEX IF NOT EXISTS hop_investigation_idx        ON hop_assessments(investigation_id);
CREATE INDEX IF NOT EXISTS hop_factor_idx               ON hop_assessments(causal_factor_id);
CREATE INDEX IF NOT EXISTS recs_investigation_idx       ON recommendations(investigation_id);
CREATE INDEX IF NOT EXISTS barriers_investigation_idx   ON barriers(investigation_id);

PRAGMA user_version = 1;
";
