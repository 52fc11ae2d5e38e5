//! SQL schema for the Sieve SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS curation_records (
    id                             TEXT PRIMARY KEY,
    assertion_subject_id           TEXT NOT NULL,
    assertion_subject_label        TEXT,
    assertion_predicate            TEXT NOT NULL,
    assertion_predicate_label      TEXT,
    assertion_object_id            TEXT NOT NULL,
    assertion_object_label         TEXT,
    provenance_present             INTEGER NOT NULL DEFAULT 0,
    provenance_attributed_to       TEXT,
    provenance_attributed_to_label TEXT,
    provenance_generated_at        TEXT,   -- ISO 8601 date
    provenance_source_version      TEXT,
    provenance_source_uri          TEXT,
    evidence_items                 TEXT NOT NULL DEFAULT '[]',  -- JSON array
    source_artifact_uri            TEXT,
    source_artifact_type           TEXT,
    status                         TEXT NOT NULL DEFAULT 'PENDING',
    created_at                     TEXT NOT NULL,   -- RFC 3339 UTC, fixed width
    updated_at                     TEXT NOT NULL
);

-- Decisions are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS curation_decisions (
    id           TEXT PRIMARY KEY,
    record_id    TEXT NOT NULL REFERENCES curation_records(id),
    curator_id   TEXT NOT NULL,
    curator_name TEXT,
    decision     TEXT NOT NULL,   -- 'ACCEPT' | 'REJECT' | 'DEFER'
    rationale    TEXT,
    decided_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS records_status_idx    ON curation_records(status);
CREATE INDEX IF NOT EXISTS records_created_idx   ON curation_records(created_at);
CREATE INDEX IF NOT EXISTS decisions_record_idx  ON curation_decisions(record_id, decided_at);

PRAGMA user_version = 1;
";
