//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS employees (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name    TEXT    NOT NULL,
    last_name     TEXT    NOT NULL,
    email         TEXT    NOT NULL UNIQUE,
    department_id INTEGER NOT NULL,  -- opaque; no departments table
    position      TEXT,
    salary        TEXT,              -- plain decimal string, never REAL
    hire_date     TEXT,              -- YYYY-MM-DD
    created_at    TEXT    NOT NULL,  -- RFC 3339 UTC, nanosecond precision
    updated_at    TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS employees_department_idx ON employees(department_id);

PRAGMA user_version = 1;
";
