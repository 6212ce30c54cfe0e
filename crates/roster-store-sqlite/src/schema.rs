//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS countries (
    country_id   TEXT PRIMARY KEY,
    country_name TEXT NOT NULL UNIQUE
);

-- country_id is not a foreign key; dangling ids are allowed.
CREATE TABLE IF NOT EXISTS persons (
    person_id            TEXT PRIMARY KEY,
    person_name          TEXT NOT NULL,
    email                TEXT NOT NULL,
    date_of_birth        TEXT,            -- YYYY-MM-DD
    gender               TEXT,
    country_id           TEXT,
    address              TEXT,
    receive_news_letters INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS persons_country_idx ON persons(country_id);

PRAGMA user_version = 1;
";
