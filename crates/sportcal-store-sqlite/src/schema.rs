//! SQL schema for the calendar SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS sports (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS venues (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    city          TEXT NOT NULL,
    country_code  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teams (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT NOT NULL,
    city      TEXT NOT NULL,
    sport_id  INTEGER NOT NULL REFERENCES sports(id),
    UNIQUE (name, sport_id)
);

-- Only foreign keys are stored; reads join the referenced rows.
CREATE TABLE IF NOT EXISTS events (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    event_datetime  INTEGER NOT NULL,  -- microseconds since the Unix epoch, UTC
    description     TEXT,
    home_score      INTEGER,
    away_score      INTEGER,
    sport_id        INTEGER NOT NULL REFERENCES sports(id),
    venue_id        INTEGER REFERENCES venues(id),
    home_team_id    INTEGER NOT NULL REFERENCES teams(id),
    away_team_id    INTEGER NOT NULL REFERENCES teams(id),
    CHECK (home_team_id <> away_team_id)
);

CREATE INDEX IF NOT EXISTS events_datetime_idx ON events(event_datetime);
CREATE INDEX IF NOT EXISTS events_sport_idx    ON events(sport_id);
CREATE INDEX IF NOT EXISTS events_venue_idx    ON events(venue_id);

PRAGMA user_version = 1;
";
