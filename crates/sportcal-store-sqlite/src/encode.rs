//! Encoding and decoding helpers between domain types and SQLite rows.
//!
//! Timestamps are stored as integer microseconds since the Unix epoch, so
//! comparison and `ORDER BY` agree with chronological order for every year
//! chrono can represent.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use sportcal_core::{event::Event, sport::Sport, team::Team, venue::Venue};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Sub-microsecond precision is dropped.
pub fn encode_dt(dt: DateTime<Utc>) -> i64 { dt.timestamp_micros() }

pub fn decode_dt(micros: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_micros(micros)
    .ok_or_else(|| Error::DateParse(format!("{micros} µs is out of range")))
}

// ─── Plain rows ──────────────────────────────────────────────────────────────

pub fn sport_row(row: &Row<'_>) -> rusqlite::Result<Sport> {
  Ok(Sport { id: row.get(0)?, name: row.get(1)? })
}

pub fn venue_row(row: &Row<'_>) -> rusqlite::Result<Venue> {
  Ok(Venue {
    id:           row.get(0)?,
    name:         row.get(1)?,
    city:         row.get(2)?,
    country_code: row.get(3)?,
  })
}

pub fn team_row(row: &Row<'_>) -> rusqlite::Result<Team> {
  Ok(Team {
    id:       row.get(0)?,
    name:     row.get(1)?,
    city:     row.get(2)?,
    sport_id: row.get(3)?,
  })
}

// ─── Event rows ──────────────────────────────────────────────────────────────

/// Columns produced by `EVENT_SELECT`: an `events` row
/// joined with its sport, optional venue, and both teams.
pub struct RawEvent {
  pub id:                 i64,
  pub event_datetime:     i64,
  pub description:        Option<String>,
  pub home_score:         Option<i32>,
  pub away_score:         Option<i32>,
  pub sport:              Sport,
  // LEFT JOIN venues
  pub venue_id:           Option<i64>,
  pub venue_name:         Option<String>,
  pub venue_city:         Option<String>,
  pub venue_country_code: Option<String>,
  pub home_team:          Team,
  pub away_team:          Team,
}

impl RawEvent {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawEvent {
      id:                 row.get(0)?,
      event_datetime:     row.get(1)?,
      description:        row.get(2)?,
      home_score:         row.get(3)?,
      away_score:         row.get(4)?,
      sport:              Sport { id: row.get(5)?, name: row.get(6)? },
      venue_id:           row.get(7)?,
      venue_name:         row.get(8)?,
      venue_city:         row.get(9)?,
      venue_country_code: row.get(10)?,
      home_team:          Team {
        id:       row.get(11)?,
        name:     row.get(12)?,
        city:     row.get(13)?,
        sport_id: row.get(14)?,
      },
      away_team:          Team {
        id:       row.get(15)?,
        name:     row.get(16)?,
        city:     row.get(17)?,
        sport_id: row.get(18)?,
      },
    })
  }

  pub fn into_event(self) -> Result<Event> {
    let venue = match (
      self.venue_id,
      self.venue_name,
      self.venue_city,
      self.venue_country_code,
    ) {
      (Some(id), Some(name), Some(city), Some(country_code)) => {
        Some(Venue { id, name, city, country_code })
      }
      _ => None,
    };

    Ok(Event {
      id: self.id,
      event_datetime: decode_dt(self.event_datetime)?,
      description: self.description,
      home_score: self.home_score,
      away_score: self.away_score,
      sport: self.sport,
      venue,
      home_team: self.home_team,
      away_team: self.away_team,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn encoded_timestamps_sort_chronologically() {
    let a = Utc.with_ymd_and_hms(2030, 1, 9, 23, 59, 59).unwrap();
    let b = a + chrono::Duration::microseconds(1);
    let c = Utc.with_ymd_and_hms(2030, 1, 10, 0, 0, 0).unwrap();
    let d = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
    let (ea, eb, ec, ed) = (encode_dt(a), encode_dt(b), encode_dt(c), encode_dt(d));
    assert!(ea < eb && eb < ec && ec < ed);
    assert_eq!(decode_dt(eb).unwrap(), b);
    assert_eq!(decode_dt(ed).unwrap(), d);
  }

  #[test]
  fn offsets_are_normalised_to_utc() {
    let dt = DateTime::parse_from_rfc3339("2030-05-01T20:00:00+02:00").unwrap();
    let utc = Utc.with_ymd_and_hms(2030, 5, 1, 18, 0, 0).unwrap();
    assert_eq!(encode_dt(dt.with_timezone(&Utc)), encode_dt(utc));
  }

  #[test]
  fn nanoseconds_are_truncated() {
    let at = Utc.with_ymd_and_hms(2100, 3, 2, 3, 0, 0).unwrap();
    let stored = decode_dt(encode_dt(at + chrono::Duration::nanoseconds(1_500))).unwrap();
    assert_eq!(stored, at + chrono::Duration::microseconds(1));
  }
}
