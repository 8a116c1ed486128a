//! [`SqliteStore`]: the SQLite implementation of the entity stores.

use std::path::Path;

use rusqlite::OptionalExtension as _;
use sportcal_core::{
  event::{Event, NewEvent},
  kind::RelatedKind,
  sport::{NewSport, Sport},
  store::{EventQuery, EventStore, SportStore, StoreBackend, TeamStore, VenueStore},
  team::{NewTeam, Team},
  venue::{NewVenue, Venue},
};

use crate::{
  Result,
  encode::{RawEvent, encode_dt, sport_row, team_row, venue_row},
  schema::SCHEMA,
};

/// Event rows with every referenced row joined in. A missing venue yields
/// NULL venue columns.
const EVENT_SELECT: &str = "
SELECT
    e.id, e.event_datetime, e.description, e.home_score, e.away_score,
    s.id, s.name,
    v.id, v.name, v.city, v.country_code,
    ht.id, ht.name, ht.city, ht.sport_id,
    at.id, at.name, at.city, at.sport_id
FROM events e
JOIN      sports s  ON s.id  = e.sport_id
LEFT JOIN venues v  ON v.id  = e.venue_id
JOIN      teams  ht ON ht.id = e.home_team_id
JOIN      teams  at ON at.id = e.away_team_id";

/// Shared by listing and counting so both see the same rows. `?1` is the
/// sport id, `?2` the inclusive start time; NULL disables either.
const EVENT_FILTER: &str = "
WHERE (?1 IS NULL OR e.sport_id = ?1)
  AND (?2 IS NULL OR e.event_datetime >= ?2)";

fn to_count(n: i64) -> u64 { u64::try_from(n).unwrap_or(0) }

fn to_sql_int(n: Option<u64>, absent: i64) -> i64 {
  n.map_or(absent, |v| i64::try_from(v).unwrap_or(i64::MAX))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A calendar store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
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

  /// Open an in-memory store, for tests.
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

  /// Run a single-row `INSERT ... RETURNING id`.
  async fn insert_returning_id<P>(&self, sql: &'static str, params: P) -> Result<i64>
  where
    P: rusqlite::Params + Send + 'static,
  {
    let id = self
      .conn
      .call(move |conn| Ok(conn.query_row(sql, params, |row| row.get(0))?))
      .await?;
    Ok(id)
  }

  /// Run an `UPDATE`/`DELETE` and report whether any row was affected.
  async fn execute_affecting<P>(&self, sql: &'static str, params: P) -> Result<bool>
  where
    P: rusqlite::Params + Send + 'static,
  {
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, params)?))
      .await?;
    Ok(changed > 0)
  }
}

impl StoreBackend for SqliteStore {
  type Error = crate::Error;
}

// ─── Sports ──────────────────────────────────────────────────────────────────

impl SportStore for SqliteStore {
  async fn create_sport(&self, input: NewSport) -> Result<i64> {
    self
      .insert_returning_id(
        "INSERT INTO sports (name) VALUES (?1) RETURNING id",
        (input.name,),
      )
      .await
  }

  async fn get_sport(&self, id: i64) -> Result<Option<Sport>> {
    let sport = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row("SELECT id, name FROM sports WHERE id = ?1", [id], sport_row)
            .optional()?,
        )
      })
      .await?;
    Ok(sport)
  }

  async fn list_sports(&self) -> Result<Vec<Sport>> {
    let sports = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM sports ORDER BY name ASC")?;
        let rows = stmt
          .query_map([], sport_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(sports)
  }

  async fn update_sport(&self, sport: Sport) -> Result<bool> {
    self
      .execute_affecting("UPDATE sports SET name = ?1 WHERE id = ?2", (sport.name, sport.id))
      .await
  }

  async fn delete_sport(&self, id: i64) -> Result<bool> {
    self
      .execute_affecting("DELETE FROM sports WHERE id = ?1", (id,))
      .await
  }
}

// ─── Venues ──────────────────────────────────────────────────────────────────

impl VenueStore for SqliteStore {
  async fn create_venue(&self, input: NewVenue) -> Result<i64> {
    self
      .insert_returning_id(
        "INSERT INTO venues (name, city, country_code) VALUES (?1, ?2, ?3) RETURNING id",
        (input.name, input.city, input.country_code),
      )
      .await
  }

  async fn get_venue(&self, id: i64) -> Result<Option<Venue>> {
    let venue = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, city, country_code FROM venues WHERE id = ?1",
              [id],
              venue_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(venue)
  }

  async fn list_venues(&self) -> Result<Vec<Venue>> {
    let venues = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, city, country_code FROM venues ORDER BY name ASC",
        )?;
        let rows = stmt
          .query_map([], venue_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(venues)
  }

  async fn update_venue(&self, venue: Venue) -> Result<bool> {
    self
      .execute_affecting(
        "UPDATE venues SET name = ?1, city = ?2, country_code = ?3 WHERE id = ?4",
        (venue.name, venue.city, venue.country_code, venue.id),
      )
      .await
  }

  async fn delete_venue(&self, id: i64) -> Result<bool> {
    self
      .execute_affecting("DELETE FROM venues WHERE id = ?1", (id,))
      .await
  }
}

// ─── Teams ───────────────────────────────────────────────────────────────────

impl TeamStore for SqliteStore {
  async fn create_team(&self, input: NewTeam) -> Result<i64> {
    self
      .insert_returning_id(
        "INSERT INTO teams (name, city, sport_id) VALUES (?1, ?2, ?3) RETURNING id",
        (input.name, input.city, input.sport_id),
      )
      .await
  }

  async fn get_team(&self, id: i64) -> Result<Option<Team>> {
    let team = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, city, sport_id FROM teams WHERE id = ?1",
              [id],
              team_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(team)
  }

  async fn list_teams(&self) -> Result<Vec<Team>> {
    let teams = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, city, sport_id FROM teams ORDER BY name ASC")?;
        let rows = stmt
          .query_map([], team_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(teams)
  }

  async fn update_team(&self, team: Team) -> Result<bool> {
    self
      .execute_affecting(
        "UPDATE teams SET name = ?1, city = ?2, sport_id = ?3 WHERE id = ?4",
        (team.name, team.city, team.sport_id, team.id),
      )
      .await
  }

  async fn delete_team(&self, id: i64) -> Result<bool> {
    self
      .execute_affecting("DELETE FROM teams WHERE id = ?1", (id,))
      .await
  }
}

// ─── Events ──────────────────────────────────────────────────────────────────

impl EventStore for SqliteStore {
  async fn create_event(&self, input: NewEvent) -> Result<i64> {
    self
      .insert_returning_id(
        "INSERT INTO events (
           event_datetime, description, sport_id, venue_id, home_team_id, away_team_id
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         RETURNING id",
        (
          encode_dt(input.event_datetime),
          input.description,
          input.sport_id,
          input.venue_id,
          input.home_team_id,
          input.away_team_id,
        ),
      )
      .await
  }

  async fn get_event(&self, id: i64) -> Result<Option<Event>> {
    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        let sql = format!("{EVENT_SELECT} WHERE e.id = ?1");
        Ok(conn.query_row(&sql, [id], RawEvent::from_row).optional()?)
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn list_events<'a>(&'a self, query: &'a EventQuery) -> Result<Vec<Event>> {
    let sport_id  = query.sport_id;
    let date_from = query.date_from.map(encode_dt);
    // SQLite treats a negative LIMIT as "no limit".
    let limit     = to_sql_int(query.limit, -1);
    let offset    = to_sql_int(query.offset, 0);

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "{EVENT_SELECT} {EVENT_FILTER}
           ORDER BY e.event_datetime ASC, e.id ASC
           LIMIT ?3 OFFSET ?4"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![sport_id, date_from, limit, offset],
            RawEvent::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn count_events<'a>(&'a self, query: &'a EventQuery) -> Result<u64> {
    let sport_id  = query.sport_id;
    let date_from = query.date_from.map(encode_dt);

    let count: i64 = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT COUNT(*) FROM events e {EVENT_FILTER}");
        Ok(conn.query_row(&sql, rusqlite::params![sport_id, date_from], |row| {
          row.get(0)
        })?)
      })
      .await?;
    Ok(to_count(count))
  }

  async fn count_events_by_related(&self, kind: RelatedKind, id: i64) -> Result<u64> {
    let sql = match kind {
      RelatedKind::Sport => "SELECT COUNT(*) FROM events WHERE sport_id = ?1",
      RelatedKind::Venue => "SELECT COUNT(*) FROM events WHERE venue_id = ?1",
      RelatedKind::Team => {
        "SELECT COUNT(*) FROM events WHERE home_team_id = ?1 OR away_team_id = ?1"
      }
    };

    let count: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(sql, [id], |row| row.get(0))?))
      .await?;
    Ok(to_count(count))
  }

  async fn update_event(&self, event: Event) -> Result<bool> {
    self
      .execute_affecting(
        "UPDATE events SET
           event_datetime = ?1, description = ?2, home_score = ?3, away_score = ?4,
           sport_id = ?5, venue_id = ?6, home_team_id = ?7, away_team_id = ?8
         WHERE id = ?9",
        (
          encode_dt(event.event_datetime),
          event.description,
          event.home_score,
          event.away_score,
          event.sport.id,
          event.venue.map(|v| v.id),
          event.home_team.id,
          event.away_team.id,
          event.id,
        ),
      )
      .await
  }

  async fn delete_event(&self, id: i64) -> Result<bool> {
    self
      .execute_affecting("DELETE FROM events WHERE id = ?1", (id,))
      .await
  }
}
