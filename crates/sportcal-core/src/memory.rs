//! [`MemoryStore`]: an in-process implementation of every store trait.
//!
//! It enforces the same uniqueness, foreign-key and check constraints as the
//! relational schema and counts calls per operation, so tests can assert
//! that a service did (or did not) reach the store.

use std::{
  collections::{BTreeMap, HashMap},
  sync::{Mutex, PoisonError},
};

use thiserror::Error;

use crate::{
  event::{Event, NewEvent},
  kind::RelatedKind,
  sport::{NewSport, Sport},
  store::{EventQuery, EventStore, SportStore, StoreBackend, TeamStore, VenueStore},
  team::{NewTeam, Team},
  venue::{NewVenue, Venue},
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("unique constraint violated: {0}")]
  Unique(&'static str),

  #[error("foreign key constraint violated: {0}")]
  ForeignKey(&'static str),

  #[error("check constraint violated: {0}")]
  Check(&'static str),
}

type Result<T, E = MemoryError> = std::result::Result<T, E>;

#[derive(Debug, Clone)]
struct EventRow {
  id:             i64,
  event_datetime: chrono::DateTime<chrono::Utc>,
  description:    Option<String>,
  home_score:     Option<i32>,
  away_score:     Option<i32>,
  sport_id:       i64,
  venue_id:       Option<i64>,
  home_team_id:   i64,
  away_team_id:   i64,
}

impl EventRow {
  fn references(&self, kind: RelatedKind, id: i64) -> bool {
    match kind {
      RelatedKind::Sport => self.sport_id == id,
      RelatedKind::Venue => self.venue_id == Some(id),
      RelatedKind::Team => self.home_team_id == id || self.away_team_id == id,
    }
  }

  fn matches(&self, query: &EventQuery) -> bool {
    query.sport_id.is_none_or(|id| self.sport_id == id)
      && query.date_from.is_none_or(|from| self.event_datetime >= from)
  }
}

#[derive(Debug, Default)]
struct State {
  next_id: i64,
  sports:  BTreeMap<i64, Sport>,
  venues:  BTreeMap<i64, Venue>,
  teams:   BTreeMap<i64, Team>,
  events:  BTreeMap<i64, EventRow>,
  calls:   HashMap<&'static str, usize>,
}

impl State {
  fn next_id(&mut self) -> i64 {
    self.next_id += 1;
    self.next_id
  }

  fn record(&mut self, op: &'static str) {
    *self.calls.entry(op).or_default() += 1;
  }

  fn check_sport_name(&self, name: &str, except: Option<i64>) -> Result<()> {
    let taken = self
      .sports
      .values()
      .any(|s| s.name == name && Some(s.id) != except);
    if taken {
      return Err(MemoryError::Unique("sports.name"));
    }
    Ok(())
  }

  fn check_team_key(&self, name: &str, sport_id: i64, except: Option<i64>) -> Result<()> {
    if !self.sports.contains_key(&sport_id) {
      return Err(MemoryError::ForeignKey("teams.sport_id"));
    }
    let taken = self
      .teams
      .values()
      .any(|t| t.name == name && t.sport_id == sport_id && Some(t.id) != except);
    if taken {
      return Err(MemoryError::Unique("teams.name, teams.sport_id"));
    }
    Ok(())
  }

  fn check_event_refs(&self, row: &EventRow) -> Result<()> {
    if !self.sports.contains_key(&row.sport_id) {
      return Err(MemoryError::ForeignKey("events.sport_id"));
    }
    if row.venue_id.is_some_and(|id| !self.venues.contains_key(&id)) {
      return Err(MemoryError::ForeignKey("events.venue_id"));
    }
    if !self.teams.contains_key(&row.home_team_id) {
      return Err(MemoryError::ForeignKey("events.home_team_id"));
    }
    if !self.teams.contains_key(&row.away_team_id) {
      return Err(MemoryError::ForeignKey("events.away_team_id"));
    }
    if row.home_team_id == row.away_team_id {
      return Err(MemoryError::Check("events.home_team_id <> events.away_team_id"));
    }
    Ok(())
  }

  fn in_use(&self, kind: RelatedKind, id: i64) -> bool {
    self.events.values().any(|e| e.references(kind, id))
  }

  /// Join the referenced rows into an aggregate, as the SQL read does.
  fn assemble(&self, row: &EventRow) -> Option<Event> {
    Some(Event {
      id:             row.id,
      event_datetime: row.event_datetime,
      description:    row.description.clone(),
      home_score:     row.home_score,
      away_score:     row.away_score,
      sport:          self.sports.get(&row.sport_id)?.clone(),
      venue:          row.venue_id.and_then(|id| self.venues.get(&id)).cloned(),
      home_team:      self.teams.get(&row.home_team_id)?.clone(),
      away_team:      self.teams.get(&row.away_team_id)?.clone(),
    })
  }

  fn matching_events(&self, query: &EventQuery) -> Vec<&EventRow> {
    let mut rows: Vec<&EventRow> =
      self.events.values().filter(|e| e.matches(query)).collect();
    rows.sort_by_key(|e| (e.event_datetime, e.id));
    rows
  }
}

/// An in-memory calendar store. Every operation runs under one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
  state: Mutex<State>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// How many times the named trait method (e.g. `"delete_sport"`) was
  /// invoked.
  pub fn calls(&self, op: &str) -> usize {
    self.with_state(|s| s.calls.get(op).copied().unwrap_or(0))
  }

  fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
    let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
  }

  fn call<R>(&self, op: &'static str, f: impl FnOnce(&mut State) -> R) -> R {
    self.with_state(|s| {
      s.record(op);
      f(s)
    })
  }
}

impl StoreBackend for MemoryStore {
  type Error = MemoryError;
}

// ─── Sports ──────────────────────────────────────────────────────────────────

impl SportStore for MemoryStore {
  async fn create_sport(&self, input: NewSport) -> Result<i64> {
    self.call("create_sport", |s| {
      s.check_sport_name(&input.name, None)?;
      let id = s.next_id();
      s.sports.insert(id, Sport { id, name: input.name });
      Ok(id)
    })
  }

  async fn get_sport(&self, id: i64) -> Result<Option<Sport>> {
    self.call("get_sport", |s| Ok(s.sports.get(&id).cloned()))
  }

  async fn list_sports(&self) -> Result<Vec<Sport>> {
    self.call("list_sports", |s| {
      let mut all: Vec<Sport> = s.sports.values().cloned().collect();
      all.sort_by(|a, b| a.name.cmp(&b.name));
      Ok(all)
    })
  }

  async fn update_sport(&self, sport: Sport) -> Result<bool> {
    self.call("update_sport", |s| {
      if !s.sports.contains_key(&sport.id) {
        return Ok(false);
      }
      s.check_sport_name(&sport.name, Some(sport.id))?;
      s.sports.insert(sport.id, sport);
      Ok(true)
    })
  }

  async fn delete_sport(&self, id: i64) -> Result<bool> {
    self.call("delete_sport", |s| {
      if s.in_use(RelatedKind::Sport, id) {
        return Err(MemoryError::ForeignKey("events.sport_id"));
      }
      if s.teams.values().any(|t| t.sport_id == id) {
        return Err(MemoryError::ForeignKey("teams.sport_id"));
      }
      Ok(s.sports.remove(&id).is_some())
    })
  }
}

// ─── Venues ──────────────────────────────────────────────────────────────────

impl VenueStore for MemoryStore {
  async fn create_venue(&self, input: NewVenue) -> Result<i64> {
    self.call("create_venue", |s| {
      let id = s.next_id();
      s.venues.insert(id, Venue {
        id,
        name: input.name,
        city: input.city,
        country_code: input.country_code,
      });
      Ok(id)
    })
  }

  async fn get_venue(&self, id: i64) -> Result<Option<Venue>> {
    self.call("get_venue", |s| Ok(s.venues.get(&id).cloned()))
  }

  async fn list_venues(&self) -> Result<Vec<Venue>> {
    self.call("list_venues", |s| {
      let mut all: Vec<Venue> = s.venues.values().cloned().collect();
      all.sort_by(|a, b| a.name.cmp(&b.name));
      Ok(all)
    })
  }

  async fn update_venue(&self, venue: Venue) -> Result<bool> {
    self.call("update_venue", |s| {
      Ok(s.venues.get_mut(&venue.id).map(|v| *v = venue).is_some())
    })
  }

  async fn delete_venue(&self, id: i64) -> Result<bool> {
    self.call("delete_venue", |s| {
      if s.in_use(RelatedKind::Venue, id) {
        return Err(MemoryError::ForeignKey("events.venue_id"));
      }
      Ok(s.venues.remove(&id).is_some())
    })
  }
}

// ─── Teams ───────────────────────────────────────────────────────────────────

impl TeamStore for MemoryStore {
  async fn create_team(&self, input: NewTeam) -> Result<i64> {
    self.call("create_team", |s| {
      s.check_team_key(&input.name, input.sport_id, None)?;
      let id = s.next_id();
      s.teams.insert(id, Team {
        id,
        name: input.name,
        city: input.city,
        sport_id: input.sport_id,
      });
      Ok(id)
    })
  }

  async fn get_team(&self, id: i64) -> Result<Option<Team>> {
    self.call("get_team", |s| Ok(s.teams.get(&id).cloned()))
  }

  async fn list_teams(&self) -> Result<Vec<Team>> {
    self.call("list_teams", |s| {
      let mut all: Vec<Team> = s.teams.values().cloned().collect();
      all.sort_by(|a, b| a.name.cmp(&b.name));
      Ok(all)
    })
  }

  async fn update_team(&self, team: Team) -> Result<bool> {
    self.call("update_team", |s| {
      if !s.teams.contains_key(&team.id) {
        return Ok(false);
      }
      s.check_team_key(&team.name, team.sport_id, Some(team.id))?;
      s.teams.insert(team.id, team);
      Ok(true)
    })
  }

  async fn delete_team(&self, id: i64) -> Result<bool> {
    self.call("delete_team", |s| {
      if s.events.values().any(|e| e.home_team_id == id) {
        return Err(MemoryError::ForeignKey("events.home_team_id"));
      }
      if s.events.values().any(|e| e.away_team_id == id) {
        return Err(MemoryError::ForeignKey("events.away_team_id"));
      }
      Ok(s.teams.remove(&id).is_some())
    })
  }
}

// ─── Events ──────────────────────────────────────────────────────────────────

impl EventStore for MemoryStore {
  async fn create_event(&self, input: NewEvent) -> Result<i64> {
    self.call("create_event", |s| {
      let mut row = EventRow {
        id:             0,
        event_datetime: input.event_datetime,
        description:    input.description,
        home_score:     None,
        away_score:     None,
        sport_id:       input.sport_id,
        venue_id:       input.venue_id,
        home_team_id:   input.home_team_id,
        away_team_id:   input.away_team_id,
      };
      s.check_event_refs(&row)?;
      row.id = s.next_id();
      s.events.insert(row.id, row.clone());
      Ok(row.id)
    })
  }

  async fn get_event(&self, id: i64) -> Result<Option<Event>> {
    self.call("get_event", |s| {
      Ok(s.events.get(&id).and_then(|row| s.assemble(row)))
    })
  }

  async fn list_events<'a>(&'a self, query: &'a EventQuery) -> Result<Vec<Event>> {
    self.call("list_events", |s| {
      let offset = usize::try_from(query.offset.unwrap_or(0)).unwrap_or(usize::MAX);
      let limit = query
        .limit
        .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
      Ok(
        s.matching_events(query)
          .into_iter()
          .skip(offset)
          .take(limit)
          .filter_map(|row| s.assemble(row))
          .collect(),
      )
    })
  }

  async fn count_events<'a>(&'a self, query: &'a EventQuery) -> Result<u64> {
    self.call("count_events", |s| Ok(s.matching_events(query).len() as u64))
  }

  async fn count_events_by_related(&self, kind: RelatedKind, id: i64) -> Result<u64> {
    self.call("count_events_by_related", |s| {
      Ok(s.events.values().filter(|e| e.references(kind, id)).count() as u64)
    })
  }

  async fn update_event(&self, event: Event) -> Result<bool> {
    self.call("update_event", |s| {
      if !s.events.contains_key(&event.id) {
        return Ok(false);
      }
      let row = EventRow {
        id:             event.id,
        event_datetime: event.event_datetime,
        description:    event.description,
        home_score:     event.home_score,
        away_score:     event.away_score,
        sport_id:       event.sport.id,
        venue_id:       event.venue.map(|v| v.id),
        home_team_id:   event.home_team.id,
        away_team_id:   event.away_team.id,
      };
      s.check_event_refs(&row)?;
      s.events.insert(row.id, row);
      Ok(true)
    })
  }

  async fn delete_event(&self, id: i64) -> Result<bool> {
    self.call("delete_event", |s| Ok(s.events.remove(&id).is_some()))
  }
}
