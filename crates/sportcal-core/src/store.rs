//! Per-entity store capabilities and supporting query types.
//!
//! The traits are implemented by storage backends (e.g.
//! `sportcal-store-sqlite`, or [`MemoryStore`](crate::memory::MemoryStore) in
//! tests). Services depend on these abstractions, never on a concrete
//! backend. Stores perform no validation and no referential checks beyond the
//! constraints of the backing schema.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  event::{Event, NewEvent},
  kind::RelatedKind,
  sport::{NewSport, Sport},
  team::{NewTeam, Team},
  venue::{NewVenue, Venue},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Filter for [`EventStore::list_events`] and [`EventStore::count_events`].
///
/// Absent fields match everything. `limit`/`offset` only apply to listing.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
  pub sport_id:  Option<i64>,
  /// Inclusive lower bound on `event_datetime`.
  pub date_from: Option<DateTime<Utc>>,
  pub limit:     Option<u64>,
  pub offset:    Option<u64>,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Names the error type shared by every capability a backend implements.
pub trait StoreBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
}

pub trait SportStore: StoreBackend {
  /// Insert a sport and return its generated id. Fails on a duplicate name.
  fn create_sport(
    &self,
    input: NewSport,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn get_sport(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Sport>, Self::Error>> + Send + '_;

  /// All sports ordered by name.
  fn list_sports(
    &self,
  ) -> impl Future<Output = Result<Vec<Sport>, Self::Error>> + Send + '_;

  /// Overwrite the row with `sport.id`. Returns `false` if no row matched.
  fn update_sport(
    &self,
    sport: Sport,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Returns `false` if no row matched.
  fn delete_sport(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

pub trait VenueStore: StoreBackend {
  fn create_venue(
    &self,
    input: NewVenue,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn get_venue(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Venue>, Self::Error>> + Send + '_;

  /// All venues ordered by name.
  fn list_venues(
    &self,
  ) -> impl Future<Output = Result<Vec<Venue>, Self::Error>> + Send + '_;

  fn update_venue(
    &self,
    venue: Venue,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_venue(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

pub trait TeamStore: StoreBackend {
  /// Fails on a duplicate `(name, sport_id)` or a missing sport.
  fn create_team(
    &self,
    input: NewTeam,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn get_team(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Team>, Self::Error>> + Send + '_;

  /// All teams ordered by name.
  fn list_teams(
    &self,
  ) -> impl Future<Output = Result<Vec<Team>, Self::Error>> + Send + '_;

  fn update_team(
    &self,
    team: Team,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_team(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

pub trait EventStore: StoreBackend {
  /// Insert an event and return its generated id. Fails if any referenced
  /// row is missing or the home and away teams are the same.
  fn create_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Fetch an event with its sport, venue and teams joined in.
  fn get_event(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  /// Events matching `query`, ordered by `event_datetime` ascending.
  fn list_events<'a>(
    &'a self,
    query: &'a EventQuery,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + 'a;

  /// Number of events matching the filter part of `query`.
  fn count_events<'a>(
    &'a self,
    query: &'a EventQuery,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Number of events referencing the given sport, venue or team.
  fn count_events_by_related(
    &self,
    kind: RelatedKind,
    id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Persist every mutable field of `event`; the foreign keys are taken from
  /// the embedded snapshots. Returns `false` if no row matched.
  fn update_event(
    &self,
    event: Event,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_event(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

/// A backend providing every entity store.
pub trait CalendarStore: SportStore + VenueStore + TeamStore + EventStore {}

impl<T> CalendarStore for T where T: SportStore + VenueStore + TeamStore + EventStore {}
