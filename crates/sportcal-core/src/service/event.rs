//! Event assembly: creation with raw references, partial updates that
//! resolve references into snapshots, and paginated listing.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound as _, Utc};

use crate::{
  EntityKind, Error, Result,
  event::{Event, EventPage, ListEvents, NewEvent, UpdateEvent},
  pagination::{PageWindow, Pagination, PaginationDefaults},
  sport::Sport,
  store::{EventQuery, EventStore, SportStore, TeamStore, VenueStore},
  team::Team,
  validate,
  venue::Venue,
};

pub struct EventService<B> {
  store:    Arc<B>,
  defaults: PaginationDefaults,
}

impl<B> EventService<B>
where
  B: EventStore + SportStore + VenueStore + TeamStore,
{
  pub fn new(store: Arc<B>, defaults: PaginationDefaults) -> Self {
    Self { store, defaults }
  }

  /// Validate and insert. References are not checked up front; a missing
  /// sport, venue or team fails at the store.
  pub async fn create(&self, mut input: NewEvent) -> Result<i64> {
    input.event_datetime = stored_precision(input.event_datetime);
    validate::event_not_in_past(input.event_datetime, Utc::now())?;
    validate::distinct_teams(input.home_team_id, input.away_team_id)?;
    self
      .store
      .create_event(input)
      .await
      .map_err(|e| Error::store("failed to create event", e))
  }

  pub async fn get(&self, id: i64) -> Result<Event> {
    self
      .store
      .get_event(id)
      .await
      .map_err(|e| Error::store("failed to fetch event", e))?
      .ok_or(Error::NotFound { kind: EntityKind::Event, id })
  }

  /// One page of events. When nothing matches the listing query is skipped.
  pub async fn list(&self, request: ListEvents) -> Result<EventPage> {
    let window = PageWindow::resolve(request.page, request.limit, self.defaults);
    let query = EventQuery {
      sport_id:  request.sport_id,
      date_from: request.date_from,
      limit:     Some(window.limit),
      offset:    Some(window.offset),
    };

    let total = self
      .store
      .count_events(&query)
      .await
      .map_err(|e| Error::store("failed to count events", e))?;
    let pagination = Pagination::new(total, window);
    if total == 0 {
      return Ok(EventPage { events: Vec::new(), pagination });
    }

    let events = self
      .store
      .list_events(&query)
      .await
      .map_err(|e| Error::store("failed to list events", e))?;
    Ok(EventPage { events, pagination })
  }

  /// Merge `patch` onto the stored event and persist it in one write.
  ///
  /// Every present reference is resolved first; a dangling one fails the
  /// whole update before anything is written.
  pub async fn update(&self, id: i64, patch: UpdateEvent) -> Result<Event> {
    let mut event = self.get(id).await?;

    if let Some(at) = patch.event_datetime {
      event.event_datetime = stored_precision(at);
    }
    if let Some(description) = patch.description {
      event.description = Some(description);
    }
    if let Some(score) = patch.home_score {
      event.home_score = Some(score);
    }
    if let Some(score) = patch.away_score {
      event.away_score = Some(score);
    }
    if let Some(sport_id) = patch.sport_id {
      event.sport = self.resolve_sport(sport_id).await?;
    }
    if let Some(venue_id) = patch.venue_id {
      event.venue = Some(self.resolve_venue(venue_id).await?);
    }
    if let Some(team_id) = patch.home_team_id {
      event.home_team = self.resolve_team(team_id).await?;
    }
    if let Some(team_id) = patch.away_team_id {
      event.away_team = self.resolve_team(team_id).await?;
    }
    validate::distinct_teams(event.home_team.id, event.away_team.id)?;

    let updated = self
      .store
      .update_event(event.clone())
      .await
      .map_err(|e| Error::store("failed to update event", e))?;
    if !updated {
      return Err(Error::NotFound { kind: EntityKind::Event, id });
    }
    Ok(event)
  }

  /// Nothing references an event, so no guard applies.
  pub async fn delete(&self, id: i64) -> Result<()> {
    self.get(id).await?;
    let deleted = self
      .store
      .delete_event(id)
      .await
      .map_err(|e| Error::store("failed to delete event", e))?;
    if !deleted {
      return Err(Error::NotFound { kind: EntityKind::Event, id });
    }
    Ok(())
  }

  async fn resolve_sport(&self, id: i64) -> Result<Sport> {
    self
      .store
      .get_sport(id)
      .await
      .map_err(|e| Error::store("failed to fetch sport", e))?
      .ok_or_else(|| Error::validation(format!("sport with id {id} not found")))
  }

  async fn resolve_venue(&self, id: i64) -> Result<Venue> {
    self
      .store
      .get_venue(id)
      .await
      .map_err(|e| Error::store("failed to fetch venue", e))?
      .ok_or_else(|| Error::validation(format!("venue with id {id} not found")))
  }

  async fn resolve_team(&self, id: i64) -> Result<Team> {
    self
      .store
      .get_team(id)
      .await
      .map_err(|e| Error::store("failed to fetch team", e))?
      .ok_or_else(|| Error::validation(format!("team with id {id} not found")))
  }
}

/// Timestamps are kept to the microsecond, so what a write returns matches
/// what a later read sees.
fn stored_precision(at: DateTime<Utc>) -> DateTime<Utc> { at.trunc_subsecs(6) }
