//! Event: the calendar entry, and the aggregate returned on reads.
//!
//! The persisted row holds only foreign keys. On read the store joins the
//! referenced rows and embeds copies of them, so an [`Event`] carries
//! snapshots of its sport, venue and teams as they were at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{pagination::Pagination, sport::Sport, team::Team, venue::Venue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id:             i64,
  pub event_datetime: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub home_score:     Option<i32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub away_score:     Option<i32>,
  pub sport:          Sport,
  /// `None` when the event has no venue.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub venue:          Option<Venue>,
  pub home_team:      Team,
  pub away_team:      Team,
}

/// Creation record. References are raw ids; a dangling id surfaces only as a
/// foreign-key failure from the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
  pub event_datetime: DateTime<Utc>,
  pub description:    Option<String>,
  pub sport_id:       i64,
  pub venue_id:       Option<i64>,
  pub home_team_id:   i64,
  pub away_team_id:   i64,
}

/// Partial update. `None` means "leave as is"; every present field
/// overwrites the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
  pub event_datetime: Option<DateTime<Utc>>,
  pub description:    Option<String>,
  pub home_score:     Option<i32>,
  pub away_score:     Option<i32>,
  pub sport_id:       Option<i64>,
  pub venue_id:       Option<i64>,
  pub home_team_id:   Option<i64>,
  pub away_team_id:   Option<i64>,
}

/// Listing request. Non-positive or absent `page`/`limit` fall back to the
/// configured defaults.
#[derive(Debug, Clone, Default)]
pub struct ListEvents {
  pub sport_id:  Option<i64>,
  pub date_from: Option<DateTime<Utc>>,
  pub page:      Option<i64>,
  pub limit:     Option<i64>,
}

/// One page of events plus the metadata needed to fetch the others.
#[derive(Debug, Clone, Serialize)]
pub struct EventPage {
  pub events:     Vec<Event>,
  pub pagination: Pagination,
}
