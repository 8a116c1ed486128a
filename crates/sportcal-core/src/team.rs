//! Team: a side that plays home or away in events of one sport.

use serde::{Deserialize, Serialize};

/// A `(name, sport_id)` pair is unique across teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
  pub id:       i64,
  pub name:     String,
  pub city:     String,
  pub sport_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
  pub name:     String,
  pub city:     String,
  pub sport_id: i64,
}

/// Partial update. A present `sport_id` is resolved against the sport store
/// before anything is written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeam {
  pub name:     Option<String>,
  pub city:     Option<String>,
  pub sport_id: Option<i64>,
}
