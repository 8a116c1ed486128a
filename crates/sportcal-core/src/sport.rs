//! Sport: the discipline an event or team belongs to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
  pub id:   i64,
  pub name: String,
}

/// Input for creating a sport. Names are unique across sports.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSport {
  pub name: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSport {
  pub name: Option<String>,
}

impl UpdateSport {
  pub fn apply(self, sport: &mut Sport) {
    if let Some(name) = self.name {
      sport.name = name;
    }
  }
}
