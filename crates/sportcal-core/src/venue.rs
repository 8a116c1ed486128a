//! Venue: where an event takes place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
  pub id:           i64,
  pub name:         String,
  pub city:         String,
  /// Two-letter country code, e.g. `"US"`.
  pub country_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVenue {
  pub name:         String,
  pub city:         String,
  pub country_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVenue {
  pub name:         Option<String>,
  pub city:         Option<String>,
  pub country_code: Option<String>,
}

impl UpdateVenue {
  pub fn apply(self, venue: &mut Venue) {
    if let Some(name) = self.name {
      venue.name = name;
    }
    if let Some(city) = self.city {
      venue.city = city;
    }
    if let Some(code) = self.country_code {
      venue.country_code = code;
    }
  }
}
