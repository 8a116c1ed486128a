//! Field-level validation applied by the services before any store access.
//!
//! Lengths are counted in characters, not bytes.

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  sport::{NewSport, UpdateSport},
  team::{NewTeam, UpdateTeam},
  venue::{NewVenue, UpdateVenue},
};

pub const MIN_TEXT_LEN: usize = 3;
pub const COUNTRY_CODE_LEN: usize = 2;

/// Input that can be checked on its own, without consulting a store.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

fn min_len(label: &str, value: &str) -> Result<()> {
  if value.chars().count() < MIN_TEXT_LEN {
    return Err(Error::validation(format!(
      "{label} must be at least {MIN_TEXT_LEN} characters long"
    )));
  }
  Ok(())
}

fn country_code(value: &str) -> Result<()> {
  if value.chars().count() != COUNTRY_CODE_LEN {
    return Err(Error::validation(format!(
      "venue country_code must be exactly {COUNTRY_CODE_LEN} characters long"
    )));
  }
  Ok(())
}

fn each<'a>(
  value: Option<&'a str>,
  check: impl FnOnce(&'a str) -> Result<()>,
) -> Result<()> {
  value.map_or(Ok(()), check)
}

impl Validate for NewSport {
  fn validate(&self) -> Result<()> { min_len("sport name", &self.name) }
}

impl Validate for UpdateSport {
  fn validate(&self) -> Result<()> {
    each(self.name.as_deref(), |n| min_len("sport name", n))
  }
}

impl Validate for NewVenue {
  fn validate(&self) -> Result<()> {
    min_len("venue name", &self.name)?;
    min_len("venue city name", &self.city)?;
    country_code(&self.country_code)
  }
}

impl Validate for UpdateVenue {
  fn validate(&self) -> Result<()> {
    each(self.name.as_deref(), |n| min_len("venue name", n))?;
    each(self.city.as_deref(), |c| min_len("venue city name", c))?;
    each(self.country_code.as_deref(), country_code)
  }
}

impl Validate for NewTeam {
  fn validate(&self) -> Result<()> {
    min_len("team name", &self.name)?;
    min_len("team city name", &self.city)
  }
}

impl Validate for UpdateTeam {
  fn validate(&self) -> Result<()> {
    each(self.name.as_deref(), |n| min_len("team name", n))?;
    each(self.city.as_deref(), |c| min_len("team city name", c))
  }
}

/// An event may be scheduled for `now` or later, never earlier.
pub fn event_not_in_past(at: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
  if at < now {
    return Err(Error::validation("cannot create an event in the past"));
  }
  Ok(())
}

pub fn distinct_teams(home_team_id: i64, away_team_id: i64) -> Result<()> {
  if home_team_id == away_team_id {
    return Err(Error::validation(
      "home team and away team must be different",
    ));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone as _};

  use super::*;
  use crate::ErrorKind;

  fn venue(name: &str, city: &str, code: &str) -> NewVenue {
    NewVenue { name: name.into(), city: city.into(), country_code: code.into() }
  }

  #[test]
  fn three_characters_is_the_minimum() {
    assert!(NewSport { name: "Ski".into() }.validate().is_ok());
    assert!(NewSport { name: "Basketball".into() }.validate().is_ok());

    let err = NewSport { name: "Go".into() }.validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "sport name must be at least 3 characters long");

    assert!(NewSport { name: String::new() }.validate().is_err());
  }

  #[test]
  fn length_counts_characters() {
    assert!(NewSport { name: "Łód".into() }.validate().is_ok());
    // Two characters, four bytes.
    assert!(NewSport { name: "éé".into() }.validate().is_err());
  }

  #[test]
  fn venue_fields() {
    assert!(venue("Staples Center", "Los Angeles", "US").validate().is_ok());
    assert!(venue("SC", "Los Angeles", "US").validate().is_err());
    assert!(venue("Staples Center", "LA", "US").validate().is_err());
  }

  #[test]
  fn country_code_must_be_two_characters() {
    for code in ["", "U", "USA", "12", "  "] {
      let res = venue("Staples Center", "Los Angeles", code).validate();
      assert_eq!(res.is_ok(), code.chars().count() == 2, "code {code:?}");
    }
  }

  #[test]
  fn team_fields() {
    let ok = NewTeam { name: "Lakers".into(), city: "Los Angeles".into(), sport_id: 1 };
    assert!(ok.validate().is_ok());
    let short = NewTeam { name: "LA".into(), ..ok.clone() };
    assert!(short.validate().is_err());
    let short_city = NewTeam { city: "LA".into(), ..ok };
    assert!(short_city.validate().is_err());
  }

  #[test]
  fn partial_updates_only_check_present_fields() {
    assert!(UpdateVenue::default().validate().is_ok());
    let patch = UpdateVenue { country_code: Some("GBR".into()), ..Default::default() };
    assert!(patch.validate().is_err());
    let patch = UpdateTeam { city: Some("NY".into()), ..Default::default() };
    assert!(patch.validate().is_err());
    let patch = UpdateSport { name: Some("Rugby".into()) };
    assert!(patch.validate().is_ok());
  }

  #[test]
  fn event_time_boundary() {
    let now = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
    assert!(event_not_in_past(now, now).is_ok());
    assert!(event_not_in_past(now + Duration::seconds(1), now).is_ok());

    let err = event_not_in_past(now - Duration::milliseconds(1), now).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
  }

  #[test]
  fn teams_must_differ() {
    assert!(distinct_teams(1, 2).is_ok());
    assert!(distinct_teams(3, 3).is_err());
  }
}
