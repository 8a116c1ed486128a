//! Entity discriminants used in errors and referential checks.

use std::fmt;

/// Every persisted entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
  Sport,
  Venue,
  Team,
  Event,
}

impl EntityKind {
  pub fn as_str(self) -> &'static str {
    match self {
      EntityKind::Sport => "sport",
      EntityKind::Venue => "venue",
      EntityKind::Team => "team",
      EntityKind::Event => "event",
    }
  }
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The entity kinds an event can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelatedKind {
  Sport,
  Venue,
  /// Matches events where the team plays either at home or away.
  Team,
}

impl From<RelatedKind> for EntityKind {
  fn from(kind: RelatedKind) -> Self {
    match kind {
      RelatedKind::Sport => EntityKind::Sport,
      RelatedKind::Venue => EntityKind::Venue,
      RelatedKind::Team => EntityKind::Team,
    }
  }
}

impl fmt::Display for RelatedKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    EntityKind::from(*self).fmt(f)
  }
}
