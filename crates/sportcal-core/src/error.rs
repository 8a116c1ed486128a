//! Error types for `sportcal-core`.

use thiserror::Error;

use crate::kind::EntityKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} with id {id} not found")]
  NotFound { kind: EntityKind, id: i64 },

  #[error("{0}")]
  Validation(String),

  /// A delete was refused because events still reference the entity.
  #[error("cannot delete {kind}: it is currently used by {count} events")]
  Conflict { kind: EntityKind, count: u64 },

  #[error("{context}: {source}")]
  Store {
    context: String,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

/// Machine-readable class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Validation,
  Conflict,
  Store,
}

impl Error {
  /// Wrap a backend error with the operation that produced it.
  pub fn store<E>(context: impl Into<String>, source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store { context: context.into(), source: Box::new(source) }
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Error::Validation(message.into())
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::NotFound { .. } => ErrorKind::NotFound,
      Error::Validation(_) => ErrorKind::Validation,
      Error::Conflict { .. } => ErrorKind::Conflict,
      Error::Store { .. } => ErrorKind::Store,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
