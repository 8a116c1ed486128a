//! Referential guard: refuse to delete a sport, venue or team while any
//! event still references it.
//!
//! The count and the subsequent delete are separate statements. An event
//! created in between is caught by the store's foreign-key constraint, which
//! fails the delete instead.

use crate::{Error, Result, kind::RelatedKind, store::EventStore};

/// Returns [`Error::Conflict`] carrying the usage count if `id` is
/// referenced by at least one event.
pub async fn guard_delete<E>(events: &E, kind: RelatedKind, id: i64) -> Result<()>
where
  E: EventStore,
{
  let count = events
    .count_events_by_related(kind, id)
    .await
    .map_err(|e| Error::store("failed to check event usage", e))?;

  if count > 0 {
    return Err(Error::Conflict { kind: kind.into(), count });
  }
  Ok(())
}
