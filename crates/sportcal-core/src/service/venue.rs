use std::sync::Arc;

use crate::{
  EntityKind, Error, RelatedKind, Result,
  guard::guard_delete,
  store::{EventStore, VenueStore},
  validate::Validate as _,
  venue::{NewVenue, UpdateVenue, Venue},
};

pub struct VenueService<B> {
  store: Arc<B>,
}

impl<B> VenueService<B>
where
  B: VenueStore + EventStore,
{
  pub fn new(store: Arc<B>) -> Self { Self { store } }

  pub async fn create(&self, input: NewVenue) -> Result<i64> {
    input.validate()?;
    self
      .store
      .create_venue(input)
      .await
      .map_err(|e| Error::store("failed to create venue", e))
  }

  pub async fn get(&self, id: i64) -> Result<Venue> {
    self
      .store
      .get_venue(id)
      .await
      .map_err(|e| Error::store("failed to fetch venue", e))?
      .ok_or(Error::NotFound { kind: EntityKind::Venue, id })
  }

  pub async fn list(&self) -> Result<Vec<Venue>> {
    self
      .store
      .list_venues()
      .await
      .map_err(|e| Error::store("failed to list venues", e))
  }

  pub async fn update(&self, id: i64, patch: UpdateVenue) -> Result<Venue> {
    patch.validate()?;
    let mut venue = self.get(id).await?;
    patch.apply(&mut venue);

    let updated = self
      .store
      .update_venue(venue.clone())
      .await
      .map_err(|e| Error::store("failed to update venue", e))?;
    if !updated {
      return Err(Error::NotFound { kind: EntityKind::Venue, id });
    }
    Ok(venue)
  }

  pub async fn delete(&self, id: i64) -> Result<()> {
    guard_delete(self.store.as_ref(), RelatedKind::Venue, id).await?;
    let deleted = self
      .store
      .delete_venue(id)
      .await
      .map_err(|e| Error::store("failed to delete venue", e))?;
    if !deleted {
      return Err(Error::NotFound { kind: EntityKind::Venue, id });
    }
    Ok(())
  }
}
