use std::sync::Arc;

use crate::{
  EntityKind, Error, RelatedKind, Result,
  guard::guard_delete,
  sport::{NewSport, Sport, UpdateSport},
  store::{EventStore, SportStore},
  validate::Validate as _,
};

pub struct SportService<B> {
  store: Arc<B>,
}

impl<B> SportService<B>
where
  B: SportStore + EventStore,
{
  pub fn new(store: Arc<B>) -> Self { Self { store } }

  pub async fn create(&self, input: NewSport) -> Result<i64> {
    input.validate()?;
    self
      .store
      .create_sport(input)
      .await
      .map_err(|e| Error::store("failed to create sport", e))
  }

  pub async fn get(&self, id: i64) -> Result<Sport> {
    self
      .store
      .get_sport(id)
      .await
      .map_err(|e| Error::store("failed to fetch sport", e))?
      .ok_or(Error::NotFound { kind: EntityKind::Sport, id })
  }

  pub async fn list(&self) -> Result<Vec<Sport>> {
    self
      .store
      .list_sports()
      .await
      .map_err(|e| Error::store("failed to list sports", e))
  }

  pub async fn update(&self, id: i64, patch: UpdateSport) -> Result<Sport> {
    patch.validate()?;
    let mut sport = self.get(id).await?;
    patch.apply(&mut sport);

    let updated = self
      .store
      .update_sport(sport.clone())
      .await
      .map_err(|e| Error::store("failed to update sport", e))?;
    if !updated {
      return Err(Error::NotFound { kind: EntityKind::Sport, id });
    }
    Ok(sport)
  }

  pub async fn delete(&self, id: i64) -> Result<()> {
    guard_delete(self.store.as_ref(), RelatedKind::Sport, id).await?;
    let deleted = self
      .store
      .delete_sport(id)
      .await
      .map_err(|e| Error::store("failed to delete sport", e))?;
    if !deleted {
      return Err(Error::NotFound { kind: EntityKind::Sport, id });
    }
    Ok(())
  }
}
