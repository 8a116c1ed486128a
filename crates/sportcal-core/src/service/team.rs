use std::sync::Arc;

use crate::{
  EntityKind, Error, RelatedKind, Result,
  guard::guard_delete,
  store::{EventStore, SportStore, TeamStore},
  team::{NewTeam, Team, UpdateTeam},
  validate::Validate as _,
};

pub struct TeamService<B> {
  store: Arc<B>,
}

impl<B> TeamService<B>
where
  B: TeamStore + SportStore + EventStore,
{
  pub fn new(store: Arc<B>) -> Self { Self { store } }

  pub async fn create(&self, input: NewTeam) -> Result<i64> {
    input.validate()?;
    self
      .store
      .create_team(input)
      .await
      .map_err(|e| Error::store("failed to create team", e))
  }

  pub async fn get(&self, id: i64) -> Result<Team> {
    self
      .store
      .get_team(id)
      .await
      .map_err(|e| Error::store("failed to fetch team", e))?
      .ok_or(Error::NotFound { kind: EntityKind::Team, id })
  }

  pub async fn list(&self) -> Result<Vec<Team>> {
    self
      .store
      .list_teams()
      .await
      .map_err(|e| Error::store("failed to list teams", e))
  }

  pub async fn update(&self, id: i64, patch: UpdateTeam) -> Result<Team> {
    patch.validate()?;
    let mut team = self.get(id).await?;

    if let Some(sport_id) = patch.sport_id {
      let sport = self
        .store
        .get_sport(sport_id)
        .await
        .map_err(|e| Error::store("failed to fetch sport", e))?;
      if sport.is_none() {
        return Err(Error::validation(format!("sport with id {sport_id} not found")));
      }
      team.sport_id = sport_id;
    }
    if let Some(name) = patch.name {
      team.name = name;
    }
    if let Some(city) = patch.city {
      team.city = city;
    }

    let updated = self
      .store
      .update_team(team.clone())
      .await
      .map_err(|e| Error::store("failed to update team", e))?;
    if !updated {
      return Err(Error::NotFound { kind: EntityKind::Team, id });
    }
    Ok(team)
  }

  pub async fn delete(&self, id: i64) -> Result<()> {
    guard_delete(self.store.as_ref(), RelatedKind::Team, id).await?;
    let deleted = self
      .store
      .delete_team(id)
      .await
      .map_err(|e| Error::store("failed to delete team", e))?;
    if !deleted {
      return Err(Error::NotFound { kind: EntityKind::Team, id });
    }
    Ok(())
  }
}
