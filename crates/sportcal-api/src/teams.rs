//! Handlers for `/teams` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/teams` | Ordered by name |
//! | `POST`   | `/teams` | Body: `{"name","city","sport_id"}` |
//! | `GET`    | `/teams/:id` | |
//! | `PUT`    | `/teams/:id` | Partial body; a new `sport_id` must exist |
//! | `DELETE` | `/teams/:id` | 400 while the team plays in any event |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use sportcal_core::{
  service::Calendar,
  store::CalendarStore,
  team::{NewTeam, Team, UpdateTeam},
};

use crate::{Created, error::ApiError};

pub async fn list<B>(
  State(cal): State<Arc<Calendar<B>>>,
) -> Result<Json<Vec<Team>>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.teams.list().await?))
}

pub async fn create<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Json(body): Json<NewTeam>,
) -> Result<impl IntoResponse, ApiError>
where
  B: CalendarStore,
{
  let id = cal.teams.create(body).await?;
  Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get_one<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
) -> Result<Json<Team>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.teams.get(id).await?))
}

pub async fn update<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateTeam>,
) -> Result<Json<Team>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.teams.update(id, body).await?))
}

pub async fn delete_one<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  B: CalendarStore,
{
  cal.teams.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
