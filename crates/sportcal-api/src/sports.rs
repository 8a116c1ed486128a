//! Handlers for `/sports` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/sports` | Ordered by name |
//! | `POST`   | `/sports` | Body: `{"name":"..."}`; returns 201 + `{"id":N}` |
//! | `GET`    | `/sports/:id` | 404 if not found |
//! | `PUT`    | `/sports/:id` | Partial body; returns the updated sport |
//! | `DELETE` | `/sports/:id` | 400 while any event references it |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use sportcal_core::{
  service::Calendar,
  sport::{NewSport, Sport, UpdateSport},
  store::CalendarStore,
};

use crate::{Created, error::ApiError};

/// `GET /sports`
pub async fn list<B>(
  State(cal): State<Arc<Calendar<B>>>,
) -> Result<Json<Vec<Sport>>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.sports.list().await?))
}

/// `POST /sports`
pub async fn create<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Json(body): Json<NewSport>,
) -> Result<impl IntoResponse, ApiError>
where
  B: CalendarStore,
{
  let id = cal.sports.create(body).await?;
  Ok((StatusCode::CREATED, Json(Created { id })))
}

/// `GET /sports/:id`
pub async fn get_one<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
) -> Result<Json<Sport>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.sports.get(id).await?))
}

/// `PUT /sports/:id`
pub async fn update<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateSport>,
) -> Result<Json<Sport>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.sports.update(id, body).await?))
}

/// `DELETE /sports/:id`
pub async fn delete_one<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  B: CalendarStore,
{
  cal.sports.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
