//! Handlers for `/venues` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/venues` | Ordered by name |
//! | `POST`   | `/venues` | Body: `{"name","city","country_code"}` |
//! | `GET`    | `/venues/:id` | |
//! | `PUT`    | `/venues/:id` | Partial body |
//! | `DELETE` | `/venues/:id` | 400 while any event is held there |

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
  venue::{NewVenue, UpdateVenue, Venue},
};

use crate::{Created, error::ApiError};

pub async fn list<B>(
  State(cal): State<Arc<Calendar<B>>>,
) -> Result<Json<Vec<Venue>>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.venues.list().await?))
}

pub async fn create<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Json(body): Json<NewVenue>,
) -> Result<impl IntoResponse, ApiError>
where
  B: CalendarStore,
{
  let id = cal.venues.create(body).await?;
  Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get_one<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
) -> Result<Json<Venue>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.venues.get(id).await?))
}

pub async fn update<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateVenue>,
) -> Result<Json<Venue>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.venues.update(id, body).await?))
}

pub async fn delete_one<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  B: CalendarStore,
{
  cal.venues.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
