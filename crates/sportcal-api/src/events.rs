//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/events` | `?sport_id`, `?date_from`, `?page`, `?limit`; paginated |
//! | `POST`   | `/events` | Body: [`NewEvent`]; must not be in the past |
//! | `GET`    | `/events/:id` | Event with sport, venue and teams embedded |
//! | `PUT`    | `/events/:id` | Partial body; referenced ids must exist |
//! | `DELETE` | `/events/:id` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};
use sportcal_core::{
  event::{Event, EventPage, ListEvents, NewEvent, UpdateEvent},
  service::Calendar,
  store::CalendarStore,
};

use crate::{Created, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub sport_id:  Option<i64>,
  /// RFC 3339 timestamp or plain `YYYY-MM-DD` (midnight UTC). Inclusive.
  #[serde(default, deserialize_with = "date_from")]
  pub date_from: Option<DateTime<Utc>>,
  /// 1-based; absent or non-positive means the configured default.
  pub page:      Option<i64>,
  pub limit:     Option<i64>,
}

impl From<ListParams> for ListEvents {
  fn from(p: ListParams) -> Self {
    ListEvents {
      sport_id:  p.sport_id,
      date_from: p.date_from,
      page:      p.page,
      limit:     p.limit,
    }
  }
}

/// Parse a `date_from` value.
pub fn parse_date_from(s: &str) -> Result<DateTime<Utc>, String> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    .map_err(|_| format!("invalid date_from {s:?}: expected RFC 3339 or YYYY-MM-DD"))
}

fn date_from<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw: Option<String> = Option::deserialize(deserializer)?;
  match raw.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(s) => parse_date_from(s).map(Some).map_err(serde::de::Error::custom),
  }
}

/// `GET /events[?sport_id=..][&date_from=..][&page=..][&limit=..]`
pub async fn list<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<EventPage>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.events.list(params.into()).await?))
}

// ─── Single event ─────────────────────────────────────────────────────────────

/// `POST /events`: returns 201 + `{"id":N}`.
pub async fn create<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Json(body): Json<NewEvent>,
) -> Result<impl IntoResponse, ApiError>
where
  B: CalendarStore,
{
  let id = cal.events.create(body).await?;
  tracing::info!(event_id = id, "event created");
  Ok((StatusCode::CREATED, Json(Created { id })))
}

/// `GET /events/:id`
pub async fn get_one<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
) -> Result<Json<Event>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.events.get(id).await?))
}

/// `PUT /events/:id`
pub async fn update<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
  Json(body): Json<UpdateEvent>,
) -> Result<Json<Event>, ApiError>
where
  B: CalendarStore,
{
  Ok(Json(cal.events.update(id, body).await?))
}

/// `DELETE /events/:id`
pub async fn delete_one<B>(
  State(cal): State<Arc<Calendar<B>>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  B: CalendarStore,
{
  cal.events.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
