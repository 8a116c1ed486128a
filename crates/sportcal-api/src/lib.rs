//! JSON REST API for the sports event calendar.
//!
//! Exposes an axum [`Router`] backed by any
//! [`CalendarStore`](sportcal_core::store::CalendarStore), optionally
//! alongside the browser frontend's static files. Transport and TLS are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = sportcal_api::app(calendar, Some(Path::new("static")));
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod events;
pub mod sports;
pub mod teams;
pub mod venues;

use std::{path::Path, sync::Arc};

use axum::{Json, Router, routing::get};
use serde::Serialize;
use serde_json::{Value, json};
use sportcal_core::{service::Calendar, store::CalendarStore};
use tower_http::{
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};

pub use error::ApiError;

/// Body returned by every `POST` that creates a row.
#[derive(Debug, Serialize)]
pub struct Created {
  pub id: i64,
}

/// The full application: [`api_router`] nested under `/api/v1`, with request
/// tracing. With a `static_dir`, its files are also served under `/static`
/// and its `index.html` at `/`.
pub fn app<B>(calendar: Arc<Calendar<B>>, static_dir: Option<&Path>) -> Router<()>
where
  B: CalendarStore + 'static,
{
  let router = Router::new().nest("/api/v1", api_router(calendar));
  let router = match static_dir {
    Some(dir) => router.merge(static_router(dir)),
    None => router,
  };
  router.layer(TraceLayer::new_for_http())
}

/// `GET /` serves `dir/index.html`; `GET /static/*` serves files from `dir`.
/// Missing files are 404.
pub fn static_router(dir: &Path) -> Router<()> {
  Router::new()
    .route_service("/", ServeFile::new(dir.join("index.html")))
    .nest_service("/static", ServeDir::new(dir))
}

/// Build the entity routes for `calendar`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<B>(calendar: Arc<Calendar<B>>) -> Router<()>
where
  B: CalendarStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    // Sports
    .route("/sports", get(sports::list::<B>).post(sports::create::<B>))
    .route(
      "/sports/{id}",
      get(sports::get_one::<B>)
        .put(sports::update::<B>)
        .delete(sports::delete_one::<B>),
    )
    // Venues
    .route("/venues", get(venues::list::<B>).post(venues::create::<B>))
    .route(
      "/venues/{id}",
      get(venues::get_one::<B>)
        .put(venues::update::<B>)
        .delete(venues::delete_one::<B>),
    )
    // Teams
    .route("/teams", get(teams::list::<B>).post(teams::create::<B>))
    .route(
      "/teams/{id}",
      get(teams::get_one::<B>)
        .put(teams::update::<B>)
        .delete(teams::delete_one::<B>),
    )
    // Events
    .route("/events", get(events::list::<B>).post(events::create::<B>))
    .route(
      "/events/{id}",
      get(events::get_one::<B>)
        .put(events::update::<B>)
        .delete(events::delete_one::<B>),
    )
    .with_state(calendar)
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }
