//! Services: validation, referential checks and event assembly on top of the
//! entity stores.
//!
//! Each service holds an `Arc` to a single backend implementing the store
//! capabilities it needs. [`Calendar`] bundles all four over one backend.

mod event;
mod sport;
mod team;
mod venue;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use event::EventService;
pub use sport::SportService;
pub use team::TeamService;
pub use venue::VenueService;

use crate::{pagination::PaginationDefaults, store::CalendarStore};

/// Every service, sharing one backend.
pub struct Calendar<B> {
  pub sports: SportService<B>,
  pub venues: VenueService<B>,
  pub teams:  TeamService<B>,
  pub events: EventService<B>,
}

impl<B: CalendarStore> Calendar<B> {
  pub fn new(store: Arc<B>, defaults: PaginationDefaults) -> Self {
    Self {
      sports: SportService::new(store.clone()),
      venues: VenueService::new(store.clone()),
      teams:  TeamService::new(store.clone()),
      events: EventService::new(store, defaults),
    }
  }
}
