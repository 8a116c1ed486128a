//! Core types and trait definitions for the sports event calendar.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backends implement the capability traits in [`store`]; the HTTP
//! surface drives the services in [`service`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod event;
pub mod guard;
pub mod kind;
pub mod memory;
pub mod pagination;
pub mod service;
pub mod sport;
pub mod store;
pub mod team;
pub mod validate;
pub mod venue;

pub use error::{Error, ErrorKind, Result};
pub use kind::{EntityKind, RelatedKind};
