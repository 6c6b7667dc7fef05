//! Core types for eventdesk.
//!
//! This crate provides everything a front end needs to browse and edit events
//! held by a REST Event Store:
//! - `event` and `id` for the JSON documents (events, creators, categories)
//! - `store` for the Event Store contract and its HTTP implementation
//! - `shell` for the capabilities a front end lends to the view-models
//! - `detail`, `listing` and `form` for the view-models themselves

pub mod config;
pub mod detail;
pub mod error;
pub mod event;
pub mod form;
pub mod id;
pub mod listing;
pub mod shell;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{EventDeskError, EventDeskResult};
pub use event::{Category, Creator, DraftField, Event};
pub use id::Id;
