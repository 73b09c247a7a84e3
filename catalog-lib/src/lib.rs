//! Character catalog library
//!
//! Fetches, filters, pages and sorts records from a read-only character API
//! with a fixed upstream page size, presenting them as virtual pages of any
//! size.
//!
//! - [`api`] - the [`CharacterSource`](api::CharacterSource) seam, page
//!   aggregation and distinct-value resolution
//! - [`view`] - application state: selection, sorting, pagination footer
//! - [`Catalog`] - a source wired to the state

pub mod api;
pub mod error;
pub mod model;
pub mod view;

mod catalog;
mod client;
mod config;

pub use catalog::Catalog;
pub use client::*;
pub use config::*;
