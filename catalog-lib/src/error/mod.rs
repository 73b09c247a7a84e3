//! Error types

mod api;
mod catalog;

pub use api::*;
pub use catalog::*;
