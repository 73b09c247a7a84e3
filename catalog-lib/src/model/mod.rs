//! Typed models

mod character;
mod field;

pub use character::*;
pub use field::*;
