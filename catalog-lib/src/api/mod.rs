//! Upstream access: the data source seam, page aggregation and value
//! resolution.

mod aggregate;
mod distinct;
pub mod query;
pub(crate) mod source;

pub use aggregate::*;
pub use distinct::*;
pub use source::CharacterSource;
pub use source::StaticSource;
pub use source::UPSTREAM_PAGE_SIZE;
