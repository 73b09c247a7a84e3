//! Query types: filters, ordering and pages.
//!
//! # Shared Types
//!
//! - [`FilterSet`] - User-entered filters and their wire encoding
//! - [`SortSpec`] - Client-side ordering of a fetched page
//! - [`UpstreamPage`] / [`VirtualPage`] - One upstream page and one user-facing page
//! - [`UpstreamPages`] - Async iterator over consecutive upstream pages

mod filter;
mod order;
mod page;
mod pages;

pub use filter::FilterSet;
pub use order::Direction;
pub use order::SortSpec;
pub use order::sort_page;
pub use order::sorted;
pub use page::UpstreamPage;
pub use page::VirtualPage;
pub use pages::UpstreamPages;

pub(crate) use page::CharacterResponse;
