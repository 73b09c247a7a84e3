//! View state: selection, pagination footer and the detail projection.

mod detail;
mod pagination;
mod state;

pub use detail::CharacterDetail;
pub use pagination::PageItem;
pub use pagination::PageWindow;
pub use pagination::ResultRange;
pub use state::*;
