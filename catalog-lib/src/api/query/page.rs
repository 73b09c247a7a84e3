//! Page types for upstream and virtual pagination.

use serde::Deserialize;

use crate::model::Character;

/// One page as the upstream API returns it.
///
/// Immutable once fetched; the aggregator only reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamPage {
    records: Vec<Character>,
    /// Total matches across all upstream pages.
    total_count: usize,
    /// Number of upstream pages for the current filters.
    total_pages: usize,
    has_next: bool,
}

impl UpstreamPage {
    /// Creates a new page with records and pagination info.
    pub fn new(records: Vec<Character>, total_count: usize, total_pages: usize, has_next: bool) -> Self {
        Self {
            records,
            total_count,
            total_pages,
            has_next,
        }
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Character] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Character> {
        self.records
    }

    /// Returns the total record count for the current filters.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of upstream pages for the current filters.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns `true` if the upstream links a next page.
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl From<CharacterResponse> for UpstreamPage {
    fn from(response: CharacterResponse) -> Self {
        Self {
            records: response.results,
            total_count: response.info.count,
            total_pages: response.info.pages,
            has_next: response.info.next.is_some(),
        }
    }
}

/// A page as presented to the user, possibly stitched from several upstream
/// pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualPage {
    /// Records in upstream order.
    pub records: Vec<Character>,
    /// Total matches for the current filters.
    pub total_count: usize,
    /// Number of virtual pages at the requested page size.
    pub total_pages: usize,
}

impl VirtualPage {
    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Upstream response body for `GET /character`.
#[derive(Debug, Deserialize)]
pub(crate) struct CharacterResponse {
    info: ResponseInfo,
    results: Vec<Character>,
}

#[derive(Debug, Deserialize)]
struct ResponseInfo {
    count: usize,
    pages: usize,
    next: Option<String>,
}
