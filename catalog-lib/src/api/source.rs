//! The remote data client seam.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::query::FilterSet;
use crate::api::query::UpstreamPage;
use crate::error::ApiError;
use crate::model::Character;
use crate::model::Field;

/// Fixed number of records per upstream page.
pub const UPSTREAM_PAGE_SIZE: usize = 20;

/// Trait for anything that can serve one upstream page of characters.
///
/// The page aggregator, the distinct-value resolver and the catalog state are
/// generic over this trait. [`CatalogClient`](crate::CatalogClient) is the
/// HTTP implementation; [`StaticSource`] serves a fixed in-memory dataset.
///
/// Implementations must report "no matches" and "page past the end" as an
/// [`ApiError::Http`] with status 404, the same way the upstream API does.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Fetches one upstream page (1-based) for the given filters.
    async fn fetch_page(&self, filters: &FilterSet, page: usize) -> Result<UpstreamPage, ApiError>;

    /// Number of records per upstream page.
    fn page_size(&self) -> usize {
        UPSTREAM_PAGE_SIZE
    }
}

#[async_trait]
impl<T: CharacterSource + ?Sized> CharacterSource for Arc<T> {
    async fn fetch_page(&self, filters: &FilterSet, page: usize) -> Result<UpstreamPage, ApiError> {
        (**self).fetch_page(filters, page).await
    }

    fn page_size(&self) -> usize {
        (**self).page_size()
    }
}

/// An in-memory [`CharacterSource`] that pages a fixed dataset.
///
/// Filtering follows the upstream rules: `name` and `type` match as
/// case-insensitive substrings, the other fields match exactly ignoring case.
/// Every requested page index is recorded and can be read back with
/// [`StaticSource::requests`].
///
/// # Example
///
/// ```
/// use catalog_lib::api::{CharacterSource, StaticSource};
/// use catalog_lib::model::Character;
///
/// let source = StaticSource::new(vec![Character::new(1, "Rick Sanchez")]);
/// assert_eq!(source.page_size(), 20);
/// ```
pub struct StaticSource {
    records: Vec<Character>,
    page_size: usize,
    fail_on: Option<usize>,
    requests: Mutex<Vec<usize>>,
}

impl StaticSource {
    /// Creates a source with the default upstream page size.
    pub fn new(records: Vec<Character>) -> Self {
        Self {
            records,
            page_size: UPSTREAM_PAGE_SIZE,
            fail_on: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Overrides the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Makes every request for `page` fail with HTTP 500.
    pub fn failing_on(mut self, page: usize) -> Self {
        self.fail_on = Some(page);
        self
    }

    /// Returns the page indices requested so far, in order.
    pub fn requests(&self) -> Vec<usize> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Forgets the recorded requests.
    pub fn reset_requests(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }

    fn matches(record: &Character, filters: &FilterSet) -> bool {
        Field::ALL.into_iter().all(|field| {
            let wanted = filters.get(field).trim().to_lowercase();
            if wanted.is_empty() {
                return true;
            }
            let actual = record.field(field).to_lowercase();
            match field {
                Field::Name | Field::Type => actual.contains(&wanted),
                _ => actual == wanted,
            }
        })
    }
}

#[async_trait]
impl CharacterSource for StaticSource {
    async fn fetch_page(&self, filters: &FilterSet, page: usize) -> Result<UpstreamPage, ApiError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(page);
        }
        if self.fail_on == Some(page) {
            return Err(ApiError::http(500, "Internal Server Error"));
        }

        let matching: Vec<&Character> = self
            .records
            .iter()
            .filter(|record| Self::matches(record, filters))
            .collect();
        let total_count = matching.len();
        let total_pages = total_count.div_ceil(self.page_size);
        if page == 0 || page > total_pages {
            return Err(ApiError::http(404, r#"{"error":"There is nothing here"}"#));
        }

        let start = (page - 1) * self.page_size;
        let records = matching
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect::<Vec<_>>();

        Ok(UpstreamPage::new(records, total_count, total_pages, page < total_pages))
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::characters;
    use super::*;

    #[tokio::test]
    async fn test_static_source_pages() {
        let source = StaticSource::new(characters(45));

        let first = source.fetch_page(&FilterSet::new(), 1).await.unwrap();
        assert_eq!(first.len(), 20);
        assert_eq!(first.total_count(), 45);
        assert_eq!(first.total_pages(), 3);
        assert!(first.has_next());

        let last = source.fetch_page(&FilterSet::new(), 3).await.unwrap();
        assert_eq!(last.len(), 5);
        assert!(!last.has_next());
        assert_eq!(last.records()[0].id, 41);

        assert_eq!(source.requests(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_static_source_not_found() {
        let source = StaticSource::new(characters(10));

        let past_end = source.fetch_page(&FilterSet::new(), 2).await.unwrap_err();
        assert!(past_end.is_not_found());

        let filters = FilterSet::new().with(Field::Name, "nobody");
        let no_match = source.fetch_page(&filters, 1).await.unwrap_err();
        assert!(no_match.is_not_found());
    }

    #[tokio::test]
    async fn test_static_source_filters_ignore_case() {
        let source = StaticSource::new(characters(12));
        let filters = FilterSet::new().with(Field::Status, "DEAD");

        let page = source.fetch_page(&filters, 1).await.unwrap();
        assert_eq!(page.total_count(), 4);
        assert!(page.records().iter().all(|c| c.status == "Dead"));
    }
}
