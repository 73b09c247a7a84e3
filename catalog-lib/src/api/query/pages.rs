//! Async iterator over consecutive upstream pages.

use crate::api::CharacterSource;
use crate::api::query::FilterSet;
use crate::api::query::UpstreamPage;
use crate::error::ApiError;

/// Async iterator that yields upstream pages in order, starting at a given
/// page and following `next` until the upstream reports no more pages.
///
/// Stops after the first error.
///
/// # Example
///
/// ```ignore
/// let mut pages = UpstreamPages::new(&client, FilterSet::new());
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for character in page.records() {
///         println!("{}", character.name);
///     }
/// }
/// ```
pub struct UpstreamPages<'a, S: ?Sized> {
    source: &'a S,
    filters: FilterSet,
    /// The next page to fetch; `None` once exhausted.
    next_page: Option<usize>,
}

impl<'a, S: CharacterSource + ?Sized> UpstreamPages<'a, S> {
    /// Creates an iterator starting at upstream page 1.
    pub fn new(source: &'a S, filters: FilterSet) -> Self {
        Self::starting_at(source, filters, 1)
    }

    /// Creates an iterator starting at the given upstream page.
    pub fn starting_at(source: &'a S, filters: FilterSet, page: usize) -> Self {
        Self {
            source,
            filters,
            next_page: Some(page.max(1)),
        }
    }

    /// Returns the page index the next call will fetch, if any.
    pub fn next_page(&self) -> Option<usize> {
        self.next_page
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed.
    pub async fn next(&mut self) -> Option<Result<UpstreamPage, ApiError>> {
        let page = self.next_page.take()?;
        log::debug!("fetching upstream page {page}");

        let result = self.source.fetch_page(&self.filters, page).await;
        if let Ok(fetched) = &result {
            if fetched.has_next() && !fetched.is_empty() {
                self.next_page = page.checked_add(1);
            }
        }
        Some(result)
    }
}
