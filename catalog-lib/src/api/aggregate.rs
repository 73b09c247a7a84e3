//! Stitches fixed-size upstream pages into virtual pages of any size.

use crate::api::CharacterSource;
use crate::api::query::FilterSet;
use crate::api::query::UpstreamPage;
use crate::api::query::VirtualPage;
use crate::error::Error;

/// Which upstream pages back one virtual page.
///
/// # Example
///
/// ```
/// use catalog_lib::api::PagePlan;
///
/// let plan = PagePlan::new(2, 50, 20);
/// assert_eq!(plan.pages_per_virtual, 3);
/// assert_eq!(plan.start_page, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    /// Requested virtual page (1-based).
    pub virtual_page: usize,
    /// Requested virtual page size.
    pub virtual_page_size: usize,
    /// Upstream page size.
    pub upstream_size: usize,
    /// `ceil(virtual_page_size / upstream_size)`.
    pub pages_per_virtual: usize,
    /// First upstream page to request.
    pub start_page: usize,
}

impl PagePlan {
    /// Computes the plan for a virtual page.
    ///
    /// When the virtual size fits in one upstream page the virtual page maps
    /// one-to-one onto the upstream page with the same index. A start page
    /// that does not fit in `usize` saturates, which no upstream can serve.
    pub fn new(virtual_page: usize, virtual_page_size: usize, upstream_size: usize) -> Self {
        let upstream_size = upstream_size.max(1);
        let pages_per_virtual = virtual_page_size.div_ceil(upstream_size).max(1);
        let start_page = if virtual_page_size <= upstream_size {
            virtual_page
        } else {
            virtual_page
                .saturating_sub(1)
                .checked_mul(pages_per_virtual)
                .and_then(|offset| offset.checked_add(1))
                .unwrap_or(usize::MAX)
        };

        Self {
            virtual_page,
            virtual_page_size,
            upstream_size,
            pages_per_virtual,
            start_page,
        }
    }

    /// Returns `true` if one upstream page backs the whole virtual page.
    pub fn is_direct(&self) -> bool {
        self.virtual_page_size <= self.upstream_size
    }

    fn total_pages(&self, upstream: &UpstreamPage) -> usize {
        if self.is_direct() {
            upstream.total_pages()
        } else {
            upstream.total_count().div_ceil(self.virtual_page_size)
        }
    }
}

/// Fetches one virtual page.
///
/// Upstream pages are requested one at a time, starting at
/// [`PagePlan::start_page`], until the page is full, the upstream runs out, or
/// the next index would pass the upstream page count. Results keep upstream
/// order and are truncated to `page_size`. Totals are taken from the first
/// upstream response of the sequence.
///
/// A page past the end comes back empty with totals populated. An empty
/// filtered set, including the upstream's 404 "no matches" answer, is
/// [`Error::NoResults`].
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `page` or `page_size` is zero
/// - [`Error::NoResults`] if the filters match nothing
/// - [`Error::Upstream`] if any request fails for another reason
pub async fn get_virtual_page<S: CharacterSource + ?Sized>(
    source: &S,
    filters: &FilterSet,
    page: usize,
    page_size: usize,
) -> Result<VirtualPage, Error> {
    if page == 0 {
        return Err(Error::invalid_argument("virtual page must be at least 1"));
    }
    if page_size == 0 {
        return Err(Error::invalid_argument("page size must be greater than 0"));
    }

    let plan = PagePlan::new(page, page_size, source.page_size());
    log::debug!(
        "aggregating virtual page {page} (size {page_size}) from upstream page {}",
        plan.start_page
    );

    let first = match source.fetch_page(filters, plan.start_page).await {
        Ok(first) => first,
        Err(e) if e.is_not_found() => return past_the_end(source, filters, &plan).await,
        Err(e) => return Err(e.into()),
    };
    if first.total_count() == 0 {
        return Err(Error::NoResults);
    }

    let total_count = first.total_count();
    let total_pages = plan.total_pages(&first);
    let upstream_pages = first.total_pages();

    if plan.is_direct() {
        let mut records = first.into_records();
        records.truncate(page_size);
        return Ok(VirtualPage {
            records,
            total_count,
            total_pages,
        });
    }

    let mut more = first.has_next() && !first.is_empty();
    let mut records = first.into_records();
    let mut next = plan.start_page.saturating_add(1);

    while more && records.len() < page_size && next <= upstream_pages {
        let fetched = match source.fetch_page(filters, next).await {
            Ok(fetched) => fetched,
            Err(e) if e.is_not_found() => {
                log::warn!("upstream page {next} vanished mid-aggregation, stopping");
                break;
            }
            Err(e) => return Err(e.into()),
        };
        log::trace!("upstream page {next}: {} records", fetched.len());

        more = fetched.has_next() && !fetched.is_empty();
        records.extend(fetched.into_records());
        next = next.saturating_add(1);
    }

    records.truncate(page_size);

    Ok(VirtualPage {
        records,
        total_count,
        total_pages,
    })
}

/// Resolves a 404 on the first upstream page of a plan.
///
/// Page 1 missing means the filters match nothing. Any later page missing is
/// out of range: probe page 1 for the totals and return an empty page.
async fn past_the_end<S: CharacterSource + ?Sized>(
    source: &S,
    filters: &FilterSet,
    plan: &PagePlan,
) -> Result<VirtualPage, Error> {
    if plan.start_page == 1 {
        return Err(Error::NoResults);
    }

    log::debug!(
        "virtual page {} is past the end, probing upstream page 1 for totals",
        plan.virtual_page
    );
    let probe = source
        .fetch_page(filters, 1)
        .await
        .map_err(|e| if e.is_not_found() { Error::NoResults } else { Error::Upstream(e) })?;
    if probe.total_count() == 0 {
        return Err(Error::NoResults);
    }

    Ok(VirtualPage {
        records: Vec::new(),
        total_count: probe.total_count(),
        total_pages: plan.total_pages(&probe),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StaticSource;
    use crate::api::source::fixtures::characters;
    use crate::error::ApiError;
    use crate::model::Field;

    fn ids(page: &VirtualPage) -> Vec<u32> {
        page.records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_plan_start_page() {
        assert_eq!(PagePlan::new(1, 20, 20).start_page, 1);
        assert_eq!(PagePlan::new(3, 10, 20).start_page, 3);
        assert_eq!(PagePlan::new(1, 100, 20).start_page, 1);
        assert_eq!(PagePlan::new(2, 100, 20).start_page, 6);
        assert_eq!(PagePlan::new(2, 50, 20).start_page, 4);
        assert_eq!(PagePlan::new(3, 40, 20).start_page, 5);
    }

    #[tokio::test]
    async fn test_small_page_size_issues_one_request() {
        let source = StaticSource::new(characters(826));

        for size in [1, 10, 20] {
            source.reset_requests();
            let page = get_virtual_page(&source, &FilterSet::new(), 3, size).await.unwrap();

            assert_eq!(source.requests(), vec![3]);
            assert_eq!(page.len(), size);
            assert_eq!(page.total_count, 826);
            assert_eq!(page.total_pages, 42);
            assert_eq!(page.records.first().map(|c| c.id), Some(41));
        }
    }

    #[tokio::test]
    async fn test_multiple_of_upstream_size() {
        let source = StaticSource::new(characters(826));

        let page = get_virtual_page(&source, &FilterSet::new(), 2, 60).await.unwrap();

        assert_eq!(source.requests(), vec![4, 5, 6]);
        assert_eq!(page.len(), 60);
        assert_eq!(ids(&page), (61..=120).collect::<Vec<_>>());
        assert_eq!(page.total_count, 826);
        assert_eq!(page.total_pages, 14);
    }

    #[tokio::test]
    async fn test_uneven_size_requests_whole_pages_and_truncates() {
        let source = StaticSource::new(characters(826));

        let page = get_virtual_page(&source, &FilterSet::new(), 2, 50).await.unwrap();

        assert_eq!(source.requests(), vec![4, 5, 6]);
        assert_eq!(page.len(), 50);
        assert_eq!(page.records[0].id, 61);
        assert_eq!(page.records[49].id, 110);
        assert_eq!(page.total_pages, 17);
    }

    #[tokio::test]
    async fn test_last_virtual_page_is_short() {
        let source = StaticSource::new(characters(130));

        let page = get_virtual_page(&source, &FilterSet::new(), 3, 60).await.unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.len(), 130 % 60);
        assert_eq!(source.requests(), vec![7]);
    }

    #[tokio::test]
    async fn test_last_virtual_page_exact_fit() {
        let source = StaticSource::new(characters(120));

        let page = get_virtual_page(&source, &FilterSet::new(), 2, 60).await.unwrap();

        assert_eq!(page.len(), 60);
        assert_eq!(page.total_pages, 2);
        assert_eq!(source.requests(), vec![4, 5, 6]);
    }

    #[tokio::test]
    async fn test_stops_when_upstream_exhausted() {
        let source = StaticSource::new(characters(70));

        let page = get_virtual_page(&source, &FilterSet::new(), 1, 100).await.unwrap();

        assert_eq!(page.len(), 70);
        assert_eq!(source.requests(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_filters_pass_through() {
        let source = StaticSource::new(characters(300));
        let filters = FilterSet::new().with(Field::Status, "Dead");

        let page = get_virtual_page(&source, &filters, 1, 40).await.unwrap();

        assert_eq!(page.total_count, 100);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.len(), 40);
        assert!(page.records.iter().all(|c| c.status == "Dead"));
    }

    #[tokio::test]
    async fn test_no_match_is_no_results() {
        let source = StaticSource::new(characters(50));
        let filters = FilterSet::new().with(Field::Status, "Dead").with(Field::Name, "zzz");

        let err = get_virtual_page(&source, &filters, 1, 20).await.unwrap_err();
        assert!(err.is_no_results());

        let err = get_virtual_page(&source, &filters, 1, 100).await.unwrap_err();
        assert!(err.is_no_results());
    }

    #[tokio::test]
    async fn test_past_the_end_is_empty_with_totals() {
        let source = StaticSource::new(characters(50));

        let page = get_virtual_page(&source, &FilterSet::new(), 5, 40).await.unwrap();

        assert!(page.is_empty());
        assert_eq!(page.total_count, 50);
        assert_eq!(page.total_pages, 2);
        assert_eq!(source.requests(), vec![9, 1]);
    }

    #[tokio::test]
    async fn test_past_the_end_direct() {
        let source = StaticSource::new(characters(50));

        let page = get_virtual_page(&source, &FilterSet::new(), 9, 20).await.unwrap();

        assert!(page.is_empty());
        assert_eq!(page.total_count, 50);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_huge_page_is_past_the_end() {
        let source = StaticSource::new(characters(826));

        let plan = PagePlan::new(usize::MAX / 2, 100, 20);
        assert_eq!(plan.start_page, usize::MAX);

        let page = get_virtual_page(&source, &FilterSet::new(), usize::MAX / 2, 100).await.unwrap();

        assert!(page.is_empty());
        assert_eq!(page.total_count, 826);
        assert_eq!(page.total_pages, 9);
        assert_eq!(source.requests(), vec![usize::MAX, 1]);
    }

    #[tokio::test]
    async fn test_odd_upstream_page_size() {
        let source = StaticSource::new(characters(100)).with_page_size(7);

        let page = get_virtual_page(&source, &FilterSet::new(), 2, 20).await.unwrap();

        assert_eq!(source.requests(), vec![4, 5, 6]);
        assert_eq!(page.len(), 20);
        assert_eq!(page.records[0].id, 22);
        assert_eq!(page.total_pages, 5);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let source = StaticSource::new(characters(100)).failing_on(2);

        let err = get_virtual_page(&source, &FilterSet::new(), 1, 60).await.unwrap_err();

        assert_eq!(err.api_error().and_then(ApiError::status_code), Some(500));
        assert_eq!(source.requests(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_rejects_zero_arguments() {
        let source = StaticSource::new(characters(10));

        assert!(matches!(
            get_virtual_page(&source, &FilterSet::new(), 0, 20).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            get_virtual_page(&source, &FilterSet::new(), 1, 0).await,
            Err(Error::InvalidArgument(_))
        ));
        assert!(source.requests().is_empty());
    }
}
