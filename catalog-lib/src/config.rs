//! Catalog configuration

use std::time::Duration;

use crate::api::UPSTREAM_PAGE_SIZE;

/// Default upstream API root.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Settings shared by the client and the catalog state.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use catalog_lib::CatalogConfig;
///
/// let config = CatalogConfig::default()
///     .with_base_url("http://localhost:8080/api")
///     .with_page_size_options([25, 50])
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.default_page_size, 25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Upstream API root, without the `/character` resource.
    ///
    /// Default: `https://rickandmortyapi.com/api`
    pub base_url: String,

    /// Records per upstream page. Fixed by the upstream.
    ///
    /// Default: 20
    pub upstream_page_size: usize,

    /// Page sizes offered to the user.
    ///
    /// Default: 10, 20, 50, 100
    pub page_size_options: Vec<usize>,

    /// Page size on start up. Always one of `page_size_options`.
    ///
    /// Default: 20
    pub default_page_size: usize,

    /// Number of page buttons shown before the footer collapses to ellipses.
    ///
    /// Default: 5
    pub page_window: usize,

    /// Per-request timeout. `None` leaves it to the transport.
    ///
    /// Default: none
    pub timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upstream_page_size: UPSTREAM_PAGE_SIZE,
            page_size_options: vec![10, 20, 50, 100],
            default_page_size: 20,
            page_window: 5,
            timeout: None,
        }
    }
}

impl CatalogConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the upstream API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the upstream page size.
    pub fn with_upstream_page_size(mut self, size: usize) -> Self {
        self.upstream_page_size = size.max(1);
        self
    }

    /// Sets the page sizes offered to the user.
    ///
    /// Zero sizes and duplicates are dropped. If the current default is no
    /// longer offered, the smallest option becomes the default.
    pub fn with_page_size_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        let mut options: Vec<usize> = options.into_iter().filter(|size| *size > 0).collect();
        options.sort_unstable();
        options.dedup();
        if !options.contains(&self.default_page_size) {
            if let Some(first) = options.first() {
                self.default_page_size = *first;
            }
        }
        self.page_size_options = options;
        self
    }

    /// Sets the start-up page size. Ignored unless it is one of the options.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        if self.page_size_options.contains(&size) {
            self.default_page_size = size;
        }
        self
    }

    /// Sets the pagination window width.
    pub fn with_page_window(mut self, width: usize) -> Self {
        self.page_window = width.max(1);
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns `true` if `size` is one of the offered page sizes.
    pub fn is_page_size_option(&self, size: usize) -> bool {
        self.page_size_options.contains(&size)
    }
}
