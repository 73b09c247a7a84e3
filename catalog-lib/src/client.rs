//! HTTP client for the upstream character API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::CatalogConfig;
use crate::api::CharacterSource;
use crate::api::UPSTREAM_PAGE_SIZE;
use crate::api::query::CharacterResponse;
use crate::api::query::FilterSet;
use crate::api::query::UpstreamPage;
use crate::error::ApiError;

/// The client for the upstream character API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks, e.g. between a page fetch and a distinct-value scan running
/// side by side.
///
/// # Example
///
/// ```ignore
/// use catalog_lib::CatalogClient;
///
/// let client = CatalogClient::builder()
///     .url("https://rickandmortyapi.com/api")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let page = client.fetch_page(&FilterSet::new(), 1).await?;
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    /// `<base>/character/`
    endpoint: Url,
    http_client: Client,
    timeout: Option<Duration>,
    page_size: usize,
}

impl CatalogClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CatalogClientBuilder<Missing> {
        CatalogClientBuilder::new()
    }

    /// Builds a client from a [`CatalogConfig`].
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ApiError> {
        let mut builder = Self::builder()
            .url(config.base_url.as_str())
            .page_size(config.upstream_page_size);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Returns the character endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Builds the request URL for one page.
    ///
    /// `page` is always present; blank filters are left out.
    pub fn page_url(&self, filters: &FilterSet, page: usize) -> Url {
        let mut url = self.inner.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            for (key, value) in filters.query_pairs() {
                query.append_pair(key, &value);
            }
        }
        url
    }

    async fn get_page(&self, url: Url) -> Result<UpstreamPage, ApiError> {
        log::debug!("GET {url}");

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            log::debug!("upstream answered {status}");
            return Err(ApiError::http(status.as_u16(), body));
        }

        let parsed: CharacterResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;
        Ok(UpstreamPage::from(parsed))
    }

    fn map_transport(&self, e: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        }
    }
}

#[async_trait]
impl CharacterSource for CatalogClient {
    async fn fetch_page(&self, filters: &FilterSet, page: usize) -> Result<UpstreamPage, ApiError> {
        self.get_page(self.page_url(filters, page)).await
    }

    fn page_size(&self) -> usize {
        self.inner.page_size
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CatalogClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = CatalogClient::builder()
///     .url("https://rickandmortyapi.com/api")
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct CatalogClientBuilder<U> {
    url: U,
    page_size: usize,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CatalogClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            page_size: UPSTREAM_PAGE_SIZE,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the upstream API root, e.g. `https://rickandmortyapi.com/api`.
    pub fn url(self, url: impl Into<String>) -> CatalogClientBuilder<Set<String>> {
        CatalogClientBuilder {
            url: Set(url.into()),
            page_size: self.page_size,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for CatalogClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> CatalogClientBuilder<U> {
    /// Sets the upstream page size.
    ///
    /// Defaults to [`UPSTREAM_PAGE_SIZE`].
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl CatalogClientBuilder<Set<String>> {
    /// Builds the [`CatalogClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL does not parse, and
    /// [`ApiError::Network`] if the default HTTP client cannot be created.
    pub fn build(self) -> Result<CatalogClient, ApiError> {
        let endpoint = character_endpoint(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(CatalogClient {
            inner: Arc::new(CatalogClientInner {
                endpoint,
                http_client,
                timeout: self.timeout,
                page_size: self.page_size,
            }),
        })
    }
}

fn character_endpoint(base: &str) -> Result<Url, ApiError> {
    let base = format!("{}/", base.trim().trim_end_matches('/'));
    let base = Url::parse(&base).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(base.to_string()));
    }
    base.join("character/")
        .map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    fn client() -> CatalogClient {
        CatalogClient::builder()
            .url("https://rickandmortyapi.com/api")
            .build()
            .unwrap()
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            client().endpoint().as_str(),
            "https://rickandmortyapi.com/api/character/"
        );

        let trailing = CatalogClient::builder()
            .url("https://rickandmortyapi.com/api/")
            .build()
            .unwrap();
        assert_eq!(trailing.endpoint(), client().endpoint());
    }

    #[test]
    fn test_invalid_url() {
        let result = CatalogClient::builder().url("not a url").build();
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_page_url_without_filters() {
        let url = client().page_url(&FilterSet::new(), 3);
        assert_eq!(url.as_str(), "https://rickandmortyapi.com/api/character/?page=3");
    }

    #[test]
    fn test_page_url_encodes_filters() {
        let filters = FilterSet::new()
            .with(Field::Name, "Rick Sanchez")
            .with(Field::Status, "Alive")
            .with(Field::Species, "");
        let url = client().page_url(&filters, 1);

        assert_eq!(
            url.as_str(),
            "https://rickandmortyapi.com/api/character/?page=1&name=Rick+Sanchez&status=alive"
        );
    }

    #[test]
    fn test_from_config() {
        let config = CatalogConfig::default()
            .with_base_url("http://localhost:8080/api")
            .with_upstream_page_size(5);
        let client = CatalogClient::from_config(&config).unwrap();

        assert_eq!(client.page_size(), 5);
        assert_eq!(client.endpoint().as_str(), "http://localhost:8080/api/character/");
    }
}
