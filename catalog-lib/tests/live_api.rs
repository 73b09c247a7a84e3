//! Integration tests against the live character API.
//!
//! These tests need network access and are ignored by default. The base URL
//! can be overridden with a `.env` file in the catalog-lib directory:
//!
//! ```env
//! CATALOG_BASE_URL=https://rickandmortyapi.com/api
//! ```
//!
//! Then run: `cargo test -p catalog-lib -- --ignored`

use std::env;
use std::time::Duration;

use catalog_lib::api::query::FilterSet;
use catalog_lib::api::{CharacterSource, collect_distinct, get_virtual_page};
use catalog_lib::error::Error;
use catalog_lib::model::Field;
use catalog_lib::{CatalogClient, CatalogConfig, DEFAULT_BASE_URL};

fn client() -> CatalogClient {
    let _ = dotenvy::dotenv();
    let base_url = env::var("CATALOG_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let config = CatalogConfig::default()
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(30));
    CatalogClient::from_config(&config).expect("Failed to build client")
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_first_page() {
    let client = client();

    let page = client.fetch_page(&FilterSet::new(), 1).await.unwrap();

    assert_eq!(page.len(), client.page_size());
    assert!(page.total_count() > 0);
    assert!(page.has_next());
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_aggregated_page_keeps_upstream_order() {
    let client = client();

    let page = get_virtual_page(&client, &FilterSet::new(), 1, 50).await.unwrap();

    assert_eq!(page.len(), 50);
    let ids: Vec<u32> = page.records.iter().map(|c| c.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_case_insensitive_status_filter() {
    let client = client();
    let filters = FilterSet::new().with(Field::Status, "DEAD");

    let page = get_virtual_page(&client, &filters, 1, 20).await.unwrap();

    assert!(page.records.iter().all(|c| c.status.eq_ignore_ascii_case("dead")));
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_no_match_is_no_results() {
    let client = client();
    let filters = FilterSet::new().with(Field::Name, "zzzz-no-such-character");

    let err = get_virtual_page(&client, &filters, 1, 20).await.unwrap_err();

    assert!(matches!(err, Error::NoResults));
}

#[tokio::test]
#[ignore = "requires network access, scans the whole dataset"]
async fn test_distinct_statuses() {
    let client = client();

    let statuses = collect_distinct(&client, Field::Status).await.unwrap();

    assert!(statuses.contains("Alive"));
    assert!(statuses.contains("Dead"));
}
