//! Catalog: a data source wired to the application state.

use std::collections::BTreeSet;

use crate::CatalogConfig;
use crate::api::CharacterSource;
use crate::api::DistinctValues;
use crate::api::collect_distinct_fields;
use crate::model::Field;
use crate::view::ApplyOutcome;
use crate::view::CatalogState;
use crate::view::Event;

/// Drives a [`CatalogState`] against a [`CharacterSource`].
///
/// Events are handled and, when they need data, fetched and applied before
/// [`Catalog::dispatch`] returns. Callers that want to keep reacting while a
/// fetch is in flight can use [`CatalogState`] and its tickets directly.
///
/// # Example
///
/// ```ignore
/// let client = CatalogClient::from_config(&config)?;
/// let mut catalog = Catalog::new(client, config);
///
/// catalog.initialize().await;
/// catalog.dispatch(Event::ChangePageSize(50)).await;
///
/// for character in catalog.state().records() {
///     println!("{}", character.name);
/// }
/// ```
pub struct Catalog<S> {
    source: S,
    state: CatalogState,
    options: DistinctValues,
}

impl<S: CharacterSource> Catalog<S> {
    /// Creates a catalog with nothing loaded yet.
    pub fn new(source: S, config: CatalogConfig) -> Self {
        Self {
            source,
            state: CatalogState::new(config),
            options: DistinctValues::new(),
        }
    }

    /// Returns the application state.
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Returns the data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the filter options for a field, empty if none were loaded.
    pub fn options(&self, field: Field) -> Vec<&str> {
        self.options
            .get(&field)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Loads the filter options and the first page side by side.
    pub async fn initialize(&mut self) -> ApplyOutcome {
        let ticket = self.state.reload();
        let (options, result) = futures::join!(
            collect_distinct_fields(&self.source, &Field::DISTINCT),
            ticket.run(&self.source)
        );

        self.options = options.unwrap_or_else(|e| {
            log::warn!("filter options unavailable: {e}");
            DistinctValues::new()
        });
        self.state.apply(&ticket, result)
    }

    /// Loads the distinct values of the filter fields.
    ///
    /// A failed scan leaves every option list empty instead of failing.
    pub async fn load_filter_options(&mut self) {
        self.options = match collect_distinct_fields(&self.source, &Field::DISTINCT).await {
            Ok(options) => options,
            Err(e) => {
                log::warn!("filter options unavailable: {e}");
                DistinctValues::new()
            }
        };
    }

    /// Handles an event, fetching and applying data if it needs any.
    ///
    /// Returns `None` when the event did not trigger a fetch.
    pub async fn dispatch(&mut self, event: Event) -> Option<ApplyOutcome> {
        let ticket = self.state.handle(event)?;
        let result = ticket.run(&self.source).await;
        Some(self.state.apply(&ticket, result))
    }

    /// Refetches the current page.
    pub async fn refresh(&mut self) -> ApplyOutcome {
        let ticket = self.state.reload();
        let result = ticket.run(&self.source).await;
        self.state.apply(&ticket, result)
    }

    /// Returns the options for a field as a set.
    pub fn option_set(&self, field: Field) -> BTreeSet<String> {
        self.options.get(&field).cloned().unwrap_or_default()
    }
}
