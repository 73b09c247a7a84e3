//! Application state and its transitions.
//!
//! [`CatalogState`] is rendering-agnostic: events go in through
//! [`CatalogState::handle`], and any event that needs new data returns a
//! [`FetchTicket`]. The caller runs the ticket against a
//! [`CharacterSource`] wherever it likes and hands the result back to
//! [`CatalogState::apply`]. Only the ticket from the most recent fetch-
//! triggering event is applied; older ones are dropped as stale.

use crate::CatalogConfig;
use crate::api::CharacterSource;
use crate::api::PagePlan;
use crate::api::get_virtual_page;
use crate::api::query::FilterSet;
use crate::api::query::SortSpec;
use crate::api::query::VirtualPage;
use crate::api::query::sort_page;
use crate::error::Error;
use crate::model::Character;
use crate::model::Field;

use super::PageWindow;
use super::ResultRange;

/// Which row, if any, is expanded into the detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Selected(u32),
}

impl Selection {
    /// Selects `id`, or deselects it if it is already selected.
    pub fn toggle(&mut self, id: u32) {
        *self = match *self {
            Self::Selected(current) if current == id => Self::None,
            _ => Self::Selected(id),
        };
    }

    /// Deselects any row.
    pub fn clear(&mut self) {
        *self = Self::None;
    }

    /// Returns the selected id.
    pub fn id(&self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Selected(id) => Some(*id),
        }
    }

    /// Returns `true` if `id` is the selected row.
    pub fn is_selected(&self, id: u32) -> bool {
        self.id() == Some(id)
    }
}

/// User actions the state reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Apply a new filter set and go back to page 1.
    SubmitFilters(FilterSet),
    /// Drop all filters and go back to page 1.
    ClearFilters,
    /// Go to a page.
    ChangePage(usize),
    /// Switch page size and go back to page 1.
    ChangePageSize(usize),
    /// Sort by a column, flipping direction on repeat clicks.
    ClickSortHeader(Field),
    /// Expand or collapse a row.
    ToggleRow(u32),
    /// Collapse the detail view.
    CloseDetail,
    /// Refetch the current page.
    Reload,
}

/// A pending fetch issued by a state transition.
///
/// Holds a snapshot of the query so it can run on another task while the
/// state keeps changing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub filters: FilterSet,
    pub page: usize,
    pub page_size: usize,
}

impl FetchTicket {
    /// Returns the state generation this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Runs the fetch.
    pub async fn run<S: CharacterSource + ?Sized>(&self, source: &S) -> Result<VirtualPage, Error> {
        get_virtual_page(source, &self.filters, self.page, self.page_size).await
    }
}

/// What [`CatalogState::apply`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The result was current and is now shown.
    Applied,
    /// A newer fetch superseded this one; the result was dropped.
    Stale,
}

/// Why the last load produced no records.
///
/// Kept apart from the display message so callers can tell an unreachable
/// upstream from a filter that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    NoResults,
    Upstream(String),
    InvalidArgument(String),
}

impl From<&Error> for LoadFailure {
    fn from(error: &Error) -> Self {
        match error {
            Error::NoResults => Self::NoResults,
            Error::Upstream(e) => Self::Upstream(e.to_string()),
            Error::InvalidArgument(message) => Self::InvalidArgument(message.clone()),
        }
    }
}

/// The catalog's application state.
#[derive(Debug, Clone)]
pub struct CatalogState {
    config: CatalogConfig,
    filters: FilterSet,
    page: usize,
    page_size: usize,
    sort: SortSpec,
    selection: Selection,
    /// Current page, already sorted by `sort`.
    records: Vec<Character>,
    total_count: usize,
    total_pages: usize,
    loading: bool,
    failure: Option<LoadFailure>,
    error_message: Option<String>,
    generation: u64,
}

impl CatalogState {
    /// Creates an empty state on page 1 with the configured default page size.
    pub fn new(config: CatalogConfig) -> Self {
        let page_size = config.default_page_size;
        Self {
            config,
            filters: FilterSet::default(),
            page: 1,
            page_size,
            sort: SortSpec::none(),
            selection: Selection::None,
            records: Vec::new(),
            total_count: 0,
            total_pages: 0,
            loading: false,
            failure: None,
            error_message: None,
            generation: 0,
        }
    }

    /// Applies an event. Returns a ticket when the event needs new data.
    pub fn handle(&mut self, event: Event) -> Option<FetchTicket> {
        log::trace!("event: {event:?}");
        match event {
            Event::SubmitFilters(filters) => {
                self.filters = filters;
                self.page = 1;
                self.selection.clear();
                Some(self.begin_fetch())
            }
            Event::ClearFilters => {
                self.filters.clear();
                self.page = 1;
                self.selection.clear();
                Some(self.begin_fetch())
            }
            Event::ChangePage(page) => {
                self.selection.clear();
                let last = self.total_pages.max(1);
                if page == 0 || page > last {
                    log::debug!("ignoring page {page}, valid range is 1..={last}");
                    return None;
                }
                self.page = page;
                Some(self.begin_fetch())
            }
            Event::ChangePageSize(size) => {
                self.selection.clear();
                if !self.config.is_page_size_option(size) {
                    log::debug!("ignoring page size {size}, not one of {:?}", self.config.page_size_options);
                    return None;
                }
                self.page_size = size;
                self.page = 1;
                Some(self.begin_fetch())
            }
            Event::ClickSortHeader(field) => {
                if field.is_sortable() {
                    self.sort.toggle(field);
                    sort_page(&mut self.records, &self.sort);
                }
                None
            }
            Event::ToggleRow(id) => {
                self.selection.toggle(id);
                None
            }
            Event::CloseDetail => {
                self.selection.clear();
                None
            }
            Event::Reload => Some(self.reload()),
        }
    }

    /// Applies the result of a ticket, unless a newer ticket was issued since.
    ///
    /// On success the records are sorted by the current sort spec. On error
    /// the record set is emptied and the error message is set. A selection
    /// whose record is not on the new page is dropped.
    pub fn apply(&mut self, ticket: &FetchTicket, result: Result<VirtualPage, Error>) -> ApplyOutcome {
        if ticket.generation != self.generation {
            log::debug!(
                "dropping stale result for generation {} (current {})",
                ticket.generation,
                self.generation
            );
            return ApplyOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.records = page.records;
                sort_page(&mut self.records, &self.sort);
                self.total_count = page.total_count;
                self.total_pages = page.total_pages;
                self.failure = None;
                self.error_message = None;
            }
            Err(e) => {
                log::debug!("load failed: {e}");
                self.records.clear();
                self.total_count = 0;
                self.total_pages = 0;
                self.error_message = Some(e.user_message());
                self.failure = Some(LoadFailure::from(&e));
            }
        }

        if let Some(id) = self.selection.id() {
            if !self.records.iter().any(|record| record.id == id) {
                self.selection.clear();
            }
        }
        ApplyOutcome::Applied
    }

    /// Goes to the next page, if there is one.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        self.handle(Event::ChangePage(self.page + 1))
    }

    /// Goes to the previous page, if there is one.
    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        self.handle(Event::ChangePage(self.page.saturating_sub(1)))
    }

    /// Refetches the current page with the current filters.
    pub fn reload(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            filters: self.filters.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Returns the active filters.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Returns the current page (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the sort spec.
    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Returns the selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns the selected record, if it is on the current page.
    pub fn selected(&self) -> Option<&Character> {
        let id = self.selection.id()?;
        self.records.iter().find(|record| record.id == id)
    }

    /// Returns the current page's records, sorted.
    pub fn records(&self) -> &[Character] {
        &self.records
    }

    /// Returns the total matches for the current filters.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of pages at the current page size.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns `true` while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the user-facing error message of the last load.
    pub fn error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns why the last load failed.
    pub fn failure(&self) -> Option<&LoadFailure> {
        self.failure.as_ref()
    }

    /// Returns `true` if the last load succeeded with an empty page.
    pub fn is_empty(&self) -> bool {
        !self.loading && self.failure.is_none() && self.records.is_empty()
    }

    /// Returns the page-number strip for the footer.
    pub fn page_window(&self) -> PageWindow {
        PageWindow::compute(self.page, self.total_pages, self.config.page_window)
    }

    /// Returns the "showing X to Y of Z" numbers for the footer.
    pub fn result_range(&self) -> ResultRange {
        let plan = PagePlan::new(self.page, self.page_size, self.config.upstream_page_size);
        ResultRange::compute(&plan, self.records.len(), self.total_count)
    }
}
