//! Generic paginated resource accessor.
//!
//! One abstraction replaces the per-resource fetch-paginate-error pattern:
//! a [`PagedQuery`] strategy supplies the endpoint path and an optional
//! per-item decoding hook, and [`PagedAccessor`] owns the fetched page,
//! the pagination metadata, the loading flag, and the last error.
//!
//! Overlapping fetches are resolved with a generation counter: every issued
//! fetch is tagged, and a completion whose generation is no longer the
//! latest is discarded without touching state, so a stale response can
//! never overwrite a newer one.

use serde::de::DeserializeOwned;

use crate::TRACING_TARGET_ACCESSOR;
use crate::client::ApiClient;
use crate::envelope::PageValue;
use crate::error::{Error, Result};
use crate::page::PageInfo;

/// Endpoint-building and item-decoding strategy for one paginated resource.
pub trait PagedQuery {
    /// Record type for one list item.
    type Item: DeserializeOwned;

    /// Resource name used in log output.
    const RESOURCE: &'static str;

    /// Builds the relative path of the paginated list endpoint.
    fn path(&self, page_number: u32, page_size: u32) -> String;

    /// Per-item decoding hook applied to every fetched item.
    fn prepare(&self, item: Self::Item) -> Self::Item {
        item
    }
}

/// Tag identifying one issued fetch.
///
/// Returned by [`PagedAccessor::begin_fetch`] and redeemed by
/// [`PagedAccessor::complete_fetch`]; a ticket whose generation is stale
/// by completion time is discarded.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    generation: u64,
    page_number: u32,
    page_size: u32,
}

/// Fetches one page of a resource and exposes page navigation.
///
/// `items` keeps its last good value across failed fetches; a transient
/// failure sets `error` without blanking a previously rendered table.
pub struct PagedAccessor<Q: PagedQuery> {
    client: ApiClient,
    query: Q,
    items: Vec<Q::Item>,
    info: PageInfo,
    error: Option<String>,
    loading: bool,
    generation: u64,
}

impl<Q: PagedQuery> std::fmt::Debug for PagedAccessor<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedAccessor")
            .field("resource", &Q::RESOURCE)
            .field("info", &self.info)
            .field("error", &self.error)
            .field("loading", &self.loading)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<Q: PagedQuery> PagedAccessor<Q> {
    /// Creates an accessor over the given client and query strategy.
    pub fn new(client: ApiClient, query: Q) -> Self {
        Self {
            client,
            query,
            items: Vec::new(),
            info: PageInfo::default(),
            error: None,
            loading: false,
            generation: 0,
        }
    }

    /// Items of the last successfully fetched page, in server order.
    pub fn items(&self) -> &[Q::Item] {
        &self.items
    }

    /// Pagination metadata of the last successful fetch.
    pub fn page_info(&self) -> &PageInfo {
        &self.info
    }

    /// Message of the last failed fetch, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True strictly while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetches one page, applying the result to local state.
    ///
    /// Page and size are validated locally; an invalid request is rejected
    /// without any network call. Network and domain failures are recorded
    /// in [`error`](Self::error) while `items` keeps its last good value,
    /// so the returned `Result` only reports local validation failures.
    pub async fn fetch_page(&mut self, page_number: u32, page_size: u32) -> Result<()> {
        let ticket = self.begin_fetch(page_number, page_size)?;
        let path = self.query.path(page_number, page_size);
        let outcome = self.client.get_value::<PageValue<Q::Item>>(&path).await;
        self.complete_fetch(ticket, outcome);
        Ok(())
    }

    /// Refetches the current page, for caller-driven invalidation after a
    /// successful mutation.
    pub async fn refresh(&mut self) -> Result<()> {
        self.fetch_page(self.info.current_page, self.info.page_size).await
    }

    /// Starts a fetch: validates inputs, bumps the generation, and raises
    /// the loading flag.
    pub fn begin_fetch(&mut self, page_number: u32, page_size: u32) -> Result<FetchTicket> {
        if page_number < 1 {
            return Err(Error::validation("Page number must be at least 1"));
        }
        if page_size < 1 {
            return Err(Error::validation("Page size must be at least 1"));
        }

        self.generation += 1;
        self.loading = true;

        tracing::debug!(
            target: TRACING_TARGET_ACCESSOR,
            resource = Q::RESOURCE,
            page_number,
            page_size,
            generation = self.generation,
            "Fetching page"
        );

        Ok(FetchTicket {
            generation: self.generation,
            page_number,
            page_size,
        })
    }

    /// Completes a fetch started with [`begin_fetch`](Self::begin_fetch).
    ///
    /// Returns `true` when the outcome was applied. A ticket from a
    /// superseded fetch is discarded entirely: no items, no metadata, no
    /// error, and the loading flag is left to the fetch that superseded it.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<PageValue<Q::Item>>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                target: TRACING_TARGET_ACCESSOR,
                resource = Q::RESOURCE,
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale fetch completion"
            );
            return false;
        }

        self.loading = false;

        match outcome {
            Ok(page) => {
                // Items and metadata are replaced together, never partially.
                self.items = page
                    .items
                    .into_iter()
                    .map(|item| self.query.prepare(item))
                    .collect();
                self.info = PageInfo {
                    current_page: page.page_number,
                    page_size: page.page_size,
                    total_items: page.total_items,
                    total_pages: page.total_pages,
                    has_previous_page: page.has_previous_page,
                    has_next_page: page.has_next_page,
                };
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_ACCESSOR,
                    resource = Q::RESOURCE,
                    page_number = ticket.page_number,
                    page_size = ticket.page_size,
                    error = %err,
                    "Page fetch failed"
                );
                self.error = Some(err.user_message());
            }
        }

        true
    }

    /// Moves to another page when `1 <= page <= total_pages`; out-of-range
    /// requests are silently ignored.
    pub fn change_page(&mut self, page: u32) {
        if page >= 1 && page <= self.info.total_pages {
            self.info.current_page = page;
        }
    }

    /// Changes the page size when positive, resetting the current page to 1
    /// since the old page offset is no longer meaningful.
    pub fn change_page_size(&mut self, size: u32) {
        if size > 0 {
            self.info.page_size = size;
            self.info.current_page = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ApiConfig;
    use crate::session::MemoryCredentialStore;

    struct TestQuery;

    impl PagedQuery for TestQuery {
        type Item = String;

        const RESOURCE: &'static str = "tests";

        fn path(&self, page_number: u32, page_size: u32) -> String {
            format!("/tests/pageNumber/{page_number}/pageSize/{page_size}")
        }
    }

    fn accessor() -> PagedAccessor<TestQuery> {
        let client = ApiClient::new(
            ApiConfig::default(),
            Arc::new(MemoryCredentialStore::new()),
        )
        .expect("client");
        PagedAccessor::new(client, TestQuery)
    }

    fn page(page_number: u32, items: Vec<&str>, total_pages: u32) -> PageValue<String> {
        PageValue {
            items: items.into_iter().map(str::to_string).collect(),
            page_number,
            page_size: 10,
            total_items: total_pages as u64 * 10,
            total_pages,
            has_previous_page: page_number > 1,
            has_next_page: page_number < total_pages,
        }
    }

    #[test]
    fn test_begin_fetch_rejects_invalid_inputs() {
        let mut accessor = accessor();

        assert!(accessor.begin_fetch(0, 10).is_err());
        assert!(accessor.begin_fetch(1, 0).is_err());
        assert!(!accessor.is_loading());
        assert_eq!(accessor.page_info(), &PageInfo::default());
    }

    #[test]
    fn test_successful_fetch_replaces_items_and_info() {
        let mut accessor = accessor();

        let ticket = accessor.begin_fetch(1, 10).expect("valid fetch");
        assert!(accessor.is_loading());

        assert!(accessor.complete_fetch(ticket, Ok(page(1, vec!["a", "b"], 3))));
        assert!(!accessor.is_loading());
        assert_eq!(accessor.items(), ["a", "b"]);
        assert_eq!(accessor.page_info().total_pages, 3);
        assert!(accessor.page_info().has_next_page);
        assert!(accessor.error().is_none());
    }

    #[test]
    fn test_failed_fetch_keeps_last_good_items() {
        let mut accessor = accessor();

        let ticket = accessor.begin_fetch(1, 10).expect("valid fetch");
        accessor.complete_fetch(ticket, Ok(page(1, vec!["a", "b"], 3)));

        let ticket = accessor.begin_fetch(2, 10).expect("valid fetch");
        accessor.complete_fetch(ticket, Err(Error::api("Failed to load page")));

        assert_eq!(accessor.items(), ["a", "b"]);
        assert_eq!(accessor.error(), Some("Failed to load page"));
        assert!(!accessor.is_loading());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut accessor = accessor();

        let stale = accessor.begin_fetch(1, 10).expect("valid fetch");
        let latest = accessor.begin_fetch(2, 10).expect("valid fetch");

        // The slower first request completes after the second one.
        assert!(accessor.complete_fetch(latest, Ok(page(2, vec!["c", "d"], 3))));
        assert!(!accessor.complete_fetch(stale, Ok(page(1, vec!["a", "b"], 3))));

        assert_eq!(accessor.items(), ["c", "d"]);
        assert_eq!(accessor.page_info().current_page, 2);
    }

    #[test]
    fn test_stale_error_does_not_clobber_newer_success() {
        let mut accessor = accessor();

        let stale = accessor.begin_fetch(1, 10).expect("valid fetch");
        let latest = accessor.begin_fetch(2, 10).expect("valid fetch");

        accessor.complete_fetch(latest, Ok(page(2, vec!["c"], 3)));
        accessor.complete_fetch(stale, Err(Error::api("timed out")));

        assert!(accessor.error().is_none());
        assert_eq!(accessor.items(), ["c"]);
    }

    #[test]
    fn test_change_page_is_noop_out_of_range() {
        let mut accessor = accessor();
        let ticket = accessor.begin_fetch(1, 10).expect("valid fetch");
        accessor.complete_fetch(ticket, Ok(page(1, vec!["a"], 3)));

        let before = accessor.page_info().clone();
        accessor.change_page(0);
        accessor.change_page(4);
        assert_eq!(accessor.page_info(), &before);

        accessor.change_page(2);
        assert_eq!(accessor.page_info().current_page, 2);
    }

    #[test]
    fn test_change_page_size_resets_current_page() {
        let mut accessor = accessor();
        let ticket = accessor.begin_fetch(1, 10).expect("valid fetch");
        accessor.complete_fetch(ticket, Ok(page(1, vec!["a"], 5)));
        accessor.change_page(3);

        accessor.change_page_size(25);
        assert_eq!(accessor.page_info().page_size, 25);
        assert_eq!(accessor.page_info().current_page, 1);

        // Non-positive sizes are ignored.
        accessor.change_page_size(0);
        assert_eq!(accessor.page_info().page_size, 25);
    }
}
