//! Incremental retrieval of the SMS log listing.
//!
//! The server returns the log newest-first, one page per request. Pages are
//! accumulated in fetch order and exposed as one flat list, together with the
//! loading/validating/end-of-data flags the logs view renders from.
//!
//! Requests are keyed by [`page_key`]. A key that is already in flight is
//! never requested a second time, so rapid "load more" clicks collapse into a
//! single call.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::config::ModuleConfig;
use crate::error::FetchError;
use crate::model::log::{LogEntry, LogPage, LogsResponse};

/// Transport used to fetch one page given its key (the request URL).
#[async_trait(?Send)]
pub trait LogSource {
    async fn fetch_page(&self, key: &str) -> Result<LogsResponse, FetchError>;
}

/// Request key for the 0-based page `page_index`.
///
/// Returns `None` once the previous page came back empty: there is nothing
/// left to ask for.
pub fn page_key(
    endpoint: &str,
    page_index: usize,
    page_size: usize,
    previous_page: Option<&LogPage>,
) -> Option<String> {
    if previous_page.is_some_and(LogPage::is_empty) {
        return None;
    }
    Some(format!(
        "{}?page={}&rows={}&sortColumn=id&sortDirection=desc",
        endpoint,
        page_index + 1,
        page_size
    ))
}

#[derive(Debug, Default)]
struct PagesState {
    pages: Vec<LogPage>,
    /// Number of pages the view asked for. `mutate` never lowers it.
    size: usize,
    in_flight: HashSet<String>,
    error: Option<FetchError>,
}

type Subscriber = Rc<dyn Fn()>;

/// Result of one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fetched {
    Stored,
    Failed,
    /// The same key was already being fetched; nothing was sent.
    AlreadyInFlight,
}

/// Handle on the accumulated log pages. Clones share the same state.
pub struct PaginatedLogs<S: LogSource> {
    source: Rc<S>,
    endpoint: String,
    page_size: usize,
    state: Rc<RefCell<PagesState>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl<S: LogSource> Clone for PaginatedLogs<S> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
            endpoint: self.endpoint.clone(),
            page_size: self.page_size,
            state: Rc::clone(&self.state),
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<S: LogSource> PaginatedLogs<S> {
    pub fn new(source: S, config: &ModuleConfig) -> Self {
        Self {
            source: Rc::new(source),
            endpoint: config.logs_endpoint.clone(),
            page_size: config.page_size(),
            state: Rc::new(RefCell::new(PagesState::default())),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Registers a callback run after every state change.
    pub fn subscribe(&self, subscriber: impl Fn() + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(subscriber));
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// All loaded entries, page 1 first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state
            .borrow()
            .pages
            .iter()
            .flat_map(|page| page.rows.iter().cloned())
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.state.borrow().pages.len()
    }

    /// Number of pages requested so far.
    pub fn size(&self) -> usize {
        self.state.borrow().size
    }

    /// True only while the first page is in flight and nothing is loaded.
    pub fn is_loading(&self) -> bool {
        let state = self.state.borrow();
        state.pages.is_empty() && !state.in_flight.is_empty()
    }

    pub fn is_validating(&self) -> bool {
        !self.state.borrow().in_flight.is_empty()
    }

    /// The most recent page is short: the server has nothing more.
    pub fn is_reaching_end(&self) -> bool {
        self.state
            .borrow()
            .pages
            .last()
            .is_some_and(|page| page.row_count() < self.page_size)
    }

    pub fn error(&self) -> Option<FetchError> {
        self.state.borrow().error.clone()
    }

    /// Loads the first page unless something is already loaded.
    pub async fn load(&self) {
        if self.page_count() > 0 {
            return;
        }
        self.grow_to(1);
        if let Some(key) = page_key(&self.endpoint, 0, self.page_size, None) {
            self.fetch_into(0, key).await;
        }
    }

    /// Requests the page after the last loaded one. Does nothing once the
    /// last loaded page was empty.
    pub async fn next_page(&self) {
        let (index, key) = {
            let state = self.state.borrow();
            let index = state.pages.len();
            (
                index,
                page_key(&self.endpoint, index, self.page_size, state.pages.last()),
            )
        };
        let Some(key) = key else {
            debug!("log pagination reached the end, not requesting page {}", index + 1);
            return;
        };
        self.grow_to(index + 1);
        self.fetch_into(index, key).await;
    }

    /// Re-fetches every requested page in order, replacing loaded pages in
    /// place and filling in the ones that never arrived.
    ///
    /// The requested page count is kept. If a re-fetched page comes back
    /// empty, the pages after it are dropped since their keys no longer
    /// exist. A page already in flight is skipped. A failure stops the
    /// refresh and leaves the remaining pages as they were.
    pub async fn mutate(&self) {
        let requested = self.size();
        for index in 0..requested {
            let key = {
                let state = self.state.borrow();
                if index > state.pages.len() {
                    // An earlier page was skipped and is still missing.
                    return;
                }
                let previous = index.checked_sub(1).and_then(|i| state.pages.get(i));
                page_key(&self.endpoint, index, self.page_size, previous)
            };
            let Some(key) = key else {
                self.state.borrow_mut().pages.truncate(index);
                self.notify();
                return;
            };
            match self.fetch_into(index, key).await {
                Fetched::Stored | Fetched::AlreadyInFlight => {}
                Fetched::Failed => return,
            }
        }
    }

    fn grow_to(&self, size: usize) {
        let mut state = self.state.borrow_mut();
        state.size = state.size.max(size);
    }

    /// Fetches `key` and stores the result at `index`.
    async fn fetch_into(&self, index: usize, key: String) -> Fetched {
        if !self.state.borrow_mut().in_flight.insert(key.clone()) {
            debug!("{} already in flight", key);
            return Fetched::AlreadyInFlight;
        }
        self.notify();

        debug!("fetching log page {}", key);
        let result = self.source.fetch_page(&key).await;

        let fetched = {
            let mut state = self.state.borrow_mut();
            state.in_flight.remove(&key);
            match result {
                Ok(response) => {
                    let page = LogPage::new(index, response);
                    if index < state.pages.len() {
                        state.pages[index] = page;
                    } else {
                        state.pages.push(page);
                    }
                    state.error = None;
                    Fetched::Stored
                }
                Err(e) => {
                    warn!("failed to fetch log page {}: {}", key, e);
                    state.error = Some(e);
                    Fetched::Failed
                }
            }
        };
        self.notify();
        fetched
    }

    fn notify(&self) {
        let subscribers: Vec<Subscriber> = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Serves pages from memory and records every requested key.
    #[derive(Default)]
    struct FakeSource {
        pages: RefCell<HashMap<usize, Vec<LogEntry>>>,
        failing: RefCell<HashSet<usize>>,
        requests: RefCell<Vec<String>>,
        yield_first: Cell<bool>,
    }

    impl FakeSource {
        fn with_rows(page_size: usize, total: usize) -> Self {
            let source = FakeSource::default();
            let mut pages = HashMap::new();
            for id in 0..total {
                pages
                    .entry(id / page_size + 1)
                    .or_insert_with(Vec::new)
                    .push(json!({ "id": total - id }));
            }
            *source.pages.borrow_mut() = pages;
            source
        }

        fn page_number(key: &str) -> usize {
            let start = key.find("page=").unwrap() + 5;
            let end = key[start..].find('&').unwrap() + start;
            key[start..end].parse().unwrap()
        }
    }

    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    #[async_trait(?Send)]
    impl LogSource for Rc<FakeSource> {
        async fn fetch_page(&self, key: &str) -> Result<LogsResponse, FetchError> {
            self.requests.borrow_mut().push(key.to_string());
            if self.yield_first.get() {
                YieldOnce(false).await;
            }
            let page = FakeSource::page_number(key);
            if self.failing.borrow().contains(&page) {
                return Err(FetchError::Status {
                    status: 500,
                    url: key.to_string(),
                });
            }
            let rows = self.pages.borrow().get(&page).cloned().unwrap_or_default();
            Ok(LogsResponse { rows })
        }
    }

    fn config(page_size: usize) -> ModuleConfig {
        ModuleConfig {
            configuration_page_size: page_size,
            ..ModuleConfig::default()
        }
    }

    #[test]
    fn page_key_is_one_indexed_and_sorted_descending() {
        assert_eq!(
            page_key("/ws/sms/log", 0, 10, None).as_deref(),
            Some("/ws/sms/log?page=1&rows=10&sortColumn=id&sortDirection=desc")
        );
        let full = LogPage::new(0, LogsResponse { rows: vec![json!({})] });
        assert_eq!(
            page_key("/ws/sms/log", 1, 10, Some(&full)),
            page_key("/ws/sms/log", 1, 10, Some(&full))
        );
        let empty = LogPage::new(1, LogsResponse::default());
        assert_eq!(page_key("/ws/sms/log", 2, 10, Some(&empty)), None);
    }

    #[test]
    fn pages_are_flattened_in_fetch_order() {
        let source = Rc::new(FakeSource::with_rows(3, 7));
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(3));

        block_on(logs.load());
        assert_eq!(logs.entries().len(), 3);
        assert!(!logs.is_reaching_end());

        block_on(logs.next_page());
        block_on(logs.next_page());
        let ids: Vec<i64> = logs
            .entries()
            .iter()
            .map(|entry| entry["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3, 2, 1]);
        assert!(logs.is_reaching_end());
        assert_eq!(logs.size(), 3);
        assert!(!logs.is_loading());
        assert!(!logs.is_validating());
    }

    #[test]
    fn end_is_reached_on_exact_multiple_only_after_empty_page() {
        let source = Rc::new(FakeSource::with_rows(2, 4));
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(2));

        block_on(logs.load());
        block_on(logs.next_page());
        assert!(!logs.is_reaching_end());

        block_on(logs.next_page());
        assert!(logs.is_reaching_end());
        assert_eq!(logs.entries().len(), 4);
    }

    #[test]
    fn next_page_after_empty_page_is_a_no_op() {
        let source = Rc::new(FakeSource::with_rows(5, 0));
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(5));

        block_on(logs.load());
        assert!(logs.is_reaching_end());
        block_on(logs.next_page());
        block_on(logs.next_page());

        assert_eq!(source.requests.borrow().len(), 1);
        assert_eq!(logs.page_count(), 1);
    }

    #[test]
    fn failed_page_keeps_loaded_pages() {
        let source = Rc::new(FakeSource::with_rows(2, 6));
        source.failing.borrow_mut().insert(2);
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(2));

        block_on(logs.load());
        block_on(logs.next_page());

        assert_eq!(logs.entries().len(), 2);
        assert!(matches!(
            logs.error(),
            Some(FetchError::Status { status: 500, .. })
        ));

        source.failing.borrow_mut().clear();
        block_on(logs.next_page());
        assert_eq!(logs.entries().len(), 4);
        assert_eq!(logs.error(), None);
    }

    #[test]
    fn mutate_replaces_pages_in_place_and_keeps_the_count() {
        let source = Rc::new(FakeSource::with_rows(2, 4));
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(2));
        block_on(logs.load());
        block_on(logs.next_page());

        // A new entry arrives and shifts every row by one position.
        *source.pages.borrow_mut() = FakeSource::with_rows(2, 5).pages.take();
        block_on(logs.mutate());

        let ids: Vec<i64> = logs
            .entries()
            .iter()
            .map(|entry| entry["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![5, 4, 3, 2]);
        assert_eq!(logs.page_count(), 2);
        assert_eq!(logs.size(), 2);
        assert_eq!(source.requests.borrow().len(), 4);
    }

    fn ids<S: LogSource>(logs: &PaginatedLogs<S>) -> Vec<i64> {
        logs.entries()
            .iter()
            .map(|entry| entry["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn mutate_retries_a_first_page_that_failed() {
        let source = Rc::new(FakeSource::with_rows(2, 4));
        source.failing.borrow_mut().insert(1);
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(2));

        block_on(logs.load());
        assert_eq!(logs.page_count(), 0);
        assert_eq!(logs.size(), 1);
        assert!(logs.error().is_some());
        assert!(!logs.is_loading());

        source.failing.borrow_mut().clear();
        block_on(logs.mutate());

        assert_eq!(logs.page_count(), 1);
        assert_eq!(ids(&logs), vec![4, 3]);
        assert_eq!(logs.error(), None);
        assert_eq!(source.requests.borrow().len(), 2);
    }

    #[test]
    fn failure_during_mutate_keeps_the_remaining_pages() {
        let source = Rc::new(FakeSource::with_rows(2, 6));
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(2));
        block_on(logs.load());
        block_on(logs.next_page());
        block_on(logs.next_page());

        *source.pages.borrow_mut() = FakeSource::with_rows(2, 7).pages.take();
        source.failing.borrow_mut().insert(2);
        block_on(logs.mutate());

        // Page 1 was refreshed, pages 2 and 3 are the ones loaded before.
        assert_eq!(ids(&logs), vec![7, 6, 4, 3, 2, 1]);
        assert_eq!(logs.page_count(), 3);
        assert_eq!(logs.size(), 3);
        assert!(matches!(
            logs.error(),
            Some(FetchError::Status { status: 500, .. })
        ));
        // Nothing after the failed page was requested.
        assert_eq!(source.requests.borrow().len(), 5);
    }

    #[test]
    fn mutate_skips_a_page_in_flight_and_refreshes_the_rest() {
        let source = Rc::new(FakeSource::with_rows(2, 4));
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(2));
        block_on(logs.load());
        block_on(logs.next_page());

        *source.pages.borrow_mut() = FakeSource::with_rows(2, 5).pages.take();
        source.yield_first.set(true);
        block_on(async { futures::join!(logs.mutate(), logs.mutate()) });

        // Each page was re-fetched exactly once across both refreshes.
        let requests = source.requests.borrow();
        assert_eq!(requests.len(), 4);
        assert!(requests[2].contains("page=1"));
        assert!(requests[3].contains("page=2"));
        assert_eq!(ids(&logs), vec![5, 4, 3, 2]);
        assert_eq!(logs.error(), None);
    }

    #[test]
    fn concurrent_requests_for_the_same_page_are_deduplicated() {
        let source = Rc::new(FakeSource::with_rows(2, 6));
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(2));
        block_on(logs.load());

        source.yield_first.set(true);
        block_on(async { futures::join!(logs.next_page(), logs.next_page()) });

        let requests = source.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].contains("page=2"));
        assert_eq!(logs.entries().len(), 4);
    }

    #[test]
    fn loading_flag_only_covers_the_first_page() {
        let source = Rc::new(FakeSource::with_rows(2, 6));
        let logs = PaginatedLogs::new(Rc::clone(&source), &config(2));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handle = logs.clone();
        let recorded = Rc::clone(&seen);
        logs.subscribe(move || {
            recorded
                .borrow_mut()
                .push((handle.is_loading(), handle.is_validating()))
        });

        block_on(logs.load());
        block_on(logs.next_page());

        assert_eq!(
            *seen.borrow(),
            vec![(true, true), (false, false), (false, true), (false, false)]
        );
    }
}
