//! Shared test fixtures.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[cfg(feature = "http")]
pub mod fake_catalog;

use journal_search::{Error, QueryString, RawRecord, Result, SearchPage, SearchTransport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// In-memory catalog serving a fixed sequence of pages.
///
/// Each page is handed out once; `follow` must be called with the link the
/// previous page advertised.
pub struct StubCatalog {
    pages: Mutex<VecDeque<Result<SearchPage>>>,
    requests: Mutex<Vec<String>>,
}

impl StubCatalog {
    /// A catalog with the given pages, linked `page/2`, `page/3`, ...
    pub fn with_pages(pages: Vec<Value>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, hits)| {
                let next = (i + 1 < count).then(|| format!("page/{}", i + 2));
                Ok(SearchPage::new(records(hits), next))
            })
            .collect();
        Self {
            pages: Mutex::new(pages),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A catalog with a single page and no next link.
    pub fn single_page(hits: Value) -> Self {
        Self::with_pages(vec![hits])
    }

    /// A catalog whose page `failing_page` (1-based) answers with `status`.
    pub fn failing_at(pages: Vec<Value>, failing_page: usize, status: u16) -> Self {
        let catalog = Self::with_pages(pages);
        {
            let mut queue = catalog.pages.lock().unwrap();
            queue[failing_page - 1] = Err(Error::BackendRequest {
                url: format!("page/{failing_page}"),
                status,
            });
        }
        catalog
    }

    /// Every request seen so far, as `search:<query>` or `follow:<link>`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn next_page(&self) -> Result<SearchPage> {
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("request beyond the last page")
    }
}

impl SearchTransport for StubCatalog {
    fn search(&self, collection: &str, query: &QueryString) -> Result<SearchPage> {
        assert_eq!(collection, "journals");
        self.requests.lock().unwrap().push(format!("search:{query}"));
        self.next_page()
    }

    fn follow(&self, next: &str) -> Result<SearchPage> {
        self.requests.lock().unwrap().push(format!("follow:{next}"));
        self.next_page()
    }
}

/// Converts a JSON array of hits into raw records.
pub fn records(hits: Value) -> Vec<RawRecord> {
    hits.as_array()
        .expect("hits must be an array")
        .iter()
        .cloned()
        .map(RawRecord::from)
        .collect()
}
