//! Lazy traversal of cursor-paginated search results.
//!
//! [`Pages`] is a two-state machine. While it holds a page it yields that
//! page's records one by one; once they run out it follows the page's `next`
//! link, or stops for good if there is none. A failed request is yielded as a
//! single `Err` and ends the stream, so callers see the records already
//! produced followed by the error.

use super::SearchTransport;
use crate::Result;
use crate::models::{QueryString, RawRecord};
use std::iter::FusedIterator;

/// The catalog collection holding journal records.
pub const JOURNALS_COLLECTION: &str = "journals";

/// Streams search results across pages.
#[derive(Debug, Clone)]
pub struct PaginatedFetcher<T> {
    transport: T,
    collection: String,
}

impl<T: SearchTransport> PaginatedFetcher<T> {
    /// Creates a fetcher over the journals collection.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            collection: JOURNALS_COLLECTION.to_string(),
        }
    }

    /// Sets the collection to search.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// The collection searched.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Starts a fresh traversal for `query`.
    ///
    /// No request is sent until the returned iterator is first polled.
    /// Dropping the iterator abandons the traversal.
    #[must_use]
    pub fn fetch(&self, query: &QueryString) -> Pages<'_, T> {
        Pages {
            transport: &self.transport,
            collection: &self.collection,
            state: PageState::Start(query.clone()),
            pages_loaded: 0,
        }
    }
}

/// Iterator over the records of one search; see [`PaginatedFetcher::fetch`].
#[derive(Debug)]
pub struct Pages<'a, T> {
    transport: &'a T,
    collection: &'a str,
    state: PageState,
    pages_loaded: usize,
}

#[derive(Debug)]
enum PageState {
    /// Nothing requested yet.
    Start(QueryString),
    /// Yielding the records of the current page.
    HasPage {
        hits: std::vec::IntoIter<RawRecord>,
        next: Option<String>,
    },
    /// Terminal: last page drained or a request failed.
    Exhausted,
}

enum Step {
    Yield(RawRecord),
    Request(PageRequest),
    Finished,
}

enum PageRequest {
    Search(QueryString),
    Follow(String),
}

impl<T: SearchTransport> Pages<'_, T> {
    /// Number of pages fetched so far.
    #[must_use]
    pub const fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    fn load(&self, request: &PageRequest) -> Result<super::SearchPage> {
        match request {
            PageRequest::Search(query) => self.transport.search(self.collection, query),
            PageRequest::Follow(url) => self.transport.follow(url),
        }
    }
}

impl<T: SearchTransport> Iterator for Pages<'_, T> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match &mut self.state {
                PageState::Exhausted => Step::Finished,
                PageState::Start(query) => Step::Request(PageRequest::Search(query.clone())),
                PageState::HasPage { hits, next } => match hits.next() {
                    Some(record) => Step::Yield(record),
                    None => match next.take() {
                        Some(url) => Step::Request(PageRequest::Follow(url)),
                        None => Step::Finished,
                    },
                },
            };

            match step {
                Step::Yield(record) => return Some(Ok(record)),
                Step::Finished => {
                    if !matches!(self.state, PageState::Exhausted) {
                        tracing::debug!(pages = self.pages_loaded, "Pagination exhausted");
                        self.state = PageState::Exhausted;
                    }
                    return None;
                },
                Step::Request(request) => match self.load(&request) {
                    Ok(page) => {
                        self.pages_loaded += 1;
                        tracing::debug!(
                            page = self.pages_loaded,
                            records = page.hits.len(),
                            has_next = page.next.is_some(),
                            "Loaded result page"
                        );
                        self.state = PageState::HasPage {
                            hits: page.hits.into_iter(),
                            next: page.next,
                        };
                    },
                    Err(e) => {
                        tracing::warn!(page = self.pages_loaded + 1, error = %e, "Pagination aborted");
                        self.state = PageState::Exhausted;
                        return Some(Err(e));
                    },
                },
            }
        }
    }
}

impl<T: SearchTransport> FusedIterator for Pages<'_, T> {}
