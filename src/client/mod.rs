//! Catalog search client.
//!
//! The [`SearchTransport`] trait is the seam to the remote catalog: one call
//! for the initial search request and one for following a `next` link.
//! [`HttpTransport`] implements it over blocking HTTP, and
//! [`PaginatedFetcher`] turns it into a lazy stream of records.

mod http;
mod pagination;

pub use http::{HttpConfig, HttpTransport, build_http_client};
pub use pagination::{JOURNALS_COLLECTION, Pages, PaginatedFetcher};

use crate::models::{QueryString, RawRecord};
use crate::{Error, Result};
use serde::Deserialize;

/// Transport to the catalog's search API.
pub trait SearchTransport: Send + Sync {
    /// Runs `GET <endpoint>/<collection>?q=<query>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendRequest`] on a non-success status and
    /// [`Error::Transport`] if the request cannot be completed or decoded.
    fn search(&self, collection: &str, query: &QueryString) -> Result<SearchPage>;

    /// Runs `GET <next>` for a continuation link returned by a previous page.
    ///
    /// # Errors
    ///
    /// Same as [`SearchTransport::search`].
    fn follow(&self, next: &str) -> Result<SearchPage>;

    /// Human-readable location of a search, used in "no records" messages.
    fn describe_search(&self, collection: &str, query: &QueryString) -> String {
        format!("{collection}?q={query}")
    }
}

impl<T: SearchTransport + ?Sized> SearchTransport for &T {
    fn search(&self, collection: &str, query: &QueryString) -> Result<SearchPage> {
        (**self).search(collection, query)
    }

    fn follow(&self, next: &str) -> Result<SearchPage> {
        (**self).follow(next)
    }

    fn describe_search(&self, collection: &str, query: &QueryString) -> String {
        (**self).describe_search(collection, query)
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// The records on this page, in backend order.
    pub hits: Vec<RawRecord>,
    /// Link to the next page; `None` on the last page.
    pub next: Option<String>,
}

impl SearchPage {
    /// Creates a page.
    #[must_use]
    pub const fn new(hits: Vec<RawRecord>, next: Option<String>) -> Self {
        Self { hits, next }
    }

    /// Parses a `{hits: {hits: [...]}, links: {next?}}` response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the body is not JSON of that shape.
    pub fn parse(body: &str) -> Result<Self> {
        let response: SearchResponse =
            serde_json::from_str(body).map_err(|e| Error::Transport {
                operation: "decode_search_page".to_string(),
                cause: e.to_string(),
            })?;
        Ok(response.into())
    }
}

/// Wire shape of a search response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    hits: HitsEnvelope,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    next: Option<String>,
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        Self {
            hits: response.hits.hits.into_iter().map(RawRecord::from).collect(),
            next: response.links.next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_with_next() {
        let page = SearchPage::parse(
            r#"{"hits": {"hits": [{"metadata": {}}, {"id": 2}], "total": 2},
                "links": {"self": "s", "next": "https://example.org/api/journals?page=2"}}"#,
        )
        .unwrap();
        assert_eq!(page.hits.len(), 2);
        assert_eq!(page.next.as_deref(), Some("https://example.org/api/journals?page=2"));
    }

    #[test]
    fn test_parse_page_without_links() {
        let page = SearchPage::parse(r#"{"hits": {"hits": []}}"#).unwrap();
        assert!(page.hits.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_parse_page_links_without_next() {
        let page = SearchPage::parse(r#"{"hits": {"hits": []}, "links": {"self": "x"}}"#).unwrap();
        assert!(page.next.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_hits() {
        let err = SearchPage::parse(r#"{"links": {}}"#).unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert!(SearchPage::parse("not json").is_err());
    }
}
