//! Rendered output of a search.

use super::QueryString;
use std::fmt;

/// One formatted record, ready to print as preformatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRecord(String);

impl RenderedRecord {
    /// Wraps rendered text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of lines in the rendered text.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl fmt::Display for RenderedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The rendered records of one search.
///
/// When nothing matched, `records` holds a single synthetic "no records"
/// entry and [`ResultSet::is_no_match`] is true.
#[derive(Debug, Clone)]
pub struct ResultSet {
    query: QueryString,
    records: Vec<RenderedRecord>,
    fetched: usize,
    skipped: usize,
    no_match: bool,
}

impl ResultSet {
    /// Builds a result set from rendered records.
    #[must_use]
    pub const fn new(
        query: QueryString,
        records: Vec<RenderedRecord>,
        fetched: usize,
        skipped: usize,
    ) -> Self {
        Self {
            query,
            records,
            fetched,
            skipped,
            no_match: false,
        }
    }

    /// Builds the single-entry result for a search that matched nothing.
    #[must_use]
    pub fn no_match(query: QueryString, message: String, fetched: usize, skipped: usize) -> Self {
        Self {
            query,
            records: vec![RenderedRecord::new(message)],
            fetched,
            skipped,
            no_match: true,
        }
    }

    /// The query the records were fetched with.
    #[must_use]
    pub const fn query(&self) -> &QueryString {
        &self.query
    }

    /// The rendered records, in backend order.
    #[must_use]
    pub fn records(&self) -> &[RenderedRecord] {
        &self.records
    }

    /// Number of rendered blocks, including a synthetic "no records" block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Never true: an empty search still yields the "no records" block.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of raw records pulled from the backend.
    #[must_use]
    pub const fn fetched(&self) -> usize {
        self.fetched
    }

    /// Number of records dropped because they could not be rendered.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// True when the only entry is the synthetic "no records" message.
    #[must_use]
    pub const fn is_no_match(&self) -> bool {
        self.no_match
    }

    /// Presentation cap: true if more than `limit` records would be shown and
    /// the caller did not ask for all of them.
    #[must_use]
    pub fn exceeds_cap(&self, limit: usize, all: bool) -> bool {
        !all && self.len() > limit
    }

    /// Consumes the set, returning the rendered records.
    #[must_use]
    pub fn into_records(self) -> Vec<RenderedRecord> {
        self.records
    }
}
