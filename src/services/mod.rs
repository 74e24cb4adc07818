//! Search services.
//!
//! [`QueryBuilder`] turns user input into a backend query and
//! [`JournalSearchService`] runs the whole search: build the query, walk the
//! result pages, render each record.

mod journal_search;
mod query_builder;

pub use journal_search::JournalSearchService;
pub use query_builder::{
    QueryBuilder, SHORT_TITLE_FIELD, TITLE_FIELD, TITLE_VARIANTS_FIELD, normalize_name,
};
