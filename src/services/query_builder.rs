//! Backend query construction.
//!
//! Turns a free-text search value and the `exact` / `name` flags into a query
//! in the catalog's search grammar:
//!
//! - `exact`: `journal_title.title:"<v>" OR short_title:"<v>"`
//! - `name`: the same two clauses plus `OR title_variants:"<normalized v>"`
//! - neither: `<v>` unchanged (free-text search)
//!
//! Embedded double quotes in the value are not escaped. A value such as
//! `Phys "Rev"` produces an unbalanced phrase that the backend interprets as it
//! sees fit.
// Allow expect() on the static regex pattern - it is guaranteed to compile
#![allow(clippy::expect_used)]

use crate::models::{QueryString, SearchFlags};
use regex::Regex;
use std::sync::LazyLock;

/// Field holding the full journal title.
pub const TITLE_FIELD: &str = "journal_title.title";

/// Field holding the abbreviated journal title.
pub const SHORT_TITLE_FIELD: &str = "short_title";

/// Field holding alternative spellings of the title.
pub const TITLE_VARIANTS_FIELD: &str = "title_variants";

/// Runs of dots, commas and spaces.
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[., ]+").expect("static regex: separator runs"));

/// Collapses runs of `.`, `,` and spaces to a single space and lowercases.
///
/// Separator runs at either end are dropped, so `"Phys. Rev."` becomes
/// `"phys rev"`. Applying it twice changes nothing.
///
/// # Examples
///
/// ```
/// use journal_search::services::normalize_name;
///
/// assert_eq!(normalize_name("Phys.Rev.,D"), "phys rev d");
/// ```
#[must_use]
pub fn normalize_name(value: &str) -> String {
    SEPARATOR_RUNS.replace_all(value, " ").trim().to_lowercase()
}

/// Builds backend queries from search flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    /// Creates a query builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the query for a search value.
    ///
    /// `exact` wins over `name` when both are set.
    #[must_use]
    pub fn build(&self, value: &str, exact: bool, name: bool) -> QueryString {
        if !exact && !name {
            return QueryString::new(value);
        }

        let mut query = [TITLE_FIELD, SHORT_TITLE_FIELD]
            .iter()
            .map(|field| phrase_clause(field, value))
            .collect::<Vec<_>>()
            .join(" OR ");

        if !exact {
            query.push_str(" OR ");
            query.push_str(&phrase_clause(TITLE_VARIANTS_FIELD, &normalize_name(value)));
        }

        QueryString::new(query)
    }

    /// Builds the query for a set of search flags.
    #[must_use]
    pub fn for_flags(&self, flags: &SearchFlags) -> QueryString {
        self.build(flags.value(), flags.exact, flags.name)
    }
}

/// `field:"value"`, with the value inserted verbatim.
fn phrase_clause(field: &str, value: &str) -> String {
    format!("{field}:\"{value}\"")
}
