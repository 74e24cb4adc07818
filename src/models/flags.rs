//! Search flags and backend query strings.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-supplied search parameters.
///
/// Drives both the shape of the backend query (`exact`, `name`) and the shape
/// of the output (`long`, `all`). The value is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFlags {
    value: String,
    /// Match title and short title verbatim only.
    pub exact: bool,
    /// Also match normalized title variants.
    pub name: bool,
    /// Render the long field set.
    pub long: bool,
    /// Print every result instead of capping.
    pub all: bool,
}

impl SearchFlags {
    /// Creates flags for a free-text search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `value` is empty or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::InvalidInput("search value must not be empty".to_string()));
        }
        Ok(Self {
            value,
            exact: false,
            name: false,
            long: false,
            all: false,
        })
    }

    /// Creates flags from individual search terms joined by single spaces.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the joined terms are empty.
    pub fn from_terms<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        let joined = terms
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(joined)
    }

    /// Returns the search value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Enables exact title matching.
    #[must_use]
    pub const fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Enables title-variant matching.
    #[must_use]
    pub const fn name(mut self) -> Self {
        self.name = true;
        self
    }

    /// Selects the long field set.
    #[must_use]
    pub const fn long(mut self) -> Self {
        self.long = true;
        self
    }

    /// Disables result capping.
    #[must_use]
    pub const fn all(mut self) -> Self {
        self.all = true;
        self
    }
}

/// A query in the backend's search grammar.
///
/// Produced once per search by [`crate::QueryBuilder`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryString(String);

impl QueryString {
    /// Creates a query string.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    /// Returns the query as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for QueryString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for QueryString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
