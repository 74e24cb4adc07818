//! # Journal Search
//!
//! Searches the INSPIRE journals catalog and renders matching records as
//! column-aligned text.
//!
//! The crate is organised leaf-first:
//!
//! - [`services::QueryBuilder`] turns a search value and flags into a backend query
//! - [`client::PaginatedFetcher`] walks the cursor-based result pages lazily
//! - [`rendering::FieldRenderer`] formats one record's fields, recursing into
//!   nested lists and mappings
//! - [`services::JournalSearchService`] ties the three together
//!
//! The binary exposes the service as a CLI (`journal-search search`) and as a
//! small web form (`journal-search serve`, feature `http`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use journal_search::{JournalSearchConfig, JournalSearchService, SearchFlags};
//!
//! # fn main() -> journal_search::Result<()> {
//! let config = JournalSearchConfig::default();
//! let service = JournalSearchService::from_config(&config);
//! let flags = SearchFlags::new("Phys Rev")?.name();
//! for record in service.search(&flags)?.records() {
//!     println!("{record}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
#[cfg(feature = "http")]
pub mod web;

// Re-exports for convenience
pub use client::{HttpTransport, PaginatedFetcher, SearchPage, SearchTransport};
pub use config::JournalSearchConfig;
pub use models::{FieldValue, Mapping, QueryString, RawRecord, RenderedRecord, ResultSet, SearchFlags};
pub use rendering::{FieldRenderer, FieldSpec};
pub use services::{JournalSearchService, QueryBuilder};

/// Error type for journal search operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty search value, malformed web parameters |
/// | `BackendRequest` | The catalog answers any page with a non-success status |
/// | `Transport` | Connect failures, timeouts, undecodable response bodies |
/// | `Render` | A record's metadata cannot be formatted |
/// | `OperationFailed` | Config file I/O, logging setup, server bind |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised before any network activity; never retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backend answered with a non-success status.
    ///
    /// Aborts the whole search. Records already yielded by the fetcher must not
    /// be treated as a complete or representative result.
    #[error("backend request to {url} failed with status {status}")]
    BackendRequest {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The backend could not be reached or its response could not be decoded.
    #[error("backend transport failed during '{operation}': {cause}")]
    Transport {
        /// The transport step that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A record could not be rendered.
    ///
    /// The service skips the offending record and keeps going.
    #[error("cannot render field '{field}': {cause}")]
    Render {
        /// The field (or record part) that failed.
        field: String,
        /// The underlying cause.
        cause: String,
    },

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Returns true for errors that originate from talking to the backend.
    #[must_use]
    pub const fn is_backend(&self) -> bool {
        matches!(self, Self::BackendRequest { .. } | Self::Transport { .. })
    }
}

/// Result type alias for journal search operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("empty search value".to_string());
        assert_eq!(err.to_string(), "invalid input: empty search value");

        let err = Error::BackendRequest {
            url: "https://example.org/api/journals".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "backend request to https://example.org/api/journals failed with status 503"
        );

        let err = Error::Render {
            field: "metadata".to_string(),
            cause: "not a mapping".to_string(),
        };
        assert_eq!(err.to_string(), "cannot render field 'metadata': not a mapping");
    }

    #[test]
    fn test_backend_classification() {
        assert!(
            Error::BackendRequest {
                url: String::new(),
                status: 500
            }
            .is_backend()
        );
        assert!(
            Error::Transport {
                operation: "search".to_string(),
                cause: "timeout".to_string()
            }
            .is_backend()
        );
        assert!(!Error::InvalidInput(String::new()).is_backend());
    }
}
