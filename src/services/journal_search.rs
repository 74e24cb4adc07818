//! Journal search orchestration.

use tracing::instrument;

use super::QueryBuilder;
use crate::client::{HttpTransport, PaginatedFetcher, SearchTransport};
use crate::config::JournalSearchConfig;
use crate::models::{QueryString, ResultSet, SearchFlags};
use crate::rendering::{FieldRenderer, FieldSpec};
use crate::Result;

/// Searches the journals collection and renders every match.
///
/// Query building, page traversal and rendering are delegated to
/// [`QueryBuilder`], [`PaginatedFetcher`] and [`FieldRenderer`]. The service
/// keeps no state between searches.
#[derive(Debug, Clone)]
pub struct JournalSearchService<T = HttpTransport> {
    fetcher: PaginatedFetcher<T>,
    builder: QueryBuilder,
    renderer: FieldRenderer,
}

impl JournalSearchService<HttpTransport> {
    /// Creates a service talking HTTP to the configured endpoint.
    #[must_use]
    pub fn from_config(config: &JournalSearchConfig) -> Self {
        let transport = HttpTransport::new(config.http).with_endpoint(config.endpoint.as_str());
        Self::new(transport)
    }
}

impl<T: SearchTransport> JournalSearchService<T> {
    /// Creates a service over a transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            fetcher: PaginatedFetcher::new(transport),
            builder: QueryBuilder::new(),
            renderer: FieldRenderer::new(),
        }
    }

    /// The underlying fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &PaginatedFetcher<T> {
        &self.fetcher
    }

    /// Runs a search and renders every record that carries metadata.
    ///
    /// Records without a `metadata` entry are dropped silently. Records whose
    /// metadata cannot be rendered are logged, counted in
    /// [`ResultSet::skipped`] and dropped. If nothing is left, the result holds
    /// a single "no records found" entry naming the query.
    ///
    /// The full result is always returned; capping is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns the first backend error encountered. Records fetched before the
    /// error are discarded.
    #[instrument(skip(self), fields(value = %flags.value(), exact = flags.exact, name = flags.name))]
    pub fn search(&self, flags: &SearchFlags) -> Result<ResultSet> {
        let query = self.builder.for_flags(flags);
        let fields = FieldSpec::select(flags.long);
        tracing::info!(query = %query, long = flags.long, "Searching journals");

        let mut records = Vec::new();
        let mut fetched = 0;
        let mut skipped = 0;

        for (position, raw) in self.fetcher.fetch(&query).enumerate() {
            let raw = raw?;
            fetched += 1;

            let Some(metadata) = raw.metadata() else {
                tracing::debug!(position, "Dropping record without metadata");
                continue;
            };

            match self.renderer.render(metadata, &fields) {
                Ok(rendered) => records.push(rendered),
                Err(e) => {
                    tracing::warn!(position, error = %e, "Skipping record that cannot be rendered");
                    skipped += 1;
                },
            }
        }

        tracing::info!(fetched, rendered = records.len(), skipped, "Search complete");

        if records.is_empty() {
            let message = self.no_records_message(&query);
            return Ok(ResultSet::no_match(query, message, fetched, skipped));
        }

        Ok(ResultSet::new(query, records, fetched, skipped))
    }

    /// The message shown when a search matched nothing.
    #[must_use]
    pub fn no_records_message(&self, query: &QueryString) -> String {
        let location = self
            .fetcher
            .transport()
            .describe_search(self.fetcher.collection(), query);
        format!("No records found for\n{location}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SearchPage;
    use crate::models::RawRecord;
    use crate::Error;
    use serde_json::json;

    /// Serves one fixed page.
    struct OnePage(serde_json::Value);

    impl SearchTransport for OnePage {
        fn search(&self, _collection: &str, _query: &QueryString) -> Result<SearchPage> {
            let hits = self.0.as_array().unwrap().iter().cloned().map(RawRecord::from).collect();
            Ok(SearchPage::new(hits, None))
        }

        fn follow(&self, next: &str) -> Result<SearchPage> {
            panic!("unexpected follow of {next}")
        }
    }

    /// Fails every request.
    struct Failing;

    impl SearchTransport for Failing {
        fn search(&self, collection: &str, _query: &QueryString) -> Result<SearchPage> {
            Err(Error::BackendRequest {
                url: collection.to_string(),
                status: 500,
            })
        }

        fn follow(&self, next: &str) -> Result<SearchPage> {
            panic!("unexpected follow of {next}")
        }
    }

    #[test]
    fn test_renders_metadata_records() {
        let service = JournalSearchService::new(OnePage(json!([
            {"metadata": {"short_title": "JHEP"}},
            {"metadata": {"short_title": "PRD"}},
        ])));
        let result = service.search(&SearchFlags::new("J").unwrap()).unwrap();

        assert_eq!(result.len(), 2);
        assert!(!result.is_no_match());
        assert!(result.records()[0].as_str().contains("short_title : JHEP"));
        assert!(result.records()[1].as_str().contains("short_title : PRD"));
    }

    #[test]
    fn test_records_without_metadata_dropped() {
        let service = JournalSearchService::new(OnePage(json!([
            {"id": 1},
            {"metadata": {"short_title": "JHEP"}},
        ])));
        let result = service.search(&SearchFlags::new("J").unwrap()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.fetched(), 2);
    }

    #[test]
    fn test_no_match_message_names_query() {
        let service = JournalSearchService::new(OnePage(json!([{"id": 1}])));
        let flags = SearchFlags::new("Phys Rev").unwrap().exact();
        let result = service.search(&flags).unwrap();

        assert!(result.is_no_match());
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.records()[0].as_str(),
            "No records found for\njournals?q=journal_title.title:\"Phys Rev\" OR short_title:\"Phys Rev\"\n"
        );
    }

    #[test]
    fn test_unrenderable_record_skipped() {
        let service = JournalSearchService::new(OnePage(json!([
            {"metadata": "just a string"},
            {"metadata": {"short_title": "JHEP"}},
        ])));
        let result = service.search(&SearchFlags::new("J").unwrap()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.skipped(), 1);
    }

    #[test]
    fn test_long_flag_selects_long_fields() {
        let service = JournalSearchService::new(OnePage(json!([
            {"metadata": {"control_number": 1213103, "short_title": "JHEP"}},
        ])));
        let short = service.search(&SearchFlags::new("J").unwrap()).unwrap();
        let long = service.search(&SearchFlags::new("J").unwrap().long()).unwrap();

        assert!(!short.records()[0].as_str().contains("control_number"));
        assert!(long.records()[0].as_str().contains("control_number : 1213103"));
    }

    #[test]
    fn test_backend_error_propagates() {
        let service = JournalSearchService::new(Failing);
        let err = service.search(&SearchFlags::new("J").unwrap()).unwrap_err();
        assert!(err.is_backend());
    }

    #[test]
    fn test_from_config_uses_endpoint() {
        let mut config = JournalSearchConfig::default();
        config.endpoint = "http://localhost:9999/api".to_string();
        let service = JournalSearchService::from_config(&config);
        assert_eq!(
            service.no_records_message(&QueryString::from("x")),
            "No records found for\nhttp://localhost:9999/api/journals?q=x\n"
        );
    }
}
