//! Search CLI command.

use crate::models::{ResultSet, SearchFlags};
use crate::services::JournalSearchService;
use crate::client::SearchTransport;
use crate::{Error, Result};
use std::io::Write;

/// Line printed after every record.
pub const RECORD_SEPARATOR: &str = "==================";

/// Usage text shown with a capped result or an empty query.
pub const USAGE: &str = "\
Example: journal-search search Phys Rev
Possible arguments:
-n , --name:   short_title, journal_title, title_variants
-e , --exact:  short_title, journal_title only
-l , --long:   print all fields
-a , --all:    print all records (default up to 20)
";

/// What the search command ended up printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// This many blocks were printed.
    Printed(usize),
    /// Nothing was printed because the result held this many records.
    Capped(usize),
}

/// Search command handler.
///
/// Runs the search and applies the presentation cap.
#[derive(Debug, Clone, Copy)]
pub struct SearchCommand {
    max_results: usize,
}

impl SearchCommand {
    /// Creates a search command that prints at most `max_results` records
    /// unless `--all` is given.
    #[must_use]
    pub const fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    /// The presentation cap.
    #[must_use]
    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Runs a search and writes the result to `out`.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the search fails, or an error if `out`
    /// cannot be written.
    pub fn execute<T: SearchTransport>(
        &self,
        service: &JournalSearchService<T>,
        flags: &SearchFlags,
        out: &mut impl Write,
    ) -> Result<SearchOutcome> {
        let result = service.search(flags)?;
        self.write_results(&result, flags.all, out)
    }

    /// Writes a finished result: the query line, then every block followed by
    /// [`RECORD_SEPARATOR`]. Over the cap, writes the count and [`USAGE`]
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` cannot be written.
    pub fn write_results(
        &self,
        result: &ResultSet,
        all: bool,
        out: &mut impl Write,
    ) -> Result<SearchOutcome> {
        writeln!(out, "\n{}\n", result.query()).map_err(write_error)?;

        if result.exceeds_cap(self.max_results, all) {
            tracing::debug!(records = result.len(), limit = self.max_results, "Result capped");
            writeln!(
                out,
                "\n\n{} records -refine your search or use -a\n{USAGE}",
                result.len()
            )
            .map_err(write_error)?;
            return Ok(SearchOutcome::Capped(result.len()));
        }

        writeln!(out, "\n\n\n").map_err(write_error)?;
        for record in result.records() {
            writeln!(out, "{record}\n{RECORD_SEPARATOR}").map_err(write_error)?;
        }
        out.flush().map_err(write_error)?;

        Ok(SearchOutcome::Printed(result.len()))
    }
}

impl Default for SearchCommand {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_RESULTS)
    }
}

fn write_error(e: std::io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_output".to_string(),
        cause: e.to_string(),
    }
}
