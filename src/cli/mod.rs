//! CLI command implementations.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Search the journals catalog and print matching records |
//! | `serve` | Run the search form over HTTP |
//!
//! # Example Usage
//!
//! ```bash
//! # Free-text search
//! journal-search search Phys Rev
//!
//! # Title and title-variant search, every field, no cap
//! journal-search search -n -l -a Phys. Rev.
//!
//! # Web form on port 8080
//! journal-search serve --port 8080
//! ```

mod search;
mod serve;

pub use search::{RECORD_SEPARATOR, SearchCommand, SearchOutcome, USAGE};
pub use serve::ServeCommand;
