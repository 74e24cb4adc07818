//! Serve CLI command (search form over HTTP).

use crate::config::{JournalSearchConfig, ServerConfig};
use crate::Result;

/// Serve command handler.
///
/// Holds command-line overrides for the configured listener.
#[derive(Debug, Clone, Default)]
pub struct ServeCommand {
    host: Option<String>,
    port: Option<u16>,
}

impl ServeCommand {
    /// Creates a serve command.
    #[must_use]
    pub const fn new(host: Option<String>, port: Option<u16>) -> Self {
        Self { host, port }
    }

    /// Applies the overrides to the configured listener.
    #[must_use]
    pub fn server_config(&self, configured: &ServerConfig) -> ServerConfig {
        ServerConfig {
            host: self.host.clone().unwrap_or_else(|| configured.host.clone()),
            port: self.port.unwrap_or(configured.port),
        }
    }

    /// Runs the web form until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    #[cfg(feature = "http")]
    pub fn run(&self, config: &JournalSearchConfig) -> Result<()> {
        let mut config = config.clone();
        config.server = self.server_config(&config.server);
        crate::web::serve(&config)
    }

    /// Runs the web form (feature not enabled).
    #[cfg(not(feature = "http"))]
    pub fn run(&self, _config: &JournalSearchConfig) -> Result<()> {
        Err(crate::Error::OperationFailed {
            operation: "serve".to_string(),
            cause: "built without the 'http' feature".to_string(),
        })
    }
}
