//! Configuration management.
//!
//! Configuration comes from, in increasing precedence: built-in defaults, a
//! TOML file, and `JOURNAL_SEARCH_*` environment variables.

use crate::client::{HttpConfig, HttpTransport};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_PATH_ENV: &str = "JOURNAL_SEARCH_CONFIG_PATH";

/// Default presentation cap on printed records.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Main configuration for journal search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalSearchConfig {
    /// Catalog API base URL.
    pub endpoint: String,
    /// Records printed before a search must be refined or `--all` given.
    pub max_results: usize,
    /// HTTP client settings.
    pub http: HttpConfig,
    /// Web form settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Web form listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Logging settings as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `journal_search=debug`.
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Log file; stderr when absent.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Catalog API base URL.
    pub endpoint: Option<String>,
    /// Max printed results.
    pub max_results: Option<usize>,
    /// HTTP section.
    pub http: Option<ConfigFileHttp>,
    /// Server section.
    pub server: Option<ConfigFileServer>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// HTTP section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileHttp {
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
    /// Skip TLS certificate validation.
    pub accept_invalid_certs: Option<bool>,
}

/// Server section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileServer {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
}

impl Default for JournalSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: HttpTransport::DEFAULT_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            http: HttpConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl JournalSearchConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration the way the binary does.
    ///
    /// An explicit `path` wins, then [`CONFIG_PATH_ENV`], then the default
    /// locations. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        if let Some(config_path) = path {
            return Ok(Self::load_from_file(config_path)?.with_env_overrides());
        }

        if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
            if !config_path.trim().is_empty() {
                return Ok(Self::load_from_file(Path::new(&config_path))?.with_env_overrides());
            }
        }

        Ok(Self::load_default().with_env_overrides())
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::parse(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML of the expected shape.
    pub fn parse(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/journal-search/` on macOS)
    /// 2. XDG config dir (`~/.config/journal-search/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs
            .config_dir()
            .join("journal-search")
            .join("config.toml");
        if platform_config.exists() {
            match Self::load_from_file(&platform_config) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %platform_config.display(), error = %e, "Ignoring config file"),
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("journal-search")
            .join("config.toml");
        if xdg_config.exists() {
            match Self::load_from_file(&xdg_config) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %xdg_config.display(), error = %e, "Ignoring config file"),
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `JournalSearchConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = file.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(max_results) = file.max_results {
            config.max_results = max_results;
        }
        if let Some(http) = file.http {
            if let Some(v) = http.timeout_ms {
                config.http.timeout_ms = v;
            }
            if let Some(v) = http.connect_timeout_ms {
                config.http.connect_timeout_ms = v;
            }
            if let Some(v) = http.accept_invalid_certs {
                config.http.accept_invalid_certs = v;
            }
        }
        if let Some(server) = file.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("JOURNAL_SEARCH_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.endpoint = endpoint;
            }
        }
        if let Ok(v) = std::env::var("JOURNAL_SEARCH_MAX_RESULTS") {
            if let Ok(max_results) = v.parse::<usize>() {
                self.max_results = max_results;
            }
        }
        self.http = self.http.with_env_overrides();
        self
    }

    /// Sets the catalog endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
