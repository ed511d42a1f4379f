use crate::taxonomy::TaxonomySource;
use std::env;
use std::path::PathBuf;

pub struct Config {
    pub host: String,
    pub port: u16,
    /// Where the taxonomy document lives. `None` means the built-in schema is used.
    pub taxonomy_source: Option<TaxonomySource>,
    /// Optional path to the `{"tools": [...]}` catalog served by default.
    pub tools_path: Option<PathBuf>,
    /// Maximum caller-supplied tools per filter/search request.
    pub max_tools: usize,
    pub max_body_bytes: usize,
    pub shutdown_timeout_secs: u64,
    /// Timeout for fetching a taxonomy document over HTTP.
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// `TAXONOMY_SOURCE` is read as a URL when it starts with `http://` or
    /// `https://`, otherwise as a file path.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            taxonomy_source: env::var("TAXONOMY_SOURCE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| TaxonomySource::parse(&s)),
            tools_path: env::var("TOOLS_PATH").ok().map(PathBuf::from),
            max_tools: env::var("MAX_TOOLS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()?,
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| "10485760".to_string())
                .parse()?,
            shutdown_timeout_secs: env::var("SHUTDOWN_TIMEOUT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            http_timeout_secs: env::var("HTTP_TIMEOUT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            taxonomy_source: None,
            tools_path: None,
            max_tools: 10_000,
            max_body_bytes: 10 * 1024 * 1024,
            shutdown_timeout_secs: 10,
            http_timeout_secs: 10,
        }
    }
}
