use serde::Deserialize;

/// Main configuration structure for Sku-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub client: ClientConfig,
    pub files: FilesConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Storefront search configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Search URL template; `{query}` is replaced by the encoded MPN
    #[serde(rename = "search-url")]
    pub search_url: String,

    /// Upper bound on every wait for a page element (seconds)
    #[serde(rename = "wait-timeout-secs")]
    pub wait_timeout_secs: u64,

    /// Number of price/condition/availability triples in the output header
    #[serde(rename = "max-candidates")]
    pub max_candidates: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            search_url:
                "https://www.serversupply.com/products/part_search/query_parts.asp?q={query}"
                    .to_string(),
            wait_timeout_secs: 30,
            max_candidates: 10,
        }
    }
}

/// HTTP page client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for a single page load (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Delay before the one reload while waiting for a selector (milliseconds)
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; sku-sweep/0.1)".to_string(),
            request_timeout_secs: 60,
            poll_interval_ms: 500,
        }
    }
}

/// Locations of the input, output, error and checkpoint files
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    #[serde(rename = "input-path")]
    pub input_path: String,

    #[serde(rename = "output-path")]
    pub output_path: String,

    #[serde(rename = "error-path")]
    pub error_path: String,

    #[serde(rename = "checkpoint-path")]
    pub checkpoint_path: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input_path: "input.txt".to_string(),
            output_path: "output.txt".to_string(),
            error_path: "error.txt".to_string(),
            checkpoint_path: "identification.txt".to_string(),
        }
    }
}

/// Session lifecycle configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Relaunch the page client after every failed request
    #[serde(rename = "restart-on-failure")]
    pub restart_on_failure: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Optional plain-text log file, written alongside console output
    #[serde(rename = "log-file")]
    pub log_file: Option<String>,
}
