use crate::config::types::{ClientConfig, Config, FilesConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Placeholder replaced by the encoded MPN in the search URL template
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_client_config(&config.client, &config.site)?;
    validate_files_config(&config.files)?;
    Ok(())
}

/// Validates storefront search configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if !config.search_url.contains(QUERY_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "search_url must contain the {} placeholder, got '{}'",
            QUERY_PLACEHOLDER, config.search_url
        )));
    }

    let url = Url::parse(&config.search_url.replace(QUERY_PLACEHOLDER, "sku"))
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "search_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.wait_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "wait_timeout_secs must be > 0".to_string(),
        ));
    }

    if config.max_candidates < 1 || config.max_candidates > 50 {
        return Err(ConfigError::Validation(format!(
            "max_candidates must be between 1 and 50, got {}",
            config.max_candidates
        )));
    }

    Ok(())
}

/// Validates page client configuration
fn validate_client_config(config: &ClientConfig, site: &SiteConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be > 0".to_string(),
        ));
    }

    if config.poll_interval_ms < 10 || config.poll_interval_ms > site.wait_timeout_secs * 1000 {
        return Err(ConfigError::Validation(format!(
            "poll_interval_ms must be between 10 and the wait timeout ({}ms), got {}",
            site.wait_timeout_secs * 1000,
            config.poll_interval_ms
        )));
    }

    Ok(())
}

/// Validates file locations
fn validate_files_config(config: &FilesConfig) -> Result<(), ConfigError> {
    let paths = [
        ("input_path", &config.input_path),
        ("output_path", &config.output_path),
        ("error_path", &config.error_path),
        ("checkpoint_path", &config.checkpoint_path),
    ];

    for (name, path) in &paths {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    for (i, (name_a, path_a)) in paths.iter().enumerate() {
        for (name_b, path_b) in &paths[i + 1..] {
            if path_a == path_b {
                return Err(ConfigError::Validation(format!(
                    "{} and {} must point to different files, both are '{}'",
                    name_a, name_b, path_a
                )));
            }
        }
    }

    Ok(())
}
