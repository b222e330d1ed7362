use crate::config::types::{Config, CrawlerConfig, HttpConfig};
use crate::ConfigError;

const MAX_POOL_SIZE: usize = 1024;
const MAX_REDIRECTS: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates worker pool and admission settings
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_pool_size("downloaders", config.downloaders)?;
    validate_pool_size("extractors", config.extractors)?;

    if config.per_host < 1 {
        return Err(ConfigError::Validation(format!(
            "per_host must be >= 1, got {}",
            config.per_host
        )));
    }

    Ok(())
}

fn validate_pool_size(name: &str, size: usize) -> Result<(), ConfigError> {
    if size < 1 || size > MAX_POOL_SIZE {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_POOL_SIZE, size
        )));
    }
    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and timeout_secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    Ok(())
}
