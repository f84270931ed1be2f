use crate::config::types::{Config, OutputConfig, SearchConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Largest result count the search page honours for a single request
const MAX_PER_QUERY_CAP: u32 = 250;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_search_config(&config.search)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site settings
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if config.timeout_secs == 0 || config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeouts must be at least one second".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates search planning settings
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.region_code.trim().is_empty() {
        return Err(ConfigError::Validation(
            "region_code cannot be empty".to_string(),
        ));
    }

    if config.base_queries.is_empty() {
        return Err(ConfigError::Validation(
            "base_queries must contain at least one search term".to_string(),
        ));
    }

    if let Some(blank) = config
        .base_queries
        .iter()
        .chain(config.keywords.iter())
        .find(|q| q.trim().is_empty())
    {
        return Err(ConfigError::Validation(format!(
            "search terms cannot be blank, got '{}'",
            blank
        )));
    }

    if config.per_query_cap < 1 || config.per_query_cap > MAX_PER_QUERY_CAP {
        return Err(ConfigError::Validation(format!(
            "per_query_cap must be between 1 and {}, got {}",
            MAX_PER_QUERY_CAP, config.per_query_cap
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.catalog_path.is_empty() {
        return Err(ConfigError::Validation(
            "catalog_path cannot be empty".to_string(),
        ));
    }

    if config.limit < 1 {
        return Err(ConfigError::Validation(format!(
            "limit must be >= 1, got {}",
            config.limit
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
