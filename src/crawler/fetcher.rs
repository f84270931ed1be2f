//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with a descriptive user agent and language preference
//! - GET requests with query-string parameters
//! - Error classification into a [`FetchResult`]
//!
//! Retries are deliberately absent: a failed search simply contributes
//! nothing to the catalog.

use crate::config::{SiteConfig, UserAgentConfig};
use crate::ReelError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Short description of a failed fetch, for logging
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Capability to retrieve a page
///
/// The planner only ever talks to this trait, so tests can serve canned
/// pages without a network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` with the given query-string parameters
    async fn fetch(&self, url: &Url, query: &[(String, String)]) -> FetchResult;
}

/// Formats the user agent string: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// The user agent and `Accept-Language` header are installed as client
/// defaults, so every request carries them.
///
/// # Example
///
/// ```no_run
/// use regional_reels::config::{SiteConfig, UserAgentConfig};
/// use regional_reels::crawler::build_http_client;
///
/// let client = build_http_client(&SiteConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    site: &SiteConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, ReelError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&site.accept_language)?,
    );

    let client = Client::builder()
        .user_agent(user_agent_string(user_agent))
        .default_headers(headers)
        .timeout(Duration::from_secs(site.timeout_secs))
        .connect_timeout(Duration::from_secs(site.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// [`Fetcher`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from configuration
    pub fn new(site: &SiteConfig, user_agent: &UserAgentConfig) -> Result<Self, ReelError> {
        Ok(Self {
            client: build_http_client(site, user_agent)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, query: &[(String, String)]) -> FetchResult {
        fetch_url(&self.client, url, query).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with readable body | `Success` |
/// | any other status | `HttpError` |
/// | timeout | `NetworkError` ("Request timeout") |
/// | connection failure | `NetworkError` ("Connection refused") |
/// | anything else | `NetworkError` with the client's message |
pub async fn fetch_url(client: &Client, url: &Url, query: &[(String, String)]) -> FetchResult {
    match client.get(url.clone()).query(query).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&SiteConfig::default(), &create_test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_accept_language_is_rejected() {
        let site = SiteConfig {
            accept_language: "en\nUS".to_string(),
            ..SiteConfig::default()
        };
        let result = build_http_client(&site, &create_test_config());
        assert!(matches!(result, Err(ReelError::InvalidHeader(_))));
    }

    #[test]
    fn test_user_agent_format() {
        assert_eq!(
            user_agent_string(&create_test_config()),
            "TestCrawler/1.0 (+https://example.com/about; admin@example.com)"
        );
    }

    #[test]
    fn test_failure_reason() {
        let ok = FetchResult::Success {
            final_url: "https://example.com/".to_string(),
            status_code: 200,
            body: String::new(),
        };
        assert_eq!(ok.failure_reason(), None);
        assert_eq!(
            FetchResult::HttpError { status_code: 503 }.failure_reason(),
            Some("HTTP 503".to_string())
        );
        assert_eq!(
            FetchResult::NetworkError {
                error: "Request timeout".to_string()
            }
            .failure_reason(),
            Some("Request timeout".to_string())
        );
    }

    #[test]
    fn test_into_body() {
        let ok = FetchResult::Success {
            final_url: "https://example.com/".to_string(),
            status_code: 200,
            body: "<html></html>".to_string(),
        };
        assert_eq!(ok.into_body(), Some("<html></html>".to_string()));
        assert_eq!(FetchResult::HttpError { status_code: 404 }.into_body(), None);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = build_http_client(&SiteConfig::default(), &create_test_config()).unwrap();
        let url = Url::parse("http://127.0.0.1:9/search/title/").unwrap();

        let result = fetch_url(&client, &url, &[]).await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }
}
