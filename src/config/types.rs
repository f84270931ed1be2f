use serde::Deserialize;

/// Main configuration structure for Regional Reels
///
/// Every section has defaults, so an empty file (or no file at all) yields a
/// crawl of Nepali feature films on IMDb.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target site and transport settings
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site root, e.g. `https://www.imdb.com`
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Value sent in the `Accept-Language` header
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs", default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default = "default_contact_email")]
    pub contact_email: String,
}

/// Search planning configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Country code sent as the `countries` search parameter
    #[serde(rename = "region-code", default = "default_region_code")]
    pub region_code: String,

    /// Value of the `title_type` search parameter
    #[serde(rename = "title-type", default = "default_title_type")]
    pub title_type: String,

    /// Region name, synonyms and landmarks searched on every run
    #[serde(rename = "base-queries", default = "default_base_queries")]
    pub base_queries: Vec<String>,

    /// Extra search terms appended after the base queries
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Maximum number of listing cards taken from one search
    #[serde(rename = "per-query-cap", default = "default_per_query_cap")]
    pub per_query_cap: u32,

    /// Run the first base query once with the output limit as its cap
    /// before the keyword sweep
    #[serde(rename = "primary-sweep", default = "default_true")]
    pub primary_sweep: bool,

    /// Pause after each extracted card (milliseconds)
    #[serde(rename = "item-delay-ms", default = "default_item_delay_ms")]
    pub item_delay_ms: u64,

    /// Pause after each search query (milliseconds)
    #[serde(rename = "query-delay-ms", default = "default_query_delay_ms")]
    pub query_delay_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON catalog file
    #[serde(rename = "catalog-path", default = "default_catalog_path")]
    pub catalog_path: String,

    /// Maximum number of movies kept after ranking
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Number of ranked movies printed to stdout
    #[serde(rename = "top-n", default = "default_top_n")]
    pub top_n: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            accept_language: default_accept_language(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
            contact_email: default_contact_email(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            region_code: default_region_code(),
            title_type: default_title_type(),
            base_queries: default_base_queries(),
            keywords: default_keywords(),
            per_query_cap: default_per_query_cap(),
            primary_sweep: true,
            item_delay_ms: default_item_delay_ms(),
            query_delay_ms: default_query_delay_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            limit: default_limit(),
            top_n: default_top_n(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.imdb.com".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_crawler_name() -> String {
    "RegionalReels".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://github.com/regional-reels/regional-reels".to_string()
}

fn default_contact_email() -> String {
    "crawler@regional-reels.dev".to_string()
}

fn default_region_code() -> String {
    "np".to_string()
}

fn default_title_type() -> String {
    "feature".to_string()
}

fn default_base_queries() -> Vec<String> {
    [
        "Nepal",
        "Nepali",
        "Kathmandu",
        "Nepal movie",
        "Nepali film",
        "Nepal cinema",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect()
}

fn default_keywords() -> Vec<String> {
    ["Nepali", "Kathmandu", "Nepal movie"]
        .iter()
        .map(|q| q.to_string())
        .collect()
}

fn default_per_query_cap() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

fn default_item_delay_ms() -> u64 {
    500
}

fn default_query_delay_ms() -> u64 {
    1000
}

fn default_catalog_path() -> String {
    "nepali_movies_imdb.json".to_string()
}

fn default_limit() -> usize {
    50
}

fn default_top_n() -> usize {
    10
}
