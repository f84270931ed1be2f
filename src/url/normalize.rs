use url::Url;

/// Parses the configured site root
///
/// # Examples
///
/// ```
/// use regional_reels::url::parse_base_url;
///
/// let base = parse_base_url("https://www.imdb.com").unwrap();
/// assert_eq!(base.as_str(), "https://www.imdb.com/");
/// ```
pub fn parse_base_url(base: &str) -> Result<Url, url::ParseError> {
    Url::parse(base.trim())
}

/// Builds the search endpoint URL (`<base>/search/title/`)
pub fn search_url(base: &Url) -> Result<Url, url::ParseError> {
    base.join("/search/title/")
}

/// Resolves a link found in a page to an absolute URL
///
/// Returns None if the link should be ignored:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - anything that does not resolve to HTTP(S)
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
