use regex::Regex;
use std::sync::OnceLock;
use url::Url;

static TITLE_PATH: OnceLock<Option<Regex>> = OnceLock::new();

/// Extracts the title identifier from a `/title/<ID>/` link
///
/// Works on relative paths as well as absolute URLs; anything after the
/// identifier segment (query strings, `?ref_=` tails) is ignored.
///
/// # Examples
///
/// ```
/// use regional_reels::url::extract_title_id;
///
/// assert_eq!(
///     extract_title_id("/title/tt0123456/?ref_=adv_li_tt"),
///     Some("tt0123456".to_string())
/// );
/// assert_eq!(extract_title_id("/name/nm0000001/"), None);
/// ```
pub fn extract_title_id(href: &str) -> Option<String> {
    let pattern = TITLE_PATH
        .get_or_init(|| Regex::new(r"/title/(tt\d+)/").ok())
        .as_ref()?;

    pattern
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Builds the detail page URL for a title identifier
///
/// # Examples
///
/// ```
/// use regional_reels::url::title_url;
/// use url::Url;
///
/// let base = Url::parse("https://www.imdb.com").unwrap();
/// let url = title_url(&base, "tt0123456").unwrap();
/// assert_eq!(url.as_str(), "https://www.imdb.com/title/tt0123456/");
/// ```
pub fn title_url(base: &Url, id: &str) -> Result<Url, url::ParseError> {
    base.join(&format!("/title/{}/", id))
}
