//! Search-results (listing page) extraction
//!
//! A listing page holds one `div.lister-item` card per movie. Each card is
//! turned into a [`MovieRecord`] independently; only the title link is
//! mandatory, every other field is best effort.

use crate::crawler::parser::{
    attr, element_text, find_all, find_first, first_integer, first_year, parse_rating, selector,
};
use crate::model::MovieRecord;
use crate::url::{extract_title_id, resolve_link, title_url};
use scraper::{ElementRef, Html};
use url::Url;

/// Selector for one movie card on a listing page
pub const CARD_SELECTOR: &str = "div.lister-item";

/// Extracts up to `cap` cards from a listing page
///
/// Returns one entry per card considered, in document order. A card that
/// lacks a usable title link yields `None`, so callers can count drops.
/// If the card container itself cannot be located the page yields nothing.
pub fn extract_listing(html: &str, base_url: &Url, cap: usize) -> Vec<Option<MovieRecord>> {
    let document = Html::parse_document(html);

    let Some(card_selector) = selector(CARD_SELECTOR) else {
        tracing::warn!("Listing card container could not be located");
        return Vec::new();
    };

    document
        .select(&card_selector)
        .take(cap)
        .map(|card| extract_card(card, base_url))
        .collect()
}

/// Extracts a movie record from a single listing card
///
/// # Field rules
///
/// | Field | Source |
/// |-------|--------|
/// | id, title | `h3.lister-item-header a` text and `/title/<id>/` href (mandatory) |
/// | year | first 4-digit run of `span.lister-item-year` in the heading |
/// | rating | `data-value` of `div.ratings-imdb-rating` |
/// | runtime | first integer in `span.runtime` |
/// | genres | `span.genre` split on commas |
/// | description | second `p.text-muted`, empty if fewer than two |
/// | poster | `img.loadlate`, `loadlate` attribute before `src` |
///
/// The description rule is positional: the first muted paragraph is the
/// certificate/runtime/genre line, the second holds the plot. It is tied to
/// the current page layout and breaks if the site reorders those paragraphs.
pub fn extract_card(card: ElementRef<'_>, base_url: &Url) -> Option<MovieRecord> {
    let heading = find_first(card, "h3.lister-item-header")?;
    let link = find_first(heading, "a")?;

    let id = link.value().attr("href").and_then(extract_title_id)?;

    let mut record = MovieRecord::new(id);
    record.title = Some(element_text(link));
    record.year = find_first(heading, "span.lister-item-year")
        .and_then(|span| first_year(&element_text(span)));
    record.rating = find_first(card, "div.ratings-imdb-rating")
        .and_then(|div| div.value().attr("data-value"))
        .and_then(parse_rating);
    record.runtime_minutes =
        find_first(card, "span.runtime").and_then(|span| first_integer(&element_text(span)));
    record.genres = find_first(card, "span.genre")
        .map(|span| split_genres(&element_text(span)))
        .unwrap_or_default();
    record.description = Some(
        find_all(card, "p.text-muted")
            .get(1)
            .map(|p| element_text(*p))
            .unwrap_or_default(),
    );
    record.poster_url = find_first(card, "img.loadlate")
        .and_then(|img| attr(img, "loadlate").or_else(|| attr(img, "src")))
        .and_then(|src| resolve_link(&src, base_url));
    record.source_url = title_url(base_url, &record.id).ok().map(String::from);

    tracing::trace!("Extracted listing card {}", record.id);
    Some(record)
}

/// Splits a comma-separated genre line, trimming each token
fn split_genres(text: &str) -> Vec<String> {
    text.split(',').map(|g| g.trim().to_string()).collect()
}
