//! Single-title (detail page) extraction
//!
//! Detail pages carry `data-testid` markers for most fields. Each field is
//! read through an ordered list of probes; the first probe that yields a
//! value wins and a field nobody can read stays empty. Extraction never fails.

use crate::crawler::parser::{
    attr, element_text, find_all, find_first, first_decimal, first_integer, first_of, first_year,
    Probe,
};
use crate::model::MovieRecord;
use crate::url::resolve_link;
use scraper::{ElementRef, Html};
use url::Url;

const TITLE_PROBES: &[Probe<String>] = &[hero_title];
const YEAR_PROBES: &[Probe<i32>] = &[release_year_marker, release_info_link];
const RATING_PROBES: &[Probe<f64>] = &[rating_group];
const RUNTIME_PROBES: &[Probe<u32>] = &[techspec_runtime];
const DESCRIPTION_PROBES: &[Probe<String>] = &[extended_plot, short_plot];
const POSTER_PROBES: &[Probe<String>] = &[hero_poster];

/// Extracts a movie record from a detail page
///
/// The returned record always carries `id`. A page whose structure is not
/// recognized yields a record with nothing but the identifier. A relative
/// poster link is resolved against `base_url`.
pub fn extract_detail(html: &str, id: &str, base_url: &Url) -> MovieRecord {
    let document = Html::parse_document(html);
    extract_detail_document(&document, id, base_url)
}

/// Extracts a movie record from an already parsed detail page
pub fn extract_detail_document(document: &Html, id: &str, base_url: &Url) -> MovieRecord {
    let root = document.root_element();

    let mut record = MovieRecord::new(id);
    record.title = first_of(root, TITLE_PROBES);
    record.year = first_of(root, YEAR_PROBES);
    record.rating = first_of(root, RATING_PROBES);
    record.runtime_minutes = first_of(root, RUNTIME_PROBES);
    record.genres = genre_links(root);
    record.description = first_of(root, DESCRIPTION_PROBES);
    record.poster_url =
        first_of(root, POSTER_PROBES).and_then(|src| resolve_link(&src, base_url));

    record
}

fn hero_title(root: ElementRef<'_>) -> Option<String> {
    find_first(root, r#"h1[data-testid="hero-title-block__title"]"#).map(element_text)
}

fn release_year_marker(root: ElementRef<'_>) -> Option<i32> {
    find_first(root, "span.sc-8c396aa2-2").and_then(|span| first_year(&element_text(span)))
}

fn release_info_link(root: ElementRef<'_>) -> Option<i32> {
    find_first(root, r#"a[href*="/releaseinfo"]"#).and_then(|a| first_year(&element_text(a)))
}

/// The rating marker also contains the vote count ("7.8/10 1.2K"), so the
/// rating is pattern-matched rather than parsed from the whole text.
fn rating_group(root: ElementRef<'_>) -> Option<f64> {
    find_first(root, r#"span[data-testid="ratingGroup--imdb-rating"]"#)
        .and_then(|span| first_decimal(&element_text(span)))
}

fn techspec_runtime(root: ElementRef<'_>) -> Option<u32> {
    let item = find_first(root, r#"li[data-testid="title-techspec_runtime"]"#)?;
    let value = find_first(item, "div")?;
    first_integer(&element_text(value))
}

fn extended_plot(root: ElementRef<'_>) -> Option<String> {
    find_first(root, r#"span[data-testid="plot-xl"]"#).map(element_text)
}

fn short_plot(root: ElementRef<'_>) -> Option<String> {
    find_first(root, r#"span[data-testid="plot-l"]"#).map(element_text)
}

/// Unlike listing cards, the hero poster has no deferred-load attribute.
fn hero_poster(root: ElementRef<'_>) -> Option<String> {
    find_first(root, r#"img[data-testid="hero-poster-img"]"#).and_then(|img| attr(img, "src"))
}

/// Every genre link on the page, in document order, duplicates included
fn genre_links(root: ElementRef<'_>) -> Vec<String> {
    find_all(root, r#"a[href*="/genre/"]"#)
        .into_iter()
        .map(element_text)
        .collect()
}
