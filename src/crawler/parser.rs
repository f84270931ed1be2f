//! Markup helpers shared by the listing and detail extractors
//!
//! Every helper here returns an `Option`; a missing element, an unusable
//! selector or an unparseable value all collapse to `None` so callers can
//! leave the corresponding field empty instead of failing.

use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

static YEAR: OnceLock<Option<Regex>> = OnceLock::new();
static INTEGER: OnceLock<Option<Regex>> = OnceLock::new();
static DECIMAL: OnceLock<Option<Regex>> = OnceLock::new();

/// A single field probe: inspects a subtree and maybe yields a value
pub type Probe<T> = fn(ElementRef<'_>) -> Option<T>;

/// Runs probes in order and returns the first value produced
pub fn first_of<T>(root: ElementRef<'_>, probes: &[Probe<T>]) -> Option<T> {
    probes.iter().find_map(|probe| probe(root))
}

/// Parses a CSS selector, logging (rather than failing on) a bad one
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Unusable selector {:?}: {:?}", css, e);
            None
        }
    }
}

/// Finds the first element under `root` matching `css`
pub fn find_first<'a>(root: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    root.select(&selector).next()
}

/// Finds every element under `root` matching `css`, in document order
pub fn find_all<'a>(root: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(selector) => root.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Concatenated, trimmed text of an element and its descendants
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Reads an attribute, treating an empty value as absent
pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn capture(cell: &'static OnceLock<Option<Regex>>, pattern: &str, text: &str) -> Option<String> {
    let regex = cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()?;
    regex.find(text).map(|m| m.as_str().to_string())
}

/// First run of four digits, read as a year
pub fn first_year(text: &str) -> Option<i32> {
    capture(&YEAR, r"\d{4}", text)?.parse().ok()
}

/// First run of digits, read as a positive integer
pub fn first_integer(text: &str) -> Option<u32> {
    capture(&INTEGER, r"\d+", text)?
        .parse()
        .ok()
        .filter(|value| *value > 0)
}

/// First `<digits>.<digits>` number, read as a rating
pub fn first_decimal(text: &str) -> Option<f64> {
    capture(&DECIMAL, r"\d+\.\d+", text)?
        .parse()
        .ok()
        .filter(is_plausible_rating)
}

/// Parses a whole attribute value as a rating
pub fn parse_rating(value: &str) -> Option<f64> {
    value.trim().parse().ok().filter(is_plausible_rating)
}

fn is_plausible_rating(value: &f64) -> bool {
    value.is_finite() && (0.0..=10.0).contains(value)
}
