//! URL handling module for Regional Reels
//!
//! This module builds the site URLs the crawler requests (search pages and
//! title pages), pulls title identifiers out of links, and resolves asset
//! links such as poster images to absolute URLs.

mod normalize;
mod title;

pub use normalize::{parse_base_url, resolve_link, search_url};
pub use title::{extract_title_id, title_url};
