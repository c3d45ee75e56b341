//! Chart markup parsing
//!
//! Titles sit in `<h3>` elements inside the nested list of each chart
//! entry (`li ul li h3`). Document order is chart rank.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li ul li h3").expect("static selector is valid"));

/// Extract the ordered song titles from a chart page
///
/// Fails with `ParseError::NoSongs` when nothing matches, so callers never
/// mistake a changed page layout for an empty chart.
pub fn parse_chart(html: &str) -> Result<Vec<String>, ParseError> {
    let document = Html::parse_document(html);

    let titles: Vec<String> = document
        .select(&TITLE_SELECTOR)
        .map(element_text)
        .filter(|title| !title.is_empty())
        .collect();

    if titles.is_empty() {
        return Err(ParseError::NoSongs);
    }

    tracing::debug!(count = titles.len(), "Parsed chart titles");
    Ok(titles)
}

/// Text of an element with every text node trimmed, joined without separator
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
