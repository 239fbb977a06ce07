//! Markup removal for policy pages.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::Html;

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Reduces an HTML document to its visible text.
///
/// The document is parsed with `scraper`, so every named and numeric entity
/// is decoded. Text under script and style elements is dropped, text nodes
/// are joined with spaces and whitespace runs (including non-breaking
/// spaces) collapse to a single space.
pub fn strip_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let visible: Vec<&str> = document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.parent().is_some_and(|parent| {
                parent
                    .value()
                    .as_element()
                    .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
            });
            (!hidden).then_some(&**text)
        })
        .collect();

    WHITESPACE.replace_all(&visible.join(" "), " ").trim().to_string()
}

/// Returns whether a path names an HTML document.
pub fn is_html_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Reads a text source, stripping markup from `.html`/`.htm` files.
pub fn read_text_source(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if is_html_path(path) {
        Ok(strip_html(&content))
    } else {
        Ok(content)
    }
}
