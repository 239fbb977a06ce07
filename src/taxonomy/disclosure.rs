//! Store-disclosure label parsing.
//!
//! Store listings declare data handling under fixed section headings. Reading
//! those headings gives the "raw" disclosure categories, available without any
//! text analysis.

use std::collections::BTreeSet;

use crate::taxonomy::{DataCategory, Vocabulary};

/// Returns the categories whose section labels appear in a disclosure.
///
/// Matching is case-insensitive containment. Labels outside the taxonomy are
/// recognised and ignored.
pub fn parse_disclosure_labels(vocabulary: &Vocabulary, text: &str) -> BTreeSet<DataCategory> {
    let text = text.to_lowercase();
    vocabulary
        .disclosure_labels()
        .iter()
        .filter(|label| text.contains(&label.label.to_lowercase()))
        .filter_map(|label| label.category)
        .collect()
}
