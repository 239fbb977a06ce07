//! Match records and the fixed confidence scale.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::taxonomy::DataCategory;

/// Confidence of a category-pattern match.
pub const CATEGORY_CONFIDENCE: f32 = 0.9;
/// Confidence of a context-pattern match.
pub const CONTEXT_CONFIDENCE: f32 = 0.8;
/// Confidence of a data-type match inside a collection context.
pub const DATA_TYPE_IN_CONTEXT_CONFIDENCE: f32 = 0.7;
/// Confidence of a bare data-type match.
pub const DATA_TYPE_CONFIDENCE: f32 = 0.5;

/// Context window, in characters, around category and context matches.
pub const NARROW_WINDOW: usize = 50;
/// Context window, in characters, around data-type matches.
pub const WIDE_WINDOW: usize = 100;

/// Rule that produced a match. Each tier carries a fixed confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Category-name pattern.
    Category,
    /// Collection-context pattern.
    Context,
    /// Data-type pattern with a collection indicator nearby.
    DataTypeInContext,
    /// Data-type pattern without a collection indicator.
    DataType,
}

impl MatchTier {
    /// Fixed confidence for this tier.
    pub const fn confidence(self) -> f32 {
        match self {
            Self::Category => CATEGORY_CONFIDENCE,
            Self::Context => CONTEXT_CONFIDENCE,
            Self::DataTypeInContext => DATA_TYPE_IN_CONTEXT_CONFIDENCE,
            Self::DataType => DATA_TYPE_CONFIDENCE,
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Context => write!(f, "context"),
            Self::DataTypeInContext => write!(f, "data_type_in_context"),
            Self::DataType => write!(f, "data_type"),
        }
    }
}

/// One matched occurrence of a category in text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Category the pattern belongs to.
    pub category: DataCategory,
    /// Literal text matched.
    pub matched_text: String,
    /// Surrounding text.
    pub context: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Rule that produced the match.
    pub tier: MatchTier,
}

impl CategoryMatch {
    /// Creates a match whose confidence is fixed by its tier.
    pub fn new(
        category: DataCategory,
        matched_text: impl Into<String>,
        context: impl Into<String>,
        tier: MatchTier,
    ) -> Self {
        Self {
            category,
            matched_text: matched_text.into(),
            context: context.into(),
            confidence: tier.confidence(),
            tier,
        }
    }
}

/// Keeps one match per lowercase literal, the one with highest confidence.
///
/// Survivors stay at the position where their literal was first seen. On a
/// confidence tie the earlier match wins.
pub fn dedup_by_literal(matches: Vec<CategoryMatch>) -> Vec<CategoryMatch> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<CategoryMatch> = Vec::with_capacity(matches.len());

    for candidate in matches {
        let key = candidate.matched_text.to_lowercase();
        match slots.get(&key) {
            Some(&slot) => {
                if candidate.confidence > kept[slot].confidence {
                    kept[slot] = candidate;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}

/// Returns `text` from `window` characters before `start` to `window`
/// characters after `end`, clamped to the text bounds.
///
/// `start` and `end` are byte offsets on character boundaries, as produced by
/// regex matches.
pub fn context_window(text: &str, start: usize, end: usize, window: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(window)
        .last()
        .map_or(start, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(window)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}
