//! Pattern classifier and category extractor.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::classifier::indicators::CollectionIndicators;
use crate::classifier::matches::{
    context_window, dedup_by_literal, CategoryMatch, MatchTier, NARROW_WINDOW, WIDE_WINDOW,
};
use crate::error::{validate_min_confidence, AuditError, TaxonomyError};
use crate::taxonomy::{DataCategory, PatternKind, PatternTable};

/// Default confidence threshold.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.3;

/// Matches per category; categories without surviving matches are absent.
pub type CategoryMatches = BTreeMap<DataCategory, Vec<CategoryMatch>>;

/// Scans text against a pattern table.
///
/// Holds only read-only state, so one classifier can be shared across threads.
#[derive(Debug, Clone)]
pub struct PatternClassifier<'t> {
    table: &'t PatternTable,
    indicators: CollectionIndicators,
}

impl PatternClassifier<'static> {
    /// Creates a classifier over the builtin table and its default indicators.
    pub fn builtin() -> Result<Self, TaxonomyError> {
        let table = PatternTable::builtin()?;
        Ok(Self::new(table, table.collection_indicators().clone()))
    }
}

impl<'t> PatternClassifier<'t> {
    /// Creates a classifier from a table and a set of collection indicators.
    pub fn new(table: &'t PatternTable, indicators: CollectionIndicators) -> Self {
        Self { table, indicators }
    }

    /// Returns the collection indicators in use.
    pub fn indicators(&self) -> &CollectionIndicators {
        &self.indicators
    }

    /// Finds confidence-scored matches for every category.
    pub fn analyze(&self, text: &str, min_confidence: f32) -> Result<CategoryMatches, AuditError> {
        let min_confidence = validate_min_confidence(min_confidence)?;
        let mut results = CategoryMatches::new();

        if text.is_empty() {
            return Ok(results);
        }

        for category in DataCategory::ALL {
            let found = self.find_category_matches(text, category);
            let total = found.len();
            let confident: Vec<CategoryMatch> = found
                .into_iter()
                .filter(|m| m.confidence >= min_confidence)
                .collect();

            debug!(
                %category,
                total,
                kept = confident.len(),
                min_confidence,
                "Classified category"
            );

            if !confident.is_empty() {
                results.insert(category, confident);
            }
        }

        Ok(results)
    }

    /// Returns just the categories detected in the text.
    pub fn extract(
        &self,
        text: &str,
        min_confidence: f32,
    ) -> Result<BTreeSet<DataCategory>, AuditError> {
        Ok(self.analyze(text, min_confidence)?.into_keys().collect())
    }

    /// Runs the three pattern scans for one category and deduplicates.
    fn find_category_matches(&self, text: &str, category: DataCategory) -> Vec<CategoryMatch> {
        let groups = self.table.groups(category);
        let mut matches = Vec::new();

        for pattern in groups.patterns(PatternKind::Category) {
            for found in pattern.find_iter(text) {
                let context = context_window(text, found.start(), found.end(), NARROW_WINDOW);
                matches.push(CategoryMatch::new(
                    category,
                    found.as_str(),
                    context,
                    MatchTier::Category,
                ));
            }
        }

        for pattern in groups.patterns(PatternKind::DataType) {
            for found in pattern.find_iter(text) {
                let context = context_window(text, found.start(), found.end(), WIDE_WINDOW);
                let tier = if self.indicators.is_collection_context(context) {
                    MatchTier::DataTypeInContext
                } else {
                    MatchTier::DataType
                };
                matches.push(CategoryMatch::new(category, found.as_str(), context, tier));
            }
        }

        for pattern in groups.patterns(PatternKind::Context) {
            for found in pattern.find_iter(text) {
                let context = context_window(text, found.start(), found.end(), NARROW_WINDOW);
                matches.push(CategoryMatch::new(
                    category,
                    found.as_str(),
                    context,
                    MatchTier::Context,
                ));
            }
        }

        dedup_by_literal(matches)
    }
}
