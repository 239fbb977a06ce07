//! Collection indicators: phrases that turn a data-type mention into a
//! collection claim.

use regex::Regex;

use crate::error::AuditError;
use crate::taxonomy::table::compile_pattern;

/// Compiled collection-indicator patterns.
#[derive(Debug, Clone, Default)]
pub struct CollectionIndicators {
    patterns: Vec<Regex>,
}

impl CollectionIndicators {
    /// Compiles indicator patterns (case-insensitive).
    pub fn new<S: AsRef<str>>(sources: &[S]) -> Result<Self, AuditError> {
        Self::default().with_extra(sources)
    }

    pub(crate) fn from_compiled(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Returns a copy extended with additional indicator patterns.
    pub fn with_extra<S: AsRef<str>>(mut self, sources: &[S]) -> Result<Self, AuditError> {
        for source in sources {
            let source = source.as_ref();
            let pattern = compile_pattern(source).map_err(|e| AuditError::InvalidIndicator {
                pattern: source.to_string(),
                reason: e.to_string(),
            })?;
            self.patterns.push(pattern);
        }
        Ok(self)
    }

    /// Returns whether any indicator occurs in the window.
    pub fn is_collection_context(&self, window: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(window))
    }

    /// Returns the indicator pattern sources.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    /// Number of indicator patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no indicators are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::PatternTable;

    fn builtin() -> &'static CollectionIndicators {
        PatternTable::builtin().unwrap().collection_indicators()
    }

    #[test]
    fn collection_verbs_are_detected() {
        let indicators = builtin();
        for window in [
            "We collect your address",
            "data we GATHER",
            "may be shared with partners",
            "is stored on our servers",
            "we may",
            "this extension reads",
            "The service keeps",
        ] {
            assert!(indicators.is_collection_context(window), "{window:?}");
        }
    }

    #[test]
    fn bare_mentions_are_not_collection_context() {
        let indicators = builtin();
        assert!(!indicators.is_collection_context("Financial Data – such as credit card number"));
        assert!(!indicators.is_collection_context(""));
    }

    #[test]
    fn use_requires_word_boundary() {
        let indicators = builtin();
        assert!(indicators.is_collection_context("we use it"));
        assert!(!indicators.is_collection_context("user name"));
        assert!(!indicators.is_collection_context("catalog entries"));
    }

    #[test]
    fn extra_indicators_extend_the_list() {
        let base = CollectionIndicators::new(&["collect"]).unwrap();
        assert!(!base.is_collection_context("harvested emails"));
        let extended = base.with_extra(&["harvest"]).unwrap();
        assert_eq!(extended.len(), 2);
        assert!(extended.is_collection_context("harvested emails"));
    }

    #[test]
    fn invalid_extra_indicator_is_rejected() {
        let err = CollectionIndicators::new(&["(broken"]).unwrap_err();
        assert!(matches!(err, AuditError::InvalidIndicator { pattern, .. } if pattern == "(broken"));
    }

    #[test]
    fn sources_are_preserved() {
        let indicators = CollectionIndicators::new(&[r"\bcollect", "harvest"]).unwrap();
        let sources: Vec<&str> = indicators.sources().collect();
        assert_eq!(sources, vec![r"\bcollect", "harvest"]);
    }
}
