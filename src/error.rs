//! Error types for classification and taxonomy loading.

use thiserror::Error;

use crate::taxonomy::{DataCategory, PatternKind};

/// Errors raised by the classifier and comparison APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    /// Confidence threshold outside the closed interval [0, 1].
    #[error("min_confidence must be within [0, 1], got {0}")]
    InvalidMinConfidence(f32),

    /// Category identifier that is not part of the taxonomy.
    #[error("Unknown data category: {0:?}")]
    UnknownCategory(String),

    /// Collection indicator that failed to compile.
    #[error("Invalid collection indicator {pattern:?}: {reason}")]
    InvalidIndicator {
        /// The offending pattern source.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// The pattern table could not be built.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
}

/// Defects in a pattern table or vocabulary, detected while it is being built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    /// A taxonomy document is not valid YAML or has the wrong shape.
    #[error("Failed to parse taxonomy document: {0}")]
    Parse(String),

    /// A category has no entry in the table.
    #[error("Pattern table has no entry for category {0}")]
    MissingCategory(DataCategory),

    /// A required pattern group is empty.
    #[error("Pattern table has an empty {kind} group for category {category}")]
    EmptyPatternGroup {
        /// Category owning the group.
        category: DataCategory,
        /// Which group is empty.
        kind: PatternKind,
    },

    /// A pattern failed to compile.
    #[error("Invalid {kind} pattern {pattern:?} for category {category}: {reason}")]
    InvalidPattern {
        /// Category owning the pattern.
        category: DataCategory,
        /// Group the pattern belongs to.
        kind: PatternKind,
        /// The offending pattern source.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// The vocabulary document has no datatype entry for a category.
    #[error("Vocabulary has no datatype entry for category {0}")]
    MissingVocabulary(DataCategory),

    /// The vocabulary document lists no store-disclosure labels.
    #[error("Vocabulary defines no disclosure labels")]
    NoDisclosureLabels,

    /// The table lists no collection indicators.
    #[error("Pattern table defines no collection indicators")]
    NoIndicators,

    /// A collection indicator in the table failed to compile.
    #[error("Invalid collection indicator {pattern:?} in pattern table: {reason}")]
    InvalidIndicator {
        /// The offending pattern source.
        pattern: String,
        /// Compiler message.
        reason: String,
    },
}

/// Checks that a confidence threshold lies within [0, 1].
///
/// NaN is rejected along with out-of-range values.
pub fn validate_min_confidence(min_confidence: f32) -> Result<f32, AuditError> {
    if (0.0..=1.0).contains(&min_confidence) {
        Ok(min_confidence)
    } else {
        Err(AuditError::InvalidMinConfidence(min_confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(validate_min_confidence(0.0), Ok(0.0));
        assert_eq!(validate_min_confidence(1.0), Ok(1.0));
        assert_eq!(validate_min_confidence(0.3), Ok(0.3));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            validate_min_confidence(1.5),
            Err(AuditError::InvalidMinConfidence(_))
        ));
        assert!(matches!(
            validate_min_confidence(-0.1),
            Err(AuditError::InvalidMinConfidence(_))
        ));
    }

    #[test]
    fn rejects_nan() {
        assert!(validate_min_confidence(f32::NAN).is_err());
    }

    #[test]
    fn taxonomy_error_message_names_category_and_group() {
        let err = TaxonomyError::EmptyPatternGroup {
            category: DataCategory::Location,
            kind: PatternKind::DataType,
        };
        assert_eq!(
            err.to_string(),
            "Pattern table has an empty data_type group for category location"
        );
    }
}
