//! Static pattern table mapping each category to its three pattern groups.
//!
//! The table ships as an embedded YAML document. Building a [`PatternTable`]
//! validates the document and compiles every pattern, so a malformed table is
//! rejected before any text is classified.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::CollectionIndicators;
use crate::error::TaxonomyError;
use crate::taxonomy::DataCategory;

/// Embedded pattern table.
pub const TAXONOMY_YAML: &str = include_str!("../templates/taxonomy.yaml");

/// Which pattern group a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Explicit mention of the category name or a close synonym.
    Category,
    /// A concrete data item belonging to the category.
    DataType,
    /// A collection verb near a category cue.
    Context,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::DataType => write!(f, "data_type"),
            Self::Context => write!(f, "context"),
        }
    }
}

/// Compiled patterns for one category.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    /// High-confidence category-name patterns.
    pub category: Vec<Regex>,
    /// Medium-confidence data-type patterns.
    pub data_type: Vec<Regex>,
    /// Collection-context patterns.
    pub context: Vec<Regex>,
}

impl PatternGroup {
    /// Returns the patterns of one group.
    pub fn patterns(&self, kind: PatternKind) -> &[Regex] {
        match kind {
            PatternKind::Category => &self.category,
            PatternKind::DataType => &self.data_type,
            PatternKind::Context => &self.context,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTable {
    categories: BTreeMap<DataCategory, RawGroup>,
    #[serde(default)]
    collection_indicators: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    #[serde(default)]
    category_patterns: Vec<String>,
    #[serde(default)]
    data_type_patterns: Vec<String>,
    #[serde(default)]
    context_patterns: Vec<String>,
}

/// Immutable, compiled pattern table.
#[derive(Debug, Clone)]
pub struct PatternTable {
    /// Indexed by [`DataCategory::index`]; always one entry per category.
    groups: Vec<PatternGroup>,
    indicators: CollectionIndicators,
}

static BUILTIN_TABLE: OnceLock<Result<PatternTable, TaxonomyError>> = OnceLock::new();

impl PatternTable {
    /// Returns the shared table built from the embedded document.
    ///
    /// The table is compiled on first use and shared read-only afterwards.
    pub fn builtin() -> Result<&'static Self, TaxonomyError> {
        BUILTIN_TABLE
            .get_or_init(|| Self::from_yaml(TAXONOMY_YAML))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Builds a table from a YAML document, validating every group.
    pub fn from_yaml(yaml: &str) -> Result<Self, TaxonomyError> {
        let mut raw: RawTable =
            serde_yaml::from_str(yaml).map_err(|e| TaxonomyError::Parse(e.to_string()))?;

        let mut groups = Vec::with_capacity(DataCategory::COUNT);
        for category in DataCategory::ALL {
            let group = raw
                .categories
                .remove(&category)
                .ok_or(TaxonomyError::MissingCategory(category))?;
            groups.push(compile_group(category, &group)?);
        }

        if raw.collection_indicators.is_empty() {
            return Err(TaxonomyError::NoIndicators);
        }
        let indicators = raw
            .collection_indicators
            .iter()
            .map(|source| {
                compile_pattern(source).map_err(|e| TaxonomyError::InvalidIndicator {
                    pattern: source.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            categories = groups.len(),
            indicators = indicators.len(),
            "Compiled pattern table"
        );

        Ok(Self {
            groups,
            indicators: CollectionIndicators::from_compiled(indicators),
        })
    }

    /// Returns the compiled patterns for a category.
    pub fn groups(&self, category: DataCategory) -> &PatternGroup {
        &self.groups[category.index()]
    }

    /// Returns the default collection indicators declared by the table.
    pub fn collection_indicators(&self) -> &CollectionIndicators {
        &self.indicators
    }
}

/// Compiles a pattern case-insensitively.
pub(crate) fn compile_pattern(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

fn compile_group(category: DataCategory, raw: &RawGroup) -> Result<PatternGroup, TaxonomyError> {
    let compile = |kind: PatternKind, sources: &[String]| -> Result<Vec<Regex>, TaxonomyError> {
        sources
            .iter()
            .map(|source| {
                compile_pattern(source).map_err(|e| TaxonomyError::InvalidPattern {
                    category,
                    kind,
                    pattern: source.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    };

    for (kind, sources) in [
        (PatternKind::Category, &raw.category_patterns),
        (PatternKind::DataType, &raw.data_type_patterns),
    ] {
        if sources.is_empty() {
            return Err(TaxonomyError::EmptyPatternGroup { category, kind });
        }
    }

    Ok(PatternGroup {
        category: compile(PatternKind::Category, &raw.category_patterns)?,
        data_type: compile(PatternKind::DataType, &raw.data_type_patterns)?,
        context: compile(PatternKind::Context, &raw.context_patterns)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_group() -> &'static str {
        "    category_patterns: ['foo']\n    data_type_patterns: ['bar']\n"
    }

    fn table_with(categories: &[&str], indicators: &str) -> String {
        let mut yaml = String::from("categories:\n");
        for id in categories {
            yaml.push_str(&format!("  {id}:\n{}", minimal_group()));
        }
        yaml.push_str(indicators);
        yaml
    }

    fn all_ids() -> Vec<&'static str> {
        DataCategory::ALL.iter().map(|c| c.id()).collect()
    }

    // ── builtin table ──────────────────────────────────────────────

    #[test]
    fn builtin_table_loads() {
        let table = PatternTable::builtin().unwrap();
        for category in DataCategory::ALL {
            let group = table.groups(category);
            assert!(!group.category.is_empty(), "{category} category patterns");
            assert!(!group.data_type.is_empty(), "{category} data-type patterns");
            assert!(!group.context.is_empty(), "{category} context patterns");
        }
        assert!(!table.collection_indicators().is_empty());
    }

    #[test]
    fn builtin_table_is_shared() {
        let first = PatternTable::builtin().unwrap();
        let second = PatternTable::builtin().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn builtin_patterns_are_case_insensitive() {
        let table = PatternTable::builtin().unwrap();
        let financial = table.groups(DataCategory::Financial);
        assert!(financial.category.iter().any(|p| p.is_match("FINANCIAL DATA")));
    }

    // ── validation ─────────────────────────────────────────────────

    #[test]
    fn minimal_table_loads() {
        let yaml = table_with(&all_ids(), "collection_indicators: ['collect']\n");
        let table = PatternTable::from_yaml(&yaml).unwrap();
        assert!(table.groups(DataCategory::Location).context.is_empty());
    }

    #[test]
    fn missing_category_fails() {
        let ids: Vec<&str> = all_ids().into_iter().filter(|id| *id != "location").collect();
        let yaml = table_with(&ids, "collection_indicators: ['collect']\n");
        assert_eq!(
            PatternTable::from_yaml(&yaml).unwrap_err(),
            TaxonomyError::MissingCategory(DataCategory::Location)
        );
    }

    #[test]
    fn empty_data_type_group_fails() {
        let mut yaml = table_with(&all_ids(), "collection_indicators: ['collect']\n");
        yaml = yaml.replacen(
            "  financial:\n    category_patterns: ['foo']\n    data_type_patterns: ['bar']\n",
            "  financial:\n    category_patterns: ['foo']\n    data_type_patterns: []\n",
            1,
        );
        assert_eq!(
            PatternTable::from_yaml(&yaml).unwrap_err(),
            TaxonomyError::EmptyPatternGroup {
                category: DataCategory::Financial,
                kind: PatternKind::DataType,
            }
        );
    }

    #[test]
    fn invalid_pattern_fails() {
        let mut yaml = table_with(&all_ids(), "collection_indicators: ['collect']\n");
        yaml = yaml.replacen(
            "  pii:\n    category_patterns: ['foo']",
            "  pii:\n    category_patterns: ['(unclosed']",
            1,
        );
        let err = PatternTable::from_yaml(&yaml).unwrap_err();
        assert!(matches!(
            err,
            TaxonomyError::InvalidPattern {
                category: DataCategory::Pii,
                kind: PatternKind::Category,
                ..
            }
        ));
    }

    #[test]
    fn missing_indicators_fail() {
        let yaml = table_with(&all_ids(), "");
        assert_eq!(
            PatternTable::from_yaml(&yaml).unwrap_err(),
            TaxonomyError::NoIndicators
        );
    }

    #[test]
    fn invalid_indicator_fails() {
        let yaml = table_with(&all_ids(), "collection_indicators: ['[collect']\n");
        assert!(matches!(
            PatternTable::from_yaml(&yaml).unwrap_err(),
            TaxonomyError::InvalidIndicator { .. }
        ));
    }

    #[test]
    fn unknown_category_key_is_parse_error() {
        let mut ids = all_ids();
        ids.push("health");
        let yaml = table_with(&ids, "collection_indicators: ['collect']\n");
        assert!(matches!(
            PatternTable::from_yaml(&yaml).unwrap_err(),
            TaxonomyError::Parse(_)
        ));
    }
}
