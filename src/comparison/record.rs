//! Comparison records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::comparison::ComparisonResult;
use crate::taxonomy::DataCategory;

/// Identity of a compared subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Stable identifier (e.g. a store listing id).
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Subject {
    /// Creates a subject.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One verdict per taxonomy category.
///
/// Backed by a fixed-size array indexed by category, so the mapping cannot be
/// partial. Serializes as a map from category id to verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<DataCategory, ComparisonResult>",
    into = "BTreeMap<DataCategory, ComparisonResult>"
)]
pub struct CategoryVerdicts([ComparisonResult; DataCategory::COUNT]);

impl CategoryVerdicts {
    /// Builds verdicts by evaluating `verdict` for every category.
    pub fn from_fn(verdict: impl FnMut(DataCategory) -> ComparisonResult) -> Self {
        Self(DataCategory::ALL.map(verdict))
    }

    /// Returns the verdict for a category.
    pub fn get(&self, category: DataCategory) -> ComparisonResult {
        self.0[category.index()]
    }

    /// Iterates `(category, verdict)` pairs in stable category order.
    pub fn iter(&self) -> impl Iterator<Item = (DataCategory, ComparisonResult)> + '_ {
        DataCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Categories with a given verdict.
    pub fn categories_with(&self, verdict: ComparisonResult) -> Vec<DataCategory> {
        self.iter()
            .filter(|(_, v)| *v == verdict)
            .map(|(c, _)| c)
            .collect()
    }
}

impl From<CategoryVerdicts> for BTreeMap<DataCategory, ComparisonResult> {
    fn from(verdicts: CategoryVerdicts) -> Self {
        verdicts.iter().collect()
    }
}

impl TryFrom<BTreeMap<DataCategory, ComparisonResult>> for CategoryVerdicts {
    type Error = String;

    fn try_from(map: BTreeMap<DataCategory, ComparisonResult>) -> Result<Self, Self::Error> {
        if let Some(missing) = DataCategory::ALL.into_iter().find(|c| !map.contains_key(c)) {
            return Err(format!("missing verdict for category {missing}"));
        }
        Ok(Self::from_fn(|c| map[&c]))
    }
}

/// Comparison of one subject's policy against its disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityComparison {
    /// Subject identifier.
    pub subject_id: String,
    /// Subject display name.
    pub subject_name: String,
    /// Verdict for every category.
    pub comparisons: CategoryVerdicts,
    /// Whether the policy was actually analyzed.
    pub policy_analyzed: bool,
    /// Whether the disclosure was actually analyzed.
    pub disclosure_analyzed: bool,
    /// Advisory note about unavailable sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EntityComparison {
    /// Attaches an advisory note.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.is_empty());
        self
    }

    /// Returns the verdict for a category.
    pub fn verdict(&self, category: DataCategory) -> ComparisonResult {
        self.comparisons.get(category)
    }

    /// Whether any category differs between the sources.
    pub fn has_discrepancy(&self) -> bool {
        self.comparisons.iter().any(|(_, v)| v.is_discrepancy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_neither() -> CategoryVerdicts {
        CategoryVerdicts::from_fn(|_| ComparisonResult::Neither)
    }

    #[test]
    fn verdicts_serialize_as_total_map() {
        let verdicts = CategoryVerdicts::from_fn(|c| {
            if c == DataCategory::Location {
                ComparisonResult::Both
            } else {
                ComparisonResult::Neither
            }
        });
        let json: serde_json::Value = serde_json::to_value(verdicts).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), DataCategory::COUNT);
        assert_eq!(map["location"], "both");
        assert_eq!(map["pii"], "neither");
    }

    #[test]
    fn partial_map_is_rejected_on_deserialize() {
        let json = r#"{"pii": "both", "location": "neither"}"#;
        let err = serde_json::from_str::<CategoryVerdicts>(json).unwrap_err();
        assert!(err.to_string().contains("missing verdict for category"));
    }

    #[test]
    fn complete_map_deserializes() {
        let verdicts = all_neither();
        let json = serde_json::to_string(&verdicts).unwrap();
        let parsed: CategoryVerdicts = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, verdicts);
    }

    #[test]
    fn categories_with_filters_by_verdict() {
        let verdicts = CategoryVerdicts::from_fn(|c| match c {
            DataCategory::Pii | DataCategory::Financial => ComparisonResult::PolicyOnly,
            _ => ComparisonResult::Neither,
        });
        assert_eq!(
            verdicts.categories_with(ComparisonResult::PolicyOnly),
            vec![DataCategory::Pii, DataCategory::Financial]
        );
    }

    #[test]
    fn empty_notes_are_dropped() {
        let record = EntityComparison {
            subject_id: "id".to_string(),
            subject_name: "Name".to_string(),
            comparisons: all_neither(),
            policy_analyzed: true,
            disclosure_analyzed: true,
            notes: None,
        };
        assert!(record.clone().with_notes(Some(String::new())).notes.is_none());
        assert_eq!(
            record.with_notes(Some("Policy not analyzed".to_string())).notes.as_deref(),
            Some("Policy not analyzed")
        );
    }
}
