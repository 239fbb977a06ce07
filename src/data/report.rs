//! Batch comparison report and output format.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comparison::{ComparisonResult, EntityComparison};
use crate::taxonomy::{DataCategory, FuzzyMatchPolicy};

/// Comparison results for a batch of subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Classifier threshold used for text sources.
    pub min_confidence: f32,
    /// Fuzzy policy used for graph terms.
    pub fuzzy_match: FuzzyMatchPolicy,
    /// Per-subject records, in input order.
    pub subjects: Vec<EntityComparison>,
    /// Aggregate counts.
    pub summary: ReportSummary,
}

/// Verdict tallies for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    /// Subjects where neither source mentions the category.
    pub neither: usize,
    /// Subjects where only the policy mentions it.
    pub policy_only: usize,
    /// Subjects where only the disclosure mentions it.
    pub disclosure_only: usize,
    /// Subjects where both mention it.
    pub both: usize,
}

impl VerdictCounts {
    fn record(&mut self, verdict: ComparisonResult) {
        match verdict {
            ComparisonResult::Neither => self.neither += 1,
            ComparisonResult::PolicyOnly => self.policy_only += 1,
            ComparisonResult::DisclosureOnly => self.disclosure_only += 1,
            ComparisonResult::Both => self.both += 1,
        }
    }
}

/// Summary statistics for a comparison report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of subjects compared.
    pub total_subjects: usize,
    /// Subjects whose policy was analyzed.
    pub policy_analyzed: usize,
    /// Subjects whose disclosure was analyzed.
    pub disclosure_analyzed: usize,
    /// Subjects with at least one one-sided category.
    pub subjects_with_discrepancies: usize,
    /// Verdict tallies per category.
    pub categories: BTreeMap<DataCategory, VerdictCounts>,
}

impl ReportSummary {
    /// Creates a summary from a list of comparison records.
    pub fn from_records(records: &[EntityComparison]) -> Self {
        let mut categories: BTreeMap<DataCategory, VerdictCounts> = DataCategory::ALL
            .into_iter()
            .map(|c| (c, VerdictCounts::default()))
            .collect();

        for record in records {
            for (category, verdict) in record.comparisons.iter() {
                categories.entry(category).or_default().record(verdict);
            }
        }

        Self {
            total_subjects: records.len(),
            policy_analyzed: records.iter().filter(|r| r.policy_analyzed).count(),
            disclosure_analyzed: records.iter().filter(|r| r.disclosure_analyzed).count(),
            subjects_with_discrepancies: records.iter().filter(|r| r.has_discrepancy()).count(),
            categories,
        }
    }
}

impl ComparisonReport {
    /// Creates a report stamped with the current time.
    pub fn new(
        subjects: Vec<EntityComparison>,
        min_confidence: f32,
        fuzzy_match: FuzzyMatchPolicy,
    ) -> Self {
        let summary = ReportSummary::from_records(&subjects);
        Self {
            generated_at: Utc::now(),
            min_confidence,
            fuzzy_match,
            subjects,
            summary,
        }
    }

    /// Whether any subject has a one-sided category.
    #[must_use]
    pub fn has_discrepancies(&self) -> bool {
        self.summary.subjects_with_discrepancies > 0
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!(
                "Unknown output format {other:?} (expected text, json or yaml)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::CategoryVerdicts;

    fn record(id: &str, pii: ComparisonResult, analyzed: (bool, bool)) -> EntityComparison {
        EntityComparison {
            subject_id: id.to_string(),
            subject_name: id.to_uppercase(),
            comparisons: CategoryVerdicts::from_fn(|c| {
                if c == DataCategory::Pii {
                    pii
                } else {
                    ComparisonResult::Neither
                }
            }),
            policy_analyzed: analyzed.0,
            disclosure_analyzed: analyzed.1,
            notes: None,
        }
    }

    // ── summary ──────────────────────────────────────────────────────

    #[test]
    fn summary_tallies_every_category() {
        let records = vec![
            record("a", ComparisonResult::Both, (true, true)),
            record("b", ComparisonResult::PolicyOnly, (true, false)),
            record("c", ComparisonResult::DisclosureOnly, (false, true)),
        ];
        let summary = ReportSummary::from_records(&records);

        assert_eq!(summary.total_subjects, 3);
        assert_eq!(summary.policy_analyzed, 2);
        assert_eq!(summary.disclosure_analyzed, 2);
        assert_eq!(summary.subjects_with_discrepancies, 2);
        assert_eq!(summary.categories.len(), DataCategory::COUNT);
        assert_eq!(
            summary.categories[&DataCategory::Pii],
            VerdictCounts {
                neither: 0,
                policy_only: 1,
                disclosure_only: 1,
                both: 1,
            }
        );
        assert_eq!(summary.categories[&DataCategory::Location].neither, 3);
    }

    #[test]
    fn empty_report_has_zeroed_summary() {
        let report = ComparisonReport::new(Vec::new(), 0.3, FuzzyMatchPolicy::default());
        assert_eq!(report.summary.total_subjects, 0);
        assert!(!report.has_discrepancies());
        assert!(report
            .summary
            .categories
            .values()
            .all(|counts| *counts == VerdictCounts::default()));
    }

    #[test]
    fn report_serializes_timestamp_and_policy() {
        let report = ComparisonReport::new(
            vec![record("a", ComparisonResult::Both, (true, true))],
            0.5,
            FuzzyMatchPolicy::Exact,
        );
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!(json["generated_at"].is_string());
        assert_eq!(json["fuzzy_match"]["mode"], "exact");
        assert_eq!(json["subjects"][0]["comparisons"]["pii"], "both");
        assert_eq!(json["summary"]["categories"]["pii"]["both"], 1);
    }

    // ── output format ────────────────────────────────────────────────

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "text");
    }
}
