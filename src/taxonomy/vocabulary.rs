//! Datatype vocabulary used to map knowledge-graph terms onto categories.
//!
//! Lookup is an exact match first. The fuzzy step that follows is governed by
//! an explicit [`FuzzyMatchPolicy`] so its false-positive behaviour can be
//! chosen and tested on its own.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::TaxonomyError;
use crate::taxonomy::DataCategory;

/// Embedded vocabulary document.
pub const VOCABULARY_YAML: &str = include_str!("../templates/vocabulary.yaml");

/// How a term that has no exact vocabulary entry may still match one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FuzzyMatchPolicy {
    /// No fuzzy step.
    Exact,
    /// The shorter side must appear in the longer one at word boundaries.
    WholeWord {
        /// Minimum character length of the shorter side.
        min_len: usize,
    },
    /// Plain containment either way.
    Substring {
        /// Minimum character length of the shorter side.
        min_len: usize,
    },
}

impl Default for FuzzyMatchPolicy {
    fn default() -> Self {
        Self::WholeWord { min_len: 4 }
    }
}

impl FuzzyMatchPolicy {
    /// Returns whether `term` fuzzily matches a vocabulary `entry`.
    ///
    /// Both arguments are expected in lowercase.
    pub fn matches(self, term: &str, entry: &str) -> bool {
        let (shorter, longer) = if term.chars().count() <= entry.chars().count() {
            (term, entry)
        } else {
            (entry, term)
        };

        match self {
            Self::Exact => false,
            Self::WholeWord { min_len } => {
                shorter.chars().count() >= min_len.max(1) && contains_whole_word(longer, shorter)
            }
            Self::Substring { min_len } => {
                shorter.chars().count() >= min_len.max(1) && longer.contains(shorter)
            }
        }
    }
}

impl fmt::Display for FuzzyMatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::WholeWord { min_len } => write!(f, "whole_word:{min_len}"),
            Self::Substring { min_len } => write!(f, "substring:{min_len}"),
        }
    }
}

impl FromStr for FuzzyMatchPolicy {
    type Err = String;

    /// Parses `exact`, `whole_word[:N]` or `substring[:N]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let (mode, min_len) = match normalized.split_once(':') {
            Some((mode, len)) => {
                let len = len
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid minimum length in fuzzy policy: {s:?}"))?;
                (mode.to_string(), Some(len))
            }
            None => (normalized, None),
        };

        match mode.as_str() {
            "exact" => Ok(Self::Exact),
            "whole_word" => Ok(Self::WholeWord {
                min_len: min_len.unwrap_or(4),
            }),
            "substring" => Ok(Self::Substring {
                min_len: min_len.unwrap_or(0),
            }),
            _ => Err(format!(
                "Unknown fuzzy policy {s:?} (expected exact, whole_word[:N] or substring[:N])"
            )),
        }
    }
}

/// Checks whether `needle` occurs in `haystack` delimited by non-alphanumerics.
fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// A store-disclosure section label.
#[derive(Debug, Clone, Deserialize)]
pub struct DisclosureLabel {
    /// Label text as it appears in the listing.
    pub label: String,
    /// Category the label maps to; `None` for labels outside the taxonomy.
    pub category: Option<DataCategory>,
}

#[derive(Debug, Deserialize)]
struct RawVocabulary {
    datatypes: std::collections::BTreeMap<DataCategory, Vec<String>>,
    #[serde(default)]
    disclosure_labels: Vec<DisclosureLabel>,
}

/// Datatype terms per category and store-disclosure labels.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Entries in stable category order; terms are lowercase.
    datatypes: Vec<(DataCategory, Vec<String>)>,
    labels: Vec<DisclosureLabel>,
}

static BUILTIN_VOCABULARY: OnceLock<Result<Vocabulary, TaxonomyError>> = OnceLock::new();

impl Vocabulary {
    /// Returns the shared vocabulary built from the embedded document.
    pub fn builtin() -> Result<&'static Self, TaxonomyError> {
        BUILTIN_VOCABULARY
            .get_or_init(|| Self::from_yaml(VOCABULARY_YAML))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Builds a vocabulary from a YAML document.
    ///
    /// Every category needs a `datatypes` entry, though its term list may be
    /// empty, and at least one disclosure label must be present. Entries are
    /// kept in stable category order.
    pub fn from_yaml(yaml: &str) -> Result<Self, TaxonomyError> {
        let mut raw: RawVocabulary =
            serde_yaml::from_str(yaml).map_err(|e| TaxonomyError::Parse(e.to_string()))?;

        if raw.disclosure_labels.is_empty() {
            return Err(TaxonomyError::NoDisclosureLabels);
        }

        let datatypes = DataCategory::ALL
            .into_iter()
            .map(|category| {
                let terms = raw
                    .datatypes
                    .remove(&category)
                    .ok_or(TaxonomyError::MissingVocabulary(category))?
                    .into_iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect();
                Ok((category, terms))
            })
            .collect::<Result<_, TaxonomyError>>()?;

        Ok(Self {
            datatypes,
            labels: raw.disclosure_labels,
        })
    }

    /// Returns the datatype terms recorded for a category.
    pub fn terms(&self, category: DataCategory) -> &[String] {
        self.datatypes
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, terms)| terms.as_slice())
            .unwrap_or_default()
    }

    /// Returns the store-disclosure labels.
    pub fn disclosure_labels(&self) -> &[DisclosureLabel] {
        &self.labels
    }

    /// Maps a datatype term to its category.
    pub fn lookup(&self, term: &str, policy: FuzzyMatchPolicy) -> Option<DataCategory> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }

        if let Some(category) = self.lookup_exact(&term) {
            return Some(category);
        }

        for (category, entries) in &self.datatypes {
            if let Some(entry) = entries.iter().find(|entry| policy.matches(&term, entry)) {
                trace!(%term, %entry, %category, %policy, "Fuzzy vocabulary match");
                return Some(*category);
            }
        }

        None
    }

    fn lookup_exact(&self, term: &str) -> Option<DataCategory> {
        self.datatypes
            .iter()
            .find(|(_, entries)| entries.iter().any(|entry| entry == term))
            .map(|(category, _)| *category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> &'static Vocabulary {
        Vocabulary::builtin().unwrap()
    }

    // ── exact lookup ───────────────────────────────────────────────

    #[test]
    fn exact_terms_resolve() {
        let v = vocabulary();
        let policy = FuzzyMatchPolicy::Exact;
        assert_eq!(v.lookup("credit card number", policy), Some(DataCategory::Financial));
        assert_eq!(v.lookup("  IP Address ", policy), Some(DataCategory::Location));
        assert_eq!(v.lookup("clicks", policy), Some(DataCategory::UserActivity));
        assert_eq!(v.lookup("page content", policy), Some(DataCategory::WebsiteContent));
    }

    #[test]
    fn exact_policy_has_no_fuzzy_step() {
        let v = vocabulary();
        assert_eq!(v.lookup("precise gps coordinates", FuzzyMatchPolicy::Exact), None);
    }

    #[test]
    fn empty_term_never_matches() {
        let v = vocabulary();
        assert_eq!(v.lookup("   ", FuzzyMatchPolicy::Substring { min_len: 0 }), None);
    }

    #[test]
    fn exact_match_beats_earlier_fuzzy_match() {
        // "pin" is contained in the PII entry "shipping address".
        let v = vocabulary();
        assert_eq!(
            v.lookup("pin", FuzzyMatchPolicy::Substring { min_len: 0 }),
            Some(DataCategory::Authentication)
        );
    }

    // ── fuzzy policies ─────────────────────────────────────────────

    #[test]
    fn whole_word_matches_compound_terms() {
        let v = vocabulary();
        assert_eq!(
            v.lookup("precise gps coordinates", FuzzyMatchPolicy::default()),
            Some(DataCategory::Location)
        );
        assert_eq!(
            v.lookup("user email address list", FuzzyMatchPolicy::default()),
            Some(DataCategory::Pii)
        );
    }

    #[test]
    fn whole_word_rejects_short_token_inside_word() {
        let v = vocabulary();
        assert_eq!(
            v.lookup("shipping preferences", FuzzyMatchPolicy::default()),
            None
        );
    }

    #[test]
    fn legacy_substring_produces_short_token_false_positive() {
        let v = vocabulary();
        assert_eq!(
            v.lookup("shipping preferences", FuzzyMatchPolicy::Substring { min_len: 0 }),
            Some(DataCategory::Authentication)
        );
    }

    #[test]
    fn policy_matches_requires_min_len() {
        let policy = FuzzyMatchPolicy::WholeWord { min_len: 4 };
        assert!(!policy.matches("my pin code", "pin"));
        assert!(policy.matches("my salary slip", "salary"));
        assert!(!policy.matches("salaryman", "salary"));
    }

    #[test]
    fn contains_whole_word_checks_both_sides() {
        assert!(contains_whole_word("the pin code", "pin"));
        assert!(contains_whole_word("pin", "pin"));
        assert!(!contains_whole_word("shipping", "pin"));
        assert!(contains_whole_word("spinning pin", "pin"));
        assert!(contains_whole_word("driver's license", "license"));
    }

    #[test]
    fn shorter_side_is_measured_in_chars() {
        // "café" is 4 chars but 5 bytes.
        let policy = FuzzyMatchPolicy::WholeWord { min_len: 5 };
        assert!(!policy.matches("café", "café noir"));
        assert!(!policy.matches("café noir", "café"));

        let policy = FuzzyMatchPolicy::Substring { min_len: 4 };
        assert!(policy.matches("café", "le café noir"));
        assert!(policy.matches("le café noir", "café"));
        assert!(policy.matches("cafés", "café"));
    }

    // ── document validation ────────────────────────────────────────

    const LABELS: &str = "disclosure_labels:\n  - label: Location\n    category: location\n";

    fn datatypes_without(skip: DataCategory) -> String {
        let mut yaml = String::from("datatypes:\n");
        for category in DataCategory::ALL.into_iter().filter(|c| *c != skip) {
            yaml.push_str(&format!("  {}: [term]\n", category.id()));
        }
        yaml
    }

    #[test]
    fn document_missing_a_category_is_rejected() {
        let yaml = format!("{}{LABELS}", datatypes_without(DataCategory::WebHistory));
        assert_eq!(
            Vocabulary::from_yaml(&yaml).unwrap_err(),
            TaxonomyError::MissingVocabulary(DataCategory::WebHistory)
        );
    }

    #[test]
    fn document_without_labels_is_rejected() {
        let mut yaml = String::from("datatypes:\n");
        for category in DataCategory::ALL {
            yaml.push_str(&format!("  {}: [term]\n", category.id()));
        }
        assert_eq!(
            Vocabulary::from_yaml(&yaml).unwrap_err(),
            TaxonomyError::NoDisclosureLabels
        );
    }

    #[test]
    fn category_with_empty_term_list_is_accepted() {
        let mut yaml = datatypes_without(DataCategory::WebsiteContent);
        yaml.push_str("  website_content: []\n");
        yaml.push_str(LABELS);
        let v = Vocabulary::from_yaml(&yaml).unwrap();
        assert!(v.terms(DataCategory::WebsiteContent).is_empty());
        assert_eq!(v.terms(DataCategory::Pii), ["term"]);
        assert_eq!(v.disclosure_labels().len(), 1);
    }

    // ── parsing ────────────────────────────────────────────────────

    #[test]
    fn policy_parses_from_str() {
        assert_eq!("exact".parse(), Ok(FuzzyMatchPolicy::Exact));
        assert_eq!(
            "whole-word".parse(),
            Ok(FuzzyMatchPolicy::WholeWord { min_len: 4 })
        );
        assert_eq!(
            "substring:2".parse(),
            Ok(FuzzyMatchPolicy::Substring { min_len: 2 })
        );
        assert!("fuzzy".parse::<FuzzyMatchPolicy>().is_err());
        assert!("substring:x".parse::<FuzzyMatchPolicy>().is_err());
    }

    #[test]
    fn policy_display_round_trips_through_parse() {
        let policy = FuzzyMatchPolicy::WholeWord { min_len: 6 };
        assert_eq!(policy.to_string().parse(), Ok(policy));
    }

    #[test]
    fn policy_serde_uses_mode_tag() {
        let yaml = "mode: substring\nmin_len: 3\n";
        let policy: FuzzyMatchPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy, FuzzyMatchPolicy::Substring { min_len: 3 });
    }

    #[test]
    fn every_category_has_terms() {
        let v = vocabulary();
        for category in DataCategory::ALL {
            assert!(!v.terms(category).is_empty(), "{category} has no terms");
        }
    }
}
