//! Four-way comparison verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of comparing one category across the two sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonResult {
    /// Neither source mentions the category.
    Neither,
    /// Only the policy mentions it.
    PolicyOnly,
    /// Only the disclosure mentions it.
    DisclosureOnly,
    /// Both sources mention it.
    Both,
}

impl ComparisonResult {
    /// All verdicts, in display order.
    pub const ALL: [Self; 4] = [
        Self::Neither,
        Self::PolicyOnly,
        Self::DisclosureOnly,
        Self::Both,
    ];

    /// Verdict for a category present (or not) in each source.
    pub const fn from_membership(in_policy: bool, in_disclosure: bool) -> Self {
        match (in_policy, in_disclosure) {
            (true, true) => Self::Both,
            (true, false) => Self::PolicyOnly,
            (false, true) => Self::DisclosureOnly,
            (false, false) => Self::Neither,
        }
    }

    /// Stable identifier string.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Neither => "neither",
            Self::PolicyOnly => "policy_only",
            Self::DisclosureOnly => "disclosure_only",
            Self::Both => "both",
        }
    }

    /// Whether the two sources disagree.
    pub const fn is_discrepancy(self) -> bool {
        matches!(self, Self::PolicyOnly | Self::DisclosureOnly)
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_table() {
        assert_eq!(ComparisonResult::from_membership(true, true), ComparisonResult::Both);
        assert_eq!(
            ComparisonResult::from_membership(true, false),
            ComparisonResult::PolicyOnly
        );
        assert_eq!(
            ComparisonResult::from_membership(false, true),
            ComparisonResult::DisclosureOnly
        );
        assert_eq!(
            ComparisonResult::from_membership(false, false),
            ComparisonResult::Neither
        );
    }

    #[test]
    fn discrepancies() {
        assert!(ComparisonResult::PolicyOnly.is_discrepancy());
        assert!(ComparisonResult::DisclosureOnly.is_discrepancy());
        assert!(!ComparisonResult::Both.is_discrepancy());
        assert!(!ComparisonResult::Neither.is_discrepancy());
    }

    #[test]
    fn serde_matches_display() {
        for verdict in ComparisonResult::ALL {
            let json = serde_json::to_string(&verdict).unwrap();
            assert_eq!(json, format!("\"{verdict}\""));
        }
    }
}
