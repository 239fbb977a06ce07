//! The closed set of data categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Semantic data category.
///
/// Variant order is the stable enumeration order used for reports and for
/// resolving ties between categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    /// Personally identifiable information.
    Pii,
    /// Financial and payment information.
    Financial,
    /// Passwords, credentials, tokens.
    Authentication,
    /// Precise or coarse location.
    Location,
    /// Browsing and search history, cookies.
    WebHistory,
    /// Clicks, scrolling, keystrokes, application usage.
    UserActivity,
    /// Content of the pages a user views.
    WebsiteContent,
}

impl DataCategory {
    /// Number of categories in the taxonomy.
    pub const COUNT: usize = 7;

    /// Every category, in stable order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Pii,
        Self::Financial,
        Self::Authentication,
        Self::Location,
        Self::WebHistory,
        Self::UserActivity,
        Self::WebsiteContent,
    ];

    /// Position of this category in [`Self::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier string.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Pii => "pii",
            Self::Financial => "financial",
            Self::Authentication => "authentication",
            Self::Location => "location",
            Self::WebHistory => "web_history",
            Self::UserActivity => "user_activity",
            Self::WebsiteContent => "website_content",
        }
    }

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Pii => "PII",
            Self::Financial => "Financial/Payment",
            Self::Authentication => "Authentication",
            Self::Location => "Location",
            Self::WebHistory => "Web History",
            Self::UserActivity => "User Activity",
            Self::WebsiteContent => "Website Content",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DataCategory {
    type Err = AuditError;

    /// Parses an identifier, case-insensitively, accepting `-` for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.id() == normalized)
            .ok_or_else(|| AuditError::UnknownCategory(s.to_string()))
    }
}

/// Parses a comma-separated list of category identifiers.
///
/// Blank entries are skipped, so an empty string yields an empty list.
pub fn parse_category_list(list: &str) -> Result<Vec<DataCategory>, AuditError> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(DataCategory::from_str)
        .collect()
}
