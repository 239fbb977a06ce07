//! Rule-based classification of text into data categories.

pub mod analyzer;
pub mod indicators;
pub mod matches;

pub use analyzer::{CategoryMatches, PatternClassifier, DEFAULT_MIN_CONFIDENCE};
pub use indicators::CollectionIndicators;
pub use matches::{CategoryMatch, MatchTier};
