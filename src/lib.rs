//! # disclosure-audit
//!
//! Rule-based classification of privacy text into a closed set of data
//! categories, and comparison of what a privacy policy says against what a
//! store listing discloses.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use disclosure_audit::{ComparisonEngine, ComparisonResult, DataCategory, PatternClassifier, Subject};
//!
//! let classifier = PatternClassifier::builtin().unwrap();
//! let policy = classifier
//!     .extract("We collect your email address and location data.", 0.3)
//!     .unwrap();
//! let disclosure = BTreeSet::from([DataCategory::Pii]);
//!
//! let record = ComparisonEngine::compare(
//!     &Subject::new("abc", "Example"),
//!     &policy,
//!     &disclosure,
//!     true,
//!     true,
//! );
//! assert_eq!(record.verdict(DataCategory::Pii), ComparisonResult::Both);
//! assert_eq!(record.verdict(DataCategory::Location), ComparisonResult::PolicyOnly);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod classifier;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod taxonomy;
pub mod utils;

pub use crate::classifier::{CategoryMatch, CategoryMatches, MatchTier, PatternClassifier};
pub use crate::cli::Cli;
pub use crate::comparison::{ComparisonEngine, ComparisonResult, EntityComparison, Subject};
pub use crate::error::{AuditError, TaxonomyError};
pub use crate::pipeline::{SubjectPipeline, SubjectSources};
pub use crate::taxonomy::{DataCategory, FuzzyMatchPolicy, PatternTable, Vocabulary};

/// The current version of disclosure-audit.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
