//! Category taxonomy: the closed category set and its static tables.

pub mod category;
pub mod disclosure;
pub mod table;
pub mod vocabulary;

pub use category::{parse_category_list, DataCategory};
pub use disclosure::parse_disclosure_labels;
pub use table::{PatternGroup, PatternKind, PatternTable};
pub use vocabulary::{FuzzyMatchPolicy, Vocabulary};
