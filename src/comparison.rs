//! Policy vs. disclosure comparison.

pub mod engine;
pub mod record;
pub mod verdict;

pub use engine::{ComparisonEngine, ComparisonInput};
pub use record::{CategoryVerdicts, EntityComparison, Subject};
pub use verdict::ComparisonResult;
