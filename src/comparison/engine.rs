//! Comparison engine: per-category verdicts for one or many subjects.

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::comparison::{CategoryVerdicts, ComparisonResult, EntityComparison, Subject};
use crate::taxonomy::DataCategory;

/// Everything needed to compare one subject.
#[derive(Debug, Clone)]
pub struct ComparisonInput {
    /// Subject being compared.
    pub subject: Subject,
    /// Categories found in the policy.
    pub policy_categories: BTreeSet<DataCategory>,
    /// Categories found in the disclosure.
    pub disclosure_categories: BTreeSet<DataCategory>,
    /// Whether the policy was analyzed.
    pub policy_analyzed: bool,
    /// Whether the disclosure was analyzed.
    pub disclosure_analyzed: bool,
    /// Advisory note built by the caller.
    pub notes: Option<String>,
}

/// Stateless comparison of policy and disclosure category sets.
pub struct ComparisonEngine;

impl ComparisonEngine {
    /// Compares two category sets for one subject.
    ///
    /// Availability flags are recorded as given; an empty set is a valid
    /// result and is never read as "not analyzed".
    pub fn compare(
        subject: &Subject,
        policy_categories: &BTreeSet<DataCategory>,
        disclosure_categories: &BTreeSet<DataCategory>,
        policy_analyzed: bool,
        disclosure_analyzed: bool,
    ) -> EntityComparison {
        let comparisons = CategoryVerdicts::from_fn(|category| {
            ComparisonResult::from_membership(
                policy_categories.contains(&category),
                disclosure_categories.contains(&category),
            )
        });

        debug!(
            subject = %subject.id,
            both = comparisons.categories_with(ComparisonResult::Both).len(),
            policy_only = comparisons.categories_with(ComparisonResult::PolicyOnly).len(),
            disclosure_only = comparisons.categories_with(ComparisonResult::DisclosureOnly).len(),
            "Compared subject"
        );

        EntityComparison {
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            comparisons,
            policy_analyzed,
            disclosure_analyzed,
            notes: None,
        }
    }

    /// Compares one prepared input, attaching its note.
    pub fn compare_input(input: &ComparisonInput) -> EntityComparison {
        Self::compare(
            &input.subject,
            &input.policy_categories,
            &input.disclosure_categories,
            input.policy_analyzed,
            input.disclosure_analyzed,
        )
        .with_notes(input.notes.clone())
    }

    /// Compares many subjects independently; output order follows input order.
    #[cfg(feature = "parallel")]
    pub fn compare_batch(inputs: &[ComparisonInput]) -> Vec<EntityComparison> {
        inputs.par_iter().map(Self::compare_input).collect()
    }

    /// Compares many subjects independently; output order follows input order.
    #[cfg(not(feature = "parallel"))]
    pub fn compare_batch(inputs: &[ComparisonInput]) -> Vec<EntityComparison> {
        inputs.iter().map(Self::compare_input).collect()
    }
}
