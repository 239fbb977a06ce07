//! Subject pipeline: turns a subject's policy and disclosure sources into a
//! comparison record.
//!
//! Each side is the union of what the classifier finds in its text and what a
//! knowledge graph already resolved to categories. When the analyzed
//! disclosure yields nothing, the categories named by the listing's own
//! section labels are used instead.

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::classifier::PatternClassifier;
use crate::comparison::{ComparisonEngine, ComparisonInput, EntityComparison, Subject};
use crate::error::{validate_min_confidence, AuditError};
use crate::taxonomy::{parse_disclosure_labels, DataCategory, Vocabulary};

/// Note recorded when no policy source was available.
pub const POLICY_NOT_ANALYZED: &str = "Policy not analyzed";
/// Note recorded when no analyzed disclosure source was available.
pub const DISCLOSURE_NOT_ANALYZED: &str = "Disclosure not analyzed (using raw categories)";

/// Everything known about one subject before analysis.
#[derive(Debug, Clone)]
pub struct SubjectSources {
    /// Subject identity.
    pub subject: Subject,
    /// Privacy policy text, already stripped of markup.
    pub policy_text: Option<String>,
    /// Categories resolved from a policy knowledge graph.
    pub policy_graph: Option<BTreeSet<DataCategory>>,
    /// Store-listing disclosure text as published.
    pub disclosure_text: Option<String>,
    /// Natural-language rewrite of the disclosure.
    pub disclosure_analysis: Option<String>,
    /// Categories resolved from a disclosure knowledge graph.
    pub disclosure_graph: Option<BTreeSet<DataCategory>>,
}

impl SubjectSources {
    /// Creates sources for a subject with nothing attached.
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            policy_text: None,
            policy_graph: None,
            disclosure_text: None,
            disclosure_analysis: None,
            disclosure_graph: None,
        }
    }

    /// Sets the policy text.
    #[must_use]
    pub fn with_policy_text(mut self, text: impl Into<String>) -> Self {
        self.policy_text = Some(text.into());
        self
    }

    /// Sets the policy graph categories.
    #[must_use]
    pub fn with_policy_graph(mut self, categories: BTreeSet<DataCategory>) -> Self {
        self.policy_graph = Some(categories);
        self
    }

    /// Sets the raw disclosure text.
    #[must_use]
    pub fn with_disclosure_text(mut self, text: impl Into<String>) -> Self {
        self.disclosure_text = Some(text.into());
        self
    }

    /// Sets the disclosure analysis text.
    #[must_use]
    pub fn with_disclosure_analysis(mut self, text: impl Into<String>) -> Self {
        self.disclosure_analysis = Some(text.into());
        self
    }

    /// Sets the disclosure graph categories.
    #[must_use]
    pub fn with_disclosure_graph(mut self, categories: BTreeSet<DataCategory>) -> Self {
        self.disclosure_graph = Some(categories);
        self
    }
}

/// Categories gathered for one side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCategories {
    /// Union of every analyzed source.
    pub categories: BTreeSet<DataCategory>,
    /// Whether at least one source was present.
    pub analyzed: bool,
}

/// Builds the advisory note for missing sources.
pub fn availability_notes(policy_analyzed: bool, disclosure_analyzed: bool) -> Option<String> {
    let mut notes = Vec::new();
    if !policy_analyzed {
        notes.push(POLICY_NOT_ANALYZED);
    }
    if !disclosure_analyzed {
        notes.push(DISCLOSURE_NOT_ANALYZED);
    }
    (!notes.is_empty()).then(|| notes.join("; "))
}

/// Falls back to the label-derived categories when analysis found nothing.
pub fn resolve_disclosure(
    analyzed: BTreeSet<DataCategory>,
    raw: BTreeSet<DataCategory>,
) -> BTreeSet<DataCategory> {
    if analyzed.is_empty() {
        raw
    } else {
        analyzed
    }
}

fn present(text: Option<&String>) -> Option<&str> {
    text.map(String::as_str).filter(|t| !t.trim().is_empty())
}

/// Runs classification and comparison for subjects.
#[derive(Debug, Clone)]
pub struct SubjectPipeline<'t> {
    classifier: PatternClassifier<'t>,
    vocabulary: &'t Vocabulary,
    min_confidence: f32,
}

impl<'t> SubjectPipeline<'t> {
    /// Creates a pipeline; fails on an out-of-range threshold.
    pub fn new(
        classifier: PatternClassifier<'t>,
        vocabulary: &'t Vocabulary,
        min_confidence: f32,
    ) -> Result<Self, AuditError> {
        Ok(Self {
            classifier,
            vocabulary,
            min_confidence: validate_min_confidence(min_confidence)?,
        })
    }

    /// Threshold applied to text sources.
    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    /// Categories on one side: classifier output over `text` plus `graph`.
    fn side(
        &self,
        text: Option<&String>,
        graph: Option<&BTreeSet<DataCategory>>,
    ) -> Result<SourceCategories, AuditError> {
        let text = present(text);
        let mut categories = match text {
            Some(text) => self.classifier.extract(text, self.min_confidence)?,
            None => BTreeSet::new(),
        };
        if let Some(graph) = graph {
            categories.extend(graph.iter().copied());
        }

        Ok(SourceCategories {
            categories,
            analyzed: text.is_some() || graph.is_some(),
        })
    }

    /// Policy-side categories.
    pub fn policy_categories(
        &self,
        sources: &SubjectSources,
    ) -> Result<SourceCategories, AuditError> {
        self.side(sources.policy_text.as_ref(), sources.policy_graph.as_ref())
    }

    /// Disclosure-side categories, before any fallback.
    pub fn disclosure_categories(
        &self,
        sources: &SubjectSources,
    ) -> Result<SourceCategories, AuditError> {
        self.side(
            sources.disclosure_analysis.as_ref(),
            sources.disclosure_graph.as_ref(),
        )
    }

    /// Categories named by the listing's section labels.
    pub fn raw_disclosure_categories(&self, sources: &SubjectSources) -> BTreeSet<DataCategory> {
        present(sources.disclosure_text.as_ref())
            .map(|text| parse_disclosure_labels(self.vocabulary, text))
            .unwrap_or_default()
    }

    /// Builds the comparison input for one subject.
    pub fn prepare(&self, sources: &SubjectSources) -> Result<ComparisonInput, AuditError> {
        let policy = self.policy_categories(sources)?;
        let disclosure = self.disclosure_categories(sources)?;
        let raw = self.raw_disclosure_categories(sources);

        let used_raw = disclosure.categories.is_empty() && !raw.is_empty();
        debug!(
            subject = %sources.subject.id,
            policy = policy.categories.len(),
            disclosure = disclosure.categories.len(),
            raw = raw.len(),
            used_raw,
            "Prepared subject"
        );

        Ok(ComparisonInput {
            subject: sources.subject.clone(),
            policy_categories: policy.categories,
            disclosure_categories: resolve_disclosure(disclosure.categories, raw),
            policy_analyzed: policy.analyzed,
            disclosure_analyzed: disclosure.analyzed,
            notes: availability_notes(policy.analyzed, disclosure.analyzed),
        })
    }

    /// Classifies and compares one subject.
    pub fn run(&self, sources: &SubjectSources) -> Result<EntityComparison, AuditError> {
        Ok(ComparisonEngine::compare_input(&self.prepare(sources)?))
    }

    /// Classifies and compares many subjects; output order follows input order.
    pub fn run_batch(
        &self,
        subjects: &[SubjectSources],
    ) -> Result<Vec<EntityComparison>, AuditError> {
        #[cfg(feature = "parallel")]
        let inputs = subjects
            .par_iter()
            .map(|s| self.prepare(s))
            .collect::<Result<Vec<_>, _>>()?;
        #[cfg(not(feature = "parallel"))]
        let inputs = subjects
            .iter()
            .map(|s| self.prepare(s))
            .collect::<Result<Vec<_>, _>>()?;

        let records = ComparisonEngine::compare_batch(&inputs);
        info!(subjects = records.len(), "Compared batch");
        Ok(records)
    }
}
