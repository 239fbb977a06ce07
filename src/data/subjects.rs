//! Batch subjects file.
//!
//! ```yaml
//! subjects:
//!   - id: bmnlcjabgnpnenekpadlanbbkooimhnj
//!     name: PayPal Honey
//!     policy_file: policies/honey.html
//!     policy_graph: graphs/honey-policy.yaml
//!     disclosure_text: |
//!       Personally identifiable information
//!       ...
//!     disclosure_analysis: This extension collects your email address.
//! ```
//!
//! Relative paths resolve against the subjects file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::comparison::Subject;
use crate::data::graph::KnowledgeGraph;
use crate::data::yaml::read_yaml_file;
use crate::pipeline::SubjectSources;
use crate::taxonomy::{FuzzyMatchPolicy, Vocabulary};
use crate::utils::html::read_text_source;

/// Contents of a subjects file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectsFile {
    /// Subjects in report order.
    #[serde(default)]
    pub subjects: Vec<SubjectEntry>,
}

/// One subject and where its sources live.
///
/// Inline text and a file path may both be given for a source; the inline
/// text wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectEntry {
    /// Stable identifier.
    pub id: String,
    /// Display name; defaults to the id.
    #[serde(default)]
    pub name: Option<String>,
    /// Inline policy text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_text: Option<String>,
    /// Policy text or HTML file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_file: Option<PathBuf>,
    /// Policy knowledge graph (YAML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_graph: Option<PathBuf>,
    /// Raw store-listing disclosure text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosure_text: Option<String>,
    /// Raw disclosure text file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosure_file: Option<PathBuf>,
    /// Natural-language rewrite of the disclosure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosure_analysis: Option<String>,
    /// Disclosure rewrite file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosure_analysis_file: Option<PathBuf>,
    /// Disclosure knowledge graph (YAML).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosure_graph: Option<PathBuf>,
}

impl SubjectsFile {
    /// Loads a subjects file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_yaml_file(path)
    }

    /// Loads a subjects file and resolves every entry into pipeline sources.
    pub fn load_sources<P: AsRef<Path>>(
        path: P,
        vocabulary: &Vocabulary,
        policy: FuzzyMatchPolicy,
    ) -> Result<Vec<SubjectSources>> {
        let path = path.as_ref();
        let file = Self::load(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        file.subjects
            .into_iter()
            .map(|entry| {
                let id = entry.id.clone();
                entry
                    .into_sources(base_dir, vocabulary, policy)
                    .with_context(|| format!("Failed to load sources for subject {id}"))
            })
            .collect()
    }
}

impl SubjectEntry {
    /// Reads referenced files and resolves graphs to categories.
    pub fn into_sources(
        self,
        base_dir: &Path,
        vocabulary: &Vocabulary,
        policy: FuzzyMatchPolicy,
    ) -> Result<SubjectSources> {
        let resolve = |p: &Path| base_dir.join(p);
        let text = |inline: Option<String>, file: Option<&PathBuf>| -> Result<Option<String>> {
            match (inline, file) {
                (Some(text), _) => Ok(Some(text)),
                (None, Some(file)) => read_text_source(&resolve(file)).map(Some),
                (None, None) => Ok(None),
            }
        };
        let graph = |file: Option<&PathBuf>| -> Result<_> {
            file.map(|f| {
                let path = resolve(f);
                KnowledgeGraph::load(&path).map(|g| g.categories(vocabulary, policy))
            })
            .transpose()
        };

        let name = self.name.clone().unwrap_or_else(|| self.id.clone());
        Ok(SubjectSources {
            policy_text: text(self.policy_text, self.policy_file.as_ref())?,
            policy_graph: graph(self.policy_graph.as_ref())?,
            disclosure_text: text(self.disclosure_text, self.disclosure_file.as_ref())?,
            disclosure_analysis: text(
                self.disclosure_analysis,
                self.disclosure_analysis_file.as_ref(),
            )?,
            disclosure_graph: graph(self.disclosure_graph.as_ref())?,
            subject: Subject::new(self.id, name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::yaml::write_yaml_file;
    use crate::taxonomy::DataCategory;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn vocabulary() -> &'static Vocabulary {
        Vocabulary::builtin().unwrap()
    }

    #[test]
    fn relative_paths_resolve_against_subjects_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::create_dir_all(dir.join("policies")).unwrap();
        fs::write(
            dir.join("policies/a.html"),
            "<html><body><p>We collect your <b>email address</b>.</p></body></html>",
        )
        .unwrap();
        fs::write(
            dir.join("graph.yaml"),
            "nodes:\n  - id: credit card number\n    type: DATA\n",
        )
        .unwrap();
        fs::write(
            dir.join("subjects.yaml"),
            "subjects:\n  - id: a\n    policy_file: policies/a.html\n    disclosure_graph: graph.yaml\n",
        )
        .unwrap();

        let sources = SubjectsFile::load_sources(
            dir.join("subjects.yaml"),
            vocabulary(),
            FuzzyMatchPolicy::default(),
        )
        .unwrap();

        assert_eq!(sources.len(), 1);
        let a = &sources[0];
        assert_eq!(a.subject.name, "a");
        assert_eq!(a.policy_text.as_deref(), Some("We collect your email address ."));
        assert_eq!(
            a.disclosure_graph,
            Some(BTreeSet::from([DataCategory::Financial]))
        );
        assert!(a.policy_graph.is_none());
        assert!(a.disclosure_text.is_none());
    }

    #[test]
    fn inline_text_wins_over_file() {
        let entry = SubjectEntry {
            id: "b".to_string(),
            name: Some("B".to_string()),
            policy_text: Some("inline".to_string()),
            policy_file: Some(PathBuf::from("does-not-exist.txt")),
            ..SubjectEntry::default()
        };
        let sources = entry
            .into_sources(Path::new("."), vocabulary(), FuzzyMatchPolicy::default())
            .unwrap();
        assert_eq!(sources.policy_text.as_deref(), Some("inline"));
        assert_eq!(sources.subject.name, "B");
    }

    #[test]
    fn missing_graph_names_subject() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("subjects.yaml");
        fs::write(&path, "subjects:\n  - id: c\n    policy_graph: missing.yaml\n").unwrap();

        let err = SubjectsFile::load_sources(&path, vocabulary(), FuzzyMatchPolicy::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("subject c"));
        assert!(format!("{err:#}").contains("missing.yaml"));
    }

    #[test]
    fn written_file_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("subjects.yaml");
        let file = SubjectsFile {
            subjects: vec![SubjectEntry {
                id: "d".to_string(),
                disclosure_text: Some("Location".to_string()),
                ..SubjectEntry::default()
            }],
        };

        write_yaml_file(&file, &path).unwrap();
        let loaded = SubjectsFile::load(&path).unwrap();
        assert_eq!(loaded.subjects.len(), 1);
        assert_eq!(loaded.subjects[0].disclosure_text.as_deref(), Some("Location"));
    }
}
