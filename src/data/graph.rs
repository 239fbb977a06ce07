//! Knowledge-graph input produced by an external extraction pipeline.
//!
//! Only the parts needed to recover data types are read: `DATA` nodes and
//! the targets of collection edges. Unknown fields are ignored.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use crate::data::yaml::read_yaml_file;
use crate::taxonomy::{DataCategory, FuzzyMatchPolicy, Vocabulary};

/// Edge kinds that denote a data practice on their target.
pub const COLLECTION_EDGES: [&str; 4] = ["COLLECT", "USE", "SHARE", "STORE"];

/// Graph node.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphNode {
    /// Node label; for data nodes this is the datatype term.
    pub id: String,
    /// Node kind, e.g. `DATA` or `ENTITY`.
    #[serde(rename = "type", default)]
    pub node_type: String,
}

/// Graph edge.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphLink {
    /// Source node id.
    #[serde(default)]
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Edge kind, e.g. `COLLECT`.
    #[serde(default)]
    pub key: String,
}

/// A data-practice knowledge graph.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeGraph {
    /// Graph nodes.
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    /// Graph edges.
    #[serde(default)]
    pub links: Vec<GraphLink>,
}

impl KnowledgeGraph {
    /// Loads a graph from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_yaml_file(path)
    }

    /// Datatype terms: ids of `DATA` nodes, then targets of collection edges.
    pub fn data_terms(&self) -> impl Iterator<Item = &str> {
        let nodes = self
            .nodes
            .iter()
            .filter(|node| node.node_type.eq_ignore_ascii_case("DATA"))
            .map(|node| node.id.as_str());
        let targets = self
            .links
            .iter()
            .filter(|link| {
                COLLECTION_EDGES
                    .iter()
                    .any(|kind| link.key.eq_ignore_ascii_case(kind))
            })
            .map(|link| link.target.as_str());
        nodes.chain(targets)
    }

    /// Maps the graph's datatype terms onto categories.
    pub fn categories(
        &self,
        vocabulary: &Vocabulary,
        policy: FuzzyMatchPolicy,
    ) -> BTreeSet<DataCategory> {
        let mut unmapped = 0usize;
        let categories = self
            .data_terms()
            .filter_map(|term| {
                let category = vocabulary.lookup(term, policy);
                if category.is_none() {
                    unmapped += 1;
                }
                category
            })
            .collect();

        debug!(
            nodes = self.nodes.len(),
            links = self.links.len(),
            unmapped,
            "Mapped graph terms to categories"
        );

        categories
    }
}
