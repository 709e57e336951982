//! Issue-link graph construction
//!
//! Turns a flat list of issues into the node/edge shape consumed by the
//! network renderer. Nodes are deduplicated by the numeric part of the issue
//! key; edges are kept as discovered, parallel edges included.

use std::collections::HashSet;

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::issue::Issue;

/// Errors raised while building a graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Issue key has no numeric suffix after its last `-`
    #[error("Malformed issue key {key:?}: expected <PREFIX>-<number>")]
    MalformedKey { key: String },
}

/// Node identifier: the numeric suffix of an issue key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Parse the text after the last `-` of `key`
    ///
    /// A key without any `-` is parsed whole.
    pub fn from_key(key: &str) -> Result<Self, GraphError> {
        let malformed = || GraphError::MalformedKey {
            key: key.to_string(),
        };

        let suffix = key.rsplit('-').next().unwrap_or(key);
        if !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        suffix.parse::<u64>().map(NodeId).map_err(|_| malformed())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Node colouring group
///
/// Serialized as the component id, or `0` for ungrouped nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Group {
    #[default]
    Ungrouped,
    Component(String),
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Group::Ungrouped => serializer.serialize_u8(0),
            Group::Component(id) => serializer.serialize_str(id),
        }
    }
}

/// Edge arrow marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrow {
    #[default]
    To,
}

/// A graph node representing one issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    /// Full issue key
    pub label: String,
    /// Size magnitude derived from story points
    pub value: f64,
    /// Hover text, one fact per line
    pub title: String,
    pub group: Group,
}

impl GraphNode {
    /// Build the node for `issue` under `id`
    pub fn from_issue(id: NodeId, issue: &Issue) -> Self {
        let weight = issue.weight.filter(|w| is_truthy(*w));

        let mut title = issue.summary.clone();
        if let Some(component) = issue.primary_component() {
            title.push('\n');
            title.push_str(&component.name);
        }
        if let Some(points) = weight {
            title.push_str(&format!("\n{} story points", points));
        }

        Self {
            id,
            label: issue.key.clone(),
            value: (weight.unwrap_or(0.0) + 1.0) * 100.0,
            title,
            group: issue
                .primary_component()
                .map(|c| Group::Component(c.id.clone()))
                .unwrap_or_default(),
        }
    }
}

fn is_truthy(weight: f64) -> bool {
    weight != 0.0 && !weight.is_nan()
}

/// A directed edge between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub arrows: Arrow,
}

impl GraphEdge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            arrows: Arrow::To,
        }
    }
}

/// Nodes and edges ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds link graphs for one project
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    prefix: String,
}

impl GraphBuilder {
    /// Create a builder that keeps only links to `prefix`-keyed issues
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Build a graph from a list of issues
    ///
    /// Nodes appear in first-seen order; for each issue its own node comes
    /// first, then its inward neighbours, then its outward neighbours. The
    /// first occurrence of an id decides the node's content. Any malformed
    /// key fails the whole build.
    pub fn build(&self, issues: &[Issue]) -> Result<Graph, GraphError> {
        let mut acc = Accumulator::default();

        for issue in issues {
            let issue_id = acc.ensure_node(issue)?;

            for inward in issue.inward_issues().filter(|i| i.in_project(&self.prefix)) {
                let in_id = acc.ensure_node(inward)?;
                acc.graph.edges.push(GraphEdge::new(in_id, issue_id));
            }

            for outward in issue.outward_issues().filter(|i| i.in_project(&self.prefix)) {
                let out_id = acc.ensure_node(outward)?;
                acc.graph.edges.push(GraphEdge::new(issue_id, out_id));
            }
        }

        debug!(
            issues = issues.len(),
            nodes = acc.graph.nodes.len(),
            edges = acc.graph.edges.len(),
            "Built issue graph"
        );

        Ok(acc.graph)
    }
}

#[derive(Default)]
struct Accumulator {
    graph: Graph,
    // Membership only; node order lives in `graph.nodes`
    seen: HashSet<NodeId>,
}

impl Accumulator {
    fn ensure_node(&mut self, issue: &Issue) -> Result<NodeId, GraphError> {
        let id = NodeId::from_key(&issue.key)?;
        if self.seen.insert(id) {
            self.graph.nodes.push(GraphNode::from_issue(id, issue));
        }
        Ok(id)
    }
}
