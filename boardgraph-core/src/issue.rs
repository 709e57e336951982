//! Typed issue model
//!
//! These are the validated shapes the rest of the crate works with. The Jira
//! wire format (with its numbered custom fields) is converted into these
//! types at the fetch boundary.

use serde::{Deserialize, Serialize};

/// Component tag attached to an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
}

/// A tracked work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key, e.g. `PROJ-12`
    pub key: String,
    /// One-line summary
    pub summary: String,
    /// Story point estimate
    #[serde(default)]
    pub weight: Option<f64>,
    /// Component tags, in Jira order
    #[serde(default)]
    pub components: Vec<Component>,
    /// Links to other issues
    #[serde(default)]
    pub links: Vec<IssueLink>,
    /// Value of the classification field used for board filtering
    #[serde(default)]
    pub classification: Option<String>,
}

impl Issue {
    /// Create an issue with only a key and summary
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            summary: summary.into(),
            weight: None,
            components: Vec::new(),
            links: Vec::new(),
            classification: None,
        }
    }

    /// First component, which decides the node group
    pub fn primary_component(&self) -> Option<&Component> {
        self.components.first()
    }

    /// Check whether the key belongs to the given project
    pub fn in_project(&self, prefix: &str) -> bool {
        key_in_project(&self.key, prefix)
    }

    /// Issues on the inward side of this issue's links
    pub fn inward_issues(&self) -> impl Iterator<Item = &Issue> {
        self.links.iter().filter_map(|l| l.inward.as_deref())
    }

    /// Issues on the outward side of this issue's links
    pub fn outward_issues(&self) -> impl Iterator<Item = &Issue> {
        self.links.iter().filter_map(|l| l.outward.as_deref())
    }
}

/// Directed relation between two issues
///
/// Seen from the issue that owns the link: `inward` points into it,
/// `outward` points out of it. Jira fills exactly one side, but both are
/// optional in the wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueLink {
    #[serde(default)]
    pub inward: Option<Box<Issue>>,
    #[serde(default)]
    pub outward: Option<Box<Issue>>,
}

impl IssueLink {
    /// Link from `issue` into the owner
    pub fn inward(issue: Issue) -> Self {
        Self {
            inward: Some(Box::new(issue)),
            outward: None,
        }
    }

    /// Link from the owner out to `issue`
    pub fn outward(issue: Issue) -> Self {
        Self {
            inward: None,
            outward: Some(Box::new(issue)),
        }
    }
}

/// Issues retrieved for one board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub issues: Vec<Issue>,
}

impl Board {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// `PROJ-12` is in project `PROJ`; `PROJECT-12` and `OTHER-12` are not
pub(crate) fn key_in_project(key: &str, prefix: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-'))
}
