//! Jira Agile REST wire format
//!
//! Mirrors the JSON returned by `/rest/agile/latest/board/{id}/issue` and
//! converts it into the typed issue model. Custom fields are captured by
//! name and resolved through the configured [`FieldConfig`].

use boardgraph_core::{Board, Component, FieldConfig, Issue, IssueLink};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of board issues
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoard {
    #[serde(default)]
    pub start_at: Option<u64>,
    #[serde(default)]
    pub max_results: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub is_last: Option<bool>,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub fields: RawFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub issuelinks: Option<Vec<RawLink>>,
    #[serde(default)]
    pub components: Option<Vec<RawComponent>>,
    /// Everything else, custom fields included
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLink {
    #[serde(default)]
    pub inward_issue: Option<RawIssue>,
    #[serde(default)]
    pub outward_issue: Option<RawIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComponent {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl RawBoard {
    pub fn into_board(self, fields: &FieldConfig) -> Board {
        Board::new(
            self.issues
                .into_iter()
                .map(|i| i.into_issue(fields))
                .collect(),
        )
    }
}

impl RawIssue {
    pub fn into_issue(self, fields: &FieldConfig) -> Issue {
        let RawFields {
            summary,
            issuelinks,
            components,
            extra,
        } = self.fields;

        Issue {
            key: self.key,
            summary: summary.unwrap_or_default(),
            weight: extra.get(&fields.story_points).and_then(Value::as_f64),
            components: components
                .unwrap_or_default()
                .into_iter()
                .map(|c| Component {
                    id: c.id,
                    name: c.name,
                })
                .collect(),
            links: issuelinks
                .unwrap_or_default()
                .into_iter()
                .map(|l| IssueLink {
                    inward: l.inward_issue.map(|i| Box::new(i.into_issue(fields))),
                    outward: l.outward_issue.map(|i| Box::new(i.into_issue(fields))),
                })
                .collect(),
            classification: extra
                .get(&fields.classification)
                .and_then(classification_value),
        }
    }
}

/// Single-select options arrive as `{ "value": ... }`; plain strings are accepted too
fn classification_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("value").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
