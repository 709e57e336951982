//! boardgraph core - issue model, link graph construction and rendering
//!
//! This crate turns a Jira board's issues into a deduplicated graph of
//! issue links and renders it as an interactive network page.

pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod issue;
pub mod navigate;
pub mod render;
pub mod secrets;

pub use config::{Config, ConfigOverrides, FieldConfig, JiraConfig, RenderConfig};
pub use error::{Error, Result};
pub use filter::{filter_board, matches_classification};
pub use graph::{Arrow, Graph, GraphBuilder, GraphEdge, GraphError, GraphNode, Group, NodeId};
pub use issue::{Board, Component, Issue, IssueLink};
pub use navigate::{Navigator, Opener, SystemBrowser};
pub use render::{HtmlPage, Network, NetworkOptions, Subscription};
pub use secrets::{Credentials, JiraSecrets, Secrets};
