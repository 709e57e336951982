//! boardgraph Jira - Jira Agile integration for boardgraph
//!
//! This crate fetches board issues over the Jira Agile REST API and
//! converts them into the typed issue model from `boardgraph-core`.

mod client;
mod error;
pub mod wire;

pub use client::JiraClient;
pub use error::{Error, Result};
