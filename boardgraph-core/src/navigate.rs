//! Navigation from graph nodes back to Jira issues

use std::process::{Command, Stdio};

use tracing::{debug, info};
use url::Url;

use crate::graph::NodeId;
use crate::issue::key_in_project;
use crate::{Config, Error, Result};

/// Something that can show a URL to the user
pub trait Opener {
    fn open(&self, url: &Url) -> Result<()>;
}

/// Opens URLs in the desktop's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Opener for SystemBrowser {
    fn open(&self, url: &Url) -> Result<()> {
        let mut command = browser_command(url.as_str());
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        command
            .spawn()
            .map_err(|e| Error::Navigate(format!("Failed to launch browser for {}: {}", url, e)))?;

        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// Resolves node identifiers to issue pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    host: String,
    prefix: String,
}

impl Navigator {
    pub fn new(host: impl Into<String>, prefix: impl Into<String>) -> Self {
        let host: String = host.into();
        Self {
            host: host.trim().trim_end_matches('/').to_string(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.host(), config.jira.prefix.clone())
    }

    /// Issue page URL template, with `{id}` standing for the node id
    pub fn url_template(&self) -> String {
        format!("{}/browse/{}-{{id}}", self.host, self.prefix)
    }

    /// `{host}/browse/{prefix}-{id}`
    pub fn issue_url(&self, id: NodeId) -> Result<Url> {
        let raw = format!("{}/browse/{}-{}", self.host, self.prefix, id);
        Url::parse(&raw).map_err(|e| Error::Navigate(format!("Invalid issue URL {}: {}", raw, e)))
    }

    /// Resolve a raw node identifier
    ///
    /// Accepts a bare number or a full key from this navigator's project.
    /// Keys from any other project are rejected rather than rewritten. An
    /// absent or blank identifier resolves to `None`.
    pub fn resolve(&self, node: Option<&str>) -> Result<Option<Url>> {
        let Some(node) = node.map(str::trim).filter(|n| !n.is_empty()) else {
            debug!("No node selected, nothing to open");
            return Ok(None);
        };

        let is_number = node.bytes().all(|b| b.is_ascii_digit());
        if !is_number && !key_in_project(node, &self.prefix) {
            return Err(Error::Navigate(format!(
                "{} is not an issue in project {}",
                node, self.prefix
            )));
        }

        let id = NodeId::from_key(node)?;
        self.issue_url(id).map(Some)
    }

    /// Open the issue page for `node`, doing nothing when it is absent
    pub fn open(&self, node: Option<&str>, opener: &dyn Opener) -> Result<Option<Url>> {
        let Some(url) = self.resolve(node)? else {
            return Ok(None);
        };

        info!(url = %url, "Opening issue");
        opener.open(&url)?;
        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        opened: RefCell<Vec<String>>,
    }

    impl Opener for Recorder {
        fn open(&self, url: &Url) -> Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn navigator() -> Navigator {
        Navigator::new("https://jira.example.com/", "PROJ")
    }

    #[test]
    fn test_issue_url() {
        let url = navigator().issue_url(NodeId(12)).unwrap();
        assert_eq!(url.as_str(), "https://jira.example.com/browse/PROJ-12");
    }

    #[test]
    fn test_issue_url_keeps_context_path() {
        let url = Navigator::new("https://example.com/jira", "OPS")
            .issue_url(NodeId(3))
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/jira/browse/OPS-3");
    }

    #[test]
    fn test_resolve_accepts_key_or_number() {
        let nav = navigator();
        assert_eq!(
            nav.resolve(Some("7")).unwrap().unwrap().as_str(),
            "https://jira.example.com/browse/PROJ-7"
        );
        assert_eq!(
            nav.resolve(Some("PROJ-7")).unwrap().unwrap().as_str(),
            "https://jira.example.com/browse/PROJ-7"
        );
        assert!(nav.resolve(Some("seven")).is_err());
    }

    #[test]
    fn test_resolve_rejects_other_projects() {
        let nav = navigator();

        let err = nav.resolve(Some("OTHER-7")).unwrap_err();
        assert!(err.to_string().contains("OTHER-7"));
        assert!(nav.resolve(Some("PROJECT-7")).is_err());

        let recorder = Recorder::default();
        assert!(nav.open(Some("OTHER-7"), &recorder).is_err());
        assert!(recorder.opened.borrow().is_empty());
    }

    #[test]
    fn test_open_is_noop_without_node() {
        let recorder = Recorder::default();
        let nav = navigator();

        assert!(nav.open(None, &recorder).unwrap().is_none());
        assert!(nav.open(Some("  "), &recorder).unwrap().is_none());
        assert!(recorder.opened.borrow().is_empty());
    }

    #[test]
    fn test_open_delegates_to_opener() {
        let recorder = Recorder::default();

        navigator().open(Some("5"), &recorder).unwrap();

        assert_eq!(
            *recorder.opened.borrow(),
            vec!["https://jira.example.com/browse/PROJ-5".to_string()]
        );
    }

    #[test]
    fn test_url_template() {
        assert_eq!(
            navigator().url_template(),
            "https://jira.example.com/browse/PROJ-{id}"
        );
    }
}
