//! Self-contained HTML page driving vis-network

use std::path::Path;

use tracing::info;

use super::Network;
use crate::{Error, Result};

const VIS_NETWORK_SRC: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<script src="__VIS_SRC__"></script>
<style>
  html, body { margin: 0; height: 100%; font-family: sans-serif; }
  #network { width: 100%; height: 100%; }
  .node-tooltip { white-space: pre-line; }
</style>
</head>
<body>
<div id="network"></div>
<script>
  const data = __GRAPH__;
  const options = __OPTIONS__;

  for (const node of data.nodes) {
    const tooltip = document.createElement("div");
    tooltip.className = "node-tooltip";
    tooltip.innerText = node.title;
    node.title = tooltip;
  }

  const network = new vis.Network(document.getElementById("network"), data, options);
__DOUBLE_CLICK__</script>
</body>
</html>
"#;

/// Emitted only while the network has a navigation subscription
const DOUBLE_CLICK_SCRIPT: &str = r#"  const browseUrl = __BROWSE_URL__;
  network.on("doubleClick", (params) => {
    const id = params.nodes[0];
    if (id === undefined || id === null || id === "") {
      return;
    }
    const win = window.open(browseUrl.replace("{id}", String(id)), "_blank");
    if (win) {
      win.focus();
    }
  });
"#;

/// Renders a [`Network`] to a standalone page
///
/// Node double-clicks on the page open the issue only if the network has a
/// live [`Network::navigate_on_double_click`] subscription when rendered.
#[derive(Debug)]
pub struct HtmlPage<'a> {
    network: &'a Network,
    title: String,
}

impl<'a> HtmlPage<'a> {
    pub fn new(network: &'a Network, title: impl Into<String>) -> Self {
        Self {
            network,
            title: title.into(),
        }
    }

    pub fn render(&self) -> Result<String> {
        let graph = script_json(&serde_json::to_string(self.network.graph())?);
        let options = script_json(&serde_json::to_string(self.network.options())?);
        let double_click = match self.network.browse_url_template() {
            Some(template) => {
                let browse_url = script_json(&serde_json::to_string(&template)?);
                fill(DOUBLE_CLICK_SCRIPT, &[("__BROWSE_URL__", browse_url.as_str())])
            }
            None => String::new(),
        };

        let title = escape_html(&self.title);

        Ok(fill(
            PAGE_TEMPLATE,
            &[
                ("__TITLE__", title.as_str()),
                ("__VIS_SRC__", VIS_NETWORK_SRC),
                ("__GRAPH__", graph.as_str()),
                ("__OPTIONS__", options.as_str()),
                ("__DOUBLE_CLICK__", double_click.as_str()),
            ],
        ))
    }

    /// Render and write to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let html = self.render()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
        std::fs::write(path, html).map_err(Error::Io)?;

        info!(
            path = %path.display(),
            nodes = self.network.graph().nodes.len(),
            edges = self.network.graph().edges.len(),
            "Wrote network page"
        );
        Ok(())
    }
}

/// Substitute placeholders in one pass, so inserted text is never rescanned
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("__") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push_str("__");
                rest = &tail[2..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Make JSON safe to inline inside a `<script>` element
fn script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::issue::{Issue, IssueLink};
    use crate::navigate::{Navigator, Opener};
    use crate::render::NetworkOptions;
    use url::Url;

    struct NoBrowser;

    impl Opener for NoBrowser {
        fn open(&self, _url: &Url) -> Result<()> {
            Ok(())
        }
    }

    fn network_with_summary(summary: &str) -> Network {
        let mut root = Issue::new("PROJ-1", summary);
        root.links = vec![IssueLink::outward(Issue::new("PROJ-2", "child"))];
        let graph = GraphBuilder::new("PROJ").build(&[root]).unwrap();
        Network::new(graph, NetworkOptions::default())
    }

    #[test]
    fn test_page_embeds_graph_and_options() {
        let net = network_with_summary("root");
        let html = HtmlPage::new(&net, "Board").render().unwrap();

        assert!(html.contains("<title>Board</title>"));
        assert!(html.contains(VIS_NETWORK_SRC));
        assert!(html.contains(r#""label":"PROJ-1""#));
        assert!(html.contains(r#""from":1,"to":2,"arrows":"to""#));
        assert!(html.contains(r#""shape":"circle""#));
        assert!(!html.contains("__GRAPH__"));
        assert!(!html.contains("__DOUBLE_CLICK__"));
    }

    #[test]
    fn test_page_without_subscription_has_no_double_click() {
        let mut net = network_with_summary("root");
        net.on_double_click(|_| {});

        let html = HtmlPage::new(&net, "Board").render().unwrap();

        assert!(!html.contains("doubleClick"));
        assert!(!html.contains("browseUrl"));
    }

    #[test]
    fn test_page_double_click_follows_subscription() {
        let mut net = network_with_summary("root");
        let sub = net.navigate_on_double_click(
            Navigator::new("https://jira.example.com", "PROJ"),
            NoBrowser,
        );

        let html = HtmlPage::new(&net, "Board").render().unwrap();
        assert!(html.contains(r#"const browseUrl = "https://jira.example.com/browse/PROJ-{id}";"#));
        assert!(html.contains(r#"network.on("doubleClick""#));

        net.unsubscribe(sub);
        let html = HtmlPage::new(&net, "Board").render().unwrap();
        assert!(!html.contains("doubleClick"));
    }

    #[test]
    fn test_placeholders_in_issue_text_are_left_alone() {
        let net = network_with_summary("__TITLE__ and __DOUBLE_CLICK__");
        let html = HtmlPage::new(&net, "Board").render().unwrap();

        assert!(html.contains("__TITLE__ and __DOUBLE_CLICK__"));
        assert_eq!(html.matches("<title>Board</title>").count(), 1);
    }

    #[test]
    fn test_script_content_is_escaped() {
        let net = network_with_summary("</script><script>alert(1)</script>");
        let html = HtmlPage::new(&net, "<b>&</b>").render().unwrap();

        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains("<title>&lt;b&gt;&amp;&lt;/b&gt;</title>"));
        assert!(html.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn test_write_to_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("board.html");
        let net = network_with_summary("root");

        HtmlPage::new(&net, "Board").write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
