//! Graph command - print the link graph as JSON

use std::io::Write;

use boardgraph_core::{Config, Graph};
use clap::Args;

use crate::pipeline;

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Follow board pagination instead of a single request
    #[arg(long)]
    pub all_pages: bool,

    /// Pretty-print the JSON
    #[arg(short, long)]
    pub pretty: bool,
}

impl GraphArgs {
    /// Execute the graph command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let board = pipeline::load_board(config, self.all_pages, verbose).await?;
        let graph = pipeline::build_graph(config, &board)?;

        let stdout = std::io::stdout();
        write_graph(&graph, self.pretty, &mut stdout.lock())
    }
}

/// Write the graph as a single JSON document followed by a newline
///
/// Nothing else is ever written here, so the output can be piped straight
/// into a JSON consumer.
fn write_graph(graph: &Graph, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, graph)?;
    } else {
        serde_json::to_writer(&mut *out, graph)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardgraph_core::{GraphBuilder, Issue, IssueLink};

    fn sample_graph() -> Graph {
        let mut root = Issue::new("PROJ-1", "root");
        root.links = vec![IssueLink::outward(Issue::new("PROJ-2", "child"))];
        GraphBuilder::new("PROJ").build(&[root]).unwrap()
    }

    #[test]
    fn test_output_is_only_json() {
        for pretty in [false, true] {
            let mut out = Vec::new();
            write_graph(&sample_graph(), pretty, &mut out).unwrap();

            let text = String::from_utf8(out).unwrap();
            assert!(text.ends_with('\n'));

            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
            assert_eq!(value["edges"].as_array().unwrap().len(), 1);
        }
    }

    #[test]
    fn test_empty_graph_is_still_json() {
        let graph = GraphBuilder::new("PROJ").build(&[]).unwrap();
        let mut out = Vec::new();

        write_graph(&graph, false, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["nodes"], serde_json::json!([]));
    }
}
