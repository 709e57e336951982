//! Render command - fetch a board and write the interactive link graph page

use std::path::{Path, PathBuf};

use boardgraph_core::{
    Config, HtmlPage, Navigator, Network, NetworkOptions, Opener, SystemBrowser,
};
use clap::Args;
use url::Url;

use crate::pipeline;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Output file (overrides [render].output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Page title (overrides [render].title)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Follow board pagination instead of a single request
    #[arg(long)]
    pub all_pages: bool,

    /// Open the page in the default browser when done
    #[arg(long)]
    pub open: bool,
}

impl RenderArgs {
    /// Execute the render command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let board = pipeline::load_board(config, self.all_pages, verbose).await?;
        let graph = pipeline::build_graph(config, &board)?;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| config.render.output.clone());
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| config.render.title.clone());

        let mut network = Network::new(graph, NetworkOptions::default());
        network.navigate_on_double_click(Navigator::from_config(config), SystemBrowser);
        HtmlPage::new(&network, title).write_to(&output)?;

        println!(
            "Wrote {} ({} issues, {} links)",
            output.display(),
            network.graph().nodes.len(),
            network.graph().edges.len()
        );

        if self.open {
            SystemBrowser.open(&file_url(&output)?)?;
        }

        Ok(())
    }
}

fn file_url(path: &Path) -> anyhow::Result<Url> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    Url::from_file_path(&absolute)
        .map_err(|_| anyhow::anyhow!("Cannot build a file URL for {}", absolute.display()))
}
