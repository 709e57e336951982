//! Open command - jump from a node id to its Jira issue

use boardgraph_core::{Config, Navigator, SystemBrowser};
use clap::Args;

/// Arguments for the open command
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Node id or full issue key (e.g. 12 or PROJ-12)
    pub node: Option<String>,

    /// Print the URL instead of launching a browser
    #[arg(long)]
    pub print: bool,
}

impl OpenArgs {
    /// Execute the open command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        config.validate()?;
        let navigator = Navigator::from_config(config);

        if self.print {
            if let Some(url) = navigator.resolve(self.node.as_deref())? {
                println!("{}", url);
            }
            return Ok(());
        }

        match navigator.open(self.node.as_deref(), &SystemBrowser)? {
            Some(url) => println!("Opened {}", url),
            None => println!("No issue selected."),
        }

        Ok(())
    }
}
