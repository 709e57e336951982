//! boardgraph CLI - render Jira board issue links as an interactive network

mod commands;
mod pipeline;

use std::path::PathBuf;

use boardgraph_core::{Config, ConfigOverrides, Secrets};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{GraphArgs, OpenArgs, RenderArgs, SecretsArgs};

/// boardgraph: issue-link graphs for Jira boards
#[derive(Parser, Debug)]
#[command(name = "boardgraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/boardgraph/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Jira base URL (overrides config and env)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Project key prefix (overrides config and env)
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Board id (overrides config and env)
    #[arg(long, global = true)]
    board: Option<u64>,

    /// Classification value to keep (overrides config and env)
    #[arg(long, global = true)]
    filter: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Fetch the board and write the interactive graph page
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Fetch the board and print the graph as JSON
    Graph(GraphArgs),

    /// Open the Jira page for a node
    Open(OpenArgs),

    /// Manage Jira credentials
    Secrets(SecretsArgs),

    /// Show current configuration
    Config,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            prefix: self.prefix.clone(),
            board_id: self.board,
            filter_text: self.filter.clone(),
            output: None,
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from_file(path)?
                .with_env_overrides()?
                .with_cli_overrides(self.overrides()),
            None => Config::load_with_overrides(self.overrides())?,
        };
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = cli.load_config()?;

    if cli.verbose {
        tracing::info!(
            host = %config.jira.host,
            prefix = %config.jira.prefix,
            board_id = config.jira.board_id,
            filter = ?config.jira.filter_text,
            "Configuration loaded"
        );
    }

    match &cli.command {
        Some(Commands::Version) => {
            println!("boardgraph {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Render(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Graph(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Open(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Secrets(args)) => {
            args.execute()?;
        }
        Some(Commands::Config) => {
            print_config(&config, cli.config.as_ref());
        }
        None => {
            println!("boardgraph - issue-link graphs for Jira boards");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config, explicit: Option<&PathBuf>) {
    let or_unset = |s: &str| {
        if s.is_empty() {
            "(not set)".to_string()
        } else {
            s.to_string()
        }
    };

    println!("boardgraph Configuration");
    println!("========================");
    println!();
    println!("Jira Settings:");
    println!("  host: {}", or_unset(&config.jira.host));
    println!("  prefix: {}", or_unset(&config.jira.prefix));
    println!("  board_id: {}", config.jira.board_id);
    println!(
        "  filter_text: {}",
        config.jira.filter_text.as_deref().unwrap_or("(none - all issues)")
    );
    println!();
    println!("Fields:");
    println!("  story_points: {}", config.fields.story_points);
    println!("  classification: {}", config.fields.classification);
    println!();
    println!("Render:");
    println!("  output: {}", config.render.output.display());
    println!("  title: {}", config.render.title);
    println!();

    let path = explicit.cloned().or_else(Config::default_config_path);
    if let Some(path) = path {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }

    let has_credentials = Secrets::load()
        .ok()
        .and_then(|s| s.jira_credentials())
        .is_some();
    println!(
        "Credentials: {}",
        if has_credentials { "configured" } else { "missing" }
    );
}
