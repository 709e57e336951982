//! Secrets commands

use boardgraph_core::Secrets;
use clap::{Args, Subcommand};

/// Manage stored Jira credentials
#[derive(Args, Debug)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// Write a secrets template with owner-only permissions
    Init,

    /// Show where secrets are read from
    Path,
}

impl SecretsArgs {
    /// Execute the secrets command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self.command {
            SecretsCommand::Init => {
                let path = Secrets::create_template()?;
                println!("Created {}", path.display());
                println!("Edit it to add your Jira username and password.");
            }
            SecretsCommand::Path => match Secrets::default_secrets_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("Could not determine secrets path"),
            },
        }
        Ok(())
    }
}
