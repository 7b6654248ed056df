//! Config file management.
//!
//! Usage: snipman config show | set-url <URL> | reset

use clap::{Args, Subcommand};
use eyre::Result;

use snipman_client::config::{self, ClientConfig};
use snipman_client::SnippetClient;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location and the effective settings
    Show,
    /// Store a new API base URL
    SetUrl {
        /// API root including the base path, e.g. http://localhost:8080/api/v1
        url: String,
    },
    /// Delete the config file and fall back to defaults
    Reset,
}

pub fn execute(args: ConfigArgs, api_url: Option<&str>) -> Result<bool> {
    match args.command {
        ConfigCommand::Show => {
            let path = config::config_path()?;
            let effective = config::resolve(api_url)?;
            println!("path: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&effective)?);
        }
        ConfigCommand::SetUrl { url } => {
            let path = config::config_path()?;
            let mut stored = if path.exists() {
                config::load_from(&path)?
            } else {
                ClientConfig::default()
            };
            stored.base_url = url.trim().to_string();
            // Reject URLs the client could not use before persisting them.
            SnippetClient::new(&stored)?;
            config::save_to(&path, &stored)?;
            println!("API URL set to {}", stored.base_url);
        }
        ConfigCommand::Reset => {
            config::delete()?;
            println!("Config reset to defaults.");
        }
    }
    Ok(true)
}
