//! snipman CLI
//!
//! Terminal front end for the snippet manager. Each command drives one of
//! the view-models and prints the state it ends in.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;

use snipman_client::{SnippetClient, config};

mod commands;
mod render;

#[derive(Debug, Parser)]
#[command(name = "snipman")]
#[command(about = "Snippet manager - browse and edit documentation snippets", long_about = None)]
struct Cli {
    /// API root, e.g. http://localhost:8080/api/v1 (overrides config and SNIPMAN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List all snippets
    List,
    /// Show one snippet
    Show(commands::snippets::ShowArgs),
    /// Create a snippet
    Create(commands::snippets::CreateArgs),
    /// Edit a snippet's title and/or content
    Edit(commands::snippets::EditArgs),
    /// Delete a snippet
    Delete(commands::snippets::DeleteArgs),
    /// Attach or detach a tag
    Tag(commands::tags::TagArgs),
    /// List, rename or delete tags
    Tags(commands::tags::TagsArgs),
    /// Manage the config file
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ok = match cli.command {
        Commands::Config(args) => commands::config::execute(args, cli.api_url.as_deref())?,
        command => run(command, cli.api_url.as_deref()).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Commands that talk to the API. `Ok(false)` means the operation ended in
/// an error state that has already been reported.
async fn run(command: Commands, api_url: Option<&str>) -> Result<bool> {
    let resolved = config::resolve(api_url)?;
    let client = Arc::new(SnippetClient::new(&resolved)?);

    let ok = match command {
        Commands::List => commands::snippets::list(client).await?,
        Commands::Show(args) => commands::snippets::show(client, args).await?,
        Commands::Create(args) => commands::snippets::create(client, args).await?,
        Commands::Edit(args) => commands::snippets::edit(client, args).await?,
        Commands::Delete(args) => commands::snippets::delete(client, args).await?,
        Commands::Tag(args) => commands::tags::execute(client, args).await?,
        Commands::Tags(args) => commands::tags::manage(client, args).await?,
        Commands::Config(args) => commands::config::execute(args, api_url)?,
    };
    Ok(ok)
}
