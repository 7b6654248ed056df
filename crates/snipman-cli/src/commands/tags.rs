//! Attach or detach a tag by name, and manage the tags themselves.
//!
//! Usage: snipman tag <ID> --add <NAME> | --remove <NAME>
//!        snipman tags list | rename <TAG_ID> <NAME> | delete <TAG_ID>

use std::sync::Arc;

use clap::{Args, Subcommand};
use eyre::Result;

use snipman_client::{RequestFailed, SnippetClient, SnippetRepository};
use snipman_core::{NewTag, Snippet, Tag, TagId, normalize_tag_name};

use crate::commands::snippets::open;
use crate::render;

#[derive(Debug, Args)]
pub struct TagArgs {
    /// Snippet ID
    pub id: String,

    /// Tag name to attach (created if it does not exist)
    #[arg(long, conflicts_with = "remove", required_unless_present = "remove")]
    pub add: Option<String>,

    /// Tag name to detach
    #[arg(long)]
    pub remove: Option<String>,
}

pub async fn execute(client: Arc<SnippetClient>, args: TagArgs) -> Result<bool> {
    let Some(detail) = open(client, &args.id).await? else {
        return Ok(false);
    };

    let outcome = match (args.add, args.remove) {
        (Some(name), _) => detail.add_tag(&name).await,
        (None, Some(name)) => {
            let current = detail.snapshot().snippet;
            let Some(tag) = current.as_ref().and_then(|s| find_tag(s, &name)) else {
                eprintln!("Snippet has no tag \"{}\".", name.trim());
                return Ok(false);
            };
            detail.detach_tag(tag).await
        }
        (None, None) => return Err(eyre::eyre!("one of --add or --remove is required")),
    };

    if let Some(feedback) = detail.snapshot().feedback {
        render::feedback(&feedback);
    }
    Ok(outcome.is_saved())
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    /// List all tags
    List,
    /// Rename a tag everywhere it is attached
    Rename {
        /// Tag ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a tag and detach it from every snippet
    Delete {
        /// Tag ID
        id: String,
    },
}

pub async fn manage(client: Arc<SnippetClient>, args: TagsArgs) -> Result<bool> {
    let result = match args.command {
        TagsCommand::List => client.list_tags().await.map(|tags| {
            print!("{}", tag_lines(&tags));
        }),
        TagsCommand::Rename { id, name } => {
            let id = TagId::parse(&id)?;
            let tag = NewTag::new(&name)?;
            client.rename_tag(&id, &tag).await.map(|renamed| {
                println!("Tag {} renamed to \"{}\".", renamed.id, renamed.name);
            })
        }
        TagsCommand::Delete { id } => {
            let id = TagId::parse(&id)?;
            client.delete_tag(&id).await.map(|()| {
                println!("Tag {id} deleted.");
            })
        }
    };
    Ok(report(result))
}

fn report(result: Result<(), RequestFailed>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            eprintln!("{err}");
            false
        }
    }
}

fn tag_lines(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags.\n".to_string();
    }
    tags.iter()
        .map(|t| format!("{}\t{}\n", t.id, t.name))
        .collect()
}

fn find_tag(snippet: &Snippet, name: &str) -> Option<TagId> {
    let name = normalize_tag_name(name);
    snippet
        .tags
        .iter()
        .find(|t| normalize_tag_name(&t.name) == name)
        .map(|t| t.id.clone())
}
