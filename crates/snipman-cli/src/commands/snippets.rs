//! Snippet commands: list, show, create, edit, delete.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Args;
use eyre::Result;

use snipman_app::{
    CreateViewModel, DeleteOutcome, DetailPhase, DetailViewModel, ListPhase, ListViewModel,
    RefreshHook, SubmitOutcome,
};
use snipman_client::SnippetClient;
use snipman_core::{Snippet, SnippetId};

use crate::render;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Snippet ID
    pub id: String,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(short, long)]
    pub title: String,

    #[arg(short, long)]
    pub content: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Snippet ID
    pub id: String,

    /// New title (default: keep)
    #[arg(short, long)]
    pub title: Option<String>,

    /// New content (default: keep)
    #[arg(short, long)]
    pub content: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Snippet ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn list(client: Arc<SnippetClient>) -> Result<bool> {
    let list = ListViewModel::new(client);
    let phase = list.refresh().await;
    let snapshot = list.snapshot();
    match (phase, &snapshot.error) {
        (ListPhase::Failed, Some(error)) => {
            eprintln!("{error}");
            Ok(false)
        }
        _ => {
            print!("{}", render::list(&snapshot));
            Ok(true)
        }
    }
}

/// Load `raw_id` into a detail view-model, reporting anything other than a
/// viewable snippet. The list hook is a no-op: nothing here shows a list.
pub(crate) async fn open(
    client: Arc<SnippetClient>,
    raw_id: &str,
) -> Result<Option<DetailViewModel<SnippetClient>>> {
    let id = SnippetId::parse(raw_id)?;
    let detail = DetailViewModel::new(client, RefreshHook::noop());
    match detail.load(id).await {
        DetailPhase::Viewing => Ok(Some(detail)),
        DetailPhase::NotFound => {
            eprintln!("Snippet not found.");
            Ok(None)
        }
        _ => {
            let error = detail.snapshot().load_error.unwrap_or_default();
            eprintln!("Error: {error}");
            Ok(None)
        }
    }
}

pub async fn show(client: Arc<SnippetClient>, args: ShowArgs) -> Result<bool> {
    let Some(detail) = open(client, &args.id).await? else {
        return Ok(false);
    };
    if let Some(snippet) = detail.snapshot().snippet {
        print!("{}", render::snippet(&snippet));
    }
    Ok(true)
}

pub async fn create(client: Arc<SnippetClient>, args: CreateArgs) -> Result<bool> {
    let form = CreateViewModel::new(client, RefreshHook::noop());
    form.set_title(args.title);
    form.set_content(args.content);
    let outcome = form.submit_current().await;
    if let Some(feedback) = form.snapshot().feedback {
        render::feedback(&feedback);
    }
    Ok(outcome.is_saved())
}

pub async fn edit(client: Arc<SnippetClient>, args: EditArgs) -> Result<bool> {
    let Some(detail) = open(client, &args.id).await? else {
        return Ok(false);
    };
    detail.toggle_edit();
    if let Some(title) = args.title {
        detail.set_draft_title(title);
    }
    if let Some(content) = args.content {
        detail.set_draft_content(content);
    }

    let outcome = detail.submit_current_edit().await;
    if let Some(feedback) = detail.snapshot().feedback {
        render::feedback(&feedback);
    }
    if let SubmitOutcome::Saved(snippet) = &outcome {
        print!("{}", render::snippet(snippet));
    }
    Ok(outcome.is_saved())
}

pub async fn delete(client: Arc<SnippetClient>, args: DeleteArgs) -> Result<bool> {
    let Some(detail) = open(client, &args.id).await? else {
        return Ok(false);
    };
    let skip_prompt = args.yes;
    let outcome = detail
        .delete_current(|snippet| skip_prompt || confirm(snippet))
        .await;

    Ok(match outcome {
        DeleteOutcome::Deleted { .. } => {
            println!("Snippet {} deleted.", args.id.trim());
            true
        }
        DeleteOutcome::Cancelled => {
            println!("Delete cancelled.");
            true
        }
        DeleteOutcome::Failed(e) => {
            eprintln!("{e}");
            false
        }
        DeleteOutcome::Busy | DeleteOutcome::NotAllowed => false,
    })
}

/// Ask on stdin. Anything but an explicit yes, including a read error,
/// declines.
fn confirm(snippet: &Snippet) -> bool {
    print!(
        "Are you sure you want to delete snippet \"{}\"? [y/N] ",
        snippet.title
    );
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
