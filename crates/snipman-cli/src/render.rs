//! Plain-text rendering of view-model state.

use std::fmt::Write;

use snipman_app::{Feedback, ListSnapshot};
use snipman_core::Snippet;

fn tag_names(snippet: &Snippet) -> String {
    snippet
        .tags
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per snippet, or the empty-list placeholder.
pub fn list(snapshot: &ListSnapshot) -> String {
    if let Some(message) = snapshot.empty_message() {
        return format!("{message}\n");
    }
    let mut out = String::new();
    for snippet in &snapshot.snippets {
        let _ = write!(out, "{}\t{}", snippet.id, snippet.title);
        if !snippet.tags.is_empty() {
            let _ = write!(out, "\t[{}]", tag_names(snippet));
        }
        out.push('\n');
    }
    out
}

pub fn snippet(snippet: &Snippet) -> String {
    let mut out = format!("#{} {}\n", snippet.id, snippet.title);
    if let Some(created) = snippet.creation_date {
        let _ = writeln!(out, "created:  {created}");
    }
    if let Some(modified) = snippet.last_modified_date {
        let _ = writeln!(out, "modified: {modified}");
    }
    if !snippet.tags.is_empty() {
        let _ = writeln!(out, "tags:     {}", tag_names(snippet));
    }
    out.push('\n');
    out.push_str(&snippet.content);
    if !snippet.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Print inline feedback to the stream matching its kind.
pub fn feedback(feedback: &Feedback) {
    if feedback.is_error() {
        eprintln!("{}", feedback.text);
    } else {
        println!("{}", feedback.text);
    }
}
