use std::fmt;

use snipman_core::{Snippet, SnippetId};

/// The screens of the client and their paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Detail(SnippetId),
}

impl Route {
    pub fn detail(snippet: &Snippet) -> Self {
        Route::Detail(snippet.id.clone())
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Create => "/create".to_string(),
            Route::Detail(id) => format!("/snippets/{id}"),
        }
    }

    /// Unknown paths yield `None`; callers usually fall back to the list.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Some(Route::List),
            "/create" => Some(Route::Create),
            _ => {
                let id = trimmed.strip_prefix("/snippets/")?;
                if id.contains('/') {
                    return None;
                }
                SnippetId::parse(id).ok().map(Route::Detail)
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
