use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The remote call a [`RequestFailed`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListSnippets,
    GetSnippet,
    CreateSnippet,
    UpdateSnippet,
    DeleteSnippet,
    ListTags,
    CreateTag,
    AttachTag,
    DetachTag,
    GetTag,
    RenameTag,
    DeleteTag,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListSnippets => "fetch snippets",
            Operation::GetSnippet => "fetch snippet",
            Operation::CreateSnippet => "create snippet",
            Operation::UpdateSnippet => "update snippet",
            Operation::DeleteSnippet => "delete snippet",
            Operation::ListTags => "fetch tags",
            Operation::CreateTag => "create tag",
            Operation::AttachTag => "attach tag",
            Operation::DetachTag => "detach tag",
            Operation::GetTag => "fetch tag",
            Operation::RenameTag => "rename tag",
            Operation::DeleteTag => "delete tag",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform failure of a remote call.
///
/// Transport failures (nothing came back) have no `status`; everything else
/// carries the HTTP status the server answered with, including 2xx
/// responses whose body could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to {operation}: {}", detail(.status, .message))]
pub struct RequestFailed {
    pub operation: Operation,
    pub status: Option<u16>,
    pub message: String,
}

impl RequestFailed {
    pub fn new(operation: Operation, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            operation,
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }
}

fn detail(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("{status} {message}"),
        None => message.to_string(),
    }
}

/// Failure to read, migrate or write the client config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory found")]
    NoConfigDir,

    #[error("config I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config is not a JSON object")]
    NotAnObject,

    #[error(
        "config_version {found} is newer than this build supports ({supported}). Please update snipman."
    )]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure to construct a [`crate::SnippetClient`] from its config.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("API base URL {0} cannot carry a path")]
    NotABase(String),

    #[error("request timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
